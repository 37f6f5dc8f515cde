//! # sample-queries
//!
//! Offline tool that regenerates the sample-queries file served by the
//! UI's reference tab. It loads a CSV, builds the same chat adapter the
//! server uses, loops over questions from stdin until `exit`, and writes
//! the collected question/answer pairs as a 4-space-indented JSON array.

use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tablechat::{samples, EngineStyle, Provider, SampleQuery, TableChat, TabularFrame};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sample-queries", about = "Record sample queries against a CSV file")]
struct Args {
    /// Path to the CSV file to answer questions about.
    #[arg(long)]
    csv: PathBuf,

    /// Model provider (OPENAI or GEMINI).
    #[arg(long, default_value = "GEMINI")]
    provider: String,

    /// Engine style (tool-agent or query-engine).
    #[arg(long, default_value = "query-engine")]
    engine: String,

    /// Where to write the recorded samples.
    #[arg(long, default_value = "sample_queries.json")]
    output: PathBuf,
}

fn api_key_for(provider: Provider) -> anyhow::Result<String> {
    let var = match provider {
        Provider::OpenAi => "OPENAI_API_KEY",
        Provider::Gemini => "GEMINI_API_KEY",
    };
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => bail!("{var} is not set in environment variables."),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let args = Args::parse();
    let provider: Provider = args.provider.parse()?;
    let engine: EngineStyle = args.engine.parse()?;
    let api_key = api_key_for(provider)?;

    let file = std::fs::File::open(&args.csv)
        .with_context(|| format!("Failed to load CSV file: {}", args.csv.display()))?;
    let frame = Arc::new(TabularFrame::from_reader(file)?);
    info!(
        rows = frame.row_count(),
        columns = frame.column_count(),
        "Loaded CSV file from {}",
        args.csv.display()
    );

    let chat = TableChat::builder()
        .api_key(api_key)
        .frame(frame)
        .provider(provider)
        .engine(engine)
        .build()?;

    let stdin = io::stdin();
    let mut recorded = Vec::new();
    loop {
        print!("Please enter your question here (type 'exit' to quit): ");
        io::stdout().flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim().to_string();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            break;
        }

        let answer = chat.answer(&question).await;
        println!("{answer}");
        recorded.push(SampleQuery { question, answer });
    }

    samples::write_samples(&args.output, &recorded)
        .with_context(|| format!("Failed to save sample queries to {}", args.output.display()))?;
    info!("Sample queries saved successfully.");
    println!("Files Saved");

    Ok(())
}
