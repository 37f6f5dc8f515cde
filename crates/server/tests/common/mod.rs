//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port, with an
//! `httpmock::MockServer` standing in for the vendor APIs (the adapter's
//! endpoint URLs are overridden through the configuration) and a temporary
//! sample-queries file.

#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::Value;
use tablechat_server::{config::AppConfig, run};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _scratch_dir: TempDir,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let scratch_dir = tempfile::tempdir()?;

        let samples_path = scratch_dir.path().join("sample_queries.json");
        std::fs::write(
            &samples_path,
            r#"[{"question": "What columns does the file have?", "answer": "See the schema."}]"#,
        )?;

        let config = AppConfig {
            port: 0,
            log_dir: scratch_dir.path().join("logs").to_string_lossy().into_owned(),
            samples_path: samples_path.to_string_lossy().into_owned(),
            default_provider: "OPENAI".to_string(),
            default_engine: "tool-agent".to_string(),
            openai_api_url: Some(mock_server.url("/v1/chat/completions")),
            gemini_api_url: Some(
                mock_server.url("/v1beta/models/gemini-1.5-flash:generateContent"),
            ),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            if let Err(e) = run(listener, config).await {
                eprintln!("Server error: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _scratch_dir: scratch_dir,
        })
    }

    /// Creates a session and returns its id.
    pub async fn create_session(&self) -> Result<String> {
        let body: Value = self
            .client
            .post(format!("{}/session", self.address))
            .send()
            .await?
            .json()
            .await?;
        Ok(body["session_id"]
            .as_str()
            .expect("session_id in response")
            .to_string())
    }

    /// POSTs a JSON payload with the session header.
    pub async fn post_json(
        &self,
        session: &str,
        path: &str,
        payload: Value,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{path}", self.address))
            .header("X-Session-Id", session)
            .json(&payload)
            .send()
            .await?)
    }

    /// GETs a path with the session header.
    pub async fn get(&self, session: &str, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{path}", self.address))
            .header("X-Session-Id", session)
            .send()
            .await?)
    }

    /// Uploads CSV bytes through the multipart endpoint.
    pub async fn upload_csv(
        &self,
        session: &str,
        file_name: &str,
        csv: &str,
    ) -> Result<reqwest::Response> {
        let part = reqwest::multipart::Part::text(csv.to_string())
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        Ok(self
            .client
            .post(format!("{}/upload", self.address))
            .header("X-Session-Id", session)
            .multipart(form)
            .send()
            .await?)
    }

    /// Sets the OpenAI API key, which the test config's default provider uses.
    pub async fn set_key(&self, session: &str) -> Result<()> {
        let response = self
            .post_json(
                session,
                "/key",
                serde_json::json!({"provider": "OPENAI", "api_key": "test-key"}),
            )
            .await?;
        assert!(response.status().is_success());
        Ok(())
    }
}

/// Builds the chat-completions body the mock vendor returns: a completion
/// whose content is a tool-agent outcome with the given `output`.
pub fn agent_completion(output: &str) -> Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": format!("{{\"output\": \"{output}\"}}")
            }
        }]
    })
}
