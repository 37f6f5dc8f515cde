//! # Configuration Loading Tests

use std::io::Write;
use tablechat_server::config::get_config;
use tempfile::NamedTempFile;

/// A YAML file overrides the serde defaults.
#[test]
fn test_config_loads_from_yaml_file() {
    let mut file = NamedTempFile::with_suffix(".yml").unwrap();
    writeln!(
        file,
        r#"
port: 9191
log_dir: "/tmp/tablechat-test-logs"
samples_path: "/tmp/samples.json"
default_provider: "OPENAI"
default_engine: "tool-agent"
openai_api_url: "http://127.0.0.1:1/v1/chat/completions"
"#
    )
    .unwrap();

    let config = get_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.port, 9191);
    assert_eq!(config.log_dir, "/tmp/tablechat-test-logs");
    assert_eq!(config.default_provider, "OPENAI");
    assert_eq!(config.default_engine, "tool-agent");
    assert_eq!(
        config.openai_api_url.as_deref(),
        Some("http://127.0.0.1:1/v1/chat/completions")
    );
    assert_eq!(config.gemini_api_url, None);
}

/// A missing file falls back to the built-in defaults.
#[test]
fn test_config_defaults_without_file() {
    let config = get_config(Some("/nonexistent/tablechat-config.yml")).unwrap();
    assert_eq!(config.log_dir, "logs");
    assert_eq!(config.samples_path, "data/sample_queries.json");
    assert_eq!(config.default_provider, "GEMINI");
    assert_eq!(config.default_engine, "query-engine");
}
