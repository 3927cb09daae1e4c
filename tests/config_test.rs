//! Configuration loading from disk.

use std::io::Write;

use payhash::config::{load_config, ConfigError, Layout};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r##"
[blockchain]
rpc_url = "http://127.0.0.1:8545"
chain_id = 31337

[smtp]
host = "smtp.acme.test"
port = 465
user = "billing"
pass = "hunter2"

[presentation]
subject = "Your receipt"
primary_color = "#0a84ff"
layout = "compact"

[observability]
log_level = "debug"
"##,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.blockchain.chain_id, 31337);
    assert_eq!(config.blockchain.rpc_timeout_secs, 10);
    assert!(config.smtp.is_secure());
    assert_eq!(config.presentation.subject.as_deref(), Some("Your receipt"));
    assert_eq!(config.presentation.layout, Some(Layout::Compact));
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.blockchain.rpc_url, "https://rpc.testnet.tempo.xyz");
    assert_eq!(config.blockchain.chain_id, 42429);
    assert_eq!(config.smtp.port, 587);
    assert!(!config.smtp.is_secure());
}

#[test]
fn test_missing_file() {
    let err = load_config(std::path::Path::new("/nonexistent/payhash.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_invalid_values_are_all_reported() {
    let file = write_config(
        r#"
[blockchain]
rpc_url = "not a url"
rpc_timeout_secs = 0

[smtp]
host = ""

[presentation]
email_template_path = "/nonexistent/mail.hbs"
"#,
    );

    match load_config(file.path()) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 4),
        other => panic!("expected validation errors, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_syntax_error() {
    let file = write_config("[smtp\nhost = 1");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}
