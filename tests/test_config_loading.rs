//! Configuration loading and validation tests
//!
//! Tests focus on observable outcomes of loading files from disk.

use std::io::Write;
use task_classifier::config::{ConfigError, ServiceConfig};
use tempfile::NamedTempFile;

#[test]
fn test_config_loads_successfully_from_valid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[server]
host = "127.0.0.1"
port = 8088
max_body_bytes = 4096

[batch]
max_items = 25
"#
    )
    .unwrap();

    let config = ServiceConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.server.max_body_bytes, 4096);
    assert_eq!(config.batch.max_items, 25);
}

#[test]
fn test_config_sections_are_optional() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[batch]\nmax_items = 5").unwrap();

    let config = ServiceConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.batch.max_items, 5);
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn test_missing_file_is_read_error() {
    let result = ServiceConfig::load_from_file(std::path::Path::new(
        "/nonexistent/path/classifier.toml",
    ));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[server\nport = ").unwrap();

    let result = ServiceConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[server]\nport = \"eighty\"").unwrap();

    let result = ServiceConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[batch]\nmax_items = 0").unwrap();

    let result = ServiceConfig::load_from_file(temp_file.path());
    let error = result.unwrap_err();
    assert!(matches!(error, ConfigError::InvalidConfig(_)));
    assert!(error.to_string().contains("batch.max_items"));
}

#[test]
fn test_effective_config_renders_as_toml() {
    let rendered = toml::to_string_pretty(&ServiceConfig::default()).unwrap();
    assert!(rendered.contains("[server]"));
    assert!(rendered.contains("[batch]"));
    assert!(rendered.contains("port = 8000"));
}
