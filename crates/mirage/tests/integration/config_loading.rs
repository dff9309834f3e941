use mirage::{Config, ConfigError, LanguageKind};

use super::fixture_config;

#[test]
fn test_load_valid_config() {
    let config = Config::from_file(fixture_config("valid_full.toml")).expect("Failed to load config");

    assert_eq!(config.completion.model, "gemini-test");
    assert_eq!(config.completion.timeout_secs, 10);
    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.languages.len(), 3);

    let python = config.get_language("python").unwrap();
    assert_eq!(python.kind, LanguageKind::Interpreted);
    assert_eq!(python.icon, "🐍");
    assert!(python.reads_input("x = Input()"));

    let html = config.get_language("html").unwrap();
    assert!(!html.supports_simulated_execution());
}

#[test]
fn test_load_minimal_config() {
    let config =
        Config::from_file(fixture_config("valid_minimal.toml")).expect("Failed to load config");

    assert!(config.languages.contains("test"));
    assert_eq!(config.completion.model, "gemini-2.0-flash");
    assert_eq!(config.server.bind, "127.0.0.1:5000");
}

#[test]
fn test_load_with_path() {
    let path = fixture_config("valid_minimal.toml");
    let config = Config::load(Some(std::path::Path::new(&path))).expect("Failed to load config");
    assert!(config.languages.contains("test"));
    assert!(!config.languages.contains("python"));
}

#[test]
fn test_load_invalid_empty_name() {
    let result = Config::from_file(fixture_config("invalid_empty_name.toml"));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_invalid_empty_extension() {
    let result = Config::from_file(fixture_config("invalid_empty_extension.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_pattern() {
    let result = Config::from_file(fixture_config("invalid_pattern.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_stylesheet_patterns() {
    let result = Config::from_file(fixture_config("invalid_stylesheet_patterns.toml"));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file() {
    let result = Config::from_file(fixture_config("does_not_exist.toml"));
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn test_example_config_parses() {
    let config = Config::parse_toml(mirage::EXAMPLE_CONFIG).unwrap();
    assert_eq!(config.languages.len(), 7);
}
