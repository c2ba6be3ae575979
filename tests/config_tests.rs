use movieshelf::{Config, ImportMerge, Page, ShelfError, StalePolicy, DEFAULT_API_URL};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.page(), Page { limit: 100, offset: 0 });
    assert_eq!(config.stale_policy, StalePolicy::Commit);
    assert_eq!(config.import_merge, ImportMerge::Append);
    assert_eq!(config.trace_level, None);
    assert!(!config.log_to_stderr);
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
}

#[test]
fn every_key_is_read() {
    let config = Config::from_toml_str(
        r#"
api_url = "http://films.test/api/v1"
page_limit = 25
page_offset = 50
trace_level = "movieshelf=trace"
trace_file = "/tmp/shelf-otlp.json"
log_to_stderr = true
stale_policy = "discard"
import_merge = "replace_by_id"
"#,
    )
    .unwrap();

    assert_eq!(config.api_url, "http://films.test/api/v1");
    assert_eq!(config.page(), Page { limit: 25, offset: 50 });
    assert_eq!(config.trace_level.as_deref(), Some("movieshelf=trace"));
    assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/shelf-otlp.json")));
    assert!(config.log_to_stderr);
    assert_eq!(config.policy().stale, StalePolicy::Discard);
    assert_eq!(config.policy().import_merge, ImportMerge::ReplaceById);
}

#[test]
fn unknown_key_is_rejected() {
    let err = Config::from_toml_str("api_ulr = \"http://typo.test\"").unwrap_err();
    assert!(matches!(err, ShelfError::Config(_)));
    assert!(err.to_string().contains("api_ulr"));
}

#[test]
fn unknown_policy_value_is_rejected() {
    let err = Config::from_toml_str("stale_policy = \"sometimes\"").unwrap_err();
    assert!(matches!(err, ShelfError::Config(_)));
}

#[test]
fn explicit_file_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "api_url = \"http://from-file.test\"").unwrap();
    writeln!(file, "page_limit = 10").unwrap();

    let config = Config::from_toml_file(file.path()).unwrap();

    assert_eq!(config.api_url, "http://from-file.test");
    assert_eq!(config.page_limit, 10);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(matches!(err, ShelfError::Io(_)));
}

#[test]
fn environment_overrides_file_values() {
    let mut config = Config::from_toml_str("api_url = \"http://from-file.test\"\ntrace_level = \"warn\"").unwrap();

    config.apply_env(env(&[
        ("MOVIESHELF_API_URL", "http://from-env.test"),
        ("MOVIESHELF_TRACE_LEVEL", "debug"),
    ]));

    assert_eq!(config.api_url, "http://from-env.test");
    assert_eq!(config.trace_level.as_deref(), Some("debug"));
}

#[test]
fn empty_environment_values_are_ignored() {
    let mut config = Config::default();

    config.apply_env(env(&[("MOVIESHELF_API_URL", "  "), ("MOVIESHELF_TRACE_LEVEL", "")]));

    assert_eq!(config, Config::default());
}
