//! Environment override tests for sentiment-config.
//!
//! Kept in their own test binary so that mutating process environment
//! variables cannot race with the file loading tests.

use sentiment_common::SentimentError;
use sentiment_config::{ConfigLoader, CONFIG_PATH_ENV};
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temporary config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temporary config file");
    file
}

#[test]
fn test_environment_overrides() {
    let file = write_config("[chart]\ntitle = \"From file\"\n");

    std::env::set_var("SENTIMENT_DASHBOARD_TITLE", "Harbor Inn - Reviews Dashboard");
    std::env::set_var("SENTIMENT_TOP_K", "3");
    let config = ConfigLoader::load_from_file(file.path());

    std::env::set_var("SENTIMENT_TOP_K", "three");
    let bad = ConfigLoader::load_from_file(file.path());

    std::env::remove_var("SENTIMENT_DASHBOARD_TITLE");
    std::env::remove_var("SENTIMENT_TOP_K");

    std::env::set_var(CONFIG_PATH_ENV, file.path());
    std::env::set_var("SENTIMENT_LOG_LEVEL", "trace");
    let located = ConfigLoader::load();
    std::env::remove_var(CONFIG_PATH_ENV);
    std::env::remove_var("SENTIMENT_LOG_LEVEL");

    let config = config.unwrap();
    assert_eq!(config.chart.title, "Harbor Inn - Reviews Dashboard");
    assert_eq!(config.aggregation.top_k, 3);
    assert!(matches!(bad.unwrap_err(), SentimentError::Config { .. }));

    let located = located.unwrap();
    assert_eq!(located.chart.title, "From file");
    assert_eq!(located.aggregation.top_k, 5);
    assert_eq!(located.logging.level, "trace");
}
