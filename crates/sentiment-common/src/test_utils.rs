//! Test utilities and shared fixtures for the sentiment dashboard workspace.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Review sentiment fixtures.
pub mod review_fixtures {
    /// Ten hotel review records plus one malformed entry.
    ///
    /// Non-missing counts: Staff 9, Room 7, Location 6, Cleanliness 5,
    /// Breakfast 3, Price 2, Wifi 1 (null for record 9). Record 6 is not
    /// valid JSON.
    pub fn hotel_reviews() -> Vec<String> {
        [
            r#"{"Staff": "Positive", "Room": "Negative", "Location": "Positive"}"#,
            r#"{"Staff": "Positive", "Cleanliness": "Positive"}"#,
            r#"{"Room": "Negative", "Staff": "Negative", "Breakfast": "Positive"}"#,
            r#"{"Location": "Positive", "Staff": "Positive", "Price": "Negative"}"#,
            r#"{"Staff": "Positive", "Room": "Positive", "Cleanliness": "Negative"}"#,
            r#"{"Room": "Neutral", "Location": "Positive", "Staff": "Positive"}"#,
            r#"{"Staff": "Positive", "Room": "#,
            r#"{"Cleanliness": "Positive", "Location": "Negative", "Staff": "Negative"}"#,
            r#"{"Room": "Positive", "Breakfast": "Negative", "Staff": "Positive", "Wifi": "Negative"}"#,
            r#"{"Location": "Positive", "Cleanliness": "Positive", "Room": "Negative", "Wifi": null}"#,
            r#"{"Staff": "Positive", "Room": "Positive", "Location": "Positive", "Cleanliness": "Positive", "Breakfast": "Positive", "Price": "Positive"}"#,
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    /// Builds a record string from `(category, label)` pairs.
    pub fn record(fields: &[(&str, &str)]) -> String {
        let body = fields
            .iter()
            .map(|(category, label)| format!("\"{category}\": \"{label}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{body}}}")
    }
}
