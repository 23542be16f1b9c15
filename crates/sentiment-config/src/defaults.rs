//! Default values for every configuration section.

use crate::schema::{AggregationConfig, ChartConfig, Config, ParsePolicy};
use sentiment_common::LoggingConfig;

/// Number of categories kept when none is configured.
pub const DEFAULT_TOP_K: usize = 5;

/// Chart title used when none is configured.
pub const DEFAULT_TITLE: &str = "Empire Hotel - Reviews Dashboard";

impl Default for Config {
    fn default() -> Self {
        Self {
            aggregation: AggregationConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self::SkipInvalid
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            parse_policy: ParsePolicy::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1000,
            height: 500,
            background_color: "#FFFFFF".to_string(),
            tick_step: 10,
            bar_height: 0.5,
            color_range: (0.15, 0.85),
            reference_line_alpha: 0.25,
            font_family: "sans-serif".to_string(),
        }
    }
}
