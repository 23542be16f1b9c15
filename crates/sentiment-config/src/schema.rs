//! Configuration schema definitions using serde.

use sentiment_common::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the sentiment dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Aggregation configuration.
    pub aggregation: AggregationConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How to treat sentiment records that fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Drop the record and keep going.
    SkipInvalid,
    /// Fail the whole aggregation on the first bad record.
    Strict,
}

/// Aggregation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Number of most-populated categories to keep.
    pub top_k: usize,
    /// Handling of records that fail to parse.
    pub parse_policy: ParsePolicy,
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Title drawn above the chart.
    pub title: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Background color in `#RRGGBB` format.
    pub background_color: String,
    /// Distance between x-axis ticks; the axis limit is rounded up to a multiple of it.
    pub tick_step: u32,
    /// Bar thickness as a fraction of one category row.
    pub bar_height: f64,
    /// Interval of the diverging colormap the series colors are sampled from.
    pub color_range: (f64, f64),
    /// Opacity of the zero reference line.
    pub reference_line_alpha: f64,
    /// Font family for title, labels, and legend.
    pub font_family: String,
}
