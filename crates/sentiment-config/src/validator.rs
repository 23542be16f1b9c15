//! Runtime validation of loaded configuration.

use crate::schema::Config;
use sentiment_common::{parse_hex_color, Result, SentimentError};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        let aggregation = &config.aggregation;
        let chart = &config.chart;

        if aggregation.top_k == 0 {
            return Err(SentimentError::validation_field(
                "top_k must be at least 1",
                "aggregation.top_k",
            ));
        }

        if chart.width == 0 || chart.height == 0 {
            return Err(SentimentError::validation_field(
                format!("chart size must be non-zero, got {}x{}", chart.width, chart.height),
                "chart.width",
            ));
        }

        if chart.tick_step == 0 {
            return Err(SentimentError::validation_field(
                "tick_step must be at least 1",
                "chart.tick_step",
            ));
        }

        if !(chart.bar_height > 0.0 && chart.bar_height <= 1.0) {
            return Err(SentimentError::validation_field(
                format!("bar_height must be in (0, 1], got {}", chart.bar_height),
                "chart.bar_height",
            ));
        }

        let (start, end) = chart.color_range;
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start > end {
            return Err(SentimentError::validation_field(
                format!("color_range must be an ordered interval within [0, 1], got ({start}, {end})"),
                "chart.color_range",
            ));
        }

        if !(0.0..=1.0).contains(&chart.reference_line_alpha) {
            return Err(SentimentError::validation_field(
                format!(
                    "reference_line_alpha must be in [0, 1], got {}",
                    chart.reference_line_alpha
                ),
                "chart.reference_line_alpha",
            ));
        }

        if parse_hex_color(&chart.background_color).is_none() {
            return Err(SentimentError::validation_field(
                format!(
                    "background_color must be a #RRGGBB hex color, got '{}'",
                    chart.background_color
                ),
                "chart.background_color",
            ));
        }

        Ok(())
    }
}
