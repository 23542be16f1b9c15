//! # Sentiment Graphs
//!
//! Sentiment aggregation and diverging bar chart rendering for review dashboards.
//!
//! Raw per-review sentiment records are tallied into a [`ScoreTable`] by the
//! [`aggregator`], and [`plot_dashboard`] turns that table into a
//! [`Figure`]/[`Axes`] pair that can be drawn with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod colormap;
pub mod dashboard;
pub mod figure;
pub mod record;

pub use aggregator::*;
pub use colormap::*;
pub use dashboard::*;
pub use figure::*;
pub use record::*;

pub use sentiment_common::{CategoryNames, ScoreTable, SentimentCounts, SentimentLabel};
