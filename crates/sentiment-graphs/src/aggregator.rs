//! Sentiment aggregation: raw review records into a top-K score table.

use crate::record::SentimentTable;
use sentiment_common::{CategoryNames, Result, ScoreTable, SentimentCounts, SentimentLabel};
use sentiment_config::AggregationConfig;
use tracing::{info, instrument};

pub use sentiment_config::DEFAULT_TOP_K;

/// Outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Tallies for the selected categories, most populated first.
    pub scores: ScoreTable,
    /// Series labels, left to right.
    pub category_names: CategoryNames,
    /// Records that parsed.
    pub parsed: usize,
    /// Records dropped because they did not parse.
    pub skipped: usize,
}

/// Turns serialized sentiment records into a [`ScoreTable`].
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    /// Create an aggregator with the given settings.
    pub const fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Create an aggregator keeping `k` categories and skipping bad records.
    pub fn with_top_k(k: usize) -> Self {
        Self::new(AggregationConfig {
            top_k: k,
            ..AggregationConfig::default()
        })
    }

    /// The settings this aggregator runs with.
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Parse `sentiments` and tally the configured number of categories.
    ///
    /// Fails only under [`sentiment_config::ParsePolicy::Strict`], on the
    /// first record that does not parse.
    #[instrument(skip_all, fields(records = sentiments.len(), top_k = self.config.top_k))]
    pub fn aggregate<S: AsRef<str>>(&self, sentiments: &[S]) -> Result<Aggregation> {
        let (table, skipped) = SentimentTable::parse(sentiments, self.config.parse_policy)?;
        let scores = score_table(&table, self.config.top_k);

        info!(
            parsed = table.len(),
            skipped,
            selected = scores.len(),
            "Aggregated sentiment records"
        );

        Ok(Aggregation {
            scores,
            category_names: CategoryNames::default(),
            parsed: table.len(),
            skipped,
        })
    }
}

/// Tally the `k` most populated columns of `table`.
pub fn score_table(table: &SentimentTable, k: usize) -> ScoreTable {
    table
        .top_k_columns(k)
        .into_iter()
        .map(|category| {
            let counts = SentimentCounts::new(
                saturating_u32(table.label_count(category, SentimentLabel::Negative)),
                saturating_u32(table.label_count(category, SentimentLabel::Positive)),
            );
            (category, counts)
        })
        .collect()
}

/// Parse `sentiments`, keep the `k` categories with the most non-missing
/// labels, and count `"Negative"` and `"Positive"` labels in each.
///
/// Entries that fail to parse are dropped silently. Ties in population are
/// broken by the order in which categories first appear.
pub fn get_top_k_categories_and_score<S: AsRef<str>>(
    sentiments: &[S],
    k: usize,
) -> (ScoreTable, CategoryNames) {
    let (table, _) = SentimentTable::parse_lenient(sentiments);
    (score_table(&table, k), CategoryNames::default())
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
