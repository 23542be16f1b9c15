//! Common type definitions for sentiment tallies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SentimentError;

/// A review sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Drawn on the left side of a diverging chart.
    Negative,
    /// Drawn on the right side of a diverging chart.
    Positive,
}

impl SentimentLabel {
    /// Both labels, left to right.
    pub const ALL: [Self; 2] = [Self::Negative, Self::Positive];

    /// The label exactly as it appears in serialized records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Positive => "Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = SentimentError;

    /// Matching is exact: `"positive"` is not a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Negative" => Ok(Self::Negative),
            "Positive" => Ok(Self::Positive),
            other => Err(SentimentError::validation(format!(
                "unknown sentiment label '{other}'"
            ))),
        }
    }
}

/// Ordered pair of series labels. Position 0 extends left of zero, position 1
/// extends right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryNames(pub [String; 2]);

impl CategoryNames {
    /// Number of series labels.
    pub const LEN: usize = 2;

    /// Creates a pair from explicit left and right labels.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self([left.into(), right.into()])
    }

    /// Label of the left-hand (negative direction) series.
    pub fn left(&self) -> &str {
        &self.0[0]
    }

    /// Label of the right-hand (positive direction) series.
    pub fn right(&self) -> &str {
        &self.0[1]
    }

    /// Iterates labels left to right.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for CategoryNames {
    fn default() -> Self {
        Self::new(
            SentimentLabel::Negative.as_str(),
            SentimentLabel::Positive.as_str(),
        )
    }
}

/// Negative and positive tallies for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentimentCounts {
    /// Cells equal to `"Negative"`.
    pub negative: u32,
    /// Cells equal to `"Positive"`.
    pub positive: u32,
}

impl SentimentCounts {
    /// Creates counts from explicit values.
    pub const fn new(negative: u32, positive: u32) -> Self {
        Self { negative, positive }
    }

    /// Counts as `[negative, positive]`.
    pub const fn as_pair(self) -> [u32; 2] {
        [self.negative, self.positive]
    }

    /// Sum of both tallies, saturating at `u32::MAX`.
    pub const fn total(self) -> u32 {
        self.negative.saturating_add(self.positive)
    }

    /// Largest single tally.
    pub fn max(self) -> u32 {
        self.negative.max(self.positive)
    }

    /// Tally for the given label.
    pub const fn get(self, label: SentimentLabel) -> u32 {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Positive => self.positive,
        }
    }
}

impl From<[u32; 2]> for SentimentCounts {
    fn from([negative, positive]: [u32; 2]) -> Self {
        Self { negative, positive }
    }
}

/// Ordered mapping from category name to its sentiment tallies.
///
/// Iteration follows insertion order, which is the ranking order produced by
/// the top-K selection. Inserting an existing category replaces its counts in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    entries: Vec<(String, SentimentCounts)>,
}

impl ScoreTable {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces the counts for `category`.
    pub fn insert(&mut self, category: impl Into<String>, counts: SentimentCounts) {
        let category = category.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => *existing = counts,
            None => self.entries.push((category, counts)),
        }
    }

    /// Counts for `category`, if present.
    pub fn get(&self, category: &str) -> Option<SentimentCounts> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, counts)| *counts)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names in table order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(category, counts)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SentimentCounts)> {
        self.entries.iter().map(|(name, counts)| (name.as_str(), *counts))
    }

    /// Largest single tally across every category, or 0 for an empty table.
    pub fn max_count(&self) -> u32 {
        self.entries
            .iter()
            .map(|(_, counts)| counts.max())
            .max()
            .unwrap_or(0)
    }
}

impl<S: Into<String>> FromIterator<(S, SentimentCounts)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (S, SentimentCounts)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (category, counts) in iter {
            table.insert(category, counts);
        }
        table
    }
}
