//! Ragged per-review sentiment records and the table built from them.

use sentiment_common::{Result, SentimentError, SentimentLabel};
use sentiment_config::ParsePolicy;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// One review's category → label mapping.
///
/// Categories vary from record to record. A category that is absent from the
/// source object and one whose value is `null` are both missing cells; any
/// other value is a present cell, even if it is not a known label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentRecord {
    fields: Vec<(String, Option<String>)>,
}

impl SentimentRecord {
    /// Parses a JSON object literal such as `{"Staff": "Positive"}`.
    ///
    /// Key order is preserved. Non-string scalars are kept in their JSON text
    /// form so they count as present but never match a label.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(raw)?;
        let fields = object
            .into_iter()
            .map(|(category, value)| {
                let cell = match value {
                    Value::Null => None,
                    Value::String(label) => Some(label),
                    other => Some(other.to_string()),
                };
                (category, cell)
            })
            .collect();
        Ok(Self { fields })
    }

    /// Builds a record from `(category, cell)` pairs.
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, Option<V>)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(category, cell)| (category.into(), cell.map(Into::into)))
                .collect(),
        }
    }

    /// The cell for `category`, or `None` when it is missing.
    pub fn cell(&self, category: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == category)
            .and_then(|(_, cell)| cell.as_deref())
    }

    /// Whether `category` has a non-missing cell.
    pub fn has(&self, category: &str) -> bool {
        self.cell(category).is_some()
    }

    /// The cell for `category` interpreted as a sentiment label.
    pub fn label(&self, category: &str) -> Option<SentimentLabel> {
        self.cell(category).and_then(|cell| cell.parse().ok())
    }

    /// Category keys in source order, including those with `null` values.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// Parsed records laid out as rows, with one column per category seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentTable {
    columns: Vec<String>,
    records: Vec<SentimentRecord>,
}

impl SentimentTable {
    /// Builds a table; columns are ordered by first appearance across records.
    pub fn from_records(records: Vec<SentimentRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for category in records.iter().flat_map(SentimentRecord::categories) {
            if seen.insert(category) {
                columns.push(category.to_string());
            }
        }
        Self { columns, records }
    }

    /// Parses every entry according to `policy`.
    ///
    /// Returns the table together with the number of skipped entries. Under
    /// [`ParsePolicy::Strict`] the first bad entry is returned as
    /// [`SentimentError::Record`].
    pub fn parse<S: AsRef<str>>(sentiments: &[S], policy: ParsePolicy) -> Result<(Self, usize)> {
        match policy {
            ParsePolicy::SkipInvalid => Ok(Self::parse_lenient(sentiments)),
            ParsePolicy::Strict => {
                let records = sentiments
                    .iter()
                    .enumerate()
                    .map(|(index, raw)| {
                        SentimentRecord::from_json(raw.as_ref()).map_err(|e| {
                            SentimentError::record_with_source(
                                index,
                                "expected a JSON object of category labels",
                                e,
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((Self::from_records(records), 0))
            }
        }
    }

    /// Parses every entry, dropping those that fail.
    pub fn parse_lenient<S: AsRef<str>>(sentiments: &[S]) -> (Self, usize) {
        let mut records = Vec::with_capacity(sentiments.len());
        let mut skipped = 0;
        for (index, raw) in sentiments.iter().enumerate() {
            match SentimentRecord::from_json(raw.as_ref()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!(index, error = %e, "Skipping unparseable sentiment record");
                    skipped += 1;
                }
            }
        }
        (Self::from_records(records), skipped)
    }

    /// Column names in first-appearance order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Parsed rows.
    pub fn records(&self) -> &[SentimentRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record parsed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows with a non-missing cell in `category`.
    pub fn non_missing_count(&self, category: &str) -> usize {
        self.records.iter().filter(|r| r.has(category)).count()
    }

    /// Rows whose `category` cell is exactly `label`.
    pub fn label_count(&self, category: &str, label: SentimentLabel) -> usize {
        self.records
            .iter()
            .filter(|r| r.cell(category) == Some(label.as_str()))
            .count()
    }

    /// The `k` columns with the most non-missing cells, most populated first.
    ///
    /// The sort is stable, so columns with equal counts keep their
    /// first-appearance order.
    pub fn top_k_columns(&self, k: usize) -> Vec<&str> {
        let mut ranked: Vec<(&str, usize)> = self
            .columns
            .iter()
            .map(|column| (column.as_str(), self.non_missing_count(column)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(k).map(|(column, _)| column).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_missing_distinct_from_present() {
        let record =
            SentimentRecord::from_json(r#"{"Staff": "Positive", "Wifi": null, "Price": 3}"#).unwrap();

        assert_eq!(record.cell("Staff"), Some("Positive"));
        assert_eq!(record.cell("Wifi"), None);
        assert_eq!(record.cell("Price"), Some("3"));
        assert_eq!(record.cell("Room"), None);
        assert!(!record.has("Wifi"));
        assert!(record.has("Price"));
        assert_eq!(record.label("Staff"), Some(SentimentLabel::Positive));
        assert_eq!(record.label("Price"), None);
        assert_eq!(record.categories().collect::<Vec<_>>(), vec!["Staff", "Wifi", "Price"]);
    }

    #[test]
    fn test_record_rejects_non_objects() {
        assert!(SentimentRecord::from_json(r#"["Staff", "Positive"]"#).is_err());
        assert!(SentimentRecord::from_json("42").is_err());
        assert!(SentimentRecord::from_json("{'Staff': 'Positive'}").is_err());
        assert!(SentimentRecord::from_json("").is_err());
    }

    #[test]
    fn test_columns_in_first_appearance_order() {
        let table = SentimentTable::from_records(vec![
            SentimentRecord::from_fields([("Room", Some("Negative")), ("Staff", Some("Positive"))]),
            SentimentRecord::from_fields([("Staff", Some("Positive")), ("Area", None::<&str>)]),
        ]);
        assert_eq!(table.columns(), ["Room", "Staff", "Area"]);
        assert_eq!(table.non_missing_count("Area"), 0);
        assert_eq!(table.non_missing_count("Staff"), 2);
    }

    #[test]
    fn test_label_count_ignores_other_values() {
        let table = SentimentTable::from_records(vec![
            SentimentRecord::from_fields([("Room", Some("Negative"))]),
            SentimentRecord::from_fields([("Room", Some("Neutral"))]),
            SentimentRecord::from_fields([("Room", Some("negative"))]),
            SentimentRecord::from_fields([("Room", Some("Positive"))]),
        ]);
        assert_eq!(table.non_missing_count("Room"), 4);
        assert_eq!(table.label_count("Room", SentimentLabel::Negative), 1);
        assert_eq!(table.label_count("Room", SentimentLabel::Positive), 1);
    }

    #[test]
    fn test_top_k_ties_keep_first_appearance() {
        let table = SentimentTable::from_records(vec![
            SentimentRecord::from_fields([("B", Some("Positive")), ("A", Some("Positive"))]),
            SentimentRecord::from_fields([("C", Some("Negative")), ("A", Some("Negative"))]),
            SentimentRecord::from_fields([("C", Some("Negative")), ("D", Some("Negative"))]),
        ]);
        // A: 2, C: 2, B: 1, D: 1
        assert_eq!(table.top_k_columns(4), vec!["A", "C", "B", "D"]);
        assert_eq!(table.top_k_columns(3), vec!["A", "C", "B"]);
        assert!(table.top_k_columns(0).is_empty());
        assert_eq!(table.top_k_columns(10).len(), 4);
    }

    #[test]
    fn test_parse_policies() {
        let input = [r#"{"Staff": "Positive"}"#, "not json", r#"{"Room": "Negative"}"#];

        let (table, skipped) = SentimentTable::parse(&input, ParsePolicy::SkipInvalid).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(skipped, 1);

        let err = SentimentTable::parse(&input, ParsePolicy::Strict).unwrap_err();
        assert!(matches!(err, SentimentError::Record { index: 1, .. }));

        let (lenient, lenient_skipped) = SentimentTable::parse_lenient(&input);
        assert_eq!(lenient, table);
        assert_eq!(lenient_skipped, 1);
    }

    #[test]
    fn test_empty_input() {
        let input: [&str; 0] = [];
        let (table, skipped) = SentimentTable::parse_lenient(&input);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert_eq!(skipped, 0);
    }
}
