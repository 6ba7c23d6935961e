/// The unified statistics record produced by both report parsers.
///
/// One record is built per input file. Parsers fill it in while scanning the
/// report; once returned it is only read.
use crate::error::ParseError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One bucket value of a histogram.
///
/// Text-table values are always decoded to integers. CSV exports
/// occasionally carry values that are not plain integers; those are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HistogramValue {
    Count(u64),
    Raw(String),
}

impl HistogramValue {
    /// The integer value, if this bucket decoded to one.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Raw(_) => None,
        }
    }
}

impl From<u64> for HistogramValue {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}

impl fmt::Display for HistogramValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

/// A named statistic broken into labelled buckets.
///
/// `labels` and `values` are index-aligned and always the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub title: String,
    labels: Vec<String>,
    values: Vec<HistogramValue>,
}

impl Histogram {
    /// Build a histogram, rejecting mismatched label/value counts.
    pub fn new(
        title: impl Into<String>,
        labels: Vec<String>,
        values: Vec<HistogramValue>,
    ) -> Result<Self, ParseError> {
        let title = title.into();
        if labels.len() != values.len() {
            return Err(ParseError::LengthMismatch {
                title,
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            title,
            labels,
            values,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[HistogramValue] {
        &self.values
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Value of the bucket with the given label.
    pub fn get(&self, label: &str) -> Option<&HistogramValue> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| &self.values[i])
    }
}

/// Everything extracted from one report file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsRecord {
    /// Name the file was given on the command line.
    pub file_name: String,

    /// Path the underlying scan covered. `None` when the report does not
    /// say.
    pub source: Option<String>,

    /// Largest error count printed in the report.
    pub error_count: u64,

    /// Histograms keyed by title.
    pub histograms: BTreeMap<String, Histogram>,

    /// Scalars keyed by title.
    pub scalars: BTreeMap<String, u64>,
}

impl StatsRecord {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Record the scanned path. Only the first sighting is kept.
    pub fn set_source_once(&mut self, source: &str) {
        if self.source.is_none() {
            self.source = Some(source.to_string());
        }
    }

    /// Reports print cumulative and per-run counts; the largest wins.
    pub fn observe_error_count(&mut self, count: u64) {
        self.error_count = self.error_count.max(count);
    }

    pub fn insert_histogram(&mut self, histogram: Histogram) {
        self.histograms.insert(histogram.title.clone(), histogram);
    }

    pub fn insert_scalar(&mut self, title: &str, value: u64) {
        self.scalars.insert(title.to_string(), value);
    }

    pub fn histogram(&self, title: &str) -> Option<&Histogram> {
        self.histograms.get(title)
    }

    pub fn scalar(&self, title: &str) -> Option<u64> {
        self.scalars.get(title).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(values: &[u64]) -> Vec<HistogramValue> {
        values.iter().copied().map(HistogramValue::from).collect()
    }

    #[test]
    fn histogram_rejects_length_mismatch() {
        let err = Histogram::new("Depth", vec!["0-5".into(), "6-10".into()], counts(&[1]))
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::LengthMismatch {
                labels: 2,
                values: 1,
                ..
            }
        ));
    }

    #[test]
    fn histogram_lookup_by_label() {
        let h = Histogram::new(
            "Maximum Values",
            vec!["Size".into(), "Depth".into()],
            counts(&[4096, 19]),
        )
        .unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("Depth"), Some(&HistogramValue::Count(19)));
        assert_eq!(h.get("Namelen"), None);
    }

    #[test]
    fn source_is_recorded_once() {
        let mut rec = StatsRecord::new("a.txt");
        rec.set_source_once("\\\\server\\share");
        rec.set_source_once("\\\\other\\share");
        assert_eq!(rec.source.as_deref(), Some("\\\\server\\share"));
    }

    #[test]
    fn error_count_keeps_maximum() {
        let mut rec = StatsRecord::new("a.txt");
        rec.observe_error_count(12);
        rec.observe_error_count(3);
        rec.observe_error_count(40);
        assert_eq!(rec.error_count, 40);
    }

    #[test]
    fn raw_values_display_verbatim() {
        assert_eq!(HistogramValue::Raw("1.5".into()).to_string(), "1.5");
        assert_eq!(HistogramValue::Count(7).to_string(), "7");
        assert_eq!(HistogramValue::Raw("x".into()).as_count(), None);
    }
}
