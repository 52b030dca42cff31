//! Core data types for filing resolution and statement extraction.
//!
//! This module defines the values that flow between pipeline stages:
//!
//! - [`Ticker`] - Trading symbol
//! - [`Cik`] - Zero-padded SEC registrant identifier
//! - [`FilingReference`] - One discovered annual filing
//! - [`DocumentReference`] - Primary XBRL document of a filing
//! - [`LineValue`] - A single extracted line item
//! - [`StatementSection`], [`CashFlowStatement`], [`IncomeStatement`] - Normalized statements
//! - [`ExtractionResult`] - Terminal artifact of the pipeline

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trading symbol/ticker.
///
/// Tickers are trimmed and uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ticker is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Width of a canonical CIK.
pub const CIK_WIDTH: usize = 10;

/// SEC Central Index Key, always stored zero-padded to [`CIK_WIDTH`] digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cik(String);

impl Cik {
    /// Parses a CIK from its padded or unpadded textual form.
    ///
    /// Returns `None` if the input is empty, contains anything but ASCII digits,
    /// or is wider than ten digits.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > CIK_WIDTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(format!("{:0>width$}", raw, width = CIK_WIDTH)))
    }

    /// Creates a CIK from its numeric value.
    #[must_use]
    pub fn from_number(n: u64) -> Self {
        Self(format!("{:0>width$}", n, width = CIK_WIDTH))
    }

    /// Returns the zero-padded ten digit form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the CIK without leading zeros, as used in archive paths.
    #[must_use]
    pub fn unpadded(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One discovered annual filing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingReference {
    /// Absolute URL of the filing index page.
    pub index_url: String,
    /// Accession number in its hyphenated form (e.g. `0000320193-24-000123`).
    pub accession_number: String,
    /// Form designator as reported by the registry.
    pub form: String,
    /// Date the filing was accepted.
    pub filing_date: Option<NaiveDate>,
    /// Period of report.
    pub report_date: Option<NaiveDate>,
}

/// File suffixes of the auxiliary linkbase documents that accompany an XBRL
/// instance (calculation, label, presentation, definition).
pub const LINKBASE_MARKERS: [&str; 4] = ["_cal.xml", "_lab.xml", "_pre.xml", "_def.xml"];

/// Extension of a structured-data document.
pub const XBRL_EXTENSION: &str = ".xml";

/// Returns true if `href` names a primary XBRL instance rather than a linkbase.
#[must_use]
pub fn is_primary_xbrl_path(href: &str) -> bool {
    href.ends_with(XBRL_EXTENSION) && !LINKBASE_MARKERS.iter().any(|m| href.contains(m))
}

/// URL of the primary XBRL document for a filing.
///
/// Construction enforces the `.xml` suffix and rejects linkbase documents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentReference(String);

impl DocumentReference {
    /// Wraps `url` if it names a primary XBRL document.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        is_primary_xbrl_path(&url).then_some(Self(url))
    }

    /// Returns the URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single extracted line item.
///
/// Serializes as a JSON number, a JSON string, or `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineValue {
    /// A numeric fact.
    Number(f64),
    /// A fact whose text could not be read as a number, kept verbatim (trimmed).
    Text(String),
    /// No candidate tag was found in the document.
    #[default]
    Absent,
}

impl LineValue {
    /// Parses fact text: thousands separators are dropped and surrounding
    /// whitespace trimmed; text that is still not a number is kept as-is.
    ///
    /// ```
    /// use statements_core::LineValue;
    ///
    /// assert_eq!(LineValue::parse("1,234,567"), LineValue::Number(1_234_567.0));
    /// assert_eq!(LineValue::parse(" n/a "), LineValue::Text("n/a".to_string()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.replace(',', "").trim().parse::<f64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Returns the numeric value, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if no value was found.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<f64> for LineValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for LineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Absent => f.write_str("-"),
        }
    }
}

/// A mapping from semantic line-item label to its value.
///
/// Labels keep the order they were first inserted in, and serialize in that
/// order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementSection {
    items: IndexMap<String, LineValue>,
}

impl StatementSection {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Sets the value for `label`. A label already present keeps its position.
    pub fn insert(&mut self, label: impl Into<String>, value: LineValue) {
        self.items.insert(label.into(), value);
    }

    /// Returns the value for `label`, or `None` if the label is not part of the section.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&LineValue> {
        self.items.get(label)
    }

    /// Returns the numeric value for `label`.
    #[must_use]
    pub fn number(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(LineValue::as_number)
    }

    /// Returns true if `label` is missing or holds [`LineValue::Absent`].
    #[must_use]
    pub fn is_absent(&self, label: &str) -> bool {
        self.get(label).is_none_or(LineValue::is_absent)
    }

    /// Returns the number of labels in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the section has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if no label carries a value.
    #[must_use]
    pub fn all_absent(&self) -> bool {
        self.items.values().all(LineValue::is_absent)
    }

    /// Returns the number of labels that carry a value.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.items.values().filter(|v| !v.is_absent()).count()
    }

    /// Iterates over `(label, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LineValue)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, LineValue)> for StatementSection {
    fn from_iter<I: IntoIterator<Item = (K, LineValue)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Cash-flow statement: a single flat section.
pub type CashFlowStatement = StatementSection;

/// Income statement grouped into its four sections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenue and other income lines.
    pub revenue: StatementSection,
    /// Cost and expense lines.
    pub expenses: StatementSection,
    /// Profit lines.
    pub profit: StatementSection,
    /// Per-share and share-count lines.
    pub shares: StatementSection,
}

impl IncomeStatement {
    /// Returns true if every section is entirely absent.
    #[must_use]
    pub fn all_absent(&self) -> bool {
        self.sections().iter().all(|(_, s)| s.all_absent())
    }

    /// Returns the sections with their names, in presentation order.
    #[must_use]
    pub const fn sections(&self) -> [(&'static str, &StatementSection); 4] {
        [
            ("revenue", &self.revenue),
            ("expenses", &self.expenses),
            ("profit", &self.profit),
            ("shares", &self.shares),
        ]
    }
}

/// Terminal artifact of the extraction pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Requested ticker.
    pub ticker: Ticker,
    /// Resolved CIK.
    pub cik: Cik,
    /// Primary XBRL document the statements were read from.
    pub source: DocumentReference,
    /// Cash-flow line items.
    pub cashflow: CashFlowStatement,
    /// Income-statement line items.
    pub income_statement: IncomeStatement,
    /// Filing date of the annual report.
    pub filing_date: Option<NaiveDate>,
    /// Period of report of the annual report.
    pub report_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_ticker_creation() {
        let ticker = Ticker::new(" aapl ");
        assert_eq!(ticker.as_str(), "AAPL");
        assert!(Ticker::new("").is_empty());
    }

    #[rstest]
    #[case("320193", Some("0000320193"))]
    #[case("0000320193", Some("0000320193"))]
    #[case("", None)]
    #[case("AAPL", None)]
    #[case("12345678901", None)]
    fn test_cik_parse(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(Cik::parse(raw).as_ref().map(Cik::as_str), expected);
    }

    #[test]
    fn test_cik_unpadded() {
        let cik = Cik::from_number(320193);
        assert_eq!(cik.as_str(), "0000320193");
        assert_eq!(cik.as_str().len(), CIK_WIDTH);
        assert_eq!(cik.unpadded(), "320193");
    }

    #[rstest]
    #[case("/Archives/edgar/data/320193/000032019324000123/aapl-20240928_htm.xml", true)]
    #[case("/Archives/edgar/data/320193/000032019324000123/aapl-20240928_cal.xml", false)]
    #[case("/Archives/edgar/data/320193/000032019324000123/aapl-20240928_lab.xml", false)]
    #[case("/Archives/edgar/data/320193/000032019324000123/aapl-20240928_pre.xml", false)]
    #[case("/Archives/edgar/data/320193/000032019324000123/aapl-20240928_def.xml", false)]
    #[case("/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm", false)]
    fn test_primary_xbrl_path(#[case] href: &str, #[case] expected: bool) {
        assert_eq!(is_primary_xbrl_path(href), expected);
        assert_eq!(DocumentReference::new(href).is_some(), expected);
    }

    #[test]
    fn test_line_value_parse() {
        assert_eq!(LineValue::parse("1,234,567"), LineValue::Number(1_234_567.0));
        assert_eq!(LineValue::parse("  -42.5 "), LineValue::Number(-42.5));
        assert_eq!(
            LineValue::parse("  see note 7 "),
            LineValue::Text("see note 7".to_string())
        );
    }

    #[test]
    fn test_line_value_serialization() {
        let section: StatementSection = [
            ("a", LineValue::Number(1.5)),
            ("b", LineValue::Text("x".to_string())),
            ("c", LineValue::Absent),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json, serde_json::json!({"a": 1.5, "b": "x", "c": null}));

        let back: StatementSection = serde_json::from_value(json).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_section_keeps_insertion_order() {
        let mut section: StatementSection = [
            ("Net profit", LineValue::Text("x".to_string())),
            ("Depreciation", LineValue::Absent),
            ("Acquisitions", LineValue::Absent),
        ]
        .into_iter()
        .collect();
        section.insert("Depreciation", LineValue::Text("y".to_string()));

        let labels: Vec<_> = section.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["Net profit", "Depreciation", "Acquisitions"]);
        assert_eq!(
            serde_json::to_string(&section).unwrap(),
            r#"{"Net profit":"x","Depreciation":"y","Acquisitions":null}"#
        );
    }

    #[test]
    fn test_section_queries() {
        let mut section = StatementSection::new();
        section.insert("Net Income", LineValue::Absent);
        assert!(section.all_absent());
        assert!(section.is_absent("Net Income"));
        assert!(section.is_absent("Unknown"));

        section.insert("Net Income", LineValue::Number(10.0));
        assert!(!section.all_absent());
        assert_eq!(section.number("Net Income"), Some(10.0));
        assert_eq!(section.present_count(), 1);
    }

    #[test]
    fn test_income_statement_all_absent() {
        let mut income = IncomeStatement::default();
        income.revenue.insert("Total Revenue", LineValue::Absent);
        assert!(income.all_absent());

        income.shares.insert("EPS", LineValue::Number(6.1));
        assert!(!income.all_absent());
    }
}
