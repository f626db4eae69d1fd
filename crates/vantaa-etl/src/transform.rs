// Record Transformation: raw feed rows -> canonical typed records

use crate::config::EtlConfig;
use crate::extract::RawRecord;
use crate::validate::{self, BoundingBox};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;
use vantaa_common::{EtlError, Result};

/// Fixed raw -> canonical column mapping, in destination column order.
pub const RENAME_SCHEMA: [(&str, &str); 9] = [
    ("id", "id"),
    ("ammattiala", "field"),
    ("tyotehtava", "job_title"),
    ("tyoavain", "job_key"),
    ("osoite", "address"),
    ("haku_paattyy_pvm", "application_end_date"),
    ("x", "longitude_wgs84"),
    ("y", "latitude_wgs84"),
    ("linkki", "link"),
];

/// Canonical job posting row, ready for the destination table.
///
/// The identifier is carried as text: string ids pass through verbatim and
/// integer ids render as their decimal form, so a posting round-trips the
/// same way regardless of how the feed typed it that day.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub id: String,
    pub field: Option<String>,
    pub job_title: Option<String>,
    pub job_key: Option<String>,
    pub address: Option<String>,
    pub application_end_date: Option<NaiveDate>,
    pub longitude_wgs84: Option<f64>,
    pub latitude_wgs84: Option<f64>,
    pub link: Option<String>,
}

/// Maps raw feed records onto the canonical schema
pub struct Transformer {
    validate_coordinates: bool,
    validate_urls: bool,
    bounds: BoundingBox,
}

impl Transformer {
    /// Create a transformer with validation disabled
    pub fn new() -> Self {
        Transformer {
            validate_coordinates: false,
            validate_urls: false,
            bounds: BoundingBox::vantaa(),
        }
    }

    /// Create a transformer honoring the config's strict-mode flags
    pub fn from_config(config: &EtlConfig) -> Self {
        Transformer {
            validate_coordinates: config.validate_coordinates,
            validate_urls: config.validate_urls,
            bounds: config.bounds,
        }
    }

    /// Transform a raw batch into canonical records, all-or-nothing.
    ///
    /// Order of failure: a missing raw column aborts before any value is
    /// touched; strict-mode validation (when enabled) runs next against the
    /// raw values; only then are rows coerced. The first bad date or
    /// uncoercible value aborts the whole call with no partial output.
    pub fn transform(&self, records: &[RawRecord]) -> Result<Vec<JobPosting>> {
        self.check_columns(records)?;

        if self.validate_coordinates {
            validate::validate_coordinates(records, &self.bounds)?;
        }
        if self.validate_urls {
            validate::validate_urls(records)?;
        }

        let postings = records
            .iter()
            .map(build_posting)
            .collect::<Result<Vec<_>>>()?;

        debug!("Transformed {} records", postings.len());

        Ok(postings)
    }

    /// Every raw column of the rename mapping must be present in every
    /// record; a null value is fine, an absent key is not.
    fn check_columns(&self, records: &[RawRecord]) -> Result<()> {
        for record in records {
            for (raw, _) in RENAME_SCHEMA {
                if !record.has_column(raw) {
                    return Err(EtlError::missing_column(raw));
                }
            }
        }
        Ok(())
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::new()
    }
}

fn build_posting(record: &RawRecord) -> Result<JobPosting> {
    Ok(JobPosting {
        id: identifier(record, "id")?,
        field: text(record, "ammattiala", "field")?,
        job_title: text(record, "tyotehtava", "job_title")?,
        job_key: text(record, "tyoavain", "job_key")?,
        address: text(record, "osoite", "address")?,
        application_end_date: calendar_date(record, "haku_paattyy_pvm", "application_end_date")?,
        longitude_wgs84: decimal_degrees(record, "x", "longitude_wgs84")?,
        latitude_wgs84: decimal_degrees(record, "y", "latitude_wgs84")?,
        link: text(record, "linkki", "link")?,
    })
}

/// Required identifier: string or integer, rendered as text
fn identifier(record: &RawRecord, raw: &str) -> Result<String> {
    match record.value(raw) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        other => Err(EtlError::coercion(raw, display_value(other))),
    }
}

/// Nullable text field: nulls propagate, scalars render as text
fn text(record: &RawRecord, raw: &str, canonical: &str) -> Result<Option<String>> {
    match record.value(raw) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(EtlError::coercion(canonical, other.to_string())),
    }
}

/// Nullable `YYYY-MM-DD` date field: nulls propagate, anything else must
/// parse as a valid calendar date
fn calendar_date(record: &RawRecord, raw: &str, canonical: &str) -> Result<Option<NaiveDate>> {
    match record.value(raw) {
        Some(Value::Null) | None => Ok(None),
        Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| EtlError::date(canonical, s)),
        Some(other) => Err(EtlError::date(canonical, other.to_string())),
    }
}

/// Nullable coordinate field: nulls propagate, values must be finite
/// decimal degrees
fn decimal_degrees(record: &RawRecord, raw: &str, canonical: &str) -> Result<Option<f64>> {
    let parsed = match record.value(raw) {
        Some(Value::Null) | None => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed.filter(|v| v.is_finite()) {
        Some(value) => Ok(Some(value)),
        None => Err(EtlError::coercion(
            canonical,
            display_value(record.value(raw)),
        )),
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "<missing>".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> RawRecord {
        RawRecord::from([
            ("id", json!("1")),
            ("ammattiala", json!("IT")),
            ("tyotehtava", json!("Developer")),
            ("tyoavain", json!("key123")),
            ("osoite", json!("Test St")),
            ("haku_paattyy_pvm", json!("2025-12-31")),
            ("x", json!("24.8474")),
            ("y", json!("60.2934")),
            ("linkki", json!("http://example.com")),
        ])
    }

    #[test]
    fn test_rename_schema_is_injective() {
        let mut canonical: Vec<&str> = RENAME_SCHEMA.iter().map(|(_, c)| *c).collect();
        canonical.sort_unstable();
        canonical.dedup();
        assert_eq!(canonical.len(), RENAME_SCHEMA.len());
    }

    #[test]
    fn test_basic_transformation() {
        let postings = Transformer::new().transform(&[sample_record()]).unwrap();

        assert_eq!(postings.len(), 1);
        let posting = &postings[0];
        assert_eq!(posting.id, "1");
        assert_eq!(posting.field.as_deref(), Some("IT"));
        assert_eq!(posting.job_title.as_deref(), Some("Developer"));
        assert_eq!(posting.job_key.as_deref(), Some("key123"));
        assert_eq!(posting.address.as_deref(), Some("Test St"));
        assert_eq!(
            posting.application_end_date,
            Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
        );
        assert_eq!(posting.longitude_wgs84, Some(24.8474));
        assert_eq!(posting.latitude_wgs84, Some(60.2934));
        assert_eq!(posting.link.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_integer_id_renders_as_text() {
        let mut record = sample_record();
        record.0.insert("id".to_string(), json!(42));

        let postings = Transformer::new().transform(&[record]).unwrap();
        assert_eq!(postings[0].id, "42");
    }

    #[test]
    fn test_null_id_is_rejected() {
        let mut record = sample_record();
        record.0.insert("id".to_string(), json!(null));

        let err = Transformer::new().transform(&[record]).unwrap_err();
        assert!(matches!(err, EtlError::Coercion { .. }));
    }

    #[test]
    fn test_missing_column_fails_before_bad_values() {
        // The record also carries an unparseable date, but the absent raw
        // column must win.
        let record = RawRecord::from([
            ("id", json!("1")),
            ("ammattiala", json!("IT")),
            ("tyotehtava", json!("Developer")),
            ("tyoavain", json!("key123")),
            ("osoite", json!("Test St")),
            ("haku_paattyy_pvm", json!("not-a-date")),
            ("x", json!("24.8474")),
            ("y", json!("60.2934")),
        ]);

        let err = Transformer::new().transform(&[record]).unwrap_err();
        match err {
            EtlError::MissingColumn { column } => assert_eq!(column, "linkki"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn test_null_values_propagate() {
        let mut record = sample_record();
        record.0.insert("ammattiala".to_string(), json!(null));
        record.0.insert("osoite".to_string(), json!(null));
        record.0.insert("haku_paattyy_pvm".to_string(), json!(null));

        let postings = Transformer::new().transform(&[record]).unwrap();
        let posting = &postings[0];

        assert_eq!(posting.field, None);
        assert_eq!(posting.address, None);
        assert_eq!(posting.application_end_date, None);
        assert_eq!(posting.job_title.as_deref(), Some("Developer"));
    }

    #[test]
    fn test_invalid_date_aborts_whole_batch() {
        let mut bad = sample_record();
        bad.0
            .insert("haku_paattyy_pvm".to_string(), json!("not-a-date"));

        let err = Transformer::new()
            .transform(&[sample_record(), bad])
            .unwrap_err();
        assert!(matches!(err, EtlError::Date { .. }));
    }

    #[test]
    fn test_impossible_calendar_date_is_rejected() {
        let mut record = sample_record();
        record
            .0
            .insert("haku_paattyy_pvm".to_string(), json!("2025-02-30"));

        let err = Transformer::new().transform(&[record]).unwrap_err();
        assert!(matches!(err, EtlError::Date { .. }));
    }

    #[test]
    fn test_non_numeric_coordinate_is_a_coercion_error() {
        let mut record = sample_record();
        record.0.insert("x".to_string(), json!("invalid"));

        let err = Transformer::new().transform(&[record]).unwrap_err();
        match err {
            EtlError::Coercion { column, value } => {
                assert_eq!(column, "longitude_wgs84");
                assert_eq!(value, "invalid");
            },
            other => panic!("expected Coercion, got {other}"),
        }
    }

    #[test]
    fn test_extra_columns_are_dropped() {
        let mut record = sample_record();
        record
            .0
            .insert("extra_column".to_string(), json!("ignored"));

        let postings = Transformer::new().transform(&[record]).unwrap();
        assert_eq!(postings[0].field.as_deref(), Some("IT"));
    }

    #[test]
    fn test_strict_mode_rejects_out_of_box_coordinates() {
        let mut record = sample_record();
        record.0.insert("x".to_string(), json!("24.5000"));

        let transformer = Transformer::from_config(&EtlConfig::strict());
        let err = transformer.transform(&[record]).unwrap_err();
        assert!(matches!(err, EtlError::Validation(_)));
    }

    #[test]
    fn test_strict_mode_rejects_bad_urls() {
        let mut record = sample_record();
        record
            .0
            .insert("linkki".to_string(), json!("ftp://invalid-protocol.com"));

        let transformer = Transformer::from_config(&EtlConfig::strict());
        let err = transformer.transform(&[record]).unwrap_err();
        assert!(matches!(err, EtlError::Validation(_)));
    }

    #[test]
    fn test_empty_batch_transforms_to_empty_output() {
        let postings = Transformer::new().transform(&[]).unwrap();
        assert!(postings.is_empty());
    }
}
