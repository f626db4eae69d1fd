// Strict-Mode Validation of Raw Feed Values
//
// Coordinate and URL validation are opt-in capabilities: the base
// transform never rejects a row for an out-of-region coordinate or an odd
// link, but a strict run refuses the whole batch. Both checks run against
// the raw columns (`x`, `y`, `linkki`) before any rename.

use crate::extract::RawRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vantaa_common::{EtlError, Result};

/// Pattern accepted for link values: http/https scheme, dot-separated
/// host labels, optional path of word/dash/dot/percent/query characters.
const URL_PATTERN: &str = r"^https?://(?:[\w\-]+\.)+[\w\-]+(?:/[\w\-\./\?%&=]*)?$";

/// Rectangular region of accepted (longitude, latitude) pairs, in
/// WGS84 decimal degrees. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    pub const fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        BoundingBox {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// Bounding box covering the municipality of Vantaa
    pub const fn vantaa() -> Self {
        BoundingBox::new(24.7, 25.2, 60.2, 60.4)
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.lon_min <= lon && lon <= self.lon_max && self.lat_min <= lat && lat <= self.lat_max
    }
}

/// Validate the coordinate pair of every record against `bounds`.
///
/// A pair is valid iff both values parse as finite decimal degrees and
/// fall inside the box. Null, empty, missing and non-numeric values are
/// invalid. On failure the error lists every offending row together with
/// its raw values, not just the first.
pub fn validate_coordinates(records: &[RawRecord], bounds: &BoundingBox) -> Result<()> {
    let mut offenders = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let lon = parse_degrees(record.value("x"));
        let lat = parse_degrees(record.value("y"));

        let valid = match (lon, lat) {
            (Some(lon), Some(lat)) => bounds.contains(lon, lat),
            _ => false,
        };

        if !valid {
            offenders.push(format!(
                "row {}: x={}, y={}",
                index,
                display_raw(record.value("x")),
                display_raw(record.value("y"))
            ));
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(EtlError::Validation(format!(
            "invalid coordinates found: [{}]",
            offenders.join(", ")
        )))
    }
}

/// Validate the link column of every record.
///
/// A link is valid iff it is a non-null string matching the accepted URL
/// pattern. One invalid link anywhere fails the whole call.
pub fn validate_urls(records: &[RawRecord]) -> Result<()> {
    let pattern = Regex::new(URL_PATTERN)?;

    let invalid = records
        .iter()
        .filter(|record| !url_is_valid(record.value("linkki"), &pattern))
        .count();

    if invalid == 0 {
        Ok(())
    } else {
        Err(EtlError::Validation(format!(
            "invalid URL format in {} of {} records",
            invalid,
            records.len()
        )))
    }
}

fn parse_degrees(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite())
}

fn url_is_valid(value: Option<&Value>, pattern: &Regex) -> bool {
    match value {
        Some(Value::String(url)) => pattern.is_match(url),
        _ => false,
    }
}

fn display_raw(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "<missing>".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
