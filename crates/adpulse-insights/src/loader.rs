//! CSV loading and type coercion for raw ad performance rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use adpulse_core::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::DataError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Read and coerce every row of the CSV file at `path`.
///
/// # Errors
///
/// Returns [`DataError`] if the file cannot be opened, is not valid CSV,
/// lacks a required column, or contains an unparseable date.
pub fn load_records(path: &Path) -> Result<Vec<Record>, DataError> {
    let file = File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = read_records(file)?;
    tracing::info!(path = %path.display(), rows = records.len(), "loaded ad records");
    Ok(records)
}

/// Read and coerce CSV rows from any reader. The first line must be a header.
///
/// Numeric cells that do not parse become missing rather than failing the
/// row. Missing impressions, clicks and purchases default to `0`; missing
/// revenue and roas default to `0.0`; spend and ctr stay missing.
///
/// # Errors
///
/// Returns [`DataError`] for malformed CSV, a missing required column, or an
/// unparseable date.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::resolve(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(columns.parse_row(&row, idx + 1)?);
    }
    Ok(records)
}

/// Header positions of the columns the loader reads.
struct Columns {
    date: usize,
    campaign_name: usize,
    adset_name: usize,
    creative_type: usize,
    creative_message: usize,
    audience_type: usize,
    spend: usize,
    impressions: usize,
    clicks: usize,
    revenue: usize,
    purchases: usize,
    roas: usize,
    ctr: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require =
            |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.to_string()));

        Ok(Self {
            date: require("date")?,
            campaign_name: require("campaign_name")?,
            adset_name: require("adset_name")?,
            creative_type: require("creative_type")?,
            creative_message: require("creative_message")?,
            audience_type: require("audience_type")?,
            spend: require("spend")?,
            impressions: require("impressions")?,
            clicks: require("clicks")?,
            revenue: require("revenue")?,
            purchases: require("purchases")?,
            roas: require("roas")?,
            ctr: find("ctr"),
        })
    }

    fn parse_row(&self, row: &csv::StringRecord, row_number: usize) -> Result<Record, DataError> {
        let text = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        let number = |idx: usize| coerce_numeric(row.get(idx).unwrap_or_default());

        let raw_date = row.get(self.date).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| DataError::InvalidDate {
            row: row_number,
            value: raw_date.to_string(),
        })?;

        Ok(Record {
            date,
            campaign_name: text(self.campaign_name),
            adset_name: text(self.adset_name),
            creative_type: text(self.creative_type),
            creative_message: text(self.creative_message),
            audience_type: text(self.audience_type),
            spend: number(self.spend),
            impressions: whole_or_zero(number(self.impressions)),
            clicks: whole_or_zero(number(self.clicks)),
            revenue: number(self.revenue).unwrap_or(0.0),
            purchases: whole_or_zero(number(self.purchases)),
            roas: number(self.roas).unwrap_or(0.0),
            ctr: self.ctr.and_then(number),
        })
    }
}

/// Parse a date cell, accepting plain dates or datetimes (date part kept).
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Coerce a cell to a number; empty, non-numeric and NaN cells are missing.
pub(crate) fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[allow(clippy::cast_possible_truncation)]
fn whole_or_zero(value: Option<f64>) -> i64 {
    value.map_or(0, |v| v.trunc() as i64)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
