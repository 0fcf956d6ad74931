//! CSV demand history loader.
//!
//! Parses demand history CSV files into per-SKU series.
//! Expected CSV columns:
//!   sku_id, timestamp, quantity
//!
//! Timestamps are ISO-8601, either full RFC 3339 instants or bare dates
//! (taken as midnight UTC). Rows for the same SKU are grouped and sorted by
//! timestamp; the series constructor then enforces strict ordering, so
//! duplicate timestamps surface as errors rather than silent data loss.

use std::collections::HashMap;
use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use lifecycle_core::{DemandPoint, DemandSeries};

use crate::types::PortfolioEntry;

/// One CSV row of demand history.
#[derive(Debug, Clone, Deserialize)]
pub struct DemandRecord {
    pub sku_id: String,
    pub timestamp: String,
    pub quantity: f64,
}

/// Load demand records from a CSV reader.
pub fn load_demand<R: Read>(reader: R) -> Result<Vec<DemandRecord>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: DemandRecord = result
            .map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Load demand records from a CSV file path.
pub fn load_demand_file(path: &str) -> Result<Vec<DemandRecord>, String> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_demand(file)
}

/// Group records into per-SKU portfolio entries, sorted by SKU id.
pub fn group_into_series(records: &[DemandRecord]) -> Result<Vec<PortfolioEntry>, String> {
    let mut groups: HashMap<String, Vec<DemandPoint>> = HashMap::new();
    for record in records {
        let timestamp = parse_timestamp(&record.timestamp)?;
        groups
            .entry(record.sku_id.clone())
            .or_default()
            .push(DemandPoint {
                timestamp,
                quantity: record.quantity,
            });
    }

    let mut entries = Vec::with_capacity(groups.len());
    for (sku_id, mut points) in groups {
        points.sort_by_key(|p| p.timestamp);
        let series = DemandSeries::new(points)
            .map_err(|e| format!("Invalid series for SKU '{}': {}", sku_id, e))?;
        entries.push(PortfolioEntry { sku_id, series });
    }
    entries.sort_by(|a, b| a.sku_id.cmp(&b.sku_id));

    if !entries.is_empty() {
        log::debug!("loaded {} SKU series from {} records", entries.len(), records.len());
    }

    Ok(entries)
}

/// Flexible timestamp parser: RFC 3339 instants or bare ISO dates.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("Invalid date '{}'", raw))?;
        return Ok(midnight.and_utc());
    }
    Err(format!(
        "Unrecognized timestamp '{}': expected RFC 3339 or YYYY-MM-DD",
        raw
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
sku_id,timestamp,quantity
SKU-1,2025-01-01,100.0
SKU-1,2025-01-02,110.0
SKU-2,2025-01-01T08:30:00Z,55.0
SKU-1,2025-01-03,105.0
SKU-2,2025-01-02T08:30:00Z,60.0
";

    #[test]
    fn loads_and_groups_by_sku() {
        let records = load_demand(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 5);

        let entries = group_into_series(&records).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sku_id, "SKU-1");
        assert_eq!(entries[0].series.len(), 3);
        assert_eq!(entries[1].sku_id, "SKU-2");
        assert_eq!(entries[1].series.len(), 2);
    }

    #[test]
    fn out_of_order_rows_are_sorted_before_validation() {
        let csv = "\
sku_id,timestamp,quantity
SKU-1,2025-01-03,3.0
SKU-1,2025-01-01,1.0
SKU-1,2025-01-02,2.0
";
        let records = load_demand(csv.as_bytes()).unwrap();
        let entries = group_into_series(&records).unwrap();
        assert_eq!(entries[0].series.quantities(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn duplicate_timestamps_are_an_error() {
        let csv = "\
sku_id,timestamp,quantity
SKU-1,2025-01-01,1.0
SKU-1,2025-01-01,2.0
";
        let records = load_demand(csv.as_bytes()).unwrap();
        let err = group_into_series(&records).unwrap_err();
        assert!(err.contains("SKU-1"), "error was: {}", err);
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let csv = "\
sku_id,timestamp,quantity
SKU-1,2025-01-01,not-a-number
";
        let err = load_demand(csv.as_bytes()).unwrap_err();
        assert!(err.contains("line 2"), "error was: {}", err);
    }

    #[test]
    fn unknown_timestamp_format_is_rejected() {
        let records = vec![DemandRecord {
            sku_id: "SKU-1".into(),
            timestamp: "01/15/2025".into(),
            quantity: 1.0,
        }];
        assert!(group_into_series(&records).is_err());
    }
}
