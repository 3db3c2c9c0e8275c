use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::DashboardError;
use crate::model::TradeRecord;

/// Parse the trading bot's CSV log and extract validated records.
///
/// Only the `datetime` header is required up front; balance columns are
/// checked per row so a log missing them degrades to zero surviving records
/// instead of a hard error. Rows with an unparseable timestamp or a missing
/// balance are dropped with a warning.
pub fn parse_trade_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<TradeRecord>> {
    let path = file_path.as_ref();
    if !path.exists() {
        return Err(DashboardError::FileMissing(path.display().to_string()).into());
    }
    info!("Parsing trade log: {:?}", path);

    let mut reader = ReaderBuilder::new()
        .flexible(true) // Tolerate rows with trailing columns missing
        .from_path(path)
        .context("Failed to open trade log")?;

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();

    debug!("CSV headers: {:?}", headers);

    let mapping = find_columns(&headers)?;
    debug!("Column mapping: {:?}", mapping);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let row = result.context("Failed to read CSV record")?;

        match parse_row(&row, &mapping) {
            Some(record) => records.push(record),
            None => {
                warn!("Dropping row {}: missing timestamp or balance", idx + 2);
                dropped += 1;
            }
        }
    }

    info!(
        "Parsed {} records from trade log ({} dropped)",
        records.len(),
        dropped
    );
    Ok(records)
}

#[derive(Debug)]
struct CsvColumnMapping {
    datetime: usize,
    krw_balance: Option<usize>,
    btc_balance: Option<usize>,
    fear_and_greed: Option<usize>,
    decision: Option<usize>,
    reason: Option<usize>,
    action_result: Option<usize>,
}

fn find_columns(headers: &csv::StringRecord) -> Result<CsvColumnMapping> {
    let index_of = |name: &str| headers.iter().position(|h| h.trim() == name);

    let datetime = index_of("datetime")
        .ok_or_else(|| DashboardError::MissingColumn("datetime".to_string()))?;

    Ok(CsvColumnMapping {
        datetime,
        krw_balance: index_of("krw_balance"),
        btc_balance: index_of("btc_balance"),
        fear_and_greed: index_of("fear_and_greed"),
        decision: index_of("decision"),
        reason: index_of("reason"),
        action_result: index_of("action_result"),
    })
}

/// Parse one row; `None` means the row fails validation and is dropped.
fn parse_row(row: &csv::StringRecord, mapping: &CsvColumnMapping) -> Option<TradeRecord> {
    let datetime = row
        .get(mapping.datetime)
        .and_then(|s| parse_timestamp(s.trim()))?;
    let krw_balance = required_decimal(row, mapping.krw_balance)?;
    let btc_balance = required_decimal(row, mapping.btc_balance)?;

    let fear_and_greed = mapping
        .fear_and_greed
        .and_then(|idx| row.get(idx))
        .and_then(|s| Decimal::from_str(s.trim()).ok());
    let decision = optional_text(row, mapping.decision);
    let reason = optional_text(row, mapping.reason);
    let action_result = optional_text(row, mapping.action_result);

    Some(TradeRecord {
        datetime,
        krw_balance,
        btc_balance,
        fear_and_greed,
        decision,
        reason,
        action_result,
    })
}

fn required_decimal(row: &csv::StringRecord, idx: Option<usize>) -> Option<Decimal> {
    let text = row.get(idx?)?.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text).ok()
}

fn optional_text(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    let text = idx.and_then(|i| row.get(i))?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    // Formats seen in trade logs, most common first
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    // Date-only entries map to midnight
    if let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}
