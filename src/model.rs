//! Trade log records
//!
//! A `TradeRecord` is one validated row of the trading bot's CSV log. Rows
//! that fail validation (missing timestamp or balances) never become records;
//! they are dropped by the importer before any derived computation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// One validated entry of the trade history log.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    /// Timestamp of the log entry, in file order (no re-sorting is applied).
    pub datetime: NaiveDateTime,
    /// Cash balance in KRW.
    pub krw_balance: Decimal,
    /// Held BTC quantity.
    pub btc_balance: Decimal,
    /// External sentiment score (Fear & Greed index), when logged.
    pub fear_and_greed: Option<Decimal>,
    /// Categorical label from the trading process (buy/sell/hold...).
    pub decision: Option<String>,
    /// Free-text rationale emitted alongside the decision.
    pub reason: Option<String>,
    /// Free-text outcome of the executed action.
    pub action_result: Option<String>,
}

/// A record with its derived valuation fields.
///
/// `total_asset` is the KRW balance only; BTC valuation is intentionally
/// excluded because the log carries no price data.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: TradeRecord,
    pub total_asset: Decimal,
    /// Cumulative profit in percent relative to the first record's
    /// `total_asset`. Always 0 for the first record.
    pub profit_rate: Decimal,
}
