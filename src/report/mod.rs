// Reports module - dashboard artifact builder

pub mod series;

pub use series::{SeriesColor, SeriesPoint, TimeSeries};

use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{EnrichedRecord, TradeRecord};

/// How many records the tabular preview shows.
const PREVIEW_LEN: usize = 20;
/// How many records the execution log shows.
const LOG_LEN: usize = 10;

/// Everything the dashboard displays, computed in one pass.
///
/// Optional sections are `None` when the data behind them is absent; the
/// renderers skip them without error.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifacts {
    /// Most recent records, file order, capped at 20.
    pub preview: Vec<EnrichedRecord>,
    pub sentiment: Option<TimeSeries>,
    pub balances: Option<BalancePanels>,
    pub profit: Option<ProfitPanel>,
    pub summary: Option<ProfitSummary>,
    pub decisions: Option<DecisionBreakdown>,
    /// Most recent records rendered as log entries, capped at 10.
    pub log: Vec<LogEntry>,
    /// Count of surviving records the report was built from.
    pub record_count: usize,
    /// True when the first record's total asset is zero, making the profit
    /// ratio undefined. Profit rates are reported as 0 in that case and the
    /// renderers flag the panel instead of emitting infinities.
    pub baseline_invalid: bool,
}

impl ReportArtifacts {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Side-by-side KRW and BTC balance series.
#[derive(Debug, Clone, Serialize)]
pub struct BalancePanels {
    pub krw: TimeSeries,
    pub btc: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitPanel {
    pub series: TimeSeries,
    /// Green when the latest profit rate is non-negative, red otherwise.
    pub color: SeriesColor,
}

/// Headline metric: latest cumulative profit rate and its change from the
/// prior record.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitSummary {
    pub latest: Decimal,
    /// Absent when fewer than 2 records survive.
    pub delta: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionBreakdown {
    /// Sorted by count descending, then label, for stable output.
    pub counts: Vec<DecisionCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionCount {
    pub decision: String,
    pub count: usize,
    pub share_pct: Decimal,
}

/// One execution-log entry with display defaults already applied.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub datetime: chrono::NaiveDateTime,
    /// Upper-cased decision label, `UNKNOWN` when absent.
    pub decision: String,
    pub reason: String,
    /// Sentiment index as text, `N/A` when absent.
    pub fear_and_greed: String,
    pub krw_balance: Decimal,
    pub btc_balance: Decimal,
    pub action_result: String,
}

/// Build the full set of dashboard artifacts from validated records.
///
/// Pure and stateless: every run recomputes from scratch, so repeated
/// invocations over the same records always produce the same report.
pub fn build_report(records: &[TradeRecord]) -> ReportArtifacts {
    let (enriched, baseline_invalid) = enrich(records);

    let preview = tail(&enriched, PREVIEW_LEN).to_vec();
    let sentiment = build_sentiment(records);
    let balances = build_balances(records);
    let profit = build_profit(&enriched);
    let summary = build_summary(&enriched);
    let decisions = build_decisions(records);
    let log = tail(records, LOG_LEN).iter().map(log_entry).collect();

    ReportArtifacts {
        preview,
        sentiment,
        balances,
        profit,
        summary,
        decisions,
        log,
        record_count: records.len(),
        baseline_invalid,
    }
}

/// Derive `total_asset` and `profit_rate` per record.
///
/// The baseline is the first record's total asset; its own profit rate is
/// therefore always 0. A zero baseline makes the ratio undefined, so every
/// rate is reported as 0 and the condition is flagged to the caller.
fn enrich(records: &[TradeRecord]) -> (Vec<EnrichedRecord>, bool) {
    let baseline = records.first().map(|r| r.krw_balance);
    let baseline_invalid = baseline == Some(Decimal::ZERO);

    let enriched = records
        .iter()
        .map(|r| {
            let total_asset = r.krw_balance;
            let profit_rate = match baseline {
                Some(base) if !base.is_zero() => {
                    (total_asset / base - Decimal::ONE) * Decimal::from(100)
                }
                _ => Decimal::ZERO,
            };
            EnrichedRecord {
                record: r.clone(),
                total_asset,
                profit_rate,
            }
        })
        .collect();

    (enriched, baseline_invalid)
}

fn tail<T>(items: &[T], len: usize) -> &[T] {
    &items[items.len().saturating_sub(len)..]
}

fn build_sentiment(records: &[TradeRecord]) -> Option<TimeSeries> {
    let mut series = TimeSeries::new("fear_and_greed");
    for r in records {
        if let Some(value) = r.fear_and_greed {
            series.push(r.datetime, value);
        }
    }
    (!series.is_empty()).then_some(series)
}

fn build_balances(records: &[TradeRecord]) -> Option<BalancePanels> {
    if records.is_empty() {
        return None;
    }
    let mut krw = TimeSeries::new("krw_balance");
    let mut btc = TimeSeries::new("btc_balance");
    for r in records {
        krw.push(r.datetime, r.krw_balance);
        btc.push(r.datetime, r.btc_balance);
    }
    Some(BalancePanels { krw, btc })
}

fn build_profit(enriched: &[EnrichedRecord]) -> Option<ProfitPanel> {
    if enriched.is_empty() {
        return None;
    }
    let mut series = TimeSeries::new("profit_rate");
    for e in enriched {
        series.push(e.record.datetime, e.profit_rate);
    }
    // Color keyed on the last value only
    let color = match series.last_value() {
        Some(last) if last < Decimal::ZERO => SeriesColor::Red,
        _ => SeriesColor::Green,
    };
    Some(ProfitPanel { series, color })
}

fn build_summary(enriched: &[EnrichedRecord]) -> Option<ProfitSummary> {
    let latest = enriched.last()?.profit_rate;
    let delta = (enriched.len() > 1).then(|| latest - enriched[enriched.len() - 2].profit_rate);
    Some(ProfitSummary { latest, delta })
}

fn build_decisions(records: &[TradeRecord]) -> Option<DecisionBreakdown> {
    let total = records.iter().filter(|r| r.decision.is_some()).count();
    if total == 0 {
        return None;
    }

    let counts = records
        .iter()
        .filter_map(|r| r.decision.as_deref())
        .map(|d| d.to_uppercase())
        .counts();

    let counts = counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(decision, count)| DecisionCount {
            decision,
            count,
            share_pct: Decimal::from(count * 100) / Decimal::from(total),
        })
        .collect();

    Some(DecisionBreakdown { counts })
}

fn log_entry(r: &TradeRecord) -> LogEntry {
    LogEntry {
        datetime: r.datetime,
        decision: r
            .decision
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        reason: r
            .reason
            .clone()
            .unwrap_or_else(|| "No reason provided".to_string()),
        fear_and_greed: r
            .fear_and_greed
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        krw_balance: r.krw_balance,
        btc_balance: r.btc_balance,
        action_result: r
            .action_result
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn at(hour: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn record(hour: u32, krw: Decimal) -> TradeRecord {
        TradeRecord {
            datetime: at(hour),
            krw_balance: krw,
            btc_balance: dec!(0.1),
            fear_and_greed: None,
            decision: None,
            reason: None,
            action_result: None,
        }
    }

    fn with_decision(mut r: TradeRecord, decision: &str) -> TradeRecord {
        r.decision = Some(decision.to_string());
        r
    }

    #[test]
    fn test_profit_rate_example_series() {
        // 100 -> 110 -> 90 yields 0%, 10%, -10%
        let records = vec![
            record(9, dec!(100)),
            record(10, dec!(110)),
            record(11, dec!(90)),
        ];
        let report = build_report(&records);
        let rates: Vec<Decimal> = report.preview.iter().map(|e| e.profit_rate).collect();
        assert_eq!(rates, vec![dec!(0), dec!(10), dec!(-10)]);
    }

    #[test]
    fn test_first_record_profit_rate_is_zero() {
        let records = vec![record(9, dec!(123456))];
        let report = build_report(&records);
        assert_eq!(report.preview[0].profit_rate, Decimal::ZERO);
    }

    #[test]
    fn test_last_value_sign_drives_color() {
        let losing = build_report(&[record(9, dec!(100)), record(10, dec!(90))]);
        assert_eq!(losing.profit.unwrap().color, SeriesColor::Red);

        // Intermediate dip does not matter, only the last value
        let recovered = build_report(&[
            record(9, dec!(100)),
            record(10, dec!(80)),
            record(11, dec!(100)),
        ]);
        assert_eq!(recovered.profit.unwrap().color, SeriesColor::Green);
    }

    #[test]
    fn test_summary_delta_needs_two_records() {
        let one = build_report(&[record(9, dec!(100))]);
        let summary = one.summary.unwrap();
        assert_eq!(summary.latest, Decimal::ZERO);
        assert!(summary.delta.is_none());

        let two = build_report(&[record(9, dec!(100)), record(10, dec!(110))]);
        let summary = two.summary.unwrap();
        assert_eq!(summary.latest, dec!(10));
        assert_eq!(summary.delta, Some(dec!(10)));
    }

    #[test]
    fn test_no_decisions_suppresses_breakdown() {
        let report = build_report(&[record(9, dec!(100))]);
        assert!(report.decisions.is_none());
    }

    #[test]
    fn test_decision_counts_grouped_and_sorted() {
        let records = vec![
            with_decision(record(9, dec!(100)), "buy"),
            with_decision(record(10, dec!(100)), "hold"),
            with_decision(record(11, dec!(100)), "Buy"),
            with_decision(record(12, dec!(100)), "sell"),
        ];
        let breakdown = build_report(&records).decisions.unwrap();
        assert_eq!(breakdown.counts[0].decision, "BUY");
        assert_eq!(breakdown.counts[0].count, 2);
        assert_eq!(breakdown.counts[0].share_pct, dec!(50));
        // Ties broken alphabetically
        assert_eq!(breakdown.counts[1].decision, "HOLD");
        assert_eq!(breakdown.counts[2].decision, "SELL");
    }

    #[test]
    fn test_empty_input_yields_empty_artifacts() {
        let report = build_report(&[]);
        assert!(report.is_empty());
        assert!(report.preview.is_empty());
        assert!(report.sentiment.is_none());
        assert!(report.balances.is_none());
        assert!(report.profit.is_none());
        assert!(report.summary.is_none());
        assert!(report.decisions.is_none());
        assert!(report.log.is_empty());
        assert!(!report.baseline_invalid);
    }

    #[test]
    fn test_zero_baseline_flags_and_zeroes_rates() {
        let report = build_report(&[record(9, dec!(0)), record(10, dec!(500))]);
        assert!(report.baseline_invalid);
        assert!(report
            .preview
            .iter()
            .all(|e| e.profit_rate == Decimal::ZERO));
        // Zero rates render green
        assert_eq!(report.profit.unwrap().color, SeriesColor::Green);
    }

    #[test]
    fn test_preview_and_log_caps() {
        let records: Vec<TradeRecord> =
            (0..24).map(|h| record(h, dec!(100) + Decimal::from(h))).collect();
        let report = build_report(&records);
        assert_eq!(report.preview.len(), 20);
        assert_eq!(report.log.len(), 10);
        assert_eq!(report.record_count, 24);
        // Both keep the most recent records in file order
        assert_eq!(report.preview.last().unwrap().record.datetime, at(23));
        assert_eq!(report.log[0].datetime, at(14));
    }

    #[test]
    fn test_log_entry_defaults() {
        let report = build_report(&[record(9, dec!(100))]);
        let entry = &report.log[0];
        assert_eq!(entry.decision, "UNKNOWN");
        assert_eq!(entry.reason, "No reason provided");
        assert_eq!(entry.fear_and_greed, "N/A");
        assert_eq!(entry.action_result, "N/A");
        assert_eq!(entry.krw_balance, dec!(100));
    }

    #[test]
    fn test_sentiment_series_skips_missing_values() {
        let mut with_fng = record(10, dec!(100));
        with_fng.fear_and_greed = Some(dec!(55));
        let report = build_report(&[record(9, dec!(100)), with_fng]);
        let sentiment = report.sentiment.unwrap();
        assert_eq!(sentiment.points.len(), 1);
        assert_eq!(sentiment.points[0].value, dec!(55));
    }
}
