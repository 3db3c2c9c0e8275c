//! Terminal renderer for dashboard artifacts
//!
//! Turns `ReportArtifacts` into a string for the terminal: preview table,
//! sparkline panels for each series, the headline profit metric, decision
//! shares, and the execution log. Separates presentation from the report
//! calculation in `crate::report`.

use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::report::{ProfitPanel, ReportArtifacts, SeriesColor, TimeSeries};
use crate::utils::{format_btc, format_krw, format_pct, format_pct_delta};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the full dashboard for the terminal.
pub fn format_report(artifacts: &ReportArtifacts, source: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} AI Trading Dashboard ({})\n",
        "💹".bold(),
        source.bold()
    ));
    out.push_str(&format!(
        "{} records\n",
        artifacts.record_count.to_string().bold()
    ));

    if artifacts.is_empty() {
        out.push_str(&format!("\n{}\n", format_empty_report()));
        return out;
    }

    out.push_str(&format_preview(artifacts));

    if let Some(sentiment) = &artifacts.sentiment {
        out.push_str(&format!("\n{} Fear & Greed Index\n", "😨".bold()));
        out.push_str(&format_series_panel(sentiment, None));
    }

    if let Some(balances) = &artifacts.balances {
        out.push_str(&format!("\n{} KRW Balance\n", "💰".bold()));
        out.push_str(&format_series_panel(&balances.krw, None));
        out.push_str(&format!("\n{} BTC Balance\n", "🪙".bold()));
        out.push_str(&format_series_panel(&balances.btc, None));
    }

    if let Some(profit) = &artifacts.profit {
        out.push_str(&format!("\n{} Profit Rate (%)\n", "📈".bold()));
        if artifacts.baseline_invalid {
            out.push_str(&format!(
                "{}\n",
                "baseline is zero, profit rate undefined (shown as 0)".yellow()
            ));
        }
        out.push_str(&format_profit_panel(profit));
    }

    if let Some(summary) = &artifacts.summary {
        let latest = colorize_pct(summary.latest, format_pct(summary.latest));
        out.push_str(&format!(
            "\n{} {}",
            "Cumulative profit:".bold(),
            latest
        ));
        if let Some(delta) = summary.delta {
            out.push_str(&format!(
                "  ({} vs previous)",
                colorize_pct(delta, format_pct_delta(delta))
            ));
        }
        out.push('\n');
    }

    if artifacts.decisions.is_some() {
        out.push_str(&format!("\n{} AI Decision Statistics\n\n", "🤖".bold()));
        out.push_str(&format_decisions_table(artifacts));
    }

    out.push_str(&format!("\n{} Trade Execution Log\n", "🧾".bold()));
    out.push_str(&format_log(artifacts));

    out
}

/// Friendly message for a log with zero surviving records.
pub fn format_empty_report() -> String {
    format!(
        "{} No surviving records after validation\nRows need datetime, krw_balance, and btc_balance values.",
        "ℹ".blue().bold()
    )
}

fn format_preview(artifacts: &ReportArtifacts) -> String {
    #[derive(Tabled)]
    struct PreviewRow {
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Decision")]
        decision: String,
        #[tabled(rename = "F&G")]
        fear_and_greed: String,
        #[tabled(rename = "KRW")]
        krw: String,
        #[tabled(rename = "BTC")]
        btc: String,
        #[tabled(rename = "Profit %")]
        profit: String,
    }

    let rows: Vec<PreviewRow> = artifacts
        .preview
        .iter()
        .map(|e| PreviewRow {
            time: e.record.datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            decision: e.record.decision.clone().unwrap_or_default(),
            fear_and_greed: e
                .record
                .fear_and_greed
                .map(|v| v.to_string())
                .unwrap_or_default(),
            krw: format_krw(e.record.krw_balance),
            btc: format!("{:.6}", e.record.btc_balance),
            profit: format!("{:.2}", e.profit_rate),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    // Right-align the numeric columns
    table.modify(Columns::new(2..), Alignment::right());

    format!(
        "\n{} Recent Records (last {})\n\n{}\n",
        "📊".bold(),
        artifacts.preview.len(),
        table
    )
}

/// One panel: sparkline plus min/last/max, optionally tinted.
fn format_series_panel(series: &TimeSeries, color: Option<SeriesColor>) -> String {
    let spark = sparkline(series);
    let spark = match color {
        Some(SeriesColor::Green) => spark.green().to_string(),
        Some(SeriesColor::Red) => spark.red().to_string(),
        None => spark,
    };
    let (min, max) = match series.min_max() {
        Some(pair) => pair,
        None => return String::new(),
    };
    let last = series.last_value().unwrap_or(Decimal::ZERO);
    format!(
        "{}\nmin {:.2}   last {:.2}   max {:.2}\n",
        spark, min, last, max
    )
}

fn format_profit_panel(profit: &ProfitPanel) -> String {
    format_series_panel(&profit.series, Some(profit.color))
}

/// Map series values onto eight block-character levels.
fn sparkline(series: &TimeSeries) -> String {
    let (min, max) = match series.min_max() {
        Some(pair) => pair,
        None => return String::new(),
    };
    let range = max - min;
    series
        .points
        .iter()
        .map(|p| {
            if range.is_zero() {
                SPARK_LEVELS[0]
            } else {
                use rust_decimal::prelude::ToPrimitive;
                let level = ((p.value - min) * Decimal::from(SPARK_LEVELS.len() - 1) / range)
                    .round()
                    .to_usize()
                    .unwrap_or(0);
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

fn format_decisions_table(artifacts: &ReportArtifacts) -> String {
    #[derive(Tabled)]
    struct DecisionRow {
        #[tabled(rename = "Decision")]
        decision: String,
        #[tabled(rename = "Count")]
        count: String,
        #[tabled(rename = "Share")]
        share: String,
    }

    let Some(decisions) = &artifacts.decisions else {
        return String::new();
    };

    let rows: Vec<DecisionRow> = decisions
        .counts
        .iter()
        .map(|c| DecisionRow {
            decision: c.decision.clone(),
            count: c.count.to_string(),
            share: format!("{:.1}%", c.share_pct),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    format!("{}\n", table)
}

fn format_log(artifacts: &ReportArtifacts) -> String {
    let mut out = String::new();
    for entry in &artifacts.log {
        out.push_str(&format!(
            "\n{} | {}\n",
            entry.datetime.format("%Y-%m-%d %H:%M:%S"),
            entry.decision.bold()
        ));
        out.push_str(&format!("  Reason: {}\n", entry.reason));
        out.push_str(&format!("  Fear & Greed Index: {}\n", entry.fear_and_greed));
        out.push_str(&format!("  KRW Balance: {}\n", format_krw(entry.krw_balance)));
        out.push_str(&format!("  BTC Balance: {}\n", format_btc(entry.btc_balance)));
        out.push_str(&format!("  Action Result: {}\n", entry.action_result));
    }
    out
}

fn colorize_pct(value: Decimal, text: String) -> String {
    if value >= Decimal::ZERO {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}
