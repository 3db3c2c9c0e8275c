//! HTML export
//!
//! Writes a self-contained dashboard page. The report artifacts are embedded
//! as JSON and all chart drawing is delegated to Plotly loaded from a CDN;
//! this renderer only decides layout and which panels exist.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::report::ReportArtifacts;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Trading Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { font-family: -apple-system, sans-serif; margin: 24px; background: #fafafa; color: #222; }
  h1 { margin-bottom: 4px; }
  .muted { color: #777; font-size: 14px; }
  .row { display: flex; gap: 16px; flex-wrap: wrap; }
  .panel { background: #fff; border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px; margin: 12px 0; flex: 1; min-width: 380px; }
  .metric { font-size: 32px; font-weight: 700; }
  .metric.positive { color: #1a7f37; }
  .metric.negative { color: #c62828; }
  .delta { font-size: 16px; margin-left: 8px; }
  table { border-collapse: collapse; width: 100%; font-size: 13px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: right; }
  th:first-child, td:first-child { text-align: left; }
  details { margin: 6px 0; }
  summary { cursor: pointer; font-weight: 600; }
  .warn { color: #b26a00; }
</style>
</head>
<body>
<h1>💹 AI Trading Dashboard</h1>
<div class="muted" id="recordCount"></div>
<div class="panel"><h3>📊 Recent Records</h3><table id="preview"></table></div>
<div class="panel" id="sentimentPanel" hidden><h3>😨 Fear &amp; Greed Index</h3><div id="sentiment"></div></div>
<div class="row">
  <div class="panel" id="krwPanel" hidden><h3>💰 KRW Balance</h3><div id="krw"></div></div>
  <div class="panel" id="btcPanel" hidden><h3>🪙 BTC Balance</h3><div id="btc"></div></div>
</div>
<div class="panel" id="profitPanel" hidden>
  <h3>📈 Profit Rate (%)</h3>
  <div class="warn" id="baselineWarn" hidden>Baseline asset is zero; profit rate shown as 0.</div>
  <div class="metric" id="latestProfit"></div>
  <div id="profit"></div>
</div>
<div class="panel" id="decisionPanel" hidden><h3>🤖 AI Decision Statistics</h3><div id="decisions"></div></div>
<div class="panel"><h3>🧾 Trade Execution Log</h3><div id="log"></div></div>
<script>
const REPORT = __REPORT_JSON__;
const num = v => Number(v);

document.getElementById("recordCount").textContent = REPORT.record_count + " records";

function line(divId, series, color) {
  Plotly.newPlot(divId, [{
    x: series.points.map(p => p.at),
    y: series.points.map(p => num(p.value)),
    mode: "lines+markers",
    line: color ? { color: color } : {},
  }], { margin: { t: 16 } }, { responsive: true });
}

const head = ["Time", "Decision", "F&G", "KRW", "BTC", "Profit %"];
const preview = document.getElementById("preview");
preview.innerHTML = "<tr>" + head.map(h => "<th>" + h + "</th>").join("") + "</tr>" +
  REPORT.preview.map(e => "<tr>" + [
    e.datetime, e.decision ?? "", e.fear_and_greed ?? "",
    num(e.krw_balance).toLocaleString(), num(e.btc_balance).toFixed(6),
    num(e.profit_rate).toFixed(2),
  ].map(c => "<td>" + c + "</td>").join("") + "</tr>").join("");

if (REPORT.sentiment) {
  document.getElementById("sentimentPanel").hidden = false;
  line("sentiment", REPORT.sentiment);
}
if (REPORT.balances) {
  document.getElementById("krwPanel").hidden = false;
  document.getElementById("btcPanel").hidden = false;
  line("krw", REPORT.balances.krw);
  line("btc", REPORT.balances.btc);
}
if (REPORT.profit) {
  document.getElementById("profitPanel").hidden = false;
  document.getElementById("baselineWarn").hidden = !REPORT.baseline_invalid;
  line("profit", REPORT.profit.series, REPORT.profit.color);
  if (REPORT.summary) {
    const latest = num(REPORT.summary.latest);
    const el = document.getElementById("latestProfit");
    el.classList.add(latest >= 0 ? "positive" : "negative");
    el.textContent = latest.toFixed(2) + " %";
    if (REPORT.summary.delta !== null) {
      const delta = num(REPORT.summary.delta);
      el.innerHTML += '<span class="delta">' + (delta >= 0 ? "+" : "") + delta.toFixed(2) + " % vs previous</span>";
    }
  }
}
if (REPORT.decisions) {
  document.getElementById("decisionPanel").hidden = false;
  Plotly.newPlot("decisions", [{
    type: "pie",
    labels: REPORT.decisions.counts.map(c => c.decision),
    values: REPORT.decisions.counts.map(c => c.count),
  }], { margin: { t: 16 } }, { responsive: true });
}
document.getElementById("log").innerHTML = REPORT.log.map(e =>
  "<details><summary>" + e.datetime + " | " + e.decision + "</summary>" +
  "<p><b>Reason:</b> " + e.reason + "</p>" +
  "<p><b>Fear &amp; Greed Index:</b> " + e.fear_and_greed + "</p>" +
  "<p><b>KRW Balance:</b> ₩" + num(e.krw_balance).toLocaleString() + "</p>" +
  "<p><b>BTC Balance:</b> " + num(e.btc_balance).toFixed(6) + " BTC</p>" +
  "<p><b>Action Result:</b> " + e.action_result + "</p></details>").join("");
</script>
</body>
</html>
"#;

/// Render the dashboard page and write it to `path`.
pub fn export_html<P: AsRef<Path>>(artifacts: &ReportArtifacts, path: P) -> Result<()> {
    let path = path.as_ref();
    let page = render_page(artifacts)?;
    std::fs::write(path, page)
        .with_context(|| format!("Failed to write dashboard to {:?}", path))?;
    info!("Wrote HTML dashboard: {:?}", path);
    Ok(())
}

fn render_page(artifacts: &ReportArtifacts) -> Result<String> {
    let json = serde_json::to_string(artifacts).context("Failed to serialize report")?;
    Ok(TEMPLATE.replace("__REPORT_JSON__", &json))
}
