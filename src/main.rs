mod cli;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::info;

use cli::{Cli, Commands, DEFAULT_LOG};
use tradeboard::error::DashboardError;
use tradeboard::importers::parse_trade_csv;
use tradeboard::model::TradeRecord;
use tradeboard::render;
use tradeboard::report::build_report;

fn main() -> Result<()> {
    // Initialize logging; stderr keeps stdout clean for --json output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command.unwrap_or(Commands::Show {
        file: DEFAULT_LOG.to_string(),
    }) {
        Commands::Show { file } => handle_show(&file, cli.json),
        Commands::Export { file, out } => handle_export(&file, &out),
    }
}

/// Load the trade log, or report why rendering cannot proceed.
///
/// A missing file is the "bot has not run yet" case: print a warning and
/// halt with a success exit, mirroring a dashboard that shows a notice
/// instead of a report. Anything else (including a missing datetime column)
/// propagates as an error.
fn load_records(file: &str) -> Result<Option<Vec<TradeRecord>>> {
    match parse_trade_csv(file) {
        Ok(records) => Ok(Some(records)),
        Err(e) => {
            if matches!(
                e.downcast_ref::<DashboardError>(),
                Some(DashboardError::FileMissing(_))
            ) {
                println!(
                    "{} No trade log found at {}. Run the trading bot first, then try again.",
                    "⚠".yellow().bold(),
                    file.bold()
                );
                return Ok(None);
            }
            Err(e)
        }
    }
}

fn handle_show(file: &str, json: bool) -> Result<()> {
    let Some(records) = load_records(file)? else {
        return Ok(());
    };

    let report = build_report(&records);
    if json {
        println!("{}", render::format_report_json(&report));
    } else {
        println!("{}", render::format_report(&report, file));
    }
    Ok(())
}

fn handle_export(file: &str, out: &str) -> Result<()> {
    let Some(records) = load_records(file)? else {
        return Ok(());
    };

    let report = build_report(&records);
    info!("Exporting dashboard for {} records", report.record_count);
    render::export_html(&report, out)?;
    println!(
        "{} Dashboard exported to {}",
        "✓".green().bold(),
        out.bold()
    );
    Ok(())
}
