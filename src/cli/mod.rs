use clap::{Parser, Subcommand};

/// Default log location, matching what the trading bot writes.
pub const DEFAULT_LOG: &str = "trade_history.csv";

#[derive(Parser)]
#[command(name = "tradeboard")]
#[command(version, about = "AI trading log dashboard")]
#[command(
    long_about = "Render an AI crypto trading log (balances, Fear & Greed index, decisions, profit rate) as a terminal dashboard, JSON artifacts, or a standalone HTML page."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output report artifacts in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard in the terminal (default)
    Show {
        /// Path to the trade history CSV
        #[arg(default_value = DEFAULT_LOG)]
        file: String,
    },

    /// Export the dashboard as a self-contained HTML page
    Export {
        /// Path to the trade history CSV
        #[arg(default_value = DEFAULT_LOG)]
        file: String,

        /// Output path for the HTML page
        #[arg(short, long, default_value = "dashboard.html")]
        out: String,
    },
}
