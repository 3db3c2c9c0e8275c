// Import module - trade history CSV parser

pub mod trade_csv;

pub use trade_csv::parse_trade_csv;
