//! Tradeboard - AI trading log dashboard
//!
//! This library reads the CSV log written by an AI crypto trading bot and
//! turns it into dashboard artifacts: record previews, balance and sentiment
//! series, a cumulative profit-rate series, decision statistics, and an
//! execution log. Rendering (terminal, JSON, HTML) is layered on top of the
//! pure report builder.

pub mod error;
pub mod importers;
pub mod model;
pub mod render;
pub mod report;
pub mod utils;
