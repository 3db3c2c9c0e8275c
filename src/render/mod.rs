// Render module - terminal, JSON, and HTML outputs for dashboard artifacts

pub mod html;
pub mod json;
pub mod terminal;

pub use html::export_html;
pub use json::format_report_json;
pub use terminal::format_report;
