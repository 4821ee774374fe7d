//! Personal spending journal: entries, categories and the aggregation
//! engine behind the dashboard.

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
