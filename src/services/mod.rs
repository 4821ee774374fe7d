//! Services for spending aggregation, persistence and configuration

pub mod aggregator;
pub mod config;
pub mod format;
pub mod journal;
pub mod store;

pub use aggregator::Aggregator;
pub use config::Config;
pub use format::{
    bucket_label, format_amount, format_money, format_number, format_percentage_bar,
    format_sparkline, percent_of,
};
pub use journal::Journal;
pub use store::{JsonFileStore, MemoryStore, Store, StoreLock};
