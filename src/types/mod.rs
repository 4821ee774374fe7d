//! Type definitions for spendlog

mod entry;
mod error;
mod period;
mod report;

pub use entry::*;
pub use error::*;
pub use period::*;
pub use report::*;

/// Store loading warning types
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWarning {
    /// Failed to open or read the store file
    LoadFailed(String),
    /// Store file was corrupted (invalid JSON or invalid records)
    Corrupted(String),
}

impl StoreWarning {
    pub fn message(&self) -> &str {
        match self {
            Self::LoadFailed(msg) | Self::Corrupted(msg) => msg,
        }
    }
}
