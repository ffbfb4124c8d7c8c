/// Authentication helpers for Microsoft Advertising and Microsoft identity flows.
pub mod auth;
/// Bulk file mapping, reading, writing and the Bulk service client.
pub mod bulk;
/// Campaign management domain objects and value sets.
pub mod campaignmanagement;
/// Client configuration loaded from disk.
pub mod config;
/// Crate error type.
pub mod error;

pub use error::{Error, Result};

/// Logging verbosity for SDK operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit verbose debug output.
    Debug,
    /// Emit standard informational output.
    Information,
}

impl LogLevel {
    /// True when request-level tracing should be emitted.
    pub fn is_debug(self) -> bool {
        matches!(self, LogLevel::Debug)
    }
}

impl Default for LogLevel {
    /// Defaults to `Information` logging.
    fn default() -> Self {
        LogLevel::Information
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Information => log::LevelFilter::Info,
        }
    }
}
