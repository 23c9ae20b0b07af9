use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a log event, ordered least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Verbose,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Severity implied by an HTTP status code: `2xx` info, `3xx` warning,
    /// `400+` error. Informational (`1xx`) statuses stay at info.
    pub fn from_status(status: u16) -> Self {
        match status {
            300..=399 => Self::Warning,
            400.. => Self::Error,
            _ => Self::Info,
        }
    }

    /// Inverse of [`as_str`](Self::as_str). Unknown names return `None`;
    /// wire parsing defaults them instead of failing.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "verbose" => Some(Self::Verbose),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
