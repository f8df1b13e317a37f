use crate::shared::text::serialize_iso;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Normalized severity token found in a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogSeverity {
    Warning,
    Error,
    Severe,
    Critical,
    Notice,
}

impl LogSeverity {
    /// Maps a matched severity word (any case) to its variant
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "SEVERE" => Some(Self::Severe),
            "CRITICAL" => Some(Self::Critical),
            "NOTICE" => Some(Self::Notice),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Severe => "SEVERE",
            Self::Critical => "CRITICAL",
            Self::Notice => "NOTICE",
        }
    }

    /// ERROR, CRITICAL or SEVERE
    pub fn is_error_class(&self) -> bool {
        matches!(self, Self::Error | Self::Critical | Self::Severe)
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LogRecord value object: one classified log line
///
/// A record only exists when both a severity token and a timestamp were
/// recognised in the source line. Records are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    path: PathBuf,
    line: String,
    #[serde(rename = "status")]
    severity: LogSeverity,
    #[serde(serialize_with = "serialize_iso")]
    timestamp: NaiveDateTime,
    source: String,
}

impl LogRecord {
    pub fn new(
        path: impl Into<PathBuf>,
        line: impl Into<String>,
        severity: LogSeverity,
        timestamp: NaiveDateTime,
        source: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line: line.into(),
            severity,
            timestamp,
            source: source.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn severity(&self) -> LogSeverity {
        self.severity
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Identifier of the archive the record was extracted from
    pub fn source(&self) -> &str {
        &self.source
    }
}
