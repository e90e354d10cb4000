//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// ESV API error with status context
    #[error("ESV API error: {message}")]
    Esv {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Canonical text source error
    #[error("Bible source error: {0}")]
    Source(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create an ESV API error with HTTP status
    pub fn esv_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 | 403 => Some("Check the ESV_API_KEY environment variable"),
            404 => Some("The requested passage was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("ESV server error - try again later"),
            _ => None,
        };
        Self::Esv {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn esv_status_provides_hints() {
        let err = Error::esv_status("Unauthorized", 401);
        match err {
            Error::Esv { hint: Some(h), .. } => {
                assert!(h.contains("ESV_API_KEY"));
            }
            _ => panic!("Expected Esv error with hint"),
        }
    }

    #[test]
    fn esv_status_5xx_hint() {
        let err = Error::esv_status("Bad gateway", 502);
        match err {
            Error::Esv { hint: Some(h), status: Some(502), .. } => {
                assert!(h.contains("server error"));
            }
            _ => panic!("Expected Esv error with server hint"),
        }
    }
}
