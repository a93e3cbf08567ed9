//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Gateway/Transport Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { status: u16, endpoint: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    #[error("Failed to restore terminal: {0}")]
    TerminalRestore(String),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, endpoint: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// Recoverable errors may occur on any refresh cycle (network blips,
    /// backend restarts, malformed payloads) and must never stop the
    /// periodic loop.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::HttpStatus { .. }
                | Error::Json(_)
                | Error::ChannelClosed
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigInvalid { .. } | Error::TerminalInit(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");

        let err = Error::http_status(500, "/status");
        assert_eq!(err.to_string(), "HTTP 500 from /status");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::transport("timed out").is_recoverable());
        assert!(Error::http_status(502, "/alerts").is_recoverable());
        assert!(!Error::TerminalInit("no tty".into()).is_recoverable());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::config_invalid("refresh_interval_ms = -1").is_fatal());
        assert!(Error::TerminalInit("no tty".into()).is_fatal());
        assert!(!Error::transport("timed out").is_fatal());
        assert!(!Error::config("missing file").is_fatal());
    }

    #[test]
    fn test_error_constructors() {
        let _ = Error::transport("test");
        let _ = Error::http_status(404, "/machine/m9");
        let _ = Error::terminal("test");
        let _ = Error::config("test");
        let _ = Error::config_invalid("test");
    }
}
