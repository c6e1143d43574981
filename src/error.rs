//! Error types for screeninfo
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for screeninfo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,

    // Display host errors (3xx)
    HostUnavailable = 300,
    ProbeFailed = 301,
    ProfileMalformed = 302,
    EdidMalformed = 303,

    // Metrics errors (4xx)
    MetricsInvalid = 400,

    // Internal errors (9xx)
    InternalError = 900,
    NotSupported = 902,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Host errors
            400..=499 => 40, // Metrics errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Display Host Errors
    // ─────────────────────────────────────────────────────────────

    /// No usable display source was found
    #[error("No display host available: {message}")]
    HostUnavailable { message: String },

    /// A host was selected but querying it failed
    #[error("Display probe failed on {host}: {message}")]
    ProbeFailed { host: String, message: String },

    #[error("Malformed display profile {path}: {message}")]
    ProfileMalformed { path: PathBuf, message: String },

    #[error("Malformed EDID: {message}")]
    EdidMalformed { message: String },

    // ─────────────────────────────────────────────────────────────
    // Metrics Errors
    // ─────────────────────────────────────────────────────────────

    #[error("Invalid display metrics: {field} {message}")]
    MetricsInvalid { field: &'static str, message: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Toml(_) => ErrorCode::ConfigParseError,
            Error::Json(_) => ErrorCode::InternalError,

            Error::HostUnavailable { .. } => ErrorCode::HostUnavailable,
            Error::ProbeFailed { .. } => ErrorCode::ProbeFailed,
            Error::ProfileMalformed { .. } => ErrorCode::ProfileMalformed,
            Error::EdidMalformed { .. } => ErrorCode::EdidMalformed,

            Error::MetricsInvalid { .. } => ErrorCode::MetricsInvalid,

            Error::NotSupported(_) => ErrorCode::NotSupported,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'screeninfo config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'screeninfo config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::HostUnavailable { .. } => Some(
                "Pass a captured display profile with --profile, or use --source mock to see a reference device."
            ),
            Error::ProbeFailed { .. } => Some(
                "Check that the display is connected and that /sys/class/drm is readable."
            ),
            Error::ProfileMalformed { .. } => Some(
                "A profile needs at least [device] and [metrics] sections. See tests/fixtures for examples."
            ),
            Error::EdidMalformed { .. } => Some(
                "The monitor reported an unreadable EDID. Try another connector with --connector."
            ),
            Error::MetricsInvalid { .. } => Some(
                "Pixel sizes, density and density bucket must all be positive."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            self.code().as_str(),
            self
        );

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(message: impl Into<String>, source: toml::de::Error) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn host_unavailable(message: impl Into<String>) -> Self {
        Error::HostUnavailable {
            message: message.into(),
        }
    }

    pub fn probe_failed(host: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProbeFailed {
            host: host.into(),
            message: message.into(),
        }
    }

    pub fn profile_malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::ProfileMalformed {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn edid_malformed(message: impl Into<String>) -> Self {
        Error::EdidMalformed {
            message: message.into(),
        }
    }

    pub fn metrics_invalid(field: &'static str, message: impl Into<String>) -> Self {
        Error::MetricsInvalid {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::HostUnavailable.as_str(), "E300");
        assert_eq!(ErrorCode::MetricsInvalid.as_str(), "E400");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::EdidMalformed.exit_code(), 30);
        assert_eq!(ErrorCode::MetricsInvalid.exit_code(), 40);
        assert_eq!(ErrorCode::NotSupported.exit_code(), 90);
    }

    #[test]
    fn test_error_display() {
        let err = Error::config_not_found("/path/to/config.toml");
        assert!(err.to_string().contains("/path/to/config.toml"));

        let err = Error::metrics_invalid("width_px", "must be positive");
        assert_eq!(err.to_string(), "Invalid display metrics: width_px must be positive");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::config_not_found("/test").code(), ErrorCode::ConfigNotFound);
        assert_eq!(Error::host_unavailable("none").code(), ErrorCode::HostUnavailable);
        assert_eq!(Error::probe_failed("drm", "gone").code(), ErrorCode::ProbeFailed);
        assert_eq!(Error::edid_malformed("short").code(), ErrorCode::EdidMalformed);
        assert_eq!(
            Error::profile_malformed("/p.toml", "bad").code(),
            ErrorCode::ProfileMalformed
        );
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::host_unavailable("nothing connected");
        assert!(err.suggestion().unwrap().contains("--profile"));

        assert!(Error::Internal("x".into()).suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let formatted = Error::config_not_found("/test/config.toml").format_for_terminal();

        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let formatted = Error::config_not_found("/test/config.toml").format_for_log();

        assert!(formatted.contains("[E100]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_io_errors_carry_path() {
        let err = Error::IoWrite {
            path: PathBuf::from("/readonly/summary.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(err.code(), ErrorCode::IoWrite);
        assert_eq!(err.exit_code(), 20);
        assert!(err.format_for_log().contains("/readonly/summary.txt"));
    }
}
