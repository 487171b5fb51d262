// InternDesk - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// The user only ever sees "it worked" or "it didn't"; the variants below
// exist so the log says *why*.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all InternDesk operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum InternDeskError {
    /// A portal API call failed.
    Api(ApiError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Roster export failed.
    Export(ExportError),
}

impl fmt::Display for InternDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for InternDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// API errors
// ---------------------------------------------------------------------------

/// Errors produced by a portal API call.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response body: connection refused,
    /// timeout, or TLS failure. Non-2xx statuses are `Rejected`.
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON envelope.
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    /// The server refused the call: a non-2xx status, or an envelope with
    /// `success: false`. `message` is the server's, or the HTTP status.
    Rejected { endpoint: String, message: String },

    /// The envelope carried `success: true` but no `data` payload.
    MissingPayload { endpoint: String },

    /// The base URL could not be joined with an endpoint path.
    InvalidUrl { endpoint: String, reason: String },
}

impl ApiError {
    /// The endpoint path the failing call targeted.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::Rejected { endpoint, .. }
            | Self::MissingPayload { endpoint }
            | Self::InvalidUrl { endpoint, .. } => endpoint,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { endpoint, source } => {
                write!(f, "request to '{endpoint}' failed: {source}")
            }
            Self::Decode { endpoint, source } => {
                write!(f, "unexpected response from '{endpoint}': {source}")
            }
            Self::Rejected { endpoint, message } => {
                write!(f, "'{endpoint}' rejected the request: {message}")
            }
            Self::MissingPayload { endpoint } => {
                write!(f, "'{endpoint}' reported success but returned no data")
            }
            Self::InvalidUrl { endpoint, reason } => {
                write!(f, "cannot build URL for '{endpoint}': {reason}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ApiError> for InternDeskError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to roster export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for InternDeskError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// A required value was given neither on the command line nor in the
    /// config file.
    MissingValue { field: String, hint: String },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::MissingValue { field, hint } => {
                write!(f, "Config '{field}' is not set. {hint}")
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for InternDeskError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for InternDesk results.
pub type Result<T> = std::result::Result<T, InternDeskError>;
