//! Error types for the uploader.
//!
//! Library code uses `thiserror` enums; the binary wraps them in `anyhow`.

use std::path::PathBuf;

use cadence_core::{FailureKind, ScheduleError};
use thiserror::Error;

/// Failure kind tag for non-200 responses. Always retried.
pub const KIND_UPLOAD: &str = "upload";
/// Failure kind tag for transport failures. Retried only when tenacious.
pub const KIND_TRANSPORT: &str = "transport";

/// Errors from a single metric upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request never produced a response.
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than 200.
    #[error("server rejected upload with HTTP status {0}")]
    Rejected(u16),

    /// The payload could not be encoded as JSON.
    #[error("failed to encode metric payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The async runtime backing the client could not start.
    #[error("failed to start HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl FailureKind for UploadError {
    fn kind(&self) -> &str {
        match self {
            Self::Transport(_) => KIND_TRANSPORT,
            Self::Rejected(_) => KIND_UPLOAD,
            Self::Encode(_) => "encode",
            Self::Runtime(_) => "runtime",
        }
    }
}

/// Errors reading the credentials file.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The file could not be read.
    #[error("failed to read credentials from {path}: {source}")]
    Read {
        /// Credentials file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The first line is not `username:password`.
    #[error("bad number of fields in {path}: expected 2, found {found}")]
    FieldCount {
        /// Credentials file path.
        path: PathBuf,
        /// Number of `:`-separated fields found.
        found: usize,
    },
}

/// Errors resolving upload options from flags and settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was given neither on the command line nor in settings.
    #[error("{0} is a required option")]
    Missing(&'static str),

    /// The base URL does not parse, or cannot be joined with the metric path.
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The interval or resolution is not a usable schedule.
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}
