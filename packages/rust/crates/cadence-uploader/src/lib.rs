//! cadence-uploader - periodic metric uploads on top of `cadence-core`.
//!
//! - **cli / settings / options**: flags over YAML settings over defaults.
//! - **credentials**: `username:password` file for basic auth.
//! - **client**: blocking HTTP client behind the `MetricSink` seam.
//! - **upload**: the driving loop feeding one record per period to the runner.
//! - **sample**: JSON-lines preview of the synthetic data stream.

pub mod cli;
mod client;
mod credentials;
mod error;
mod options;
mod sample;
mod settings;
mod upload;

pub use client::{MetricClient, MetricPoint, MetricSink, metric_endpoint};
pub use credentials::{Credentials, DEFAULT_AUTH_FILE_NAME};
pub use error::{ConfigError, CredentialsError, KIND_TRANSPORT, KIND_UPLOAD, UploadError};
pub use options::{DEFAULT_RESOLUTION_MS, DEFAULT_TIMEOUT_SECS, UploadOptions, home_dir};
pub use sample::{SampleRow, render_json_lines, sample_rows};
pub use settings::{UploaderSettings, load_settings, load_settings_from_paths, settings_paths};
pub use upload::{UploadSummary, drive_uploads, upload_rows};
