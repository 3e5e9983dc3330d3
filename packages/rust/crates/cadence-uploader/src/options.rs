//! Resolved upload options: flags over settings over defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cadence_core::{RetryPolicy, ScheduleConfig, secs_to_duration};
use reqwest::Url;

use crate::cli::UploadArgs;
use crate::credentials::DEFAULT_AUTH_FILE_NAME;
use crate::error::{ConfigError, KIND_TRANSPORT, KIND_UPLOAD};
use crate::settings::UploaderSettings;

/// Default idle resolution; uploads are cheap to check for.
pub const DEFAULT_RESOLUTION_MS: u64 = 1;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the upload loop needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    /// Metrics service base URL.
    pub base_url: Url,
    /// Custom metric name.
    pub source_name: String,
    /// Target interval between uploads.
    pub interval: Duration,
    /// Idle clock-check resolution.
    pub resolution: Duration,
    /// Upload count; `None` runs forever.
    pub max_iterations: Option<u64>,
    /// Retry transport failures.
    pub tenacious: bool,
    /// Credentials file.
    pub auth_file: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Skip TLS certificate verification.
    pub insecure_tls: bool,
}

impl UploadOptions {
    /// Merge `args` over `settings`; `home` expands `~/` and locates the
    /// default credentials file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] names the first absent required flag;
    /// [`ConfigError::InvalidUrl`] and [`ConfigError::Schedule`] report
    /// unusable values.
    pub fn resolve(
        args: &UploadArgs,
        settings: &UploaderSettings,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let source_name = non_empty(args.source_name.as_deref())
            .or_else(|| non_empty(settings.source_name.as_deref()))
            .ok_or(ConfigError::Missing("--source-name"))?;
        let raw_url = non_empty(args.base_url.as_deref())
            .or_else(|| non_empty(settings.base_url.as_deref()))
            .ok_or(ConfigError::Missing("--base-url"))?;
        let interval_secs = args
            .interval
            .or(settings.interval_secs)
            .ok_or(ConfigError::Missing("--interval"))?;

        let base_url = Url::parse(&raw_url).map_err(|error| ConfigError::InvalidUrl {
            url: raw_url.clone(),
            reason: error.to_string(),
        })?;
        let interval = secs_to_duration(interval_secs)?;
        let resolution = Duration::from_millis(
            args.resolution_ms
                .or(settings.resolution_ms)
                .unwrap_or(DEFAULT_RESOLUTION_MS),
        );
        let max_iterations = args
            .max_iterations
            .or(settings.max_iterations)
            .and_then(|value| u64::try_from(value).ok());

        let auth_file = match (&args.auth_file, settings.auth_file.as_deref(), home) {
            (Some(path), _, _) => path.clone(),
            (None, Some(configured), home) => expand_home(configured, home),
            (None, None, Some(home)) => home.join(DEFAULT_AUTH_FILE_NAME),
            (None, None, None) => return Err(ConfigError::Missing("--auth-file")),
        };

        let options = Self {
            base_url,
            source_name,
            interval,
            resolution,
            max_iterations,
            tenacious: args.tenacious || settings.tenacious.unwrap_or(false),
            auth_file,
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(settings.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            insecure_tls: args.insecure_tls || settings.insecure_tls.unwrap_or(false),
        };
        options.schedule().validate()?;
        Ok(options)
    }

    /// Schedule for the upload loop.
    ///
    /// Rejected uploads are always retried; transport failures only when
    /// tenacious.
    pub fn schedule(&self) -> ScheduleConfig<u16> {
        let mut retry = RetryPolicy::new().retry_kind(KIND_UPLOAD);
        if self.tenacious {
            retry = retry.retry_kind(KIND_TRANSPORT);
        }
        let config = ScheduleConfig::every(self.interval)
            .with_resolution(self.resolution)
            .with_retry(retry);
        match self.max_iterations {
            Some(limit) => config.with_max_repetitions(limit),
            None => config,
        }
    }
}

/// Current user's home directory from `HOME`.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
