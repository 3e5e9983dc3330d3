//! cadence CLI: upload metrics on a drift-corrected schedule, or preview the
//! synthetic data stream.
//!
//! Settings come from `packages/conf/cadence.yaml` and
//! `<config home>/cadence/settings.yaml`; flags override both.
//!
//! Logging: set `RUST_LOG=cadence_core=debug,cadence_uploader=debug` (or
//! `--verbose`) to see transport detail on stderr.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cadence_core::PeriodicRunner;
use cadence_uploader::cli::{Cli, Command, UploadArgs};
use cadence_uploader::{
    Credentials, MetricClient, UploadOptions, drive_uploads, home_dir, load_settings,
    metric_endpoint, render_json_lines, sample_rows, upload_rows,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "cadence_core=debug,cadence_uploader=debug,cadence=debug"
        } else {
            "cadence_core=info,cadence_uploader=info,cadence=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Upload(args) => run_upload(&args, cli.conf.as_deref()),
        Command::Sample { count, seed } => run_sample(count, seed),
    }
}

fn run_upload(args: &UploadArgs, conf: Option<&Path>) -> Result<()> {
    let settings = load_settings(conf);
    let home = home_dir();
    let options = UploadOptions::resolve(args, &settings, home.as_deref())?;
    let credentials = Credentials::from_file(&options.auth_file)?;
    let endpoint = metric_endpoint(&options.base_url, &options.source_name)?;
    let client = MetricClient::new(endpoint, credentials, options.timeout, options.insecure_tls)
        .context("failed to build metrics client")?;
    let mut runner = PeriodicRunner::new(options.schedule())?;

    tracing::info!(
        endpoint = %client.endpoint(),
        interval_secs = options.interval.as_secs_f64(),
        max_iterations = ?options.max_iterations,
        tenacious = options.tenacious,
        "starting scheduled uploads"
    );
    let rows = upload_rows(options.max_iterations);
    let summary = drive_uploads(&client, &mut runner, rows).context("upload loop stopped")?;
    tracing::info!(
        accepted = summary.accepted,
        retries = summary.retries,
        exhausted = summary.exhausted,
        "scheduled uploads finished"
    );
    Ok(())
}

fn run_sample(count: u64, seed: Option<u64>) -> Result<()> {
    let rendered = render_json_lines(sample_rows(count, seed)).context("failed to encode rows")?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write rows")?;
    Ok(())
}
