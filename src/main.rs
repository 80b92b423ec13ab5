//! CLI entry point for the artgrab tool.

use std::collections::HashSet;
use std::process::ExitCode;

use anyhow::{Context, Result};
use artgrab_core::{
    ApiClient, AssetQuality, DownloadPipeline, HttpClient, RetryPolicy, ensure_download_dir,
    enumerate_collection, existing_titles,
};
use clap::Parser;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let quality = if args.hq {
        AssetQuality::FourK
    } else {
        AssetQuality::Large
    };

    ensure_download_dir(&args.download_dir).context("preparing download directory")?;

    // The known-titles set is built once, before enumeration; titles
    // downloaded during this run are not added back.
    let known_titles = if args.resume {
        let titles =
            existing_titles(&args.download_dir).context("scanning existing downloads")?;
        info!(
            existing = titles.len(),
            "resume mode: items already present will be skipped"
        );
        titles
    } else {
        HashSet::new()
    };

    let api = ApiClient::new();
    info!(
        url = %api.collection_page_url(&args.collection_id, 1),
        "querying collection"
    );

    // Any page failure is fatal: partial listings are discarded, not downloaded.
    let descriptors = enumerate_collection(&api, &args.collection_id, quality, &known_titles)
        .await
        .context("enumerating collection")?;

    info!(items = descriptors.len(), "collection enumerated");

    let pipeline = DownloadPipeline::new(
        HttpClient::new(),
        RetryPolicy::with_max_attempts(u32::from(args.max_attempts)),
        args.download_dir.clone(),
    );
    let report = pipeline.run(&descriptors).await;

    info!(
        downloaded = report.downloaded(),
        skipped = report.skipped(),
        failed = report.failures().len(),
        "run complete"
    );

    for failure in report.failures() {
        warn!(title = %failure.title, link = %failure.link, "failed to download");
    }

    Ok(determine_exit_outcome(report.downloaded(), report.failures().len()).code())
}

/// Process exit outcome for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessExit {
    /// Every attempted item downloaded.
    Success,
    /// Some items downloaded, some exhausted their attempts.
    Partial,
    /// Every attempted item exhausted its attempts.
    Failure,
}

impl ProcessExit {
    fn code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Partial => ExitCode::from(1),
            Self::Failure => ExitCode::from(2),
        }
    }
}

/// Determines the process exit outcome from downloaded and failed counts.
///
/// Skipped items count as neither: a run that skips everything exits 0.
fn determine_exit_outcome(downloaded: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if downloaded > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}
