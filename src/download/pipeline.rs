//! Sequential download pipeline: one item at a time, bounded retries.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::collection::DownloadDescriptor;

use super::client::HttpClient;
use super::error::DownloadError;
use super::retry::RetryPolicy;

/// A descriptor whose transfer attempts were all exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Identity key of the failed item.
    pub title: String,
    /// The item's original primary link.
    pub link: String,
}

/// Outcome of a pipeline run.
///
/// The failure list is the only user-visible indicator of partial failure;
/// nothing is retried automatically across runs.
#[derive(Debug, Default)]
pub struct DownloadReport {
    downloaded: usize,
    skipped: usize,
    failures: Vec<FailureRecord>,
}

impl DownloadReport {
    /// Number of items transferred successfully.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Number of items skipped because their file was already present.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Items whose attempts were all exhausted, in processing order.
    #[must_use]
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// True when nothing that was attempted failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sequential download pipeline.
///
/// Consumes descriptors strictly one at a time: an item's transfer fully
/// resolves (success or exhausted attempts) before the next item's first
/// request is issued. This bounds open connections and file handles to one,
/// trading throughput for deterministic resource use.
#[derive(Debug)]
pub struct DownloadPipeline {
    client: HttpClient,
    policy: RetryPolicy,
    download_dir: PathBuf,
}

impl DownloadPipeline {
    /// Creates a pipeline writing into `download_dir` (assumed to exist).
    #[must_use]
    pub fn new(client: HttpClient, policy: RetryPolicy, download_dir: PathBuf) -> Self {
        Self {
            client,
            policy,
            download_dir,
        }
    }

    /// Runs the pipeline over `descriptors`, in order.
    ///
    /// Individual failures are recorded in the report, never propagated; a
    /// failed item does not stop the run.
    pub async fn run(&self, descriptors: &[DownloadDescriptor]) -> DownloadReport {
        let mut report = DownloadReport::default();

        for descriptor in descriptors {
            if descriptor.skip {
                info!(title = %descriptor.title, "already present, skipping");
                report.skipped += 1;
                continue;
            }

            match self.transfer(descriptor).await {
                Ok(()) => report.downloaded += 1,
                Err(error) => {
                    warn!(
                        title = %descriptor.title,
                        error = %error,
                        attempts = self.policy.max_attempts(),
                        "download failed after all attempts"
                    );
                    report.failures.push(FailureRecord {
                        title: descriptor.title.clone(),
                        link: descriptor.primary_link.clone(),
                    });
                }
            }
        }

        report
    }

    /// Attempts one descriptor up to the attempt budget, returning the final
    /// error once the budget is exhausted.
    async fn transfer(&self, descriptor: &DownloadDescriptor) -> Result<(), DownloadError> {
        let max_attempts = self.policy.max_attempts();
        let target = self.download_dir.join(format!("{}.jpg", descriptor.title));

        if descriptor.assets_count > 1 {
            debug!(
                title = %descriptor.title,
                assets = descriptor.assets_count,
                "project has more assets than the cover being saved"
            );
        }

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let link = link_for_attempt(descriptor, attempt, max_attempts);
            debug!(title = %descriptor.title, attempt, max_attempts, %link, "attempting transfer");

            match self.client.download_to_path(link, &target).await {
                Ok(bytes) => {
                    info!(
                        title = %descriptor.title,
                        bytes,
                        path = %target.display(),
                        "downloaded"
                    );
                    return Ok(());
                }
                Err(error) if attempt < max_attempts => {
                    let delay = self.policy.delay_after(attempt);
                    warn!(
                        title = %descriptor.title,
                        attempt,
                        max_attempts,
                        error = %error,
                        delay_ms = delay.as_millis() as u64,
                        "transfer failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// Link policy: primary link first; the final attempt downgrades to the
/// fallback link as a degraded-quality safety net. A single-attempt budget
/// has no room for the fallback and uses the primary link only.
fn link_for_attempt(descriptor: &DownloadDescriptor, attempt: u32, max_attempts: u32) -> &str {
    if attempt == max_attempts && max_attempts > 1 {
        &descriptor.fallback_link
    } else {
        &descriptor.primary_link
    }
}
