//! Asset transfer: streaming HTTP client, retry pacing, sequential pipeline.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient, flushed before success is declared)
//! - Bounded per-item retries with exponential backoff and jitter
//! - Fallback-link downgrade on the final attempt
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use artgrab_core::download::{DownloadPipeline, HttpClient, RetryPolicy};
//! use std::path::PathBuf;
//!
//! # async fn example(descriptors: Vec<artgrab_core::DownloadDescriptor>) {
//! let pipeline = DownloadPipeline::new(
//!     HttpClient::new(),
//!     RetryPolicy::default(),
//!     PathBuf::from("./artworks"),
//! );
//! let report = pipeline.run(&descriptors).await;
//! println!("downloaded {}, failed {}", report.downloaded(), report.failures().len());
//! # }
//! ```

mod client;
mod constants;
mod error;
mod pipeline;
mod retry;

pub use client::HttpClient;
pub use constants::DEFAULT_MAX_ATTEMPTS;
pub use error::DownloadError;
pub use pipeline::{DownloadPipeline, DownloadReport, FailureRecord};
pub use retry::RetryPolicy;
