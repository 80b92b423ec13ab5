//! Collection endpoint access.
//!
//! This module provides the [`ApiClient`] for fetching pages of collection
//! metadata from the ArtStation projects endpoint, plus the deserialized
//! response shapes and structured error types.
//!
//! # Example
//!
//! ```no_run
//! use artgrab_core::api::ApiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new();
//! let page = client.fetch_page("12345", 1).await?;
//! println!("{} projects total", page.total_count);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{CollectionPage, ProjectCover, ProjectRecord, ProjectUser};
