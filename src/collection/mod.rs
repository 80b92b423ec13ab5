//! Collection enumeration: walk the paginated endpoint into a descriptor list.
//!
//! [`enumerate_collection`] drives the [`ApiClient`] across pages starting at
//! page 1 and projects every raw record into a [`DownloadDescriptor`]. The
//! result preserves page order, then within-page order - the exact order the
//! pipeline downloads in.

mod descriptor;

pub use descriptor::{AssetQuality, DownloadDescriptor, sanitize_for_filename};

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, CollectionPage};

/// Enumerates every project in a collection.
///
/// The `total_count` reported by page 1 is authoritative: pages are fetched
/// while the accumulated count is below it, so a `total_count` of 0 never
/// fetches past page 1, and a server that returns more items than advertised
/// still terminates. A page that contributes no items ends the walk early
/// with a warning rather than looping on an inconsistent count.
///
/// `known_titles` marks descriptors whose file is already present; pass an
/// empty set when resume mode is off.
///
/// # Errors
///
/// Any page fetch failure aborts the whole enumeration; no partial list is
/// returned.
pub async fn enumerate_collection(
    client: &ApiClient,
    collection_id: &str,
    quality: AssetQuality,
    known_titles: &HashSet<String>,
) -> Result<Vec<DownloadDescriptor>, ApiError> {
    let first = client.fetch_page(collection_id, 1).await?;
    let total_count = first.total_count;
    let mut descriptors = project_page(&first, quality, known_titles);
    debug!(
        total_count,
        page_items = descriptors.len(),
        "fetched first page"
    );

    let mut page: u32 = 2;
    while (descriptors.len() as u64) < total_count {
        let next = client.fetch_page(collection_id, page).await?;
        if next.data.is_empty() {
            warn!(
                page,
                collected = descriptors.len(),
                total_count,
                "collection ended before the advertised total"
            );
            break;
        }
        descriptors.extend(project_page(&next, quality, known_titles));
        debug!(page, collected = descriptors.len(), "fetched page");
        page += 1;
    }

    Ok(descriptors)
}

/// Projects one page of raw records into download descriptors. Pure.
#[must_use]
pub fn project_page(
    page: &CollectionPage,
    quality: AssetQuality,
    known_titles: &HashSet<String>,
) -> Vec<DownloadDescriptor> {
    page.data
        .iter()
        .map(|record| DownloadDescriptor::from_record(record, quality, known_titles))
        .collect()
}
