//! Download descriptors projected from raw project records.
//!
//! Projection is pure: no network or filesystem access, fully deterministic
//! given the record, the requested quality, and the known-titles set.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::api::ProjectRecord;

/// Characters stripped from titles and usernames before they become part of a
/// filename. Union of the characters illegal on either major OS family.
const FORBIDDEN_FILENAME_CHARS: &[char] =
    &['\\', '/', '?', '"', '!', '<', '>', ':', '|', '*'];

/// 14-digit cache-busting path segment in cover URLs (e.g. `/20190101123456/`).
#[allow(clippy::expect_used)]
static CACHE_SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{14}/").expect("cache segment regex is valid"));

/// Rendition requested for the primary link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetQuality {
    /// Standard `/large/` rendition; always available.
    Large,
    /// Highest-resolution `/4k/` rendition; may not exist for older covers.
    FourK,
}

impl AssetQuality {
    /// URL path segment selecting this rendition.
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            Self::Large => "/large/",
            Self::FourK => "/4k/",
        }
    }
}

/// Normalized, self-contained record for one item to be downloaded.
///
/// Created once during enumeration, consumed exactly once by the pipeline,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    /// Filesystem-safe identity key: `"{title} - {username}"`. Not guaranteed
    /// globally unique; colliding titles overwrite each other on disk.
    pub title: String,
    /// Preferred-quality asset URL.
    pub primary_link: String,
    /// Standard-quality asset URL, used on the final attempt only.
    pub fallback_link: String,
    /// True when resume mode found the title already materialized.
    pub skip: bool,
    /// Total assets in the project; only the cover is downloaded.
    pub assets_count: u64,
}

impl DownloadDescriptor {
    /// Projects a raw record into a descriptor.
    ///
    /// `known_titles` is empty unless resume mode is active, so `skip` is
    /// false whenever resume mode is off.
    #[must_use]
    pub fn from_record(
        record: &ProjectRecord,
        quality: AssetQuality,
        known_titles: &HashSet<String>,
    ) -> Self {
        let title = format!(
            "{} - {}",
            sanitize_for_filename(&record.title),
            sanitize_for_filename(&record.user.username)
        );
        let primary_link = derive_asset_link(&record.cover.small_square_url, quality);
        let fallback_link = derive_asset_link(&record.cover.small_square_url, AssetQuality::Large);
        let skip = known_titles.contains(&title);

        Self {
            title,
            primary_link,
            fallback_link,
            skip,
            assets_count: record.assets_count,
        }
    }
}

/// Removes characters that are illegal in paths on either major OS family.
///
/// Idempotent: sanitizing an already-clean string is a no-op.
#[must_use]
pub fn sanitize_for_filename(value: &str) -> String {
    value
        .chars()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c))
        .collect()
}

/// Rewrites a `/small_square/` thumbnail URL into the requested rendition,
/// dropping the cache-busting segment.
fn derive_asset_link(small_square_url: &str, quality: AssetQuality) -> String {
    let rewritten = small_square_url.replacen("/small_square/", quality.path_segment(), 1);
    CACHE_SEGMENT_PATTERN.replace(&rewritten, "").into_owned()
}
