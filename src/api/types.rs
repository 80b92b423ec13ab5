//! Deserialized response shapes for the collection projects endpoint.

use serde::Deserialize;

/// One page of collection results.
///
/// `total_count` is the size of the whole collection and is repeated on every
/// page; the value from page 1 is authoritative and terminates enumeration.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionPage {
    /// Ordered project records for this page.
    pub data: Vec<ProjectRecord>,
    /// Total number of projects in the collection (constant across pages).
    pub total_count: u64,
}

/// A single project entry as served by the collection endpoint.
///
/// Read-only input; only the fields the downloader consumes are deserialized,
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    /// Display title of the project.
    pub title: String,
    /// Owning user.
    pub user: ProjectUser,
    /// Cover image metadata.
    pub cover: ProjectCover,
    /// Total assets in the project (the cover is one of them).
    pub assets_count: u64,
}

/// The `user` field of a project record.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectUser {
    /// Author username.
    pub username: String,
}

/// The `cover` field of a project record.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCover {
    /// Thumbnail URL containing the `/small_square/` rendition segment.
    pub small_square_url: String,
}
