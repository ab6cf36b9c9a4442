//! Domain entities for the ArcFlow catalog.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A named collection of videos. The playlist owns its `videos` sequence;
/// videos refer back to it through `VideoItem::playlist_id` as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub videos: Vec<VideoItem>,
}

impl Playlist {
    /// Returns the videos ordered by their `position` field.
    pub fn videos_in_order(&self) -> Vec<VideoItem> {
        let mut videos = self.videos.clone();
        videos.sort_by_key(|v| v.position);
        videos
    }
}

/// A single queued video.
///
/// `position` is a contiguous integer starting at 0 within the owning
/// playlist and is renumbered after every reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoItem {
    pub id: Uuid,
    pub youtube_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    /// Duration in whole seconds, when known.
    pub duration: Option<u32>,
    pub added_at: DateTime<Utc>,
    pub position: u32,
    pub playlist_id: Uuid,
}

impl VideoItem {
    /// Rebuilds the item with a new position. Items are immutable records;
    /// renumbering replaces them rather than mutating in place.
    pub fn with_position(&self, position: u32) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}
