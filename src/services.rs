//! Collaborator interfaces the core consumes.
//!
//! The surrounding shell wires in concrete implementations (a relational
//! store, the embedded player, the browser download bridge); the core only
//! ever sees these traits behind `Arc<dyn ...>`.

use crate::errors::ErrorCategory;
use crate::model::{Playlist, VideoItem};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Error surface shared by all collaborators. Each variant maps onto one
/// [`ErrorCategory`] so effects can categorize failures uniformly.
#[derive(Debug)]
pub enum ServiceError {
    Validation(String),
    NotFound(String),
    Transient(String),
    External(String),
    Unexpected(String),
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Validation(_) => ErrorCategory::Validation,
            ServiceError::NotFound(_) => ErrorCategory::NotFound,
            ServiceError::Transient(_) => ErrorCategory::Transient,
            ServiceError::External(_) => ErrorCategory::External,
            ServiceError::Unexpected(_) => ErrorCategory::Unexpected,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(msg) => write!(f, "validation error: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "not found: {}", msg),
            ServiceError::Transient(msg) => write!(f, "transient error: {}", msg),
            ServiceError::External(msg) => write!(f, "external error: {}", msg),
            ServiceError::Unexpected(msg) => write!(f, "unexpected error: {}", msg),
        }
    }
}

impl Error for ServiceError {}

/// CRUD surface of the relational playlist store.
#[async_trait::async_trait]
pub trait PlaylistService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Playlist>, ServiceError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Playlist>, ServiceError>;
    async fn create(&self, playlist: Playlist) -> Result<(), ServiceError>;
    async fn update(&self, playlist: Playlist) -> Result<(), ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn add_video_to_playlist(
        &self,
        playlist_id: Uuid,
        video: VideoItem,
    ) -> Result<(), ServiceError>;
    async fn remove_video_from_playlist(
        &self,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<(), ServiceError>;
    async fn update_video_positions(
        &self,
        playlist_id: Uuid,
        videos: Vec<VideoItem>,
    ) -> Result<(), ServiceError>;
    async fn replace_all_playlists(&self, playlists: Vec<Playlist>) -> Result<(), ServiceError>;
}

/// Handle to the embedded video player. `video_id` is the YouTube id of the
/// video to load, not a catalog identity.
#[async_trait::async_trait]
pub trait VideoPlayer: Send + Sync {
    async fn load(&self, video_id: &str, autoplay: bool) -> Result<(), ServiceError>;
    async fn play(&self) -> Result<(), ServiceError>;
    async fn pause(&self) -> Result<(), ServiceError>;
    async fn destroy(&self) -> Result<(), ServiceError>;
}

/// Bridge that hands a text document to the browser as a file download.
#[async_trait::async_trait]
pub trait DownloadSink: Send + Sync {
    async fn save(&self, file_name: &str, text: &str) -> Result<(), ServiceError>;
}

/// The full set of collaborators a store instance is wired with.
#[derive(Clone)]
pub struct Collaborators {
    pub playlists: Arc<dyn PlaylistService>,
    pub player: Arc<dyn VideoPlayer>,
    pub downloads: Arc<dyn DownloadSink>,
}
