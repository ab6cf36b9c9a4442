//! Application state: the six immutable slices the store owns.
//!
//! Every slice is replaced as a whole when it changes; listeners only ever
//! see complete snapshots.

mod action;

pub use action::Action;

use crate::errors::{ErrorCategory, ExportError, ImportError};
use crate::interchange::ExportEnvelope;
use crate::model::Playlist;
use crate::queue::QueueState;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle of the playlist catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlaylistsState {
    #[default]
    Loading,
    Loaded(Vec<Playlist>),
    Empty,
    Error(String),
}

impl PlaylistsState {
    /// The loaded catalog, or an empty slice in any other lifecycle state.
    pub fn playlists(&self) -> &[Playlist] {
        match self {
            PlaylistsState::Loaded(playlists) => playlists,
            _ => &[],
        }
    }
}

/// Lifecycle of the embedded player. The carried `video_id` is the YouTube
/// id of the focused video.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayerState {
    #[default]
    Empty,
    Loading {
        video_id: String,
        autoplay: bool,
    },
    Buffering(String),
    Playing(String),
    Paused(String),
    Error(String),
}

impl PlayerState {
    /// YouTube id the player is currently bound to, if any.
    pub fn video_id(&self) -> Option<&str> {
        match self {
            PlayerState::Loading { video_id, .. }
            | PlayerState::Buffering(video_id)
            | PlayerState::Playing(video_id)
            | PlayerState::Paused(video_id) => Some(video_id),
            PlayerState::Empty | PlayerState::Error(_) => None,
        }
    }
}

/// Lifecycle of the import/export pipelines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImportExportState {
    #[default]
    Idle,
    ExportInProgress,
    ExportSucceeded(DateTime<Utc>),
    ExportFailed(ExportError),
    ImportParsing,
    ImportParsed(ExportEnvelope),
    ImportValidated(ExportEnvelope),
    ImportApplied,
    ImportSucceeded {
        playlist_count: usize,
        video_count: usize,
    },
    ImportFailed(ImportError),
}

/// Whether the in-memory catalog differs from the durable store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersistenceState {
    pub is_dirty: bool,
    pub last_persist_attempt_utc: Option<DateTime<Utc>>,
    pub last_persist_error: Option<String>,
}

/// User-visible message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Severity a failed operation surfaces with.
    pub fn for_category(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Validation | ErrorCategory::NotFound | ErrorCategory::Transient => {
                Severity::Warning
            }
            ErrorCategory::External | ErrorCategory::Unexpected => Severity::Error,
        }
    }
}

/// A user-visible message. Removed only on explicit dismissal.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub correlation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub dismissible: bool,
}

impl Notification {
    pub fn info(message: &str) -> Self {
        Self {
            severity: Severity::Info,
            message: message.to_string(),
            correlation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            dismissible: true,
        }
    }
}

/// Root state: six slices, replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub playlists: PlaylistsState,
    pub queue: QueueState,
    pub player: PlayerState,
    pub import_export: ImportExportState,
    pub persistence: PersistenceState,
    pub notifications: Vec<Notification>,
}
