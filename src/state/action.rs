//! The closed set of actions the store accepts.

use super::Notification;
use crate::errors::{ExportError, ImportError, OperationError};
use crate::interchange::ExportEnvelope;
use crate::model::Playlist;
use crate::queue::RepeatMode;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An immutable value describing an intent to change state or the result
/// of an asynchronous operation. Dispatched through the store's FIFO
/// channel and reduced strictly in enqueue order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- Lifecycle ---
    Initialize,
    PlaylistsLoaded(Vec<Playlist>),
    SelectPlaylist(Uuid),
    PlaylistLoaded(Playlist),

    // --- Queue ---
    SelectVideo { index: usize, autoplay: bool },
    SortChanged { old_index: usize, new_index: usize },

    // --- Playback ---
    PlayerStateChanged { code: i32, video_id: String },
    VideoEnded,
    NextRequested,
    PrevRequested,
    PlaybackAdvanced { video_id: Uuid },
    PlaybackStopped,
    ShuffleSet { enabled: bool, seed: Option<u64> },
    RepeatSet(RepeatMode),

    // --- Undo/redo ---
    UndoRequested,
    RedoRequested,

    // --- Catalog edits (effect-only; state arrives via reload actions) ---
    CreatePlaylist { name: String, description: Option<String> },
    RenamePlaylist { id: Uuid, name: String, description: Option<String> },
    DeletePlaylist(Uuid),
    AddVideo { url: String, title: String },
    RemoveVideo { playlist_id: Uuid, video_id: Uuid },

    // --- Notifications & failures ---
    ShowNotification(Notification),
    DismissNotification(Uuid),
    OperationFailed(OperationError),

    // --- Export ---
    ExportRequested,
    ExportPrepared,
    ExportSucceeded { exported_at: DateTime<Utc> },
    ExportFailed(ExportError),

    // --- Import ---
    ImportRequested { json: String },
    ImportParsed(ExportEnvelope),
    ImportValidated(ExportEnvelope),
    ImportApplied {
        playlists: Vec<Playlist>,
        selected_playlist_id: Option<Uuid>,
    },
    ImportSucceeded {
        playlist_count: usize,
        video_count: usize,
    },
    ImportFailed(ImportError),

    // --- Persistence ---
    PersistRequested,
    PersistSucceeded { at: DateTime<Utc> },
    PersistFailed { message: String, at: DateTime<Utc> },
}

impl Action {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Initialize => "Initialize",
            Action::PlaylistsLoaded(_) => "PlaylistsLoaded",
            Action::SelectPlaylist(_) => "SelectPlaylist",
            Action::PlaylistLoaded(_) => "PlaylistLoaded",
            Action::SelectVideo { .. } => "SelectVideo",
            Action::SortChanged { .. } => "SortChanged",
            Action::PlayerStateChanged { .. } => "PlayerStateChanged",
            Action::VideoEnded => "VideoEnded",
            Action::NextRequested => "NextRequested",
            Action::PrevRequested => "PrevRequested",
            Action::PlaybackAdvanced { .. } => "PlaybackAdvanced",
            Action::PlaybackStopped => "PlaybackStopped",
            Action::ShuffleSet { .. } => "ShuffleSet",
            Action::RepeatSet(_) => "RepeatSet",
            Action::UndoRequested => "UndoRequested",
            Action::RedoRequested => "RedoRequested",
            Action::CreatePlaylist { .. } => "CreatePlaylist",
            Action::RenamePlaylist { .. } => "RenamePlaylist",
            Action::DeletePlaylist(_) => "DeletePlaylist",
            Action::AddVideo { .. } => "AddVideo",
            Action::RemoveVideo { .. } => "RemoveVideo",
            Action::ShowNotification(_) => "ShowNotification",
            Action::DismissNotification(_) => "DismissNotification",
            Action::OperationFailed(_) => "OperationFailed",
            Action::ExportRequested => "ExportRequested",
            Action::ExportPrepared => "ExportPrepared",
            Action::ExportSucceeded { .. } => "ExportSucceeded",
            Action::ExportFailed(_) => "ExportFailed",
            Action::ImportRequested { .. } => "ImportRequested",
            Action::ImportParsed(_) => "ImportParsed",
            Action::ImportValidated(_) => "ImportValidated",
            Action::ImportApplied { .. } => "ImportApplied",
            Action::ImportSucceeded { .. } => "ImportSucceeded",
            Action::ImportFailed(_) => "ImportFailed",
            Action::PersistRequested => "PersistRequested",
            Action::PersistSucceeded { .. } => "PersistSucceeded",
            Action::PersistFailed { .. } => "PersistFailed",
        }
    }
}
