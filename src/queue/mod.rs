//! The video queue: playback cursor, traversal order and bounded histories.

mod navigation;
mod snapshot;

pub use navigation::{
    compute_next, compute_prev, generate_shuffle_order, repair_playback_structures, NavDecision,
};
pub use snapshot::QueueSnapshot;

use crate::model::VideoItem;
use uuid::Uuid;

/// Maximum number of identities kept in the playback history.
pub const PLAYBACK_HISTORY_CAP: usize = 100;

/// Maximum depth of each undo/redo stack.
pub const UNDO_STACK_CAP: usize = 30;

/// Traversal repeat behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

/// The queue slice of the application state.
///
/// Invariants (restored by the repair pass and the reducer's validator):
/// `current_index` is a valid index into `videos`; `current_item_id` exists
/// in `videos` and denotes the same video as `current_index`; every id in
/// `shuffle_order` and `playback_history` exists in `videos`; while shuffle
/// is enabled a non-empty `shuffle_order` is a permutation of the video ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueState {
    pub selected_playlist_id: Option<Uuid>,
    /// Ordered by `position`.
    pub videos: Vec<VideoItem>,
    pub current_index: Option<usize>,
    /// Stable identity of the focused video; survives reorderings.
    pub current_item_id: Option<Uuid>,
    pub repeat_mode: RepeatMode,
    pub shuffle_enabled: bool,
    /// Traversal order while shuffle is enabled.
    pub shuffle_order: Vec<Uuid>,
    pub shuffle_seed: u64,
    /// Push-on-advance, pop-on-prev, capped at [`PLAYBACK_HISTORY_CAP`].
    pub playback_history: Vec<Uuid>,
    pub past: Vec<QueueSnapshot>,
    pub future: Vec<QueueSnapshot>,
}

impl QueueState {
    /// Index of a video by identity.
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.videos.iter().position(|v| v.id == id)
    }

    /// The currently focused video, when the cursor is set.
    pub fn current_video(&self) -> Option<&VideoItem> {
        self.current_item_id
            .and_then(|id| self.videos.iter().find(|v| v.id == id))
    }

    /// Pushes an identity onto the playback history, evicting the oldest
    /// entry when the cap is exceeded.
    pub(crate) fn push_history(&mut self, id: Uuid) {
        self.playback_history.push(id);
        while self.playback_history.len() > PLAYBACK_HISTORY_CAP {
            self.playback_history.remove(0);
        }
    }
}
