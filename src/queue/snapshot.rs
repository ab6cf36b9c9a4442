//! Immutable capture-and-restore of queue state for undo/redo.

use super::QueueState;
use crate::model::VideoItem;
use uuid::Uuid;

/// Everything needed to return the queue to an earlier point: the selected
/// playlist, the full videos sequence (positions included) and the cursor.
/// Traversal preferences (repeat, shuffle, history) stay live and are
/// re-validated by the repair pass after a restore.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSnapshot {
    pub selected_playlist_id: Option<Uuid>,
    pub videos: Vec<VideoItem>,
    pub current_index: Option<usize>,
    pub current_item_id: Option<Uuid>,
}

impl QueueSnapshot {
    /// Captures the undoable portion of the queue.
    pub fn capture(queue: &QueueState) -> Self {
        Self {
            selected_playlist_id: queue.selected_playlist_id,
            videos: queue.videos.clone(),
            current_index: queue.current_index,
            current_item_id: queue.current_item_id,
        }
    }

    /// Restores the captured fields onto `queue`, leaving the undo stacks
    /// and traversal preferences as the caller set them.
    pub fn restore_onto(&self, mut queue: QueueState) -> QueueState {
        queue.selected_playlist_id = self.selected_playlist_id;
        queue.videos = self.videos.clone();
        queue.current_index = self.current_index;
        queue.current_item_id = self.current_item_id;
        queue
    }

    /// Whether the snapshot differs from `queue` in the fields undo cares
    /// about: playlist selection, cursor position, or the videos sequence.
    pub fn differs_from(&self, queue: &QueueState) -> bool {
        self.selected_playlist_id != queue.selected_playlist_id
            || self.current_index != queue.current_index
            || self.videos != queue.videos
    }
}
