//! Per-action undo history policy.

use crate::state::Action;

/// How an action interacts with the undo/redo stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoClass {
    /// Captures a snapshot of the queue before the state change.
    Undoable,
    /// Invalidates history entirely; both stacks are emptied.
    Boundary,
    /// Moves the playback cursor or traversal mode; both stacks pass
    /// through untouched and nothing is captured.
    PlaybackTransient,
    /// Leaves both stacks unchanged without adding a snapshot.
    Neutral,
}

/// Total classification of every action.
pub fn classify(action: &Action) -> UndoClass {
    match action {
        Action::SelectVideo { .. } | Action::SortChanged { .. } => UndoClass::Undoable,

        Action::PlaylistLoaded(_) | Action::SelectPlaylist(_) | Action::ImportApplied { .. } => {
            UndoClass::Boundary
        }

        Action::NextRequested
        | Action::PrevRequested
        | Action::PlaybackAdvanced { .. }
        | Action::PlaybackStopped
        | Action::ShuffleSet { .. }
        | Action::RepeatSet(_) => UndoClass::PlaybackTransient,

        _ => UndoClass::Neutral,
    }
}
