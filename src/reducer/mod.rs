//! The pure reducer: `(AppState, Action) -> AppState`.
//!
//! Reduction happens in five steps: undo/redo short-circuit, per-action
//! handler, undo-policy application, playback-structure repair when the
//! videos sequence changed, and a final cursor validation. The reducer
//! performs no I/O and never fails on a well-formed action.

mod handlers;
mod undo_policy;

pub use undo_policy::{classify, UndoClass};

use crate::queue::{repair_playback_structures, QueueSnapshot, UNDO_STACK_CAP};
use crate::state::{Action, AppState};
use tracing::trace;

const REDUCER_LOG_TARGET: &str = "arcflow_core::reducer";

/// Produces the successor state for an action.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::UndoRequested => return step_history(state, HistoryStep::Undo),
        Action::RedoRequested => return step_history(state, HistoryStep::Redo),
        _ => {}
    }

    let pre = QueueSnapshot::capture(&state.queue);
    let mut next = handlers::apply(state, action);

    match undo_policy::classify(action) {
        UndoClass::PlaybackTransient | UndoClass::Neutral => {
            next.queue.past = state.queue.past.clone();
            next.queue.future = state.queue.future.clone();
        }
        UndoClass::Boundary => {
            next.queue.past.clear();
            next.queue.future.clear();
        }
        UndoClass::Undoable => {
            if pre.differs_from(&next.queue) {
                let mut past = state.queue.past.clone();
                past.push(pre);
                while past.len() > UNDO_STACK_CAP {
                    past.remove(0);
                }
                next.queue.past = past;
                next.queue.future = Vec::new();
                trace!(
                    target: REDUCER_LOG_TARGET,
                    action = action.name(),
                    undo_depth = next.queue.past.len(),
                    "Captured undo snapshot"
                );
            } else {
                next.queue.past = state.queue.past.clone();
                next.queue.future = state.queue.future.clone();
            }
        }
    }

    if next.queue.videos != state.queue.videos {
        next.queue = repair_playback_structures(next.queue);
    }
    validate_cursor(&mut next);
    next
}

#[derive(Clone, Copy, PartialEq)]
enum HistoryStep {
    Undo,
    Redo,
}

/// Pops one snapshot off the matching stack, parks the current queue on
/// the opposite stack and restores.
fn step_history(state: &AppState, step: HistoryStep) -> AppState {
    let mut next = state.clone();
    let popped = match step {
        HistoryStep::Undo => next.queue.past.pop(),
        HistoryStep::Redo => next.queue.future.pop(),
    };
    let snapshot = match popped {
        Some(snapshot) => snapshot,
        None => return next,
    };

    let current = QueueSnapshot::capture(&next.queue);
    next.queue = snapshot.restore_onto(next.queue);

    let opposite = match step {
        HistoryStep::Undo => &mut next.queue.future,
        HistoryStep::Redo => &mut next.queue.past,
    };
    opposite.push(current);
    while opposite.len() > UNDO_STACK_CAP {
        opposite.remove(0);
    }

    next.queue = repair_playback_structures(next.queue);
    validate_cursor(&mut next);
    next
}

/// Clears an out-of-range index and a dangling identity; realigns the
/// index with the identity when both are set.
fn validate_cursor(state: &mut AppState) {
    let queue = &mut state.queue;
    if let Some(index) = queue.current_index {
        if queue.videos.is_empty() || index >= queue.videos.len() {
            queue.current_index = None;
        }
    }
    if let Some(id) = queue.current_item_id {
        match queue.index_of(id) {
            Some(index) => queue.current_index = Some(index),
            None => {
                queue.current_item_id = None;
                queue.current_index = None;
            }
        }
    }
}
