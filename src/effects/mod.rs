//! Asynchronous side effects, one handler per action family.
//!
//! Effects run on the store worker after reduction and are awaited one at
//! a time. They never mutate state directly; results and failures travel
//! back through dispatched actions.

mod catalog;
mod playback;
mod transfer;

use crate::errors::{ErrorContext, OperationError};
use crate::services::{Collaborators, ServiceError};
use crate::state::{Action, AppState};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub(crate) const EFFECTS_LOG_TARGET: &str = "arcflow_core::effects";

/// Everything an effect handler may touch: the live state (read-only), the
/// action channel for follow-ups and the collaborators.
pub(crate) struct EffectContext {
    action_tx: mpsc::UnboundedSender<Action>,
    state: Arc<RwLock<AppState>>,
    pub(crate) collaborators: Collaborators,
    disposed: Arc<AtomicBool>,
}

impl EffectContext {
    pub(crate) fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        state: Arc<RwLock<AppState>>,
        collaborators: Collaborators,
        disposed: Arc<AtomicBool>,
    ) -> Self {
        Self {
            action_tx,
            state,
            collaborators,
            disposed,
        }
    }

    /// Snapshot of the state as of the last reduction.
    pub(crate) fn state(&self) -> AppState {
        self.state.read().clone()
    }

    /// Enqueues a follow-up action at the tail of the FIFO. Dropped after
    /// disposal so an in-flight effect cannot outlive its store.
    pub(crate) fn dispatch(&self, action: Action) {
        if self.disposed.load(Ordering::SeqCst) {
            debug!(target: EFFECTS_LOG_TARGET, action = action.name(), "Dropping follow-up after disposal");
            return;
        }
        if self.action_tx.send(action).is_err() {
            debug!(target: EFFECTS_LOG_TARGET, "Dropping follow-up: channel closed");
        }
    }

    /// Converts a collaborator failure into an `OperationFailed` action.
    pub(crate) fn fail(&self, error: ServiceError, context: ErrorContext) {
        let operation = OperationError::new(error.category(), &error.to_string(), context);
        warn!(target: EFFECTS_LOG_TARGET, error = %operation, "Effect failed");
        self.dispatch(Action::OperationFailed(operation));
    }
}

/// Routes an action to its effect handler. Actions without a row here are
/// pure state transitions; notably, undo and redo produce no collaborator
/// calls at all.
pub(crate) async fn run(action: &Action, ctx: &EffectContext) {
    match action {
        Action::Initialize => catalog::initialize(ctx).await,
        Action::SelectPlaylist(id) => catalog::select_playlist(ctx, *id).await,
        Action::SelectVideo { .. } | Action::NextRequested | Action::PrevRequested => {
            playback::load_current(ctx).await
        }
        Action::SortChanged { .. } => catalog::persist_positions(ctx).await,
        Action::VideoEnded => ctx.dispatch(Action::NextRequested),
        Action::CreatePlaylist { name, description } => {
            catalog::create_playlist(ctx, name, description.clone()).await
        }
        Action::RenamePlaylist {
            id,
            name,
            description,
        } => catalog::rename_playlist(ctx, *id, name, description.clone()).await,
        Action::DeletePlaylist(id) => catalog::delete_playlist(ctx, *id).await,
        Action::AddVideo { url, title } => catalog::add_video(ctx, url, title).await,
        Action::RemoveVideo {
            playlist_id,
            video_id,
        } => catalog::remove_video(ctx, *playlist_id, *video_id).await,
        Action::ExportRequested => transfer::export(ctx).await,
        Action::ImportRequested { json } => transfer::import(ctx, json).await,
        Action::ImportApplied { .. } => ctx.dispatch(Action::PersistRequested),
        Action::PersistRequested => transfer::persist(ctx).await,
        _ => {}
    }
}
