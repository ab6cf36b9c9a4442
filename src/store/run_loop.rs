//! The store's action processing loop.

use super::{StateListener, STORE_LOG_TARGET};
use crate::effects::{self, EffectContext};
use crate::reducer;
use crate::state::{Action, AppState};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

/// Drains the action channel until cancellation or channel close. For each
/// action: reduce, publish the new state, notify listeners synchronously,
/// then await the action's effects. Strict FIFO; no two effects overlap.
pub(super) async fn run_store_loop(
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state: Arc<RwLock<AppState>>,
    listeners: Arc<Mutex<Vec<(u64, StateListener)>>>,
    effects_ctx: EffectContext,
    cancel: CancellationToken,
) {
    info!(target: STORE_LOG_TARGET, "Store worker started.");

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!(target: STORE_LOG_TARGET, "Cancellation requested. Exiting run loop.");
                break;
            }

            maybe_action = action_rx.recv() => {
                let action = match maybe_action {
                    Some(action) => action,
                    None => {
                        info!(target: STORE_LOG_TARGET, "Action channel closed. Exiting run loop.");
                        break;
                    }
                };

                trace!(target: STORE_LOG_TARGET, action = action.name(), "Reducing action");
                let old_state = state.read().clone();
                let new_state = reducer::reduce(&old_state, &action);
                *state.write() = new_state.clone();

                notify(&listeners, &new_state);
                effects::run(&action, &effects_ctx).await;
            }
        }
    }

    info!(target: STORE_LOG_TARGET, "Store worker finished.");
}

/// Calls every listener in registration order. The list is snapshotted
/// first so a listener may subscribe or unsubscribe without deadlocking.
fn notify(listeners: &Mutex<Vec<(u64, StateListener)>>, state: &AppState) {
    let snapshot: Vec<StateListener> = listeners
        .lock()
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect();
    for listener in snapshot {
        listener(state);
    }
}
