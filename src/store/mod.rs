//! The store: owns the state, serializes actions through an unbounded FIFO
//! channel and notifies listeners after every reduction.

mod run_loop;

use crate::effects::EffectContext;
use crate::services::Collaborators;
use crate::state::{Action, AppState};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const STORE_LOG_TARGET: &str = "arcflow_core::store";

/// Handle returned by [`Store::on_state_changed`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

pub(crate) type StateListener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// One store per feature instance. A single worker task drains the action
/// channel; the reducer runs synchronously on it, listeners are notified in
/// registration order and each action's effects are awaited before the next
/// action is picked up.
pub struct Store {
    state: Arc<RwLock<AppState>>,
    listeners: Arc<Mutex<Vec<(u64, StateListener)>>>,
    next_listener_id: AtomicU64,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
    disposed: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Store {
    /// Creates the store and spawns its worker task on the current runtime.
    pub fn new(collaborators: Collaborators) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let state = Arc::new(RwLock::new(AppState::default()));
        let listeners: Arc<Mutex<Vec<(u64, StateListener)>>> = Arc::new(Mutex::new(Vec::new()));
        let cancel = CancellationToken::new();
        let disposed = Arc::new(AtomicBool::new(false));

        let effects = EffectContext::new(
            action_tx.clone(),
            Arc::clone(&state),
            collaborators,
            Arc::clone(&disposed),
        );
        let worker = tokio::spawn(run_loop::run_store_loop(
            action_rx,
            Arc::clone(&state),
            Arc::clone(&listeners),
            effects,
            cancel.clone(),
        ));

        Self {
            state,
            listeners,
            next_listener_id: AtomicU64::new(1),
            action_tx,
            cancel,
            disposed,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Enqueues an action. Returns once the action is on the channel;
    /// silently dropped after disposal.
    pub fn dispatch(&self, action: Action) {
        if self.disposed.load(Ordering::SeqCst) {
            debug!(target: STORE_LOG_TARGET, action = action.name(), "Dropping dispatch after disposal");
            return;
        }
        let action = normalize(action);
        if self.action_tx.send(action).is_err() {
            debug!(target: STORE_LOG_TARGET, "Dropping dispatch: channel closed");
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AppState {
        self.state.read().clone()
    }

    /// Registers a post-reduce listener. Listeners run synchronously on the
    /// worker in registration order; they must not block and may dispatch
    /// follow-up actions (which enqueue at the tail).
    pub fn on_state_changed(
        &self,
        listener: impl Fn(&AppState) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        ListenerId(id)
    }

    /// Removes a listener registered with [`Store::on_state_changed`].
    pub fn off(&self, id: ListenerId) {
        self.listeners.lock().retain(|(lid, _)| *lid != id.0);
    }

    /// Cancels the worker and closes the intake. An in-flight effect runs
    /// to completion; everything it dispatches afterwards is dropped.
    /// Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(target: STORE_LOG_TARGET, "Store disposed");
        self.cancel.cancel();
    }

    /// Disposes and waits for the worker task to finish.
    pub async fn shutdown(&self) {
        self.dispose();
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.cancel.cancel();
    }
}

/// Fills in dispatch-time data the pure reducer cannot produce itself: a
/// missing shuffle seed becomes the current nanosecond tick.
fn normalize(action: Action) -> Action {
    match action {
        Action::ShuffleSet {
            enabled: true,
            seed: None,
        } => {
            let seed = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42);
            Action::ShuffleSet {
                enabled: true,
                seed: Some(seed),
            }
        }
        other => other,
    }
}
