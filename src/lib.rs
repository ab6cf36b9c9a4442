//! arcflow-core: the state-management core of the ArcFlow media-queue
//! client.
//!
//! A deterministic, serial store accepts typed [`state::Action`]s through
//! an unbounded FIFO channel, reduces them with a pure function and runs
//! asynchronous effects against narrow collaborator traits. Listeners
//! observe immutable [`state::AppState`] snapshots.

mod effects;
pub mod errors;
pub mod interchange;
pub mod model;
pub mod queue;
pub mod reducer;
pub mod services;
pub mod state;
pub mod store;
pub mod youtube;
