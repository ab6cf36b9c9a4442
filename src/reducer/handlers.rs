//! Per-action state transitions. Every handler is pure: it builds the next
//! state from the previous one and the action payload, nothing else.

use crate::errors::OperationError;
use crate::model::Playlist;
use crate::queue::{
    compute_next, compute_prev, generate_shuffle_order, NavDecision, QueueState, RepeatMode,
};
use crate::state::{
    Action, AppState, ImportExportState, Notification, PlayerState, PlaylistsState, Severity,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Routes an action to its handler. Undo/redo never reach this point; they
/// are resolved by the reducer before routing.
pub(super) fn apply(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::Initialize => initialize(state),
        Action::PlaylistsLoaded(playlists) => playlists_loaded(state, playlists),
        Action::SelectPlaylist(id) => select_playlist(state, *id),
        Action::PlaylistLoaded(playlist) => playlist_loaded(state, playlist),
        Action::SelectVideo { index, autoplay } => select_video(state, *index, *autoplay),
        Action::SortChanged {
            old_index,
            new_index,
        } => sort_changed(state, *old_index, *new_index),
        Action::PlayerStateChanged { code, video_id } => {
            player_state_changed(state, *code, video_id)
        }
        Action::NextRequested => next_requested(state),
        Action::PrevRequested => prev_requested(state),
        Action::PlaybackAdvanced { video_id } => playback_advanced(state, *video_id),
        Action::PlaybackStopped => playback_stopped(state),
        Action::ShuffleSet { enabled, seed } => shuffle_set(state, *enabled, *seed),
        Action::RepeatSet(mode) => repeat_set(state, *mode),
        Action::OperationFailed(error) => operation_failed(state, error),
        Action::ShowNotification(notification) => show_notification(state, notification),
        Action::DismissNotification(correlation_id) => {
            dismiss_notification(state, *correlation_id)
        }
        Action::ExportRequested | Action::ExportPrepared => {
            with_import_export(state, ImportExportState::ExportInProgress)
        }
        Action::ExportSucceeded { exported_at } => {
            with_import_export(state, ImportExportState::ExportSucceeded(*exported_at))
        }
        Action::ExportFailed(error) => {
            with_import_export(state, ImportExportState::ExportFailed(error.clone()))
        }
        Action::ImportRequested { .. } => {
            with_import_export(state, ImportExportState::ImportParsing)
        }
        Action::ImportParsed(envelope) => {
            with_import_export(state, ImportExportState::ImportParsed(envelope.clone()))
        }
        Action::ImportValidated(envelope) => {
            with_import_export(state, ImportExportState::ImportValidated(envelope.clone()))
        }
        Action::ImportApplied {
            playlists,
            selected_playlist_id,
        } => import_applied(state, playlists, *selected_playlist_id),
        Action::ImportSucceeded {
            playlist_count,
            video_count,
        } => with_import_export(
            state,
            ImportExportState::ImportSucceeded {
                playlist_count: *playlist_count,
                video_count: *video_count,
            },
        ),
        Action::ImportFailed(error) => {
            with_import_export(state, ImportExportState::ImportFailed(error.clone()))
        }
        Action::PersistSucceeded { at } => persist_succeeded(state, *at),
        Action::PersistFailed { message, at } => persist_failed(state, message, *at),

        // Effect-only actions: the state change, if any, arrives through
        // the follow-up actions their effects dispatch.
        Action::VideoEnded
        | Action::UndoRequested
        | Action::RedoRequested
        | Action::CreatePlaylist { .. }
        | Action::RenamePlaylist { .. }
        | Action::DeletePlaylist(_)
        | Action::AddVideo { .. }
        | Action::RemoveVideo { .. }
        | Action::PersistRequested => state.clone(),
    }
}

fn initialize(state: &AppState) -> AppState {
    let mut next = state.clone();
    next.playlists = PlaylistsState::Loading;
    next
}

fn playlists_loaded(state: &AppState, playlists: &[Playlist]) -> AppState {
    let mut next = state.clone();
    next.playlists = if playlists.is_empty() {
        PlaylistsState::Empty
    } else {
        PlaylistsState::Loaded(playlists.to_vec())
    };
    next
}

fn select_playlist(state: &AppState, id: Uuid) -> AppState {
    if state.queue.selected_playlist_id == Some(id) {
        return state.clone();
    }
    let mut next = state.clone();
    next.queue.selected_playlist_id = Some(id);
    next.queue.videos.clear();
    next.queue.current_index = None;
    next.queue.current_item_id = None;
    next.queue.shuffle_order.clear();
    next.queue.playback_history.clear();
    next.player = PlayerState::Empty;
    next
}

fn playlist_loaded(state: &AppState, playlist: &Playlist) -> AppState {
    let mut next = state.clone();
    next.queue.selected_playlist_id = Some(playlist.id);
    next.queue.videos = playlist.videos_in_order();
    next.queue.current_index = None;
    next.queue.current_item_id = None;
    next.queue.shuffle_order.clear();
    next.queue.playback_history.clear();
    next
}

fn select_video(state: &AppState, index: usize, autoplay: bool) -> AppState {
    if index >= state.queue.videos.len() || state.queue.current_index == Some(index) {
        return state.clone();
    }
    let mut next = state.clone();
    if next.queue.shuffle_enabled {
        if let Some(previous) = next.queue.current_item_id {
            next.queue.push_history(previous);
        }
    }
    let video = next.queue.videos[index].clone();
    next.queue.current_index = Some(index);
    next.queue.current_item_id = Some(video.id);
    next.player = PlayerState::Loading {
        video_id: video.youtube_id,
        autoplay,
    };
    next
}

fn sort_changed(state: &AppState, old_index: usize, new_index: usize) -> AppState {
    let len = state.queue.videos.len();
    if old_index >= len || new_index >= len || old_index == new_index {
        return state.clone();
    }
    let mut next = state.clone();
    let moved = next.queue.videos.remove(old_index);
    next.queue.videos.insert(new_index, moved);

    if let Some(current) = next.queue.current_index {
        next.queue.current_index = Some(remap_after_move(current, old_index, new_index));
    }

    next.queue.videos = next
        .queue
        .videos
        .iter()
        .enumerate()
        .map(|(index, video)| video.with_position(index as u32))
        .collect();
    next
}

/// Where an index lands after moving the element at `old` to `new`.
fn remap_after_move(current: usize, old: usize, new: usize) -> usize {
    if current == old {
        new
    } else if old < current && current <= new {
        current - 1
    } else if new <= current && current < old {
        current + 1
    } else {
        current
    }
}

fn player_state_changed(state: &AppState, code: i32, video_id: &str) -> AppState {
    if code == -1 {
        return state.clone();
    }
    // Events for a stale video are dropped, except while a load is in
    // flight: the player reports against the incoming video before the
    // Loading state is replaced.
    let accepted = match &state.player {
        PlayerState::Loading { .. } => true,
        other => other.video_id() == Some(video_id),
    };
    if !accepted {
        return state.clone();
    }
    let player = match code {
        3 => PlayerState::Buffering(video_id.to_string()),
        1 => PlayerState::Playing(video_id.to_string()),
        2 | 5 | 0 => PlayerState::Paused(video_id.to_string()),
        _ => return state.clone(),
    };
    let mut next = state.clone();
    next.player = player;
    next
}

fn next_requested(state: &AppState) -> AppState {
    let (decision, queue) = compute_next(&state.queue);
    let mut next = state.clone();
    next.queue = queue;
    apply_nav_decision(&mut next, decision);
    next
}

fn prev_requested(state: &AppState) -> AppState {
    let (decision, queue) = compute_prev(&state.queue);
    let mut next = state.clone();
    next.queue = queue;
    apply_nav_decision(&mut next, decision);
    next
}

fn apply_nav_decision(state: &mut AppState, decision: NavDecision) {
    match decision {
        NavDecision::AdvanceTo(id) => {
            if let Some(index) = state.queue.index_of(id) {
                let youtube_id = state.queue.videos[index].youtube_id.clone();
                state.queue.current_index = Some(index);
                state.queue.current_item_id = Some(id);
                state.player = PlayerState::Loading {
                    video_id: youtube_id,
                    autoplay: true,
                };
            }
        }
        NavDecision::Stop => {
            state.player = match state.queue.current_video() {
                Some(video) => PlayerState::Paused(video.youtube_id.clone()),
                None => PlayerState::Empty,
            };
        }
        NavDecision::NoOp => {}
    }
}

fn playback_advanced(state: &AppState, video_id: Uuid) -> AppState {
    let mut next = state.clone();
    apply_nav_decision(&mut next, NavDecision::AdvanceTo(video_id));
    next
}

fn playback_stopped(state: &AppState) -> AppState {
    let mut next = state.clone();
    apply_nav_decision(&mut next, NavDecision::Stop);
    next
}

fn shuffle_set(state: &AppState, enabled: bool, seed: Option<u64>) -> AppState {
    let mut next = state.clone();
    if enabled {
        // The store fills a missing seed at enqueue time; falling back to
        // the stored seed keeps this branch deterministic regardless.
        let seed = seed.unwrap_or(next.queue.shuffle_seed);
        next.queue.shuffle_seed = seed;
        next.queue.shuffle_order =
            generate_shuffle_order(&next.queue.videos, next.queue.current_item_id, seed);
        next.queue.shuffle_enabled = true;
        next.queue.playback_history.clear();
    } else {
        next.queue.shuffle_enabled = false;
        next.queue.shuffle_order.clear();
        next.queue.playback_history.clear();
    }
    next
}

fn repeat_set(state: &AppState, mode: RepeatMode) -> AppState {
    let mut next = state.clone();
    next.queue.repeat_mode = mode;
    next
}

fn operation_failed(state: &AppState, error: &OperationError) -> AppState {
    let mut next = state.clone();
    next.notifications.push(Notification {
        severity: Severity::for_category(error.category),
        message: error.message.clone(),
        correlation_id: error.context.correlation_id,
        timestamp: error.occurred_at,
        dismissible: true,
    });
    next
}

fn show_notification(state: &AppState, notification: &Notification) -> AppState {
    let mut next = state.clone();
    next.notifications.push(notification.clone());
    next
}

fn dismiss_notification(state: &AppState, correlation_id: Uuid) -> AppState {
    let mut next = state.clone();
    next.notifications
        .retain(|n| n.correlation_id != correlation_id);
    next
}

fn with_import_export(state: &AppState, import_export: ImportExportState) -> AppState {
    let mut next = state.clone();
    next.import_export = import_export;
    next
}

fn import_applied(
    state: &AppState,
    playlists: &[Playlist],
    selected_playlist_id: Option<Uuid>,
) -> AppState {
    let mut next = state.clone();
    next.playlists = if playlists.is_empty() {
        PlaylistsState::Empty
    } else {
        PlaylistsState::Loaded(playlists.to_vec())
    };
    next.queue = QueueState {
        selected_playlist_id,
        ..QueueState::default()
    };
    next.player = PlayerState::Empty;
    next.import_export = ImportExportState::ImportApplied;
    next.persistence.is_dirty = true;
    next
}

fn persist_succeeded(state: &AppState, at: DateTime<Utc>) -> AppState {
    let mut next = state.clone();
    next.persistence.is_dirty = false;
    next.persistence.last_persist_attempt_utc = Some(at);
    next.persistence.last_persist_error = None;
    next
}

fn persist_failed(state: &AppState, message: &str, at: DateTime<Utc>) -> AppState {
    let mut next = state.clone();
    next.persistence.last_persist_attempt_utc = Some(at);
    next.persistence.last_persist_error = Some(message.to_string());
    next
}
