//! End-to-end playback navigation scenarios.

use crate::test_utils::*;
use arcflow_core::queue::RepeatMode;
use arcflow_core::state::{Action, AppState, PlayerState};
use arcflow_core::store::Store;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

async fn store_with_queue(video_count: usize) -> (Store, Vec<arcflow_core::model::VideoItem>) {
    let playlist = make_playlist("queue", video_count);
    let videos = playlist.videos.clone();
    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![playlist.clone()]);
    let store = Store::new(collaborators);

    store.dispatch(Action::PlaylistLoaded(playlist));
    store.dispatch(Action::SelectVideo {
        index: 0,
        autoplay: false,
    });
    wait_for(&store, "queue selected", |state| {
        state.queue.current_index == Some(0)
    })
    .await;
    (store, videos)
}

#[tokio::test]
async fn sequential_next_stops_paused_at_queue_end() {
    // E1: videos [A, B, C], repeat off, three nexts.
    let (store, videos) = store_with_queue(3).await;
    let last = videos[2].clone();

    for _ in 0..3 {
        store.dispatch(Action::NextRequested);
    }
    wait_for(&store, "playback parked on the last video", |state| {
        state.player == PlayerState::Paused(last.youtube_id.clone())
    })
    .await;
    assert_eq!(store.state().queue.current_item_id, Some(last.id));

    store.shutdown().await;
}

#[tokio::test]
async fn repeat_all_wraps_back_to_the_first_video() {
    // E2: as E1 with repeat-all; the third next wraps to A with autoplay.
    let (store, videos) = store_with_queue(3).await;
    let first = videos[0].clone();

    store.dispatch(Action::RepeatSet(RepeatMode::All));
    for _ in 0..3 {
        store.dispatch(Action::NextRequested);
    }
    wait_for(&store, "wrapped to the first video", |state| {
        state.player
            == PlayerState::Loading {
                video_id: first.youtube_id.clone(),
                autoplay: true,
            }
    })
    .await;
    assert_eq!(store.state().queue.current_item_id, Some(first.id));

    store.shutdown().await;
}

#[tokio::test]
async fn shuffle_prev_retraces_the_visited_path() {
    // E3: shuffle from A, two nexts, two prevs; the prevs revisit the two
    // departed ids in reverse order and land back on A.
    let (store, videos) = store_with_queue(4).await;
    let origin = videos[0].id;

    let visited: Arc<Mutex<Vec<Uuid>>> = Arc::new(Mutex::new(Vec::new()));
    let log = visited.clone();
    store.on_state_changed(move |state: &AppState| {
        if let Some(id) = state.queue.current_item_id {
            let mut visited = log.lock();
            if visited.last() != Some(&id) {
                visited.push(id);
            }
        }
    });

    store.dispatch(Action::ShuffleSet {
        enabled: true,
        seed: Some(42),
    });
    store.dispatch(Action::NextRequested);
    store.dispatch(Action::NextRequested);
    wait_for(&store, "two shuffle hops recorded", |state| {
        state.queue.playback_history.len() == 2
    })
    .await;

    let outbound = visited.lock().clone();
    assert_eq!(outbound[0], origin);
    assert_eq!(outbound.len(), 3);

    store.dispatch(Action::PrevRequested);
    store.dispatch(Action::PrevRequested);
    wait_for(&store, "returned to the origin", |state| {
        state.queue.current_item_id == Some(origin) && state.queue.playback_history.is_empty()
    })
    .await;

    let full_path = visited.lock().clone();
    // Outbound: origin, x, y. Inbound: x, origin.
    assert_eq!(full_path.len(), 5);
    assert_eq!(full_path[3], outbound[1]);
    assert_eq!(full_path[4], origin);

    store.shutdown().await;
}

#[tokio::test]
async fn video_ended_advances_like_next() {
    let (store, videos) = store_with_queue(2).await;
    let second = videos[1].clone();

    store.dispatch(Action::VideoEnded);
    wait_for(&store, "advanced to the second video", |state| {
        state.queue.current_item_id == Some(second.id)
    })
    .await;
    assert_eq!(
        store.state().player,
        PlayerState::Loading {
            video_id: second.youtube_id,
            autoplay: true
        }
    );

    store.shutdown().await;
}

#[tokio::test]
async fn player_events_track_the_loaded_video() {
    let (store, videos) = store_with_queue(2).await;
    let current = videos[0].youtube_id.clone();

    store.dispatch(Action::PlayerStateChanged {
        code: 3,
        video_id: current.clone(),
    });
    store.dispatch(Action::PlayerStateChanged {
        code: 1,
        video_id: current.clone(),
    });
    wait_for(&store, "player playing", |state| {
        state.player == PlayerState::Playing(current.clone())
    })
    .await;

    // A stale event for some other video must not disturb playback.
    store.dispatch(Action::PlayerStateChanged {
        code: 2,
        video_id: "stale_id_11".to_string(),
    });
    settle().await;
    assert_eq!(store.state().player, PlayerState::Playing(current));

    store.shutdown().await;
}
