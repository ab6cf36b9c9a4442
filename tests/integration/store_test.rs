//! Store-level tests: initialization flow, FIFO ordering, listener
//! management, disposal and effect gating.

use crate::test_utils::*;
use arcflow_core::state::{Action, Notification, PlayerState, PlaylistsState};
use arcflow_core::store::Store;
use parking_lot::Mutex;
use std::sync::Arc;

#[tokio::test]
async fn initialize_loads_catalog_and_selects_first_playlist() {
    let first = make_playlist("morning", 3);
    let second = make_playlist("evening", 2);
    let first_video = first.videos[0].clone();
    let (collaborators, _service, player, _downloads) =
        mock_collaborators(vec![first.clone(), second]);
    let store = Store::new(collaborators);

    store.dispatch(Action::Initialize);
    wait_for(&store, "first playlist selected and queued", |state| {
        state.queue.selected_playlist_id == Some(first.id) && !state.queue.videos.is_empty()
    })
    .await;

    let state = store.state();
    assert!(matches!(state.playlists, PlaylistsState::Loaded(ref p) if p.len() == 2));
    assert_eq!(state.queue.current_index, Some(0));
    assert_eq!(
        state.player,
        PlayerState::Loading {
            video_id: first_video.youtube_id.clone(),
            autoplay: false
        }
    );

    wait_for(&store, "player asked to load the first video", |_| {
        !player.loads.lock().is_empty()
    })
    .await;
    assert_eq!(
        player.loads.lock()[0],
        (first_video.youtube_id, false)
    );

    store.shutdown().await;
}

#[tokio::test]
async fn initialize_with_empty_catalog_reports_empty() {
    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    store.dispatch(Action::Initialize);
    wait_for(&store, "catalog reported empty", |state| {
        state.playlists == PlaylistsState::Empty
    })
    .await;
    assert!(store.state().queue.selected_playlist_id.is_none());

    store.shutdown().await;
}

#[tokio::test]
async fn actions_apply_in_dispatch_order() {
    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    for i in 0..10 {
        store.dispatch(Action::ShowNotification(Notification::info(&format!(
            "message {}",
            i
        ))));
    }
    wait_for(&store, "all notifications applied", |state| {
        state.notifications.len() == 10
    })
    .await;

    let messages: Vec<String> = store
        .state()
        .notifications
        .iter()
        .map(|n| n.message.clone())
        .collect();
    let expected: Vec<String> = (0..10).map(|i| format!("message {}", i)).collect();
    assert_eq!(messages, expected);

    store.shutdown().await;
}

#[tokio::test]
async fn listeners_run_in_registration_order_and_can_be_removed() {
    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let first_log = order.clone();
    let first = store.on_state_changed(move |_| first_log.lock().push("first"));
    let second_log = order.clone();
    let _second = store.on_state_changed(move |_| second_log.lock().push("second"));

    store.dispatch(Action::ShowNotification(Notification::info("one")));
    wait_for(&store, "first notification applied", |state| {
        state.notifications.len() == 1
    })
    .await;
    assert_eq!(*order.lock(), vec!["first", "second"]);

    store.off(first);
    store.dispatch(Action::ShowNotification(Notification::info("two")));
    wait_for(&store, "second notification applied", |state| {
        state.notifications.len() == 2
    })
    .await;
    assert_eq!(*order.lock(), vec!["first", "second", "second"]);

    store.shutdown().await;
}

#[tokio::test]
async fn dispatch_after_dispose_is_dropped() {
    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    store.dispatch(Action::ShowNotification(Notification::info("before")));
    wait_for(&store, "pre-disposal notification applied", |state| {
        state.notifications.len() == 1
    })
    .await;

    store.shutdown().await;
    store.dispatch(Action::ShowNotification(Notification::info("after")));
    settle().await;
    assert_eq!(store.state().notifications.len(), 1);
}

#[tokio::test]
async fn undo_and_redo_reach_no_collaborator() {
    let playlist = make_playlist("mix", 3);
    let (collaborators, service, player, _downloads) = mock_collaborators(vec![playlist.clone()]);
    let store = Store::new(collaborators);

    store.dispatch(Action::PlaylistLoaded(playlist));
    store.dispatch(Action::SelectVideo {
        index: 0,
        autoplay: false,
    });
    store.dispatch(Action::SelectVideo {
        index: 2,
        autoplay: false,
    });
    wait_for(&store, "second selection applied", |state| {
        state.queue.current_index == Some(2)
    })
    .await;
    settle().await;

    let service_calls = service.call_count();
    let player_calls = player.call_count();

    store.dispatch(Action::UndoRequested);
    store.dispatch(Action::RedoRequested);
    wait_for(&store, "redo applied", |state| {
        state.queue.current_index == Some(2) && state.queue.future.is_empty()
    })
    .await;
    settle().await;

    assert_eq!(service.call_count(), service_calls);
    assert_eq!(player.call_count(), player_calls);

    store.shutdown().await;
}

#[tokio::test]
async fn failed_catalog_load_surfaces_a_notification() {
    use arcflow_core::services::ServiceError;
    use arcflow_core::state::Severity;

    let (collaborators, service, _player, _downloads) = mock_collaborators(vec![]);
    service.queue_failure(ServiceError::External("database offline".into()));
    let store = Store::new(collaborators);

    store.dispatch(Action::Initialize);
    wait_for(&store, "failure notification shown", |state| {
        !state.notifications.is_empty()
    })
    .await;

    let state = store.state();
    assert_eq!(state.notifications[0].severity, Severity::Error);
    assert!(state.notifications[0].message.contains("database offline"));

    store.shutdown().await;
}
