//! Export, import and persistence pipelines end to end.

use crate::test_utils::*;
use arcflow_core::errors::ImportError;
use arcflow_core::interchange::{mapper, ExportEnvelope};
use arcflow_core::services::ServiceError;
use arcflow_core::state::{Action, ImportExportState, PlayerState, PlaylistsState};
use arcflow_core::store::Store;
use chrono::Utc;

#[tokio::test]
async fn export_saves_a_schema_v1_document() {
    let playlist = make_playlist("exported", 2);
    let (collaborators, _service, _player, downloads) = mock_collaborators(vec![playlist.clone()]);
    let store = Store::new(collaborators);

    store.dispatch(Action::Initialize);
    wait_for(&store, "catalog loaded", |state| {
        matches!(state.playlists, PlaylistsState::Loaded(_))
    })
    .await;

    store.dispatch(Action::ExportRequested);
    wait_for(&store, "export finished", |state| {
        matches!(state.import_export, ImportExportState::ExportSucceeded(_))
    })
    .await;

    let saved = downloads.saved.lock();
    assert_eq!(saved.len(), 1);
    let (file_name, text) = &saved[0];
    assert!(file_name.starts_with("arcflow-export-"));
    assert!(file_name.ends_with(".json"));

    let envelope: ExportEnvelope = serde_json::from_str(text).unwrap();
    assert_eq!(envelope.schema_version, 1);
    assert_eq!(envelope.playlists.len(), 1);
    assert_eq!(envelope.playlists[0].videos.len(), 2);
    assert_eq!(envelope.selected_playlist_id, Some(playlist.id));

    drop(saved);
    store.shutdown().await;
}

#[tokio::test]
async fn export_interop_failure_is_reported() {
    let playlist = make_playlist("exported", 1);
    let (collaborators, _service, _player, downloads) = mock_collaborators(vec![playlist]);
    *downloads.fail.lock() = true;
    let store = Store::new(collaborators);

    store.dispatch(Action::ExportRequested);
    wait_for(&store, "export failed", |state| {
        matches!(
            state.import_export,
            ImportExportState::ExportFailed(arcflow_core::errors::ExportError::InteropFailed(_))
        )
    })
    .await;

    store.shutdown().await;
}

#[tokio::test]
async fn import_applies_catalog_and_persists() {
    // E6: a valid import replaces the catalog, marks the state dirty and
    // the follow-up persistence clears the flag again.
    let incoming = make_playlist("incoming", 3);
    let envelope = mapper::to_envelope(&[incoming.clone()], Some(incoming.id), Utc::now());
    let json = serde_json::to_string_pretty(&envelope).unwrap();

    let (collaborators, service, _player, _downloads) =
        mock_collaborators(vec![make_playlist("old", 1)]);
    let store = Store::new(collaborators);

    store.dispatch(Action::ImportRequested { json });
    wait_for(&store, "import succeeded and persisted", |state| {
        matches!(
            state.import_export,
            ImportExportState::ImportSucceeded { .. }
        ) && !state.persistence.is_dirty
    })
    .await;

    let state = store.state();
    assert_eq!(
        state.import_export,
        ImportExportState::ImportSucceeded {
            playlist_count: 1,
            video_count: 3
        }
    );
    assert!(matches!(state.playlists, PlaylistsState::Loaded(ref p) if p[0].id == incoming.id));
    assert_eq!(state.queue.selected_playlist_id, Some(incoming.id));
    assert!(state.queue.videos.is_empty());
    assert_eq!(state.player, PlayerState::Empty);
    assert!(state.persistence.last_persist_error.is_none());

    // The durable store now holds the imported catalog.
    let stored = service.playlists.lock();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, incoming.id);
    drop(stored);

    store.shutdown().await;
}

#[tokio::test]
async fn import_rejects_malformed_json() {
    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    store.dispatch(Action::ImportRequested {
        json: "{ not json".to_string(),
    });
    wait_for(&store, "parse failure recorded", |state| {
        matches!(
            state.import_export,
            ImportExportState::ImportFailed(ImportError::Parse(_))
        )
    })
    .await;

    store.shutdown().await;
}

#[tokio::test]
async fn import_rejects_newer_schema() {
    let incoming = make_playlist("incoming", 1);
    let mut envelope = mapper::to_envelope(&[incoming], None, Utc::now());
    envelope.schema_version = 2;
    let json = serde_json::to_string(&envelope).unwrap();

    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    store.dispatch(Action::ImportRequested { json });
    wait_for(&store, "schema rejected", |state| {
        state.import_export == ImportExportState::ImportFailed(ImportError::UnsupportedSchema(2))
    })
    .await;

    store.shutdown().await;
}

#[tokio::test]
async fn import_validation_failure_leaves_catalog_untouched() {
    let existing = make_playlist("existing", 1);
    let mut invalid = make_playlist("incoming", 1);
    invalid.videos[0].title = String::new();
    let envelope = mapper::to_envelope(&[invalid], None, Utc::now());
    let json = serde_json::to_string(&envelope).unwrap();

    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![existing.clone()]);
    let store = Store::new(collaborators);

    store.dispatch(Action::Initialize);
    wait_for(&store, "catalog loaded", |state| {
        matches!(state.playlists, PlaylistsState::Loaded(_))
    })
    .await;

    store.dispatch(Action::ImportRequested { json });
    wait_for(&store, "validation failure recorded", |state| {
        matches!(
            state.import_export,
            ImportExportState::ImportFailed(ImportError::Validation { .. })
        )
    })
    .await;

    let state = store.state();
    assert!(matches!(state.playlists, PlaylistsState::Loaded(ref p) if p[0].id == existing.id));
    assert!(!state.persistence.is_dirty);

    store.shutdown().await;
}

#[tokio::test]
async fn import_rejects_colliding_ids() {
    let mut incoming = make_playlist("incoming", 2);
    let duplicate = incoming.videos[0].id;
    incoming.videos[1].id = duplicate;
    let envelope = mapper::to_envelope(&[incoming], None, Utc::now());
    let json = serde_json::to_string(&envelope).unwrap();

    let (collaborators, _service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    store.dispatch(Action::ImportRequested { json });
    wait_for(&store, "collision rejected", |state| {
        state.import_export == ImportExportState::ImportFailed(ImportError::IdCollision(duplicate))
    })
    .await;

    store.shutdown().await;
}

#[tokio::test]
async fn failed_persist_keeps_dirty_flag_and_allows_retry() {
    let incoming = make_playlist("incoming", 1);
    let envelope = mapper::to_envelope(&[incoming], None, Utc::now());
    let json = serde_json::to_string(&envelope).unwrap();

    let (collaborators, service, _player, _downloads) = mock_collaborators(vec![]);
    let store = Store::new(collaborators);

    service.queue_failure(ServiceError::Transient("connection dropped".into()));
    store.dispatch(Action::ImportRequested { json });
    wait_for(&store, "persist failure recorded", |state| {
        state.persistence.last_persist_error.is_some()
    })
    .await;

    let state = store.state();
    assert!(state.persistence.is_dirty);
    assert!(state
        .persistence
        .last_persist_error
        .as_deref()
        .unwrap()
        .contains("connection dropped"));

    // The explicit retry goes through once the service recovers.
    store.dispatch(Action::PersistRequested);
    wait_for(&store, "retry persisted", |state| {
        !state.persistence.is_dirty
    })
    .await;
    assert!(store.state().persistence.last_persist_error.is_none());

    store.shutdown().await;
}
