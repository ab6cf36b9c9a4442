//! Export, import and persistence effects.

use super::{EffectContext, EFFECTS_LOG_TARGET};
use crate::errors::{ExportError, ImportError};
use crate::interchange::{
    self, check_id_uniqueness, mapper, validate_envelope, ExportEnvelope, SCHEMA_VERSION,
};
use crate::state::{Action, PlaylistsState};
use chrono::Utc;
use tracing::{debug, info, instrument};

/// Runs the export pipeline: map, wrap, serialize, hand to the download
/// collaborator. Progress and failures travel as actions.
#[instrument(skip(ctx))]
pub(super) async fn export(ctx: &EffectContext) {
    let state = ctx.state();
    let playlists = state.playlists.playlists().to_vec();
    let exported_at = Utc::now();
    let envelope = mapper::to_envelope(&playlists, state.queue.selected_playlist_id, exported_at);
    ctx.dispatch(Action::ExportPrepared);

    let json = match serde_json::to_string_pretty(&envelope) {
        Ok(json) => json,
        Err(error) => {
            ctx.dispatch(Action::ExportFailed(ExportError::SerializationFailed(
                error.to_string(),
            )));
            return;
        }
    };

    let file_name = interchange::export_file_name(exported_at);
    match ctx.collaborators.downloads.save(&file_name, &json).await {
        Ok(()) => {
            info!(target: EFFECTS_LOG_TARGET, file = %file_name, "Export saved");
            ctx.dispatch(Action::ExportSucceeded { exported_at });
        }
        Err(error) => ctx.dispatch(Action::ExportFailed(ExportError::InteropFailed(
            error.to_string(),
        ))),
    }
}

/// Runs the import pipeline: parse, schema gate, validate, uniqueness
/// check, convert. Fails with an `ImportFailed` at the earliest failing
/// stage; on success `ImportApplied` is the single state-replacing action.
#[instrument(skip(ctx, json))]
pub(super) async fn import(ctx: &EffectContext, json: &str) {
    let envelope: ExportEnvelope = match serde_json::from_str(json) {
        Ok(envelope) => envelope,
        Err(error) => {
            ctx.dispatch(Action::ImportFailed(ImportError::Parse(error.to_string())));
            return;
        }
    };

    if envelope.schema_version > SCHEMA_VERSION {
        ctx.dispatch(Action::ImportFailed(ImportError::UnsupportedSchema(
            envelope.schema_version,
        )));
        return;
    }
    ctx.dispatch(Action::ImportParsed(envelope.clone()));

    if let Err(error) = validate_envelope(&envelope) {
        ctx.dispatch(Action::ImportFailed(error));
        return;
    }
    if let Err(error) = check_id_uniqueness(&envelope) {
        ctx.dispatch(Action::ImportFailed(error));
        return;
    }
    ctx.dispatch(Action::ImportValidated(envelope.clone()));

    let (playlists, selected_playlist_id) = mapper::to_domain(&envelope);
    let playlist_count = playlists.len();
    let video_count = playlists.iter().map(|p| p.videos.len()).sum();

    ctx.dispatch(Action::ImportApplied {
        playlists,
        selected_playlist_id,
    });
    ctx.dispatch(Action::ImportSucceeded {
        playlist_count,
        video_count,
    });
}

/// Writes the catalog back to durable storage when it is dirty and loaded.
/// Failure leaves the dirty flag set so an explicit retry can follow.
#[instrument(skip(ctx))]
pub(super) async fn persist(ctx: &EffectContext) {
    let state = ctx.state();
    if !state.persistence.is_dirty {
        debug!(target: EFFECTS_LOG_TARGET, "Catalog clean; skipping persist");
        return;
    }
    let playlists = match &state.playlists {
        PlaylistsState::Loaded(playlists) => playlists.clone(),
        _ => {
            debug!(target: EFFECTS_LOG_TARGET, "Catalog not loaded; skipping persist");
            return;
        }
    };

    match ctx
        .collaborators
        .playlists
        .replace_all_playlists(playlists)
        .await
    {
        Ok(()) => ctx.dispatch(Action::PersistSucceeded { at: Utc::now() }),
        Err(error) => ctx.dispatch(Action::PersistFailed {
            message: error.to_string(),
            at: Utc::now(),
        }),
    }
}
