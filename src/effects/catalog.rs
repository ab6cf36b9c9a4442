//! Playlist-service effects: loading, CRUD and position persistence.

use super::{EffectContext, EFFECTS_LOG_TARGET};
use crate::errors::ErrorContext;
use crate::model::{Playlist, VideoItem};
use crate::services::ServiceError;
use crate::state::{Action, Notification};
use crate::youtube;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

#[instrument(skip(ctx))]
pub(super) async fn initialize(ctx: &EffectContext) {
    match ctx.collaborators.playlists.get_all().await {
        Ok(playlists) => {
            info!(target: EFFECTS_LOG_TARGET, count = playlists.len(), "Loaded playlist catalog");
            let first = playlists.first().map(|p| p.id);
            ctx.dispatch(Action::PlaylistsLoaded(playlists));
            if let Some(id) = first {
                ctx.dispatch(Action::SelectPlaylist(id));
            }
        }
        Err(error) => ctx.fail(error, ErrorContext::new("load_playlists")),
    }
}

#[instrument(skip(ctx))]
pub(super) async fn select_playlist(ctx: &EffectContext, id: Uuid) {
    match ctx.collaborators.playlists.get_by_id(id).await {
        Ok(Some(playlist)) => {
            let has_videos = !playlist.videos.is_empty();
            ctx.dispatch(Action::PlaylistLoaded(playlist));
            if has_videos {
                ctx.dispatch(Action::SelectVideo {
                    index: 0,
                    autoplay: false,
                });
            }
        }
        Ok(None) => ctx.fail(
            ServiceError::NotFound(format!("playlist {} not found", id)),
            ErrorContext::new("select_playlist").with_playlist(id),
        ),
        Err(error) => ctx.fail(error, ErrorContext::new("select_playlist").with_playlist(id)),
    }
}

/// Persists the renumbered positions after a reorder.
#[instrument(skip(ctx))]
pub(super) async fn persist_positions(ctx: &EffectContext) {
    let state = ctx.state();
    let playlist_id = match state.queue.selected_playlist_id {
        Some(id) => id,
        None => return,
    };
    if let Err(error) = ctx
        .collaborators
        .playlists
        .update_video_positions(playlist_id, state.queue.videos.clone())
        .await
    {
        ctx.fail(
            error,
            ErrorContext::new("update_video_positions").with_playlist(playlist_id),
        );
    }
}

#[instrument(skip(ctx, description))]
pub(super) async fn create_playlist(ctx: &EffectContext, name: &str, description: Option<String>) {
    let now = Utc::now();
    let playlist = Playlist {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description,
        created_at: now,
        updated_at: now,
        videos: Vec::new(),
    };
    let id = playlist.id;

    if let Err(error) = ctx.collaborators.playlists.create(playlist).await {
        ctx.fail(error, ErrorContext::new("create_playlist"));
        return;
    }
    if reload_catalog(ctx, Some(id)).await {
        ctx.dispatch(Action::ShowNotification(Notification::info(&format!(
            "Playlist \"{}\" created",
            name
        ))));
    }
}

#[instrument(skip(ctx, description))]
pub(super) async fn rename_playlist(
    ctx: &EffectContext,
    id: Uuid,
    name: &str,
    description: Option<String>,
) {
    let context = || ErrorContext::new("rename_playlist").with_playlist(id);
    let playlist = match ctx.collaborators.playlists.get_by_id(id).await {
        Ok(Some(playlist)) => playlist,
        Ok(None) => {
            ctx.fail(
                ServiceError::NotFound(format!("playlist {} not found", id)),
                context(),
            );
            return;
        }
        Err(error) => {
            ctx.fail(error, context());
            return;
        }
    };

    let updated = Playlist {
        name: name.to_string(),
        description,
        updated_at: Utc::now(),
        ..playlist
    };
    if let Err(error) = ctx.collaborators.playlists.update(updated).await {
        ctx.fail(error, context());
        return;
    }
    if reload_catalog(ctx, None).await {
        ctx.dispatch(Action::ShowNotification(Notification::info(&format!(
            "Playlist renamed to \"{}\"",
            name
        ))));
    }
}

#[instrument(skip(ctx))]
pub(super) async fn delete_playlist(ctx: &EffectContext, id: Uuid) {
    let was_selected = ctx.state().queue.selected_playlist_id == Some(id);

    if let Err(error) = ctx.collaborators.playlists.delete(id).await {
        ctx.fail(error, ErrorContext::new("delete_playlist").with_playlist(id));
        return;
    }

    match ctx.collaborators.playlists.get_all().await {
        Ok(playlists) => {
            let first = playlists.first().map(|p| p.id);
            ctx.dispatch(Action::PlaylistsLoaded(playlists));
            if was_selected {
                if let Some(next_id) = first {
                    ctx.dispatch(Action::SelectPlaylist(next_id));
                }
            }
            ctx.dispatch(Action::ShowNotification(Notification::info(
                "Playlist deleted",
            )));
        }
        Err(error) => ctx.fail(error, ErrorContext::new("load_playlists")),
    }
}

#[instrument(skip(ctx, url, title))]
pub(super) async fn add_video(ctx: &EffectContext, url: &str, title: &str) {
    let state = ctx.state();
    let playlist_id = match state.queue.selected_playlist_id {
        Some(id) => id,
        None => {
            ctx.fail(
                ServiceError::Validation("no playlist selected".to_string()),
                ErrorContext::new("add_video"),
            );
            return;
        }
    };

    let youtube_id = match youtube::extract_video_id(url) {
        Some(id) => id,
        None => {
            ctx.fail(
                ServiceError::Validation(format!("not a recognized YouTube URL: {}", url)),
                ErrorContext::new("add_video").with_playlist(playlist_id),
            );
            return;
        }
    };

    let video = VideoItem {
        id: Uuid::new_v4(),
        youtube_id,
        title: title.to_string(),
        thumbnail_url: None,
        duration: None,
        added_at: Utc::now(),
        position: state.queue.videos.len() as u32,
        playlist_id,
    };
    let video_id = video.id;

    if let Err(error) = ctx
        .collaborators
        .playlists
        .add_video_to_playlist(playlist_id, video)
        .await
    {
        ctx.fail(
            error,
            ErrorContext::new("add_video")
                .with_playlist(playlist_id)
                .with_video(video_id),
        );
        return;
    }
    if reload_playlist(ctx, playlist_id, "add_video").await {
        ctx.dispatch(Action::ShowNotification(Notification::info(&format!(
            "Added \"{}\"",
            title
        ))));
    }
}

#[instrument(skip(ctx))]
pub(super) async fn remove_video(ctx: &EffectContext, playlist_id: Uuid, video_id: Uuid) {
    let context = || {
        ErrorContext::new("remove_video")
            .with_playlist(playlist_id)
            .with_video(video_id)
    };

    if let Err(error) = ctx
        .collaborators
        .playlists
        .remove_video_from_playlist(playlist_id, video_id)
        .await
    {
        ctx.fail(error, context());
        return;
    }

    // Close the gap the removal left before reloading.
    let playlist = match ctx.collaborators.playlists.get_by_id(playlist_id).await {
        Ok(Some(playlist)) => playlist,
        Ok(None) => {
            ctx.fail(
                ServiceError::NotFound(format!("playlist {} not found", playlist_id)),
                context(),
            );
            return;
        }
        Err(error) => {
            ctx.fail(error, context());
            return;
        }
    };
    let renumbered: Vec<VideoItem> = playlist
        .videos_in_order()
        .iter()
        .enumerate()
        .map(|(index, video)| video.with_position(index as u32))
        .collect();
    if let Err(error) = ctx
        .collaborators
        .playlists
        .update_video_positions(playlist_id, renumbered.clone())
        .await
    {
        ctx.fail(error, context());
        return;
    }

    let reloaded = Playlist {
        videos: renumbered,
        ..playlist
    };
    let has_videos = !reloaded.videos.is_empty();
    ctx.dispatch(Action::PlaylistLoaded(reloaded));
    if has_videos {
        ctx.dispatch(Action::SelectVideo {
            index: 0,
            autoplay: false,
        });
    }
    ctx.dispatch(Action::ShowNotification(Notification::info("Video removed")));
}

/// Reloads the catalog and re-selects. `select` forces a specific playlist;
/// otherwise the current selection is kept.
async fn reload_catalog(ctx: &EffectContext, select: Option<Uuid>) -> bool {
    match ctx.collaborators.playlists.get_all().await {
        Ok(playlists) => {
            ctx.dispatch(Action::PlaylistsLoaded(playlists));
            if let Some(id) = select {
                ctx.dispatch(Action::SelectPlaylist(id));
            }
            true
        }
        Err(error) => {
            ctx.fail(error, ErrorContext::new("load_playlists"));
            false
        }
    }
}

/// Reloads one playlist into the queue and selects its first video.
async fn reload_playlist(ctx: &EffectContext, playlist_id: Uuid, operation: &str) -> bool {
    match ctx.collaborators.playlists.get_by_id(playlist_id).await {
        Ok(Some(playlist)) => {
            let has_videos = !playlist.videos.is_empty();
            ctx.dispatch(Action::PlaylistLoaded(playlist));
            if has_videos {
                ctx.dispatch(Action::SelectVideo {
                    index: 0,
                    autoplay: false,
                });
            }
            true
        }
        Ok(None) => {
            ctx.fail(
                ServiceError::NotFound(format!("playlist {} not found", playlist_id)),
                ErrorContext::new(operation).with_playlist(playlist_id),
            );
            false
        }
        Err(error) => {
            ctx.fail(
                error,
                ErrorContext::new(operation).with_playlist(playlist_id),
            );
            false
        }
    }
}
