//! Mapping between catalog entities and envelope DTOs.

use super::envelope::{ExportEnvelope, PlaylistDto, VideoDto, SCHEMA_VERSION};
use crate::model::{Playlist, VideoItem};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Wraps the catalog in a schema-v1 envelope. Videos are emitted in
/// `position` order.
pub fn to_envelope(
    playlists: &[Playlist],
    selected_playlist_id: Option<Uuid>,
    exported_at: DateTime<Utc>,
) -> ExportEnvelope {
    ExportEnvelope {
        schema_version: SCHEMA_VERSION,
        exported_at_utc: exported_at,
        playlists: playlists.iter().map(playlist_to_dto).collect(),
        selected_playlist_id,
    }
}

/// Converts a validated envelope back into catalog entities.
///
/// Imported positions need not be contiguous; videos are ordered by the
/// incoming position and renumbered from 0 so the contiguity invariant
/// holds from the first reduction onwards.
pub fn to_domain(envelope: &ExportEnvelope) -> (Vec<Playlist>, Option<Uuid>) {
    let playlists = envelope.playlists.iter().map(playlist_from_dto).collect();
    (playlists, envelope.selected_playlist_id)
}

fn playlist_to_dto(playlist: &Playlist) -> PlaylistDto {
    PlaylistDto {
        id: playlist.id,
        name: playlist.name.clone(),
        description: playlist.description.clone(),
        created_at_utc: playlist.created_at,
        updated_at_utc: playlist.updated_at,
        videos: playlist
            .videos_in_order()
            .iter()
            .map(video_to_dto)
            .collect(),
    }
}

fn video_to_dto(video: &VideoItem) -> VideoDto {
    VideoDto {
        id: video.id,
        you_tube_id: video.youtube_id.clone(),
        title: video.title.clone(),
        thumbnail_url: video.thumbnail_url.clone(),
        duration: video.duration,
        position: video.position as i64,
        added_at_utc: video.added_at,
    }
}

fn playlist_from_dto(dto: &PlaylistDto) -> Playlist {
    let mut videos: Vec<&VideoDto> = dto.videos.iter().collect();
    videos.sort_by_key(|v| v.position);

    Playlist {
        id: dto.id,
        name: dto.name.clone(),
        description: dto.description.clone(),
        created_at: dto.created_at_utc,
        updated_at: dto.updated_at_utc,
        videos: videos
            .into_iter()
            .enumerate()
            .map(|(index, video)| VideoItem {
                id: video.id,
                youtube_id: video.you_tube_id.clone(),
                title: video.title.clone(),
                thumbnail_url: video.thumbnail_url.clone(),
                duration: video.duration,
                added_at: video.added_at_utc,
                position: index as u32,
                playlist_id: dto.id,
            })
            .collect(),
    }
}
