//! Import/export: envelope schema, entity mapping and validation.

pub mod envelope;
pub mod mapper;

pub use envelope::{ExportEnvelope, PlaylistDto, VideoDto, SCHEMA_VERSION};

use crate::errors::ImportError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// File name handed to the download collaborator on export.
pub fn export_file_name(date: DateTime<Utc>) -> String {
    format!("arcflow-export-{}.json", date.format("%Y-%m-%d"))
}

/// Validates an envelope's content prior to conversion.
///
/// Playlist names, video YouTube ids and video titles must be non-empty;
/// positions must be non-negative. Contiguity is not required here, the
/// mapper renumbers on conversion.
pub fn validate_envelope(envelope: &ExportEnvelope) -> Result<(), ImportError> {
    for playlist in &envelope.playlists {
        if playlist.name.trim().is_empty() {
            return Err(ImportError::Validation {
                field: format!("playlists[{}].name", playlist.id),
                message: "playlist name must not be empty".to_string(),
            });
        }
        for video in &playlist.videos {
            if video.you_tube_id.trim().is_empty() {
                return Err(ImportError::Validation {
                    field: format!("videos[{}].youTubeId", video.id),
                    message: "video YouTube id must not be empty".to_string(),
                });
            }
            if video.title.trim().is_empty() {
                return Err(ImportError::Validation {
                    field: format!("videos[{}].title", video.id),
                    message: "video title must not be empty".to_string(),
                });
            }
            if video.position < 0 {
                return Err(ImportError::Validation {
                    field: format!("videos[{}].position", video.id),
                    message: format!("position must be non-negative, got {}", video.position),
                });
            }
        }
    }
    Ok(())
}

/// Rejects envelopes whose playlist or video ids collide with each other.
///
/// Import mode is replace-all, so pre-existing database ids are irrelevant;
/// only intra-envelope uniqueness matters.
pub fn check_id_uniqueness(envelope: &ExportEnvelope) -> Result<(), ImportError> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    for playlist in &envelope.playlists {
        if !seen.insert(playlist.id) {
            return Err(ImportError::IdCollision(playlist.id));
        }
        for video in &playlist.videos {
            if !seen.insert(video.id) {
                return Err(ImportError::IdCollision(video.id));
            }
        }
    }
    Ok(())
}
