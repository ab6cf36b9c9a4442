//! Wire format of the export document (schema version 1).
//!
//! Field names are lower-camel-case, unknown fields are ignored on read and
//! null-valued optionals are omitted on write. Timestamps are ISO-8601 UTC.
//! Durations serialize as total seconds; the reader additionally accepts
//! ISO-8601 duration strings (`PT3M20S`) so envelopes produced by either
//! convention round-trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current envelope schema version. Documents with a higher version are
/// rejected on import.
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub schema_version: u32,
    pub exported_at_utc: DateTime<Utc>,
    pub playlists: Vec<PlaylistDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_playlist_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub videos: Vec<VideoDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub id: Uuid,
    pub you_tube_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Total seconds on write; seconds or ISO-8601 duration on read.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "duration_repr::deserialize"
    )]
    pub duration: Option<u32>,
    /// Kept signed so a negative value surfaces as a validation error
    /// rather than a parse error.
    pub position: i64,
    pub added_at_utc: DateTime<Utc>,
}

/// Duration wire representation: a bare number of seconds or an ISO-8601
/// duration string.
mod duration_repr {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Iso(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<Raw> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(Raw::Seconds(secs)) => Ok(Some(secs.min(u32::MAX as u64) as u32)),
            Some(Raw::Iso(text)) => parse_iso_duration(&text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {}", text))),
        }
    }

    /// Parses the integral `PnDTnHnMnS` subset of ISO-8601 durations.
    pub(crate) fn parse_iso_duration(text: &str) -> Option<u32> {
        let rest = text.strip_prefix('P')?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) => (date, time),
            None => (rest, ""),
        };
        if date_part.is_empty() && time_part.is_empty() {
            return None;
        }

        let mut total: u64 = 0;
        let sections: [(&str, &[(char, u64)]); 2] = [
            (date_part, &[('D', 86_400)]),
            (time_part, &[('H', 3_600), ('M', 60), ('S', 1)]),
        ];
        for (part, units) in sections {
            let mut digits = String::new();
            for ch in part.chars() {
                if ch.is_ascii_digit() {
                    digits.push(ch);
                } else {
                    let unit = units.iter().find(|(tag, _)| *tag == ch)?;
                    let value: u64 = digits.parse().ok()?;
                    total = total.checked_add(value.checked_mul(unit.1)?)?;
                    digits.clear();
                }
            }
            if !digits.is_empty() {
                return None;
            }
        }
        Some(total.min(u32::MAX as u64) as u32)
    }
}

pub(crate) use duration_repr::parse_iso_duration;
