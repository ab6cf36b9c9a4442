//! YouTube watch-URL parsing for the add-video flow.

use url::Url;

/// Extracts the 11-character video id from a YouTube URL.
///
/// Accepted shapes: `youtube.com/watch?v=<id>`, `youtu.be/<id>` and
/// `youtube.com/embed/<id>`, with or without a scheme. Anything else,
/// including a malformed id, yields `None`.
pub fn extract_video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .ok()?;

    let host = parsed
        .host_str()?
        .trim_start_matches("www.")
        .trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" => {
            if parsed.path() == "/watch" {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else if let Some(rest) = parsed.path().strip_prefix("/embed/") {
                rest.split('/').next().map(str::to_string)
            } else {
                None
            }
        }
        _ => None,
    }?;

    if is_valid_id(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

fn is_valid_id(id: &str) -> bool {
    id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
