//! Resolve a pasted video link into a canonical [`VideoId`].
//!
//! Recognized shapes:
//! - `https://www.youtube.com/watch?v=<id>` (also `m.youtube.com`)
//! - `https://youtu.be/<id>`
//! - `https://www.youtube.com/shorts/<id>`

use url::Url;

use crate::domain::value_object::VideoId;

/// Extract the canonical id from `input`, or `None` if the link is not a
/// recognized shape or the id is malformed.
pub fn resolve_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let candidate = match host {
        "youtube.com" | "m.youtube.com" => {
            if url.path() == "/watch" {
                url.query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else {
                let mut segments = url.path_segments()?;
                match (segments.next(), segments.next()) {
                    (Some("shorts"), Some(id)) => Some(id.to_string()),
                    _ => None,
                }
            }
        }
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        _ => None,
    }?;

    VideoId::new(&candidate).ok()
}
