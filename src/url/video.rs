use url::Url;

/// Length of a video identifier
pub const VIDEO_ID_LEN: usize = 11;

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Takes the leading identifier from a path segment or query value
fn leading_id(candidate: &str) -> Option<String> {
    let prefix: String = candidate.chars().take_while(|c| is_id_char(*c)).collect();
    if prefix.len() >= VIDEO_ID_LEN {
        Some(prefix[..VIDEO_ID_LEN].to_string())
    } else {
        None
    }
}

/// Extracts the 11-character video identifier from a video URL
///
/// Accepted shapes:
/// - `youtube.com/watch?v=<id>` (the `v` parameter may appear anywhere in the query)
/// - `youtu.be/<id>`
/// - `youtube.com/embed/<id>`
/// - `youtube.com/shorts/<id>`
///
/// Returns `None` when the URL does not carry a usable identifier.
///
/// # Examples
///
/// ```
/// use link_catalog::url::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=5").as_deref(), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://www.youtube.com/@channel"), None);
/// ```
pub fn extract_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.to_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    if host == "youtu.be" {
        return segments.next().and_then(leading_id);
    }

    if host != "youtube.com" && !host.ends_with(".youtube.com") {
        return None;
    }

    match segments.next()? {
        "watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| leading_id(&value)),
        "embed" | "shorts" => segments.next().and_then(leading_id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_watch_url_with_v_not_first() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=10").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_short_link() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some(ID));
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_embed_and_shorts() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
        assert_eq!(
            extract_video_id("https://m.youtube.com/shorts/dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_longer_candidate_takes_first_eleven() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQXYZ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_unrecognized_shapes() {
        for url in [
            "https://www.youtube.com/",
            "https://www.youtube.com/@rustlang",
            "https://www.youtube.com/playlist?list=PL123",
            "https://www.youtube.com/watch?list=PL123",
            "https://www.youtube.com/watch?v=short",
            "https://youtu.be/",
            "https://vimeo.com/embed/dQw4w9WgXcQ",
            "not a url",
        ] {
            assert_eq!(extract_video_id(url), None, "{}", url);
        }
    }
}
