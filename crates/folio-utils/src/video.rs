//! YouTube link helpers for the video catalogue

use url::Url;

const VIDEO_ID_LEN: usize = 11;

/// Extract the YouTube video id from a watch, short-link, embed or shorts URL
///
/// # Examples
///
/// ```
/// use folio_utils::video::youtube_video_id;
///
/// assert_eq!(
///     youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(
///     youtube_video_id("https://youtu.be/o-YBDTqX_ZU").as_deref(),
///     Some("o-YBDTqX_ZU")
/// );
/// assert_eq!(youtube_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
/// ```
pub fn youtube_video_id(link: &str) -> Option<String> {
	let url = Url::parse(link.trim()).ok()?;
	let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

	let candidate = match host {
		"youtu.be" => url.path_segments()?.next().map(str::to_string),
		"youtube.com" | "youtube-nocookie.com" | "music.youtube.com" => {
			let mut segments = url.path_segments()?;
			match segments.next()? {
				"watch" => url
					.query_pairs()
					.find(|(key, _)| key == "v")
					.map(|(_, value)| value.into_owned()),
				"embed" | "shorts" | "live" | "v" => segments.next().map(str::to_string),
				_ => None,
			}
		}
		_ => None,
	}?;

	is_valid_video_id(&candidate).then_some(candidate)
}

fn is_valid_video_id(id: &str) -> bool {
	id.len() == VIDEO_ID_LEN
		&& id
			.chars()
			.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// Thumbnail image URL for a video id
pub fn thumbnail_url(video_id: &str) -> String {
	format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}
