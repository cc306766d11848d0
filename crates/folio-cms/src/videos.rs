//! Video catalogue

use crate::error::{CmsError, CmsResult, require_text};
use folio_db::models::now;
use folio_db::{ContentStore, NewVideo, Video};
use folio_utils::youtube_video_id;
use std::sync::Arc;

/// Adds and lists YouTube videos
#[derive(Clone)]
pub struct VideoCatalogue {
	store: Arc<dyn ContentStore>,
}

impl VideoCatalogue {
	/// Create a catalogue over `store`
	pub fn new(store: Arc<dyn ContentStore>) -> Self {
		Self { store }
	}

	/// Add a video; the URL must carry a YouTube id
	pub async fn add_video(&self, title: &str, url: &str) -> CmsResult<Video> {
		require_text("title", title)?;
		if youtube_video_id(url).is_none() {
			return Err(CmsError::validation("url", "not a recognized YouTube link"));
		}

		let video = self
			.store
			.insert_video(NewVideo {
				title: title.trim().to_string(),
				url: url.trim().to_string(),
				created_at: now(),
			})
			.await?;
		tracing::info!(id = video.id, "video added");
		Ok(video)
	}

	/// All videos in creation order
	pub async fn list_videos(&self) -> CmsResult<Vec<Video>> {
		Ok(self.store.list_videos().await?)
	}
}
