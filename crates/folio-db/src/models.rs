//! Content records
//!
//! Timestamps are persisted as Unix milliseconds, so every timestamp a store
//! hands back has millisecond precision. Use [`now`] when stamping records so
//! the value returned from a write equals the value read back later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article primary key
pub type ArticleId = i64;

/// Video primary key
pub type VideoId = i64;

/// Primary key of the single homepage row
pub const HOMEPAGE_ID: i64 = 1;

/// Current time truncated to millisecond precision
pub fn now() -> DateTime<Utc> {
	truncate_to_millis(Utc::now())
}

/// Drop sub-millisecond precision from a timestamp
pub fn truncate_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
	DateTime::from_timestamp_millis(timestamp.timestamp_millis()).unwrap_or(timestamp)
}

/// A published article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
	/// Storage-assigned id, immutable
	pub id: ArticleId,
	/// Display title
	pub title: String,
	/// Unique URL identifier derived from the title at creation
	pub slug: String,
	/// Plain-text preview
	pub summary: String,
	/// Markdown body, stored verbatim
	pub body: String,
	/// Optional static asset reference
	pub image_path: Option<String>,
	/// Creation time, immutable
	pub created_at: DateTime<Utc>,
	/// Time of the last successful edit
	pub updated_at: Option<DateTime<Utc>>,
}

/// Fully prepared article awaiting an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
	/// Display title
	pub title: String,
	/// Slug to claim; the store rejects duplicates
	pub slug: String,
	/// Plain-text preview
	pub summary: String,
	/// Markdown body
	pub body: String,
	/// Optional static asset reference
	pub image_path: Option<String>,
	/// Creation time
	pub created_at: DateTime<Utc>,
}

/// Column changes applied to an existing article
///
/// `slug` and `created_at` are not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleChanges {
	/// New title
	pub title: Option<String>,
	/// New summary
	pub summary: Option<String>,
	/// New body
	pub body: Option<String>,
	/// `Some(None)` clears the image, `Some(Some(_))` replaces it
	pub image_path: Option<Option<String>>,
	/// Edit time
	pub updated_at: DateTime<Utc>,
}

impl ArticleChanges {
	/// Changes that only touch `updated_at`
	pub fn touch(updated_at: DateTime<Utc>) -> Self {
		Self {
			title: None,
			summary: None,
			body: None,
			image_path: None,
			updated_at,
		}
	}

	/// Apply these changes to an in-memory article
	pub fn apply_to(&self, article: &mut Article) {
		if let Some(title) = &self.title {
			article.title = title.clone();
		}
		if let Some(summary) = &self.summary {
			article.summary = summary.clone();
		}
		if let Some(body) = &self.body {
			article.body = body.clone();
		}
		if let Some(image_path) = &self.image_path {
			article.image_path = image_path.clone();
		}
		article.updated_at = Some(self.updated_at);
	}
}

/// The homepage singleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageContent {
	/// Hero banner heading
	pub hero_title: String,
	/// Hero banner sub-heading
	pub hero_subtitle: String,
	/// Hero banner image
	pub hero_image_path: Option<String>,
	/// "About" section heading
	pub about_title: String,
	/// "About" section text
	pub about_body: String,
}

/// A catalogued YouTube video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
	/// Storage-assigned id
	pub id: VideoId,
	/// Display title
	pub title: String,
	/// YouTube watch, short-link or embed URL
	pub url: String,
	/// Creation time
	pub created_at: DateTime<Utc>,
}

impl Video {
	/// YouTube id extracted from [`Video::url`]
	pub fn youtube_id(&self) -> Option<String> {
		folio_utils::video::youtube_video_id(&self.url)
	}
}

/// A video awaiting an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
	/// Display title
	pub title: String,
	/// YouTube URL
	pub url: String,
	/// Creation time
	pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn sample_article() -> Article {
		Article {
			id: 1,
			title: "Old".to_string(),
			slug: "old".to_string(),
			summary: "old summary".to_string(),
			body: "old body".to_string(),
			image_path: Some("img/old.png".to_string()),
			created_at: Utc.timestamp_millis_opt(1_000).unwrap(),
			updated_at: None,
		}
	}

	#[test]
	fn test_apply_changes_keeps_unset_fields() {
		let mut article = sample_article();
		let edited_at = Utc.timestamp_millis_opt(2_000).unwrap();
		let changes = ArticleChanges {
			title: Some("New".to_string()),
			..ArticleChanges::touch(edited_at)
		};

		changes.apply_to(&mut article);

		assert_eq!(article.title, "New");
		assert_eq!(article.slug, "old");
		assert_eq!(article.summary, "old summary");
		assert_eq!(article.image_path.as_deref(), Some("img/old.png"));
		assert_eq!(article.updated_at, Some(edited_at));
	}

	#[test]
	fn test_apply_changes_clears_image() {
		let mut article = sample_article();
		let changes = ArticleChanges {
			image_path: Some(None),
			..ArticleChanges::touch(Utc.timestamp_millis_opt(2_000).unwrap())
		};

		changes.apply_to(&mut article);

		assert_eq!(article.image_path, None);
	}

	#[test]
	fn test_now_has_millisecond_precision() {
		let stamp = now();
		assert_eq!(stamp.timestamp_subsec_nanos() % 1_000_000, 0);
	}

	#[test]
	fn test_video_youtube_id() {
		let video = Video {
			id: 1,
			title: "Talk".to_string(),
			url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
			created_at: now(),
		};
		assert_eq!(video.youtube_id().as_deref(), Some("dQw4w9WgXcQ"));
	}
}
