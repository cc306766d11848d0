//! Homepage singleton service
//!
//! The homepage row is seeded once with default content and only updated
//! afterwards. Concurrent edits are last-writer-wins.

use crate::error::{CmsError, CmsResult, require_text};
use folio_db::{ContentStore, HomepageContent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Content written on first run
pub fn default_homepage() -> HomepageContent {
	HomepageContent {
		hero_title: "Welcome".to_string(),
		hero_subtitle: "Articles and videos".to_string(),
		hero_image_path: None,
		about_title: "About".to_string(),
		about_body: "Edit this text from the admin tool.".to_string(),
	}
}

/// Partial homepage edit; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageUpdate {
	/// New hero heading
	pub hero_title: Option<String>,
	/// New hero sub-heading
	pub hero_subtitle: Option<String>,
	/// `Some(None)` clears the hero image
	pub hero_image_path: Option<Option<String>>,
	/// New "about" heading
	pub about_title: Option<String>,
	/// New "about" text
	pub about_body: Option<String>,
}

impl HomepageUpdate {
	fn validate(&self) -> CmsResult<()> {
		let required = [
			("hero_title", &self.hero_title),
			("hero_subtitle", &self.hero_subtitle),
			("about_title", &self.about_title),
			("about_body", &self.about_body),
		];
		for (field, value) in required {
			if let Some(value) = value {
				require_text(field, value)?;
			}
		}
		Ok(())
	}

	fn apply_to(self, content: &mut HomepageContent) {
		if let Some(v) = self.hero_title {
			content.hero_title = v.trim().to_string();
		}
		if let Some(v) = self.hero_subtitle {
			content.hero_subtitle = v.trim().to_string();
		}
		if let Some(v) = self.hero_image_path {
			content.hero_image_path = v.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
		}
		if let Some(v) = self.about_title {
			content.about_title = v.trim().to_string();
		}
		if let Some(v) = self.about_body {
			content.about_body = v;
		}
	}
}

/// Reads and edits the homepage singleton
#[derive(Clone)]
pub struct HomepageService {
	store: Arc<dyn ContentStore>,
}

impl HomepageService {
	/// Create a service over `store`
	pub fn new(store: Arc<dyn ContentStore>) -> Self {
		Self { store }
	}

	/// Seed the default content unless the homepage already exists
	///
	/// Safe to call on every start. An edit that lands while seeding is in
	/// flight is kept.
	pub async fn ensure_initialized(&self) -> CmsResult<HomepageContent> {
		if self.store.seed_homepage(default_homepage()).await? {
			tracing::info!("homepage seeded with default content");
		}
		self.homepage().await
	}

	/// Current homepage content
	pub async fn homepage(&self) -> CmsResult<HomepageContent> {
		self.store
			.get_homepage()
			.await?
			.ok_or_else(|| CmsError::NotFound("homepage".to_string()))
	}

	/// Apply a partial edit
	///
	/// Starts from the defaults when the homepage was never seeded.
	pub async fn update_homepage(&self, update: HomepageUpdate) -> CmsResult<HomepageContent> {
		update.validate()?;

		let mut content = self
			.store
			.get_homepage()
			.await?
			.unwrap_or_else(default_homepage);
		update.apply_to(&mut content);

		let saved = self.store.upsert_homepage(content).await?;
		tracing::info!("homepage updated");
		Ok(saved)
	}
}
