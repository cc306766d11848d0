//! Article publishing workflow
//!
//! Creating an article derives its slug from the title, makes the slug
//! unique, fills in a summary when none is given and persists the result.
//! Editing never touches the slug or the creation time.

use crate::error::{CmsError, CmsResult, require_text};
use folio_conf::{ContentSettings, EditSummaryPolicy, SlugConflictPolicy};
use folio_db::models::now;
use folio_db::{Article, ArticleChanges, ArticleId, ContentStore, NewArticle, StoreError};
use folio_utils::{SlugCandidates, auto_summarize, slugify};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Input of [`ArticlePublisher::create_article`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticleInput {
	/// Required title
	pub title: String,
	/// Explicit summary; derived from the body when absent or blank
	pub summary: Option<String>,
	/// Required Markdown body
	pub body: String,
	/// Optional static asset reference
	pub image_path: Option<String>,
}

/// Input of [`ArticlePublisher::update_article`]
///
/// `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUpdate {
	/// New title; must not be blank
	pub title: Option<String>,
	/// New summary; a blank value asks for one derived from the body
	pub summary: Option<String>,
	/// New body; must not be blank
	pub body: Option<String>,
	/// `Some(None)` clears the image
	pub image_path: Option<Option<String>>,
}

/// Creates, edits and reads articles
#[derive(Clone)]
pub struct ArticlePublisher {
	store: Arc<dyn ContentStore>,
	settings: ContentSettings,
}

impl ArticlePublisher {
	/// Create a publisher over `store`
	///
	/// # Examples
	///
	/// ```
	/// use folio_cms::articles::{ArticlePublisher, NewArticleInput};
	/// use folio_conf::ContentSettings;
	/// use folio_db::InMemoryStore;
	/// use std::sync::Arc;
	///
	/// # async fn example() {
	/// let publisher = ArticlePublisher::new(Arc::new(InMemoryStore::new()), ContentSettings::default());
	/// let article = publisher
	///     .create_article(NewArticleInput {
	///         title: "Hello, World!".to_string(),
	///         body: "First post.".to_string(),
	///         ..Default::default()
	///     })
	///     .await
	///     .unwrap();
	/// assert_eq!(article.slug, "hello-world");
	/// assert_eq!(article.summary, "First post.");
	/// # }
	/// # tokio::runtime::Runtime::new().unwrap().block_on(example());
	/// ```
	pub fn new(store: Arc<dyn ContentStore>, settings: ContentSettings) -> Self {
		Self { store, settings }
	}

	/// Settings in effect
	pub fn settings(&self) -> &ContentSettings {
		&self.settings
	}

	/// Validate, slug, summarize and persist a new article
	pub async fn create_article(&self, input: NewArticleInput) -> CmsResult<Article> {
		require_text("title", &input.title)?;
		require_text("body", &input.body)?;

		let base = slugify(&input.title);
		if base.is_empty() {
			return Err(CmsError::validation(
				"title",
				"must contain at least one letter or digit",
			));
		}

		let summary = match explicit_summary(input.summary.as_deref()) {
			Some(summary) => summary,
			None => auto_summarize(&input.body, self.settings.summary_max_length),
		};

		let draft = NewArticle {
			title: input.title.trim().to_string(),
			slug: base.clone(),
			summary,
			body: input.body,
			image_path: normalize_image_path(input.image_path),
			created_at: now(),
		};

		let article = match self.settings.slug_conflict_policy {
			SlugConflictPolicy::AtomicRetry => self.insert_with_retry(&base, draft).await?,
			SlugConflictPolicy::Advisory => self.insert_advisory(&base, draft).await?,
		};

		tracing::info!(id = article.id, slug = %article.slug, "article created");
		Ok(article)
	}

	/// Claim the first free candidate, moving on whenever the store reports
	/// that another writer took it first
	async fn insert_with_retry(&self, base: &str, mut draft: NewArticle) -> CmsResult<Article> {
		for candidate in SlugCandidates::new(base).take(self.settings.slug_max_attempts) {
			if self.store.exists_by_slug(&candidate).await? {
				tracing::debug!(%candidate, "slug taken");
				continue;
			}

			draft.slug = candidate;
			match self.store.insert_article(draft.clone()).await {
				Ok(article) => return Ok(article),
				Err(StoreError::UniqueViolation(_)) => {
					tracing::warn!(candidate = %draft.slug, "lost slug race, retrying");
				}
				Err(e) => return Err(e.into()),
			}
		}

		Err(self.exhausted(base))
	}

	/// Resolve once against the current contents, then insert
	async fn insert_advisory(&self, base: &str, mut draft: NewArticle) -> CmsResult<Article> {
		let mut resolved = None;
		for candidate in SlugCandidates::new(base).take(self.settings.slug_max_attempts) {
			if !self.store.exists_by_slug(&candidate).await? {
				resolved = Some(candidate);
				break;
			}
			tracing::debug!(%candidate, "slug taken");
		}
		draft.slug = resolved.ok_or_else(|| self.exhausted(base))?;

		self.store.insert_article(draft).await.map_err(|e| {
			if let StoreError::UniqueViolation(_) = e {
				tracing::warn!(base, "slug claimed concurrently");
			}
			e.into()
		})
	}

	fn exhausted(&self, base: &str) -> CmsError {
		tracing::warn!(base, attempts = self.settings.slug_max_attempts, "no free slug");
		CmsError::UniquenessConflict(format!(
			"no free slug for '{}' within {} attempts",
			base, self.settings.slug_max_attempts
		))
	}

	/// Edit an existing article
	///
	/// Supplied fields are validated before storage is touched; an unknown
	/// id fails with [`CmsError::NotFound`] without writing anything.
	pub async fn update_article(&self, id: ArticleId, update: ArticleUpdate) -> CmsResult<Article> {
		if let Some(title) = &update.title {
			require_text("title", title)?;
		}
		if let Some(body) = &update.body {
			require_text("body", body)?;
		}

		let existing = self.get_article(id).await?;

		let summary = match update.summary.as_deref() {
			Some(given) => Some(match explicit_summary(Some(given)) {
				Some(summary) => summary,
				None => {
					let body = update.body.as_deref().unwrap_or(&existing.body);
					auto_summarize(body, self.settings.summary_max_length)
				}
			}),
			None => match (self.settings.edit_summary_policy, update.body.as_deref()) {
				(EditSummaryPolicy::Regenerate, Some(body)) => {
					Some(auto_summarize(body, self.settings.summary_max_length))
				}
				_ => None,
			},
		};

		let changes = ArticleChanges {
			title: update.title.map(|t| t.trim().to_string()),
			summary,
			body: update.body,
			image_path: update.image_path.map(normalize_image_path),
			updated_at: now(),
		};

		let article = self.store.update_article_by_id(id, changes).await?;
		tracing::info!(id, slug = %article.slug, "article updated");
		Ok(article)
	}

	/// Fetch an article by id
	pub async fn get_article(&self, id: ArticleId) -> CmsResult<Article> {
		self.store
			.get_article_by_id(id)
			.await?
			.ok_or_else(|| CmsError::NotFound(format!("article {}", id)))
	}

	/// Fetch an article by slug
	pub async fn get_article_by_slug(&self, slug: &str) -> CmsResult<Article> {
		self.store
			.get_article_by_slug(slug)
			.await?
			.ok_or_else(|| CmsError::NotFound(format!("article '{}'", slug)))
	}

	/// All articles, newest first
	pub async fn list_articles(&self) -> CmsResult<Vec<Article>> {
		Ok(self.store.list_articles().await?)
	}
}

fn explicit_summary(summary: Option<&str>) -> Option<String> {
	summary
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
}

fn normalize_image_path(path: Option<String>) -> Option<String> {
	path.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}
