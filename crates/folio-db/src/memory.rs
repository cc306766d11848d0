//! In-memory [`ContentStore`] used by tests and dry runs

use crate::error::{StoreError, StoreResult};
use crate::models::{
	Article, ArticleChanges, ArticleId, HomepageContent, NewArticle, NewVideo, Video, VideoId,
	truncate_to_millis,
};
use crate::store::ContentStore;
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
struct MemoryState {
	articles: Vec<Article>,
	next_article_id: ArticleId,
	homepage: Option<HomepageContent>,
	videos: Vec<Video>,
	next_video_id: VideoId,
}

/// Store keeping every record behind one mutex
///
/// Constraint checks and writes happen under the same lock, so the slug
/// uniqueness guarantee matches the SQLite backend.
///
/// # Examples
///
/// ```
/// use folio_db::{ContentStore, InMemoryStore};
///
/// # async fn example() {
/// let store = InMemoryStore::new();
/// assert!(!store.exists_by_slug("hello-world").await.unwrap());
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(example());
/// ```
#[derive(Default)]
pub struct InMemoryStore {
	state: Mutex<MemoryState>,
}

impl InMemoryStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl ContentStore for InMemoryStore {
	async fn exists_by_slug(&self, slug: &str) -> StoreResult<bool> {
		Ok(self.state.lock().articles.iter().any(|a| a.slug == slug))
	}

	async fn insert_article(&self, article: NewArticle) -> StoreResult<Article> {
		let mut state = self.state.lock();
		if state.articles.iter().any(|a| a.slug == article.slug) {
			return Err(StoreError::UniqueViolation(format!(
				"articles.slug: {}",
				article.slug
			)));
		}

		state.next_article_id += 1;
		let stored = Article {
			id: state.next_article_id,
			title: article.title,
			slug: article.slug,
			summary: article.summary,
			body: article.body,
			image_path: article.image_path,
			created_at: truncate_to_millis(article.created_at),
			updated_at: None,
		};
		state.articles.push(stored.clone());
		Ok(stored)
	}

	async fn update_article_by_id(
		&self,
		id: ArticleId,
		changes: ArticleChanges,
	) -> StoreResult<Article> {
		let mut state = self.state.lock();
		let article = state
			.articles
			.iter_mut()
			.find(|a| a.id == id)
			.ok_or_else(|| StoreError::NotFound(format!("article {}", id)))?;

		changes.apply_to(article);
		article.updated_at = article.updated_at.map(truncate_to_millis);
		Ok(article.clone())
	}

	async fn get_article_by_id(&self, id: ArticleId) -> StoreResult<Option<Article>> {
		Ok(self
			.state
			.lock()
			.articles
			.iter()
			.find(|a| a.id == id)
			.cloned())
	}

	async fn get_article_by_slug(&self, slug: &str) -> StoreResult<Option<Article>> {
		Ok(self
			.state
			.lock()
			.articles
			.iter()
			.find(|a| a.slug == slug)
			.cloned())
	}

	async fn list_articles(&self) -> StoreResult<Vec<Article>> {
		let mut articles = self.state.lock().articles.clone();
		articles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
		Ok(articles)
	}

	async fn get_homepage(&self) -> StoreResult<Option<HomepageContent>> {
		Ok(self.state.lock().homepage.clone())
	}

	async fn upsert_homepage(&self, content: HomepageContent) -> StoreResult<HomepageContent> {
		self.state.lock().homepage = Some(content.clone());
		Ok(content)
	}

	async fn seed_homepage(&self, content: HomepageContent) -> StoreResult<bool> {
		let mut state = self.state.lock();
		if state.homepage.is_some() {
			return Ok(false);
		}
		state.homepage = Some(content);
		Ok(true)
	}

	async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
		let mut state = self.state.lock();
		state.next_video_id += 1;
		let stored = Video {
			id: state.next_video_id,
			title: video.title,
			url: video.url,
			created_at: truncate_to_millis(video.created_at),
		};
		state.videos.push(stored.clone());
		Ok(stored)
	}

	async fn list_videos(&self) -> StoreResult<Vec<Video>> {
		Ok(self.state.lock().videos.clone())
	}
}
