//! The storage interface the CMS is written against

use crate::error::StoreResult;
use crate::models::{
	Article, ArticleChanges, ArticleId, HomepageContent, NewArticle, NewVideo, Video,
};
use async_trait::async_trait;

/// Persistent store for articles, the homepage singleton and videos
///
/// Implementations must enforce two hard constraints and report their
/// violation as [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation):
/// article slugs are unique, and at most one homepage row exists.
#[async_trait]
pub trait ContentStore: Send + Sync {
	/// Whether any article already uses `slug`
	async fn exists_by_slug(&self, slug: &str) -> StoreResult<bool>;

	/// Insert an article and return it with its assigned id
	async fn insert_article(&self, article: NewArticle) -> StoreResult<Article>;

	/// Apply `changes` to the article `id`
	///
	/// Fails with `NotFound` and changes nothing when the id does not exist.
	async fn update_article_by_id(
		&self,
		id: ArticleId,
		changes: ArticleChanges,
	) -> StoreResult<Article>;

	/// Fetch an article by id
	async fn get_article_by_id(&self, id: ArticleId) -> StoreResult<Option<Article>>;

	/// Fetch an article by slug
	async fn get_article_by_slug(&self, slug: &str) -> StoreResult<Option<Article>>;

	/// All articles, newest first
	async fn list_articles(&self) -> StoreResult<Vec<Article>>;

	/// The homepage singleton, if it was ever written
	async fn get_homepage(&self) -> StoreResult<Option<HomepageContent>>;

	/// Create or replace the homepage singleton
	async fn upsert_homepage(&self, content: HomepageContent) -> StoreResult<HomepageContent>;

	/// Write the homepage singleton only if no row exists yet
	///
	/// Returns `true` when `content` was stored. An existing row is left
	/// untouched, even one written after the caller last read it.
	async fn seed_homepage(&self, content: HomepageContent) -> StoreResult<bool>;

	/// Insert a video and return it with its assigned id
	async fn insert_video(&self, video: NewVideo) -> StoreResult<Video>;

	/// All videos in creation order
	async fn list_videos(&self) -> StoreResult<Vec<Video>>;
}
