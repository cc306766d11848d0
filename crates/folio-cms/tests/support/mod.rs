//! Store wrappers shared by the workflow tests

#![allow(dead_code)]

use async_trait::async_trait;
use folio_db::{
	Article, ArticleChanges, ArticleId, ContentStore, HomepageContent, InMemoryStore, NewArticle,
	NewVideo, StoreResult, Video,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps an [`InMemoryStore`], counts calls and can pretend no slug is taken
#[derive(Default)]
pub struct CountingStore {
	pub inner: InMemoryStore,
	/// When set, `exists_by_slug` always answers `false`, as a reader with a
	/// stale snapshot would
	pub stale_reads: bool,
	pub reads: AtomicUsize,
	pub writes: AtomicUsize,
}

impl CountingStore {
	pub fn stale() -> Self {
		Self {
			stale_reads: true,
			..Self::default()
		}
	}

	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	fn read(&self) {
		self.reads.fetch_add(1, Ordering::SeqCst);
	}

	fn write(&self) {
		self.writes.fetch_add(1, Ordering::SeqCst);
	}
}

#[async_trait]
impl ContentStore for CountingStore {
	async fn exists_by_slug(&self, slug: &str) -> StoreResult<bool> {
		self.read();
		if self.stale_reads {
			return Ok(false);
		}
		self.inner.exists_by_slug(slug).await
	}

	async fn insert_article(&self, article: NewArticle) -> StoreResult<Article> {
		self.write();
		self.inner.insert_article(article).await
	}

	async fn update_article_by_id(
		&self,
		id: ArticleId,
		changes: ArticleChanges,
	) -> StoreResult<Article> {
		self.write();
		self.inner.update_article_by_id(id, changes).await
	}

	async fn get_article_by_id(&self, id: ArticleId) -> StoreResult<Option<Article>> {
		self.read();
		self.inner.get_article_by_id(id).await
	}

	async fn get_article_by_slug(&self, slug: &str) -> StoreResult<Option<Article>> {
		self.read();
		self.inner.get_article_by_slug(slug).await
	}

	async fn list_articles(&self) -> StoreResult<Vec<Article>> {
		self.read();
		self.inner.list_articles().await
	}

	async fn get_homepage(&self) -> StoreResult<Option<HomepageContent>> {
		self.read();
		self.inner.get_homepage().await
	}

	async fn upsert_homepage(&self, content: HomepageContent) -> StoreResult<HomepageContent> {
		self.write();
		self.inner.upsert_homepage(content).await
	}

	async fn seed_homepage(&self, content: HomepageContent) -> StoreResult<bool> {
		self.write();
		self.inner.seed_homepage(content).await
	}

	async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
		self.write();
		self.inner.insert_video(video).await
	}

	async fn list_videos(&self) -> StoreResult<Vec<Video>> {
		self.read();
		self.inner.list_videos().await
	}
}
