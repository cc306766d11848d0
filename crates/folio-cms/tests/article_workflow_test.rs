//! Tests for the article publishing workflow

mod support;

use folio_cms::articles::{ArticlePublisher, ArticleUpdate, NewArticleInput};
use folio_cms::error::CmsError;
use folio_conf::{ContentSettings, EditSummaryPolicy, SlugConflictPolicy};
use folio_db::models::now;
use folio_db::{ContentStore, InMemoryStore, NewArticle};
use rstest::*;
use std::sync::Arc;
use support::CountingStore;

fn input(title: &str, body: &str) -> NewArticleInput {
	NewArticleInput {
		title: title.to_string(),
		body: body.to_string(),
		..Default::default()
	}
}

#[fixture]
fn store() -> Arc<InMemoryStore> {
	Arc::new(InMemoryStore::new())
}

#[fixture]
fn publisher(store: Arc<InMemoryStore>) -> ArticlePublisher {
	ArticlePublisher::new(store, ContentSettings::default())
}

/// Insert behind the publisher's back, as a concurrent writer would
async fn claim_slug(store: &CountingStore, slug: &str) {
	store
		.inner
		.insert_article(NewArticle {
			title: slug.to_string(),
			slug: slug.to_string(),
			summary: String::new(),
			body: "Claimed elsewhere".to_string(),
			image_path: None,
			created_at: now(),
		})
		.await
		.unwrap();
}

fn publisher_with(store: Arc<dyn ContentStore>, settings: ContentSettings) -> ArticlePublisher {
	ArticlePublisher::new(store, settings)
}

#[rstest]
#[tokio::test]
async fn test_create_article_derives_slug_and_summary(publisher: ArticlePublisher) {
	// Arrange
	let body = "Rust is a language. It is fast and safe.";

	// Act
	let article = publisher
		.create_article(input("Why Rust?", body))
		.await
		.unwrap();

	// Assert
	assert_eq!(article.slug, "why-rust");
	assert_eq!(article.title, "Why Rust?");
	assert_eq!(article.body, body);
	assert_eq!(article.summary, body);
	assert_eq!(article.updated_at, None);
}

#[rstest]
#[tokio::test]
async fn test_explicit_summary_is_kept(publisher: ArticlePublisher) {
	let article = publisher
		.create_article(NewArticleInput {
			summary: Some("  Hand written.  ".to_string()),
			..input("Title", "A long body that would otherwise be summarized.")
		})
		.await
		.unwrap();

	assert_eq!(article.summary, "Hand written.");
}

#[rstest]
#[tokio::test]
async fn test_blank_summary_is_derived(publisher: ArticlePublisher) {
	let article = publisher
		.create_article(NewArticleInput {
			summary: Some("   ".to_string()),
			..input("Title", "*Derived* from the body.")
		})
		.await
		.unwrap();

	assert_eq!(article.summary, "Derived from the body.");
}

#[rstest]
#[tokio::test]
async fn test_summary_respects_configured_length(store: Arc<InMemoryStore>) {
	// Arrange
	let publisher = publisher_with(
		store,
		ContentSettings {
			summary_max_length: 11,
			..ContentSettings::default()
		},
	);

	// Act
	let article = publisher
		.create_article(input("Short", "Hello world, this is long"))
		.await
		.unwrap();

	// Assert
	assert_eq!(article.summary, "Hello");
}

#[rstest]
#[tokio::test]
async fn test_beijings_title_never_collides(publisher: ArticlePublisher) {
	// Act
	let first = publisher
		.create_article(input("Beijing's New Policy", "First report."))
		.await
		.unwrap();
	let second = publisher
		.create_article(input("Beijing's New Policy", "Second report."))
		.await
		.unwrap();

	// Assert
	assert_eq!(first.slug, "beijings-new-policy");
	assert_eq!(second.slug, "beijings-new-policy-2");
	assert_ne!(first.id, second.id);
}

#[rstest]
#[tokio::test]
async fn test_slug_suffix_continues_after_taken_ones(publisher: ArticlePublisher) {
	for _ in 0..2 {
		publisher
			.create_article(input("Hello World", "Body"))
			.await
			.unwrap();
	}

	let third = publisher
		.create_article(input("Hello, World!", "Body"))
		.await
		.unwrap();

	assert_eq!(third.slug, "hello-world-3");
}

#[rstest]
#[case::blank_title("  ", "Body", "title")]
#[case::no_alphanumerics("!!! ???", "Body", "title")]
#[case::blank_body("Title", "\n\t ", "body")]
#[tokio::test]
async fn test_create_rejects_invalid_input(
	#[case] title: &str,
	#[case] body: &str,
	#[case] field: &str,
) {
	// Arrange
	let store = Arc::new(CountingStore::default());
	let publisher = publisher_with(store.clone(), ContentSettings::default());

	// Act
	let result = publisher.create_article(input(title, body)).await;

	// Assert
	match result {
		Err(CmsError::Validation { field: got, .. }) => assert_eq!(got, field),
		other => panic!("expected validation error, got {:?}", other),
	}
	assert_eq!(store.writes(), 0);
}

#[rstest]
#[case::atomic_retry(SlugConflictPolicy::AtomicRetry)]
#[case::advisory(SlugConflictPolicy::Advisory)]
#[tokio::test]
async fn test_exhausted_slug_search_is_a_conflict(#[case] policy: SlugConflictPolicy) {
	// Arrange
	let store = Arc::new(InMemoryStore::new());
	let publisher = publisher_with(
		store.clone(),
		ContentSettings {
			slug_max_attempts: 3,
			slug_conflict_policy: policy,
			..ContentSettings::default()
		},
	);
	for _ in 0..3 {
		publisher
			.create_article(input("Crowded", "Body"))
			.await
			.unwrap();
	}

	// Act
	let result = publisher.create_article(input("Crowded", "Body")).await;

	// Assert
	assert!(matches!(result, Err(CmsError::UniquenessConflict(_))));
	assert_eq!(store.list_articles().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_atomic_retry_recovers_from_a_lost_race() {
	// Arrange: another writer already holds the slug, but reads are stale
	let store = Arc::new(CountingStore::stale());
	claim_slug(&store, "race").await;
	let publisher = publisher_with(store.clone(), ContentSettings::default());

	// Act
	let article = publisher.create_article(input("Race", "Body")).await.unwrap();

	// Assert
	assert_eq!(article.slug, "race-2");
	assert_eq!(store.writes(), 2);
}

#[tokio::test]
async fn test_advisory_reports_a_lost_race() {
	// Arrange
	let store = Arc::new(CountingStore::stale());
	claim_slug(&store, "race").await;
	let publisher = publisher_with(
		store.clone(),
		ContentSettings {
			slug_conflict_policy: SlugConflictPolicy::Advisory,
			..ContentSettings::default()
		},
	);

	// Act
	let result = publisher.create_article(input("Race", "Body")).await;

	// Assert
	assert!(matches!(result, Err(CmsError::UniquenessConflict(_))));
	assert_eq!(store.inner.list_articles().await.unwrap().len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_update_keeps_slug_and_created_at(publisher: ArticlePublisher) {
	// Arrange
	let original = publisher
		.create_article(input("Original Title", "Original body."))
		.await
		.unwrap();

	// Act
	let updated = publisher
		.update_article(
			original.id,
			ArticleUpdate {
				title: Some("Completely New Title".to_string()),
				..Default::default()
			},
		)
		.await
		.unwrap();

	// Assert
	assert_eq!(updated.title, "Completely New Title");
	assert_eq!(updated.slug, "original-title");
	assert_eq!(updated.created_at, original.created_at);
	assert!(updated.updated_at.is_some());
	assert_eq!(
		publisher.get_article_by_slug("original-title").await.unwrap(),
		updated
	);
}

#[rstest]
#[tokio::test]
async fn test_update_missing_id_is_not_found_without_writes() {
	// Arrange
	let store = Arc::new(CountingStore::default());
	let publisher = publisher_with(store.clone(), ContentSettings::default());
	publisher
		.create_article(input("Existing", "Body"))
		.await
		.unwrap();
	let writes_before = store.writes();

	// Act
	let result = publisher
		.update_article(
			9_999,
			ArticleUpdate {
				body: Some("New body".to_string()),
				..Default::default()
			},
		)
		.await;

	// Assert
	assert!(matches!(result, Err(CmsError::NotFound(_))));
	assert_eq!(store.writes(), writes_before);
}

#[rstest]
#[case::blank_title(ArticleUpdate { title: Some(" ".to_string()), ..Default::default() }, "title")]
#[case::blank_body(ArticleUpdate { body: Some("".to_string()), ..Default::default() }, "body")]
#[tokio::test]
async fn test_update_validates_before_storage(#[case] update: ArticleUpdate, #[case] field: &str) {
	// Arrange
	let store = Arc::new(CountingStore::default());
	let publisher = publisher_with(store.clone(), ContentSettings::default());
	let reads_before = store.reads();

	// Act
	let result = publisher.update_article(1, update).await;

	// Assert
	match result {
		Err(CmsError::Validation { field: got, .. }) => assert_eq!(got, field),
		other => panic!("expected validation error, got {:?}", other),
	}
	assert_eq!(store.reads(), reads_before);
	assert_eq!(store.writes(), 0);
}

#[rstest]
#[case::retain(EditSummaryPolicy::Retain, "Old body text.")]
#[case::regenerate(EditSummaryPolicy::Regenerate, "Brand new body.")]
#[tokio::test]
async fn test_edit_summary_policy(#[case] policy: EditSummaryPolicy, #[case] expected: &str) {
	// Arrange
	let publisher = publisher_with(
		Arc::new(InMemoryStore::new()),
		ContentSettings {
			edit_summary_policy: policy,
			..ContentSettings::default()
		},
	);
	let article = publisher
		.create_article(input("Policy", "Old body text."))
		.await
		.unwrap();

	// Act
	let updated = publisher
		.update_article(
			article.id,
			ArticleUpdate {
				body: Some("Brand new body.".to_string()),
				..Default::default()
			},
		)
		.await
		.unwrap();

	// Assert
	assert_eq!(updated.body, "Brand new body.");
	assert_eq!(updated.summary, expected);
}

#[rstest]
#[case::retain(EditSummaryPolicy::Retain)]
#[case::regenerate(EditSummaryPolicy::Regenerate)]
#[tokio::test]
async fn test_blank_summary_on_edit_derives_from_new_body(#[case] policy: EditSummaryPolicy) {
	let publisher = publisher_with(
		Arc::new(InMemoryStore::new()),
		ContentSettings {
			edit_summary_policy: policy,
			..ContentSettings::default()
		},
	);
	let article = publisher
		.create_article(NewArticleInput {
			summary: Some("Hand written.".to_string()),
			..input("Policy", "Old body.")
		})
		.await
		.unwrap();

	let updated = publisher
		.update_article(
			article.id,
			ArticleUpdate {
				summary: Some(String::new()),
				body: Some("New body.".to_string()),
				..Default::default()
			},
		)
		.await
		.unwrap();

	assert_eq!(updated.summary, "New body.");
}

#[rstest]
#[tokio::test]
async fn test_regenerate_keeps_summary_when_body_untouched() {
	let publisher = publisher_with(
		Arc::new(InMemoryStore::new()),
		ContentSettings {
			edit_summary_policy: EditSummaryPolicy::Regenerate,
			..ContentSettings::default()
		},
	);
	let article = publisher
		.create_article(NewArticleInput {
			summary: Some("Hand written.".to_string()),
			..input("Policy", "Body.")
		})
		.await
		.unwrap();

	let updated = publisher
		.update_article(
			article.id,
			ArticleUpdate {
				title: Some("Renamed".to_string()),
				..Default::default()
			},
		)
		.await
		.unwrap();

	assert_eq!(updated.summary, "Hand written.");
}

#[rstest]
#[tokio::test]
async fn test_image_path_set_and_clear(publisher: ArticlePublisher) {
	// Arrange
	let article = publisher
		.create_article(NewArticleInput {
			image_path: Some("img/cover.png".to_string()),
			..input("Pictured", "Body")
		})
		.await
		.unwrap();
	assert_eq!(article.image_path.as_deref(), Some("img/cover.png"));

	// Act
	let untouched = publisher
		.update_article(article.id, ArticleUpdate::default())
		.await
		.unwrap();
	let cleared = publisher
		.update_article(
			article.id,
			ArticleUpdate {
				image_path: Some(None),
				..Default::default()
			},
		)
		.await
		.unwrap();

	// Assert
	assert_eq!(untouched.image_path.as_deref(), Some("img/cover.png"));
	assert_eq!(cleared.image_path, None);
}

#[rstest]
#[tokio::test]
async fn test_reads(publisher: ArticlePublisher) {
	// Arrange
	let first = publisher
		.create_article(input("First", "Body"))
		.await
		.unwrap();
	let second = publisher
		.create_article(input("Second", "Body"))
		.await
		.unwrap();

	// Act
	let listed = publisher.list_articles().await.unwrap();

	// Assert
	assert_eq!(listed.len(), 2);
	assert!(listed.contains(&first) && listed.contains(&second));
	assert_eq!(publisher.get_article(first.id).await.unwrap(), first);
	assert!(matches!(
		publisher.get_article(12_345).await,
		Err(CmsError::NotFound(_))
	));
	assert!(matches!(
		publisher.get_article_by_slug("missing").await,
		Err(CmsError::NotFound(_))
	));
}
