//! Tests for the video catalogue

use folio_cms::error::CmsError;
use folio_cms::videos::VideoCatalogue;
use folio_db::InMemoryStore;
use rstest::*;
use std::sync::Arc;

#[fixture]
fn catalogue() -> VideoCatalogue {
	VideoCatalogue::new(Arc::new(InMemoryStore::new()))
}

#[rstest]
#[tokio::test]
async fn test_add_and_list_in_creation_order(catalogue: VideoCatalogue) {
	// Arrange
	let links = [
		("Sample Video 1", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
		("Sample Video 2", "https://www.youtube.com/watch?v=o-YBDTqX_ZU"),
	];

	// Act
	for (title, url) in links {
		catalogue.add_video(title, url).await.unwrap();
	}

	// Assert
	let videos = catalogue.list_videos().await.unwrap();
	let ids: Vec<Option<String>> = videos.iter().map(|v| v.youtube_id()).collect();
	assert_eq!(videos[0].title, "Sample Video 1");
	assert_eq!(videos[1].title, "Sample Video 2");
	assert_eq!(
		ids,
		[
			Some("dQw4w9WgXcQ".to_string()),
			Some("o-YBDTqX_ZU".to_string())
		]
	);
}

#[rstest]
#[case::blank_title(" ", "https://youtu.be/dQw4w9WgXcQ", "title")]
#[case::not_youtube("Talk", "https://vimeo.com/12345", "url")]
#[case::not_a_url("Talk", "dQw4w9WgXcQ", "url")]
#[tokio::test]
async fn test_invalid_video_is_rejected(
	catalogue: VideoCatalogue,
	#[case] title: &str,
	#[case] url: &str,
	#[case] field: &str,
) {
	let result = catalogue.add_video(title, url).await;

	match result {
		Err(CmsError::Validation { field: got, .. }) => assert_eq!(got, field),
		other => panic!("expected validation error, got {:?}", other),
	}
	assert!(catalogue.list_videos().await.unwrap().is_empty());
}
