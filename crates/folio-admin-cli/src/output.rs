//! Terminal rendering of content records

use colored::Colorize;
use folio_db::{Article, HomepageContent, Video};
use folio_utils::video::thumbnail_url;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One-line article listing entry
pub(crate) fn article_line(article: &Article) -> String {
	format!(
		"#{} {} ({}) {}",
		article.id,
		article.title.bold(),
		article.slug.cyan(),
		article.created_at.format(TIME_FORMAT).to_string().dimmed()
	)
}

/// Multi-line article view
pub(crate) fn article_detail(article: &Article) -> String {
	let mut fields = vec![
		field("id:", &article.id.to_string()),
		field("slug:", &article.slug.cyan().to_string()),
		field("created:", &article.created_at.format(TIME_FORMAT).to_string()),
	];
	if let Some(updated_at) = article.updated_at {
		fields.push(field("updated:", &updated_at.format(TIME_FORMAT).to_string()));
	}
	if let Some(image_path) = &article.image_path {
		fields.push(field("image:", image_path));
	}
	fields.push(field("summary:", &article.summary));

	format!(
		"{}\n{}\n{}\n",
		article.title.bold(),
		fields.concat(),
		article.body
	)
}

/// Multi-line homepage view
pub(crate) fn homepage_detail(content: &HomepageContent) -> String {
	[
		format!("{}\n", "Hero".underline()),
		field("title:", &content.hero_title),
		field("subtitle:", &content.hero_subtitle),
		field("image:", content.hero_image_path.as_deref().unwrap_or("-")),
		format!("{}\n", "About".underline()),
		field("title:", &content.about_title),
		field("body:", &content.about_body),
	]
	.concat()
}

fn field(label: &str, value: &str) -> String {
	format!("  {:<10} {}\n", label, value)
}

/// One-line video listing entry with its thumbnail
pub(crate) fn video_line(video: &Video) -> String {
	let thumbnail = video
		.youtube_id()
		.map(|id| thumbnail_url(&id))
		.unwrap_or_else(|| "-".to_string());
	format!(
		"#{} {} {} {}",
		video.id,
		video.title.bold(),
		video.url,
		thumbnail.dimmed()
	)
}
