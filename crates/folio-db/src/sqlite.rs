//! SQLite-backed [`ContentStore`]
//!
//! Statements are built with sea-query and executed through a sqlx pool.
//!
//! ## Database Schema
//!
//! ```sql
//! CREATE TABLE articles (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL,
//!     slug VARCHAR(255) NOT NULL,
//!     summary TEXT NOT NULL,
//!     body TEXT NOT NULL,
//!     image_path TEXT,
//!     created_at BIGINT NOT NULL,
//!     updated_at BIGINT
//! );
//! CREATE UNIQUE INDEX idx_articles_slug ON articles(slug);
//!
//! CREATE TABLE homepage (
//!     id INTEGER PRIMARY KEY,
//!     hero_title TEXT NOT NULL,
//!     hero_subtitle TEXT NOT NULL,
//!     hero_image_path TEXT,
//!     about_title TEXT NOT NULL,
//!     about_body TEXT NOT NULL
//! );
//!
//! CREATE TABLE videos (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL,
//!     url TEXT NOT NULL,
//!     created_at BIGINT NOT NULL
//! );
//! ```
//!
//! Timestamps are Unix milliseconds in BIGINT columns.

use crate::error::{StoreError, StoreResult};
use crate::models::{
	Article, ArticleChanges, ArticleId, HOMEPAGE_ID, HomepageContent, NewArticle, NewVideo, Video,
};
use crate::store::ContentStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_conf::DatabaseConfig;
use sea_query::{
	Alias, ColumnDef, Expr, ExprTrait, Index, OnConflict, Order, Query, QueryStatementWriter,
	SqliteQueryBuilder, Table, Value,
};
use sqlx::query::Query as SqlxQuery;
use sqlx::sqlite::{
	SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, Sqlite, SqlitePool};
use std::str::FromStr;

const ARTICLES: &str = "articles";
const HOMEPAGE: &str = "homepage";
const VIDEOS: &str = "videos";

const ARTICLE_COLUMNS: [&str; 8] = [
	"id",
	"title",
	"slug",
	"summary",
	"body",
	"image_path",
	"created_at",
	"updated_at",
];
const HOMEPAGE_COLUMNS: [&str; 5] = [
	"hero_title",
	"hero_subtitle",
	"hero_image_path",
	"about_title",
	"about_body",
];
const VIDEO_COLUMNS: [&str; 4] = ["id", "title", "url", "created_at"];

/// Statement parameter handed to sqlx
#[derive(Debug, Clone)]
enum Param {
	Int(Option<i64>),
	Text(Option<String>),
}

impl TryFrom<Value> for Param {
	type Error = StoreError;

	fn try_from(value: Value) -> StoreResult<Self> {
		match value {
			Value::Int(v) => Ok(Param::Int(v.map(i64::from))),
			Value::BigInt(v) => Ok(Param::Int(v)),
			Value::Unsigned(v) => Ok(Param::Int(v.map(i64::from))),
			Value::BigUnsigned(v) => v
				.map(i64::try_from)
				.transpose()
				.map(Param::Int)
				.map_err(|_| StoreError::Backend("integer parameter out of range".to_string())),
			Value::String(v) => Ok(Param::Text(v.map(|s| s.to_string()))),
			other => Err(StoreError::Backend(format!(
				"unsupported statement parameter: {:?}",
				other
			))),
		}
	}
}

/// SQL text with its parameters, rendered from a sea-query statement
///
/// Values are always bound, never inlined into the SQL.
struct BoundStatement {
	sql: String,
	params: Vec<Param>,
}

impl BoundStatement {
	fn build<S: QueryStatementWriter>(statement: &S) -> StoreResult<Self> {
		let (sql, values) = statement.build(SqliteQueryBuilder);
		let params = values
			.0
			.into_iter()
			.map(Param::try_from)
			.collect::<StoreResult<Vec<_>>>()?;
		Ok(Self { sql, params })
	}

	fn query(&self) -> SqlxQuery<'_, Sqlite, SqliteArguments<'_>> {
		self.params
			.iter()
			.fold(sqlx::query(&self.sql), |query, param| match param {
				Param::Int(value) => query.bind(*value),
				Param::Text(value) => query.bind(value.clone()),
			})
	}
}

/// SQLite content store
///
/// # Examples
///
/// ```
/// use folio_conf::DatabaseConfig;
/// use folio_db::{ContentStore, SqliteStore};
///
/// # async fn example() {
/// let store = SqliteStore::connect(&DatabaseConfig::in_memory()).await.unwrap();
/// store.migrate().await.unwrap();
/// assert!(store.list_articles().await.unwrap().is_empty());
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(example());
/// ```
#[derive(Clone)]
pub struct SqliteStore {
	pool: SqlitePool,
}

impl SqliteStore {
	/// Open a pool for the configured database
	///
	/// Writers that hit a locked database wait up to the configured busy
	/// timeout instead of failing immediately.
	pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
		let options = SqliteConnectOptions::from_str(&config.url)?
			.create_if_missing(config.create_if_missing)
			.busy_timeout(config.busy_timeout())
			.journal_mode(SqliteJournalMode::Wal);

		let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
		if config.url.contains(":memory:") {
			// An in-memory database dies with its last connection
			pool_options = pool_options
				.min_connections(1)
				.idle_timeout(None)
				.max_lifetime(None);
		}

		let pool = pool_options.connect_with(options).await?;
		tracing::debug!(url = %config.url, "connected to sqlite");
		Ok(Self { pool })
	}

	/// Underlying connection pool
	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	/// Create tables and indexes when they do not exist yet
	pub async fn migrate(&self) -> StoreResult<()> {
		let statements = [
			Table::create()
				.table(Alias::new(ARTICLES))
				.if_not_exists()
				.col(
					ColumnDef::new(Alias::new("id"))
						.integer()
						.not_null()
						.auto_increment()
						.primary_key(),
				)
				.col(ColumnDef::new(Alias::new("title")).text().not_null())
				.col(ColumnDef::new(Alias::new("slug")).string_len(255).not_null())
				.col(ColumnDef::new(Alias::new("summary")).text().not_null())
				.col(ColumnDef::new(Alias::new("body")).text().not_null())
				.col(ColumnDef::new(Alias::new("image_path")).text())
				.col(
					ColumnDef::new(Alias::new("created_at"))
						.big_integer()
						.not_null(),
				)
				.col(ColumnDef::new(Alias::new("updated_at")).big_integer())
				.to_owned()
				.to_string(SqliteQueryBuilder),
			Index::create()
				.if_not_exists()
				.unique()
				.name("idx_articles_slug")
				.table(Alias::new(ARTICLES))
				.col(Alias::new("slug"))
				.to_owned()
				.to_string(SqliteQueryBuilder),
			Table::create()
				.table(Alias::new(HOMEPAGE))
				.if_not_exists()
				.col(
					ColumnDef::new(Alias::new("id"))
						.integer()
						.not_null()
						.primary_key(),
				)
				.col(ColumnDef::new(Alias::new("hero_title")).text().not_null())
				.col(ColumnDef::new(Alias::new("hero_subtitle")).text().not_null())
				.col(ColumnDef::new(Alias::new("hero_image_path")).text())
				.col(ColumnDef::new(Alias::new("about_title")).text().not_null())
				.col(ColumnDef::new(Alias::new("about_body")).text().not_null())
				.to_owned()
				.to_string(SqliteQueryBuilder),
			Table::create()
				.table(Alias::new(VIDEOS))
				.if_not_exists()
				.col(
					ColumnDef::new(Alias::new("id"))
						.integer()
						.not_null()
						.auto_increment()
						.primary_key(),
				)
				.col(ColumnDef::new(Alias::new("title")).text().not_null())
				.col(ColumnDef::new(Alias::new("url")).text().not_null())
				.col(
					ColumnDef::new(Alias::new("created_at"))
						.big_integer()
						.not_null(),
				)
				.to_owned()
				.to_string(SqliteQueryBuilder),
		];

		for sql in statements {
			sqlx::query(&sql).execute(&self.pool).await?;
		}
		tracing::info!("database schema is up to date");
		Ok(())
	}

	async fn fetch_article(&self, statement: BoundStatement) -> StoreResult<Option<Article>> {
		let row = statement.query().fetch_optional(&self.pool).await?;
		row.as_ref().map(article_from_row).transpose()
	}
}

fn select_article_where(column: &str, value: Value) -> StoreResult<BoundStatement> {
	BoundStatement::build(
		Query::select()
			.columns(ARTICLE_COLUMNS.map(Alias::new))
			.from(Alias::new(ARTICLES))
			.and_where(Expr::col(Alias::new(column)).eq(value)),
	)
}

fn insert_homepage(content: &HomepageContent, on_conflict: OnConflict) -> StoreResult<BoundStatement> {
	BoundStatement::build(
		Query::insert()
			.into_table(Alias::new(HOMEPAGE))
			.columns(std::iter::once(Alias::new("id")).chain(HOMEPAGE_COLUMNS.map(Alias::new)))
			.values_panic([
				HOMEPAGE_ID.into(),
				content.hero_title.clone().into(),
				content.hero_subtitle.clone().into(),
				content.hero_image_path.clone().into(),
				content.about_title.clone().into(),
				content.about_body.clone().into(),
			])
			.on_conflict(on_conflict),
	)
}

fn update_article(id: ArticleId, changes: ArticleChanges) -> StoreResult<BoundStatement> {
	let mut stmt = Query::update();
	stmt.table(Alias::new(ARTICLES))
		.value(
			Alias::new("updated_at"),
			changes.updated_at.timestamp_millis(),
		)
		.and_where(Expr::col(Alias::new("id")).eq(id));
	if let Some(title) = changes.title {
		stmt.value(Alias::new("title"), title);
	}
	if let Some(summary) = changes.summary {
		stmt.value(Alias::new("summary"), summary);
	}
	if let Some(body) = changes.body {
		stmt.value(Alias::new("body"), body);
	}
	if let Some(image_path) = changes.image_path {
		stmt.value(Alias::new("image_path"), image_path);
	}
	BoundStatement::build(&stmt)
}

fn millis_to_datetime(millis: i64) -> StoreResult<DateTime<Utc>> {
	DateTime::from_timestamp_millis(millis)
		.ok_or_else(|| StoreError::Backend(format!("Invalid timestamp: {}", millis)))
}

fn article_from_row(row: &SqliteRow) -> StoreResult<Article> {
	let updated_at: Option<i64> = row.try_get("updated_at")?;
	Ok(Article {
		id: row.try_get("id")?,
		title: row.try_get("title")?,
		slug: row.try_get("slug")?,
		summary: row.try_get("summary")?,
		body: row.try_get("body")?,
		image_path: row.try_get("image_path")?,
		created_at: millis_to_datetime(row.try_get("created_at")?)?,
		updated_at: updated_at.map(millis_to_datetime).transpose()?,
	})
}

fn video_from_row(row: &SqliteRow) -> StoreResult<Video> {
	Ok(Video {
		id: row.try_get("id")?,
		title: row.try_get("title")?,
		url: row.try_get("url")?,
		created_at: millis_to_datetime(row.try_get("created_at")?)?,
	})
}

#[async_trait]
impl ContentStore for SqliteStore {
	async fn exists_by_slug(&self, slug: &str) -> StoreResult<bool> {
		let statement = BoundStatement::build(
			Query::select()
				.column(Alias::new("id"))
				.from(Alias::new(ARTICLES))
				.and_where(Expr::col(Alias::new("slug")).eq(slug))
				.limit(1),
		)?;

		Ok(statement
			.query()
			.fetch_optional(&self.pool)
			.await?
			.is_some())
	}

	async fn insert_article(&self, article: NewArticle) -> StoreResult<Article> {
		let created_at = article.created_at.timestamp_millis();
		let statement = BoundStatement::build(
			Query::insert()
				.into_table(Alias::new(ARTICLES))
				.columns([
					Alias::new("title"),
					Alias::new("slug"),
					Alias::new("summary"),
					Alias::new("body"),
					Alias::new("image_path"),
					Alias::new("created_at"),
				])
				.values_panic([
					article.title.clone().into(),
					article.slug.clone().into(),
					article.summary.clone().into(),
					article.body.clone().into(),
					article.image_path.clone().into(),
					created_at.into(),
				]),
		)?;

		let result = statement.query().execute(&self.pool).await?;
		Ok(Article {
			id: result.last_insert_rowid(),
			title: article.title,
			slug: article.slug,
			summary: article.summary,
			body: article.body,
			image_path: article.image_path,
			created_at: millis_to_datetime(created_at)?,
			updated_at: None,
		})
	}

	async fn update_article_by_id(
		&self,
		id: ArticleId,
		changes: ArticleChanges,
	) -> StoreResult<Article> {
		let statement = update_article(id, changes)?;
		let result = statement.query().execute(&self.pool).await?;
		if result.rows_affected() == 0 {
			return Err(StoreError::NotFound(format!("article {}", id)));
		}

		self.get_article_by_id(id)
			.await?
			.ok_or_else(|| StoreError::NotFound(format!("article {}", id)))
	}

	async fn get_article_by_id(&self, id: ArticleId) -> StoreResult<Option<Article>> {
		let statement = select_article_where("id", id.into())?;
		self.fetch_article(statement).await
	}

	async fn get_article_by_slug(&self, slug: &str) -> StoreResult<Option<Article>> {
		let statement = select_article_where("slug", slug.into())?;
		self.fetch_article(statement).await
	}

	async fn list_articles(&self) -> StoreResult<Vec<Article>> {
		let statement = BoundStatement::build(
			Query::select()
				.columns(ARTICLE_COLUMNS.map(Alias::new))
				.from(Alias::new(ARTICLES))
				.order_by(Alias::new("created_at"), Order::Desc)
				.order_by(Alias::new("id"), Order::Desc),
		)?;

		let rows = statement.query().fetch_all(&self.pool).await?;
		rows.iter().map(article_from_row).collect()
	}

	async fn get_homepage(&self) -> StoreResult<Option<HomepageContent>> {
		let statement = BoundStatement::build(
			Query::select()
				.columns(HOMEPAGE_COLUMNS.map(Alias::new))
				.from(Alias::new(HOMEPAGE))
				.and_where(Expr::col(Alias::new("id")).eq(HOMEPAGE_ID)),
		)?;

		let Some(row) = statement.query().fetch_optional(&self.pool).await? else {
			return Ok(None);
		};
		Ok(Some(HomepageContent {
			hero_title: row.try_get("hero_title")?,
			hero_subtitle: row.try_get("hero_subtitle")?,
			hero_image_path: row.try_get("hero_image_path")?,
			about_title: row.try_get("about_title")?,
			about_body: row.try_get("about_body")?,
		}))
	}

	async fn upsert_homepage(&self, content: HomepageContent) -> StoreResult<HomepageContent> {
		let statement = insert_homepage(
			&content,
			OnConflict::column(Alias::new("id"))
				.update_columns(HOMEPAGE_COLUMNS.map(Alias::new))
				.to_owned(),
		)?;

		statement.query().execute(&self.pool).await?;
		Ok(content)
	}

	async fn seed_homepage(&self, content: HomepageContent) -> StoreResult<bool> {
		let statement = insert_homepage(
			&content,
			OnConflict::column(Alias::new("id")).do_nothing().to_owned(),
		)?;

		let result = statement.query().execute(&self.pool).await?;
		Ok(result.rows_affected() > 0)
	}

	async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
		let created_at = video.created_at.timestamp_millis();
		let statement = BoundStatement::build(
			Query::insert()
				.into_table(Alias::new(VIDEOS))
				.columns([
					Alias::new("title"),
					Alias::new("url"),
					Alias::new("created_at"),
				])
				.values_panic([
					video.title.clone().into(),
					video.url.clone().into(),
					created_at.into(),
				]),
		)?;

		let result = statement.query().execute(&self.pool).await?;
		Ok(Video {
			id: result.last_insert_rowid(),
			title: video.title,
			url: video.url,
			created_at: millis_to_datetime(created_at)?,
		})
	}

	async fn list_videos(&self) -> StoreResult<Vec<Video>> {
		let statement = BoundStatement::build(
			Query::select()
				.columns(VIDEO_COLUMNS.map(Alias::new))
				.from(Alias::new(VIDEOS))
				.order_by(Alias::new("created_at"), Order::Asc)
				.order_by(Alias::new("id"), Order::Asc),
		)?;

		let rows = statement.query().fetch_all(&self.pool).await?;
		rows.iter().map(video_from_row).collect()
	}
}
