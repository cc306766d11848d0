//! Folio Admin CLI
//!
//! Command-line administration for a Folio site: schema setup, articles,
//! homepage content and the video catalogue.
//!
//! ## Usage
//!
//! ```bash
//! folio-admin migrate
//! folio-admin article create --title "Hello World" --body-file hello.md
//! folio-admin article edit 1 --summary "Short preview"
//! folio-admin article list
//! folio-admin homepage edit --hero-title "Welcome back"
//! folio-admin video add "Launch talk" https://youtu.be/dQw4w9WgXcQ
//! folio-admin -v --config site.toml video list
//! ```

mod output;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use folio_cms::prelude::*;
use folio_conf::Settings;
use folio_db::{ContentStore, InMemoryStore, SqliteStore};

#[derive(Parser)]
#[command(name = "folio-admin")]
#[command(about = "Folio site administration utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Path to a TOML settings file (defaults to ./folio.toml when present)
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Work against a throwaway in-memory store
	#[arg(long, global = true)]
	dry_run: bool,

	/// Verbosity level (can be repeated)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Create the database schema and seed the homepage
	Migrate,

	/// Manage articles
	Article {
		#[command(subcommand)]
		subcommand: ArticleCommands,
	},

	/// Manage homepage content
	Homepage {
		#[command(subcommand)]
		subcommand: HomepageCommands,
	},

	/// Manage the video catalogue
	Video {
		#[command(subcommand)]
		subcommand: VideoCommands,
	},
}

/// Body text given inline or read from a file
#[derive(Args)]
#[group(multiple = false)]
struct BodySource {
	/// Markdown body
	#[arg(long)]
	body: Option<String>,

	/// Read the Markdown body from a file
	#[arg(long, value_name = "PATH")]
	body_file: Option<PathBuf>,
}

impl BodySource {
	fn read(self) -> anyhow::Result<Option<String>> {
		match (self.body, self.body_file) {
			(Some(body), _) => Ok(Some(body)),
			(None, Some(path)) => std::fs::read_to_string(&path)
				.map(Some)
				.with_context(|| format!("Failed to read {}", path.display())),
			(None, None) => Ok(None),
		}
	}
}

/// Article subcommands
#[derive(Subcommand)]
enum ArticleCommands {
	/// Publish a new article
	Create {
		/// Article title
		#[arg(long)]
		title: String,

		#[command(flatten)]
		body: BodySource,

		/// Explicit summary (derived from the body when omitted)
		#[arg(long)]
		summary: Option<String>,

		/// Static image path
		#[arg(long, value_name = "PATH")]
		image: Option<String>,
	},

	/// Edit an existing article
	Edit {
		/// Article id
		#[arg(value_name = "ID")]
		id: i64,

		/// New title (the slug is kept)
		#[arg(long)]
		title: Option<String>,

		#[command(flatten)]
		body: BodySource,

		/// New summary; pass an empty string to derive it from the body
		#[arg(long)]
		summary: Option<String>,

		/// New static image path
		#[arg(long, value_name = "PATH", conflicts_with = "clear_image")]
		image: Option<String>,

		/// Remove the image
		#[arg(long)]
		clear_image: bool,
	},

	/// Show one article by id or slug
	Show {
		/// Numeric id or slug
		#[arg(value_name = "ID_OR_SLUG")]
		key: String,
	},

	/// List articles, newest first
	List,
}

/// Homepage subcommands
#[derive(Subcommand)]
enum HomepageCommands {
	/// Print the homepage content
	Show,

	/// Change some homepage fields
	Edit {
		/// Hero heading
		#[arg(long)]
		hero_title: Option<String>,

		/// Hero sub-heading
		#[arg(long)]
		hero_subtitle: Option<String>,

		/// Hero image path
		#[arg(long, value_name = "PATH", conflicts_with = "clear_hero_image")]
		hero_image: Option<String>,

		/// Remove the hero image
		#[arg(long)]
		clear_hero_image: bool,

		/// "About" heading
		#[arg(long)]
		about_title: Option<String>,

		/// "About" text
		#[arg(long)]
		about_body: Option<String>,
	},
}

/// Video subcommands
#[derive(Subcommand)]
enum VideoCommands {
	/// Add a YouTube video
	Add {
		/// Video title
		#[arg(value_name = "TITLE")]
		title: String,

		/// YouTube watch, short-link or embed URL
		#[arg(value_name = "URL")]
		url: String,
	},

	/// List videos in creation order
	List,
}

/// Everything a command needs
struct AdminContext {
	settings: Settings,
	store: Arc<dyn ContentStore>,
	sqlite: Option<SqliteStore>,
}

impl AdminContext {
	async fn open(cli: &Cli) -> anyhow::Result<Self> {
		let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

		let level = match cli.verbosity {
			0 => settings.logging.level.as_str(),
			1 => "debug",
			_ => "trace",
		};
		folio_utils::logging::init(level, settings.logging.format)?;

		if cli.dry_run {
			tracing::info!("dry run: using an in-memory store");
			let store = InMemoryStore::new();
			return Ok(Self {
				settings,
				store: Arc::new(store),
				sqlite: None,
			});
		}

		let sqlite = SqliteStore::connect(&settings.database)
			.await
			.with_context(|| format!("Failed to open {}", settings.database.url))?;
		Ok(Self {
			settings,
			store: Arc::new(sqlite.clone()),
			sqlite: Some(sqlite),
		})
	}

	fn publisher(&self) -> ArticlePublisher {
		ArticlePublisher::new(self.store.clone(), self.settings.content.clone())
	}

	fn homepage(&self) -> HomepageService {
		HomepageService::new(self.store.clone())
	}

	fn videos(&self) -> VideoCatalogue {
		VideoCatalogue::new(self.store.clone())
	}

	async fn migrate(&self) -> anyhow::Result<()> {
		if let Some(sqlite) = &self.sqlite {
			sqlite.migrate().await?;
		}
		Ok(())
	}
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	if let Err(e) = run(cli).await {
		eprintln!("{}: {:#}", "Error".red(), e);
		process::exit(1);
	}
}

async fn run(cli: Cli) -> anyhow::Result<()> {
	let ctx = AdminContext::open(&cli).await?;
	if cli.dry_run {
		ctx.homepage().ensure_initialized().await?;
	}

	match cli.command {
		Commands::Migrate => run_migrate(&ctx).await,
		Commands::Article { subcommand } => run_article(&ctx, subcommand).await,
		Commands::Homepage { subcommand } => run_homepage(&ctx, subcommand).await,
		Commands::Video { subcommand } => run_video(&ctx, subcommand).await,
	}
}

async fn run_migrate(ctx: &AdminContext) -> anyhow::Result<()> {
	ctx.migrate().await?;
	ctx.homepage().ensure_initialized().await?;
	println!("{} schema is up to date", "Migrated:".green());
	Ok(())
}

async fn run_article(ctx: &AdminContext, subcommand: ArticleCommands) -> anyhow::Result<()> {
	let publisher = ctx.publisher();

	match subcommand {
		ArticleCommands::Create {
			title,
			body,
			summary,
			image,
		} => {
			let Some(body) = body.read()? else {
				bail!("an article needs --body or --body-file");
			};
			let article = publisher
				.create_article(NewArticleInput {
					title,
					summary,
					body,
					image_path: image,
				})
				.await?;
			println!("{} {}", "Created:".green(), output::article_line(&article));
		}
		ArticleCommands::Edit {
			id,
			title,
			body,
			summary,
			image,
			clear_image,
		} => {
			let image_path = match (image, clear_image) {
				(Some(path), _) => Some(Some(path)),
				(None, true) => Some(None),
				(None, false) => None,
			};
			let article = publisher
				.update_article(
					id,
					ArticleUpdate {
						title,
						summary,
						body: body.read()?,
						image_path,
					},
				)
				.await?;
			println!("{} {}", "Updated:".green(), output::article_line(&article));
		}
		ArticleCommands::Show { key } => {
			let article = match key.parse::<i64>() {
				Ok(id) => publisher.get_article(id).await?,
				Err(_) => publisher.get_article_by_slug(&key).await?,
			};
			print!("{}", output::article_detail(&article));
		}
		ArticleCommands::List => {
			let articles = publisher.list_articles().await?;
			if articles.is_empty() {
				println!("No articles yet");
			}
			for article in &articles {
				println!("{}", output::article_line(article));
			}
		}
	}

	Ok(())
}

async fn run_homepage(ctx: &AdminContext, subcommand: HomepageCommands) -> anyhow::Result<()> {
	let service = ctx.homepage();

	match subcommand {
		HomepageCommands::Show => {
			let content = service
				.homepage()
				.await
				.context("Homepage is not initialized; run `folio-admin migrate`")?;
			print!("{}", output::homepage_detail(&content));
		}
		HomepageCommands::Edit {
			hero_title,
			hero_subtitle,
			hero_image,
			clear_hero_image,
			about_title,
			about_body,
		} => {
			let hero_image_path = match (hero_image, clear_hero_image) {
				(Some(path), _) => Some(Some(path)),
				(None, true) => Some(None),
				(None, false) => None,
			};
			let content = service
				.update_homepage(HomepageUpdate {
					hero_title,
					hero_subtitle,
					hero_image_path,
					about_title,
					about_body,
				})
				.await?;
			println!("{}", "Homepage updated".green());
			print!("{}", output::homepage_detail(&content));
		}
	}

	Ok(())
}

async fn run_video(ctx: &AdminContext, subcommand: VideoCommands) -> anyhow::Result<()> {
	let catalogue = ctx.videos();

	match subcommand {
		VideoCommands::Add { title, url } => {
			let video = catalogue.add_video(&title, &url).await?;
			println!("{} {}", "Added:".green(), output::video_line(&video));
		}
		VideoCommands::List => {
			let videos = catalogue.list_videos().await?;
			if videos.is_empty() {
				println!("No videos yet");
			}
			for video in &videos {
				println!("{}", output::video_line(video));
			}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use rstest::rstest;

	#[test]
	fn test_cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[rstest]
	#[case(&["folio-admin", "migrate"])]
	#[case(&["folio-admin", "article", "create", "--title", "Hi", "--body", "Text"])]
	#[case(&["folio-admin", "article", "edit", "3", "--clear-image"])]
	#[case(&["folio-admin", "article", "show", "hello-world"])]
	#[case(&["folio-admin", "-vv", "--config", "site.toml", "article", "list"])]
	#[case(&["folio-admin", "homepage", "edit", "--hero-title", "Welcome"])]
	#[case(&["folio-admin", "video", "add", "Talk", "https://youtu.be/dQw4w9WgXcQ"])]
	#[case(&["folio-admin", "video", "list", "--dry-run"])]
	fn test_accepted_invocations(#[case] args: &[&str]) {
		assert!(Cli::try_parse_from(args).is_ok());
	}

	#[rstest]
	#[case(&["folio-admin"])]
	#[case(&["folio-admin", "article", "create", "--body", "no title"])]
	#[case(&["folio-admin", "article", "create", "--title", "T", "--body", "a", "--body-file", "b.md"])]
	#[case(&["folio-admin", "article", "edit", "not-a-number"])]
	#[case(&["folio-admin", "article", "edit", "1", "--image", "a.png", "--clear-image"])]
	#[case(&["folio-admin", "video", "add", "only-title"])]
	fn test_rejected_invocations(#[case] args: &[&str]) {
		assert!(Cli::try_parse_from(args).is_err());
	}

	#[test]
	fn test_global_flags_after_subcommand() {
		let cli = Cli::try_parse_from(["folio-admin", "article", "list", "-v", "--dry-run"]).unwrap();
		assert_eq!(cli.verbosity, 1);
		assert!(cli.dry_run);
	}
}
