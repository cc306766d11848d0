//! # Folio Utils
//!
//! Small, synchronous text utilities shared by the Folio crates.
//!
//! - [`slug`]: title to slug conversion and collision-free slug resolution
//! - [`summary`]: markup stripping and word-boundary auto-summaries
//! - [`video`]: YouTube link parsing for the video catalogue
//! - [`logging`]: `tracing` subscriber bootstrap
//!
//! ```
//! use folio_utils::slug::{resolve_unique_slug, slugify};
//!
//! let base = slugify("Hello, World!");
//! let taken = ["hello-world", "hello-world-2"];
//! assert_eq!(resolve_unique_slug(&base, |s| taken.contains(&s)), "hello-world-3");
//! ```

#![warn(missing_docs)]

pub mod logging;
pub mod slug;
pub mod summary;
pub mod video;

pub use slug::{SlugCandidates, resolve_unique_slug, resolve_unique_slug_bounded, slugify};
pub use summary::{auto_summarize, strip_markup};
pub use video::youtube_video_id;
