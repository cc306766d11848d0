//! Slug generation and collision handling

/// Convert a title to a slug (URL-friendly format)
///
/// The title is lower-cased, apostrophes and combining marks are dropped so
/// that possessives, contractions and accented letters stay a single word,
/// and every other character that is not a lowercase-able alphanumeric
/// becomes a separator. Letters with no lowercase form (`ℂ`, `𝐀`) count as
/// separators. Runs of separators collapse into a single hyphen and
/// leading/trailing hyphens are trimmed.
///
/// A title without any usable character produces an empty string; the
/// caller decides how to handle that.
///
/// # Examples
///
/// ```
/// use folio_utils::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Hello  World"), "hello-world");
/// assert_eq!(slugify("Beijing's New Policy"), "beijings-new-policy");
/// assert_eq!(slugify("Special!@#Characters"), "special-characters");
/// assert_eq!(slugify("İstanbul"), "istanbul");
/// assert_eq!(slugify("?!"), "");
/// ```
pub fn slugify(text: &str) -> String {
	text.to_lowercase()
		.chars()
		.filter(|ch| !is_apostrophe(*ch) && !is_combining_mark(*ch))
		.map(|ch| {
			if ch.is_alphanumeric() && !ch.is_uppercase() {
				ch
			} else {
				'-'
			}
		})
		.collect::<String>()
		.split('-')
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.join("-")
}

fn is_apostrophe(ch: char) -> bool {
	matches!(ch, '\'' | '\u{2019}' | '\u{02BC}')
}

// Combining diacritical mark blocks
fn is_combining_mark(ch: char) -> bool {
	matches!(
		ch,
		'\u{0300}'..='\u{036F}'
			| '\u{1AB0}'..='\u{1AFF}'
			| '\u{1DC0}'..='\u{1DFF}'
			| '\u{20D0}'..='\u{20FF}'
			| '\u{FE20}'..='\u{FE2F}'
	)
}

/// Sequence of slug candidates tried when resolving collisions
///
/// Yields `base`, then `base-2`, `base-3`, ... in order.
///
/// # Examples
///
/// ```
/// use folio_utils::slug::SlugCandidates;
///
/// let candidates: Vec<String> = SlugCandidates::new("post").take(3).collect();
/// assert_eq!(candidates, vec!["post", "post-2", "post-3"]);
/// ```
#[derive(Debug, Clone)]
pub struct SlugCandidates<'a> {
	base: &'a str,
	next_suffix: Option<u64>,
}

impl<'a> SlugCandidates<'a> {
	/// Start a candidate sequence for `base`
	pub fn new(base: &'a str) -> Self {
		Self {
			base,
			next_suffix: Some(1),
		}
	}
}

impl Iterator for SlugCandidates<'_> {
	type Item = String;

	fn next(&mut self) -> Option<Self::Item> {
		let suffix = self.next_suffix?;
		// 1 stands for the bare base; numbering of variants starts at 2
		let candidate = if suffix == 1 {
			self.next_suffix = Some(2);
			self.base.to_string()
		} else {
			self.next_suffix = suffix.checked_add(1);
			format!("{}-{}", self.base, suffix)
		};
		Some(candidate)
	}
}

/// Find a collision-free variant of `base`
///
/// Returns `base` unchanged when `exists(base)` is false, otherwise the first
/// of `base-2`, `base-3`, ... for which `exists` returns false. The result is
/// only as fresh as the snapshot `exists` consults.
///
/// The search has no upper bound: a store holding thousands of articles with
/// the same title makes this loop thousands of times. Use
/// [`resolve_unique_slug_bounded`] where a hard limit is needed.
///
/// # Examples
///
/// ```
/// use folio_utils::slug::resolve_unique_slug;
///
/// assert_eq!(resolve_unique_slug("fresh", |_| false), "fresh");
///
/// let taken = ["hello-world", "hello-world-2"];
/// assert_eq!(
///     resolve_unique_slug("hello-world", |s| taken.contains(&s)),
///     "hello-world-3"
/// );
/// ```
pub fn resolve_unique_slug<F>(base: &str, mut exists: F) -> String
where
	F: FnMut(&str) -> bool,
{
	if !exists(base) {
		return base.to_string();
	}

	let mut suffix: u64 = 2;
	loop {
		let candidate = format!("{}-{}", base, suffix);
		if !exists(&candidate) {
			return candidate;
		}
		suffix += 1;
	}
}

/// Find a collision-free variant of `base`, probing at most `max_attempts`
/// candidates (the bare base counts as the first)
///
/// Returns `None` when every tried candidate is taken.
///
/// # Examples
///
/// ```
/// use folio_utils::slug::resolve_unique_slug_bounded;
///
/// let taken = ["a", "a-2", "a-3"];
/// assert_eq!(resolve_unique_slug_bounded("a", 3, |s| taken.contains(&s)), None);
/// assert_eq!(
///     resolve_unique_slug_bounded("a", 4, |s| taken.contains(&s)).as_deref(),
///     Some("a-4")
/// );
/// ```
pub fn resolve_unique_slug_bounded<F>(base: &str, max_attempts: usize, mut exists: F) -> Option<String>
where
	F: FnMut(&str) -> bool,
{
	SlugCandidates::new(base)
		.take(max_attempts)
		.find(|candidate| !exists(candidate))
}
