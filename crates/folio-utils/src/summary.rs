//! Auto-summary extraction
//!
//! Article bodies are Markdown. A summary is built from the plain text of the
//! body: markup is stripped first, the text is split into whitespace-separated
//! words, and whole words are accumulated until the length budget is spent.
//! Lengths are counted in Unicode scalar values (`char`s).

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip Markdown syntax from `body`, leaving readable plain text
///
/// Text and inline code are kept, raw HTML and image alt text are dropped,
/// and block boundaries turn into spaces. Whitespace in the result is not
/// normalized.
///
/// # Examples
///
/// ```
/// use folio_utils::summary::strip_markup;
///
/// let plain = strip_markup("# Title\n\nSome **bold** and `code`.");
/// assert_eq!(plain.split_whitespace().collect::<Vec<_>>(), ["Title", "Some", "bold", "and", "code."]);
/// ```
pub fn strip_markup(body: &str) -> String {
	let mut text = String::with_capacity(body.len());
	let mut image_depth = 0usize;

	for event in Parser::new_ext(body, markup_options()) {
		match event {
			Event::Start(Tag::Image { .. }) => image_depth += 1,
			Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
			Event::Text(t) | Event::Code(t) if image_depth == 0 => text.push_str(&t),
			Event::SoftBreak | Event::HardBreak | Event::Rule => text.push(' '),
			// Inline ends must not introduce a word break
			Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link) => {}
			Event::End(_) => text.push(' '),
			_ => {}
		}
	}

	text
}

fn markup_options() -> Options {
	let mut opts = Options::empty();
	opts.insert(Options::ENABLE_STRIKETHROUGH);
	opts.insert(Options::ENABLE_TABLES);
	opts.insert(Options::ENABLE_TASKLISTS);
	opts
}

/// Build a plain-text preview of `body` of at most `max_length` characters
///
/// Words are never split. If the first word alone is longer than
/// `max_length` it is returned whole, so the summary is empty only when the
/// body has no words at all. When stripping markup leaves nothing (a body
/// made only of a horizontal rule, for instance) the raw words of the body
/// are used instead.
///
/// # Examples
///
/// ```
/// use folio_utils::summary::auto_summarize;
///
/// assert_eq!(auto_summarize("", 10), "");
/// assert_eq!(auto_summarize("The quick brown fox", 15), "The quick brown");
/// assert_eq!(auto_summarize("The quick brown fox", 14), "The quick");
/// assert_eq!(auto_summarize("*Hello*, world!", 20), "Hello, world!");
/// ```
pub fn auto_summarize(body: &str, max_length: usize) -> String {
	let plain = strip_markup(body);
	if plain.split_whitespace().next().is_some() {
		take_words(plain.split_whitespace(), max_length)
	} else {
		take_words(body.split_whitespace(), max_length)
	}
}

fn take_words<'a>(words: impl Iterator<Item = &'a str>, max_length: usize) -> String {
	let mut summary = String::new();
	let mut length = 0usize;

	for word in words {
		let word_length = word.chars().count();
		if summary.is_empty() {
			summary.push_str(word);
			length = word_length;
			continue;
		}
		if length + 1 + word_length > max_length {
			break;
		}
		summary.push(' ');
		summary.push_str(word);
		length += 1 + word_length;
	}

	summary
}
