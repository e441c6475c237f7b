use std::borrow::Cow;

use ropey::RopeSlice;
use tracing::{debug, trace};
use tree_sitter::{Node, Tree};

use crate::config::Config;
use crate::item::CompletionItem;
use crate::lang::LanguageConfig;
use crate::rules::IDENTIFIER;
use crate::scope::ScopeCache;
use crate::utils::{ByteOffset, MaxVec};

/// Tokens longer than this are never considered word-like.
const MAX_WORD_LEN: usize = 20;

pub const DEFAULT_COMPLETIONS_LIMIT: usize = 200;

/// Everything a completion request needs from the editor.
#[derive(Clone, Copy)]
pub struct CompletionContext<'a> {
	pub tree: &'a Tree,
	pub rope: RopeSlice<'a>,
	pub offset: ByteOffset,
	/// Whether the user asked for completion, as opposed to it firing on a
	/// keystroke.
	pub explicit: bool,
}

/// A definite answer. The sources return `None` to mean "do not offer
/// completion here" rather than an empty result.
#[derive(Debug, Clone)]
pub struct CompletionResult {
	pub options: Vec<CompletionItem>,
	/// Start of the range the host should replace, extending to the cursor.
	pub from: ByteOffset,
	/// Options were cut off at the configured limit.
	pub incomplete: bool,
	/// Whether this result stays valid while the user keeps typing the
	/// given token text, sparing a recomputation per keystroke.
	pub valid_for: fn(&str) -> bool,
}

/// The two completion entry points for one buffer: scope-derived
/// identifiers and the static supplement. The host unions both.
///
/// Owns the scope cache, so keep one instance per open document; dropping
/// it releases every memoized scope list.
pub struct CompletionSource {
	lang: &'static LanguageConfig,
	cache: ScopeCache,
	limit: usize,
}

impl CompletionSource {
	pub fn new(lang: &'static LanguageConfig) -> Self {
		Self {
			lang,
			cache: ScopeCache::new(),
			limit: DEFAULT_COMPLETIONS_LIMIT,
		}
	}

	pub fn with_config(lang: &'static LanguageConfig, config: &Config) -> Self {
		let completions = config.completions.as_ref();
		let cache = match completions.and_then(|completions| completions.split_threshold) {
			Some(threshold) => ScopeCache::with_split_threshold(threshold),
			None => ScopeCache::new(),
		};
		Self {
			lang,
			cache,
			limit: completions
				.and_then(|completions| completions.limit)
				.unwrap_or(DEFAULT_COMPLETIONS_LIMIT),
		}
	}

	pub fn language(&self) -> &'static LanguageConfig {
		self.lang
	}

	pub fn cache(&self) -> &ScopeCache {
		&self.cache
	}

	/// Identifiers declared by every scope enclosing the cursor, inner
	/// scopes first.
	pub fn complete(&mut self, ctx: CompletionContext<'_>) -> Option<CompletionResult> {
		let inner = node_before(ctx.tree.root_node(), ctx.offset)?;
		if self.lang.dont_complete.contains(inner.kind()) {
			debug!(kind = inner.kind(), "completion suppressed");
			return None;
		}
		let contents = Cow::from(ctx.rope);
		let contents = contents.as_bytes();
		let is_word = is_word_node(inner, contents);
		if !is_word && !ctx.explicit {
			return None;
		}
		let mut options = MaxVec::new(self.limit);
		let mut ancestor = Some(inner);
		while let Some(node) = ancestor {
			if self.lang.scopes.contains(node.kind()) {
				let scope = self.cache.scope_completions(self.lang, node, contents);
				options.extend(scope.iter().cloned());
			}
			ancestor = node.parent();
		}
		trace!(options = options.len(), "scope completions");
		Some(CompletionResult {
			from: if is_word { ByteOffset(inner.start_byte()) } else { ctx.offset },
			incomplete: !options.has_space(),
			options: options.into_inner(),
			valid_for: is_identifier,
		})
	}

	/// Fixed builtin and snippet completions, vetoed in the same contexts
	/// as [`complete`][Self::complete]. Independent of scope resolution.
	pub fn complete_globals(&self, ctx: CompletionContext<'_>) -> Option<CompletionResult> {
		let inner = node_before(ctx.tree.root_node(), ctx.offset)?;
		if self.lang.dont_complete.contains(inner.kind()) {
			return None;
		}
		let contents = Cow::from(ctx.rope);
		let is_word = is_word_node(inner, contents.as_bytes());
		if !is_word && !ctx.explicit {
			return None;
		}
		let mut options = MaxVec::new(self.limit);
		options.extend((self.lang.globals)().iter().cloned());
		options.extend((self.lang.snippets)().iter().cloned());
		Some(CompletionResult {
			from: if is_word { ByteOffset(inner.start_byte()) } else { ctx.offset },
			incomplete: !options.has_space(),
			options: options.into_inner(),
			valid_for: is_identifier,
		})
	}
}

/// Innermost node touching `offset`, preferring the token that ends there
/// over the one that starts there, so completion attaches to the token
/// just typed.
fn node_before(root: Node<'_>, ByteOffset(offset): ByteOffset) -> Option<Node<'_>> {
	root.descendant_for_byte_range(offset.saturating_sub(1), offset)
}

fn is_word_node(node: Node<'_>, contents: &[u8]) -> bool {
	if node.kind() == IDENTIFIER {
		return true;
	}
	let range = node.byte_range();
	range.len() < MAX_WORD_LEN && is_identifier(&String::from_utf8_lossy(&contents[range]))
}

/// The token shape the sources treat as word-like: a word character or a
/// broad Unicode letter, then word characters or digits.
pub fn is_identifier(text: &str) -> bool {
	let mut chars = text.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	word_start(first) && chars.all(word_char)
}

fn word_start(c: char) -> bool {
	c == '_' || c.is_ascii_alphabetic() || matches!(c, '\u{a1}'..='\u{ffff}')
}

fn word_char(c: char) -> bool {
	word_start(c) || c.is_ascii_digit()
}
