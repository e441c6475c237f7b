//! Scope extraction and its per-node memoization.

use std::rc::Rc;

use intmap::IntMap;
use tracing::trace;
use tree_sitter::Node;

use crate::item::{CompletionItem, ItemKind};
use crate::lang::LanguageConfig;
use crate::utils::Preorder;

/// Spans larger than this become their own cache unit instead of being
/// re-walked as part of the enclosing scope.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 8192;

/// Hit/miss counters, exposed for observability and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
	pub hits: usize,
	pub misses: usize,
}

struct CacheEntry {
	kind_id: u16,
	len: usize,
	items: Rc<[CompletionItem]>,
}

/// Memo table from node identity to the completions visible inside it.
///
/// Keys are [`Node::id`]: incremental reparses reuse unedited subtrees and
/// preserve their ids, so entries for untouched scopes keep serving while
/// entries for edited scopes simply stop being requested. The recorded kind
/// and subtree length guard the rare case of an id being recycled for a
/// different node. Entries own their labels outright and never borrow from
/// the tree.
pub struct ScopeCache {
	entries: IntMap<CacheEntry>,
	split_threshold: usize,
	stats: CacheStats,
}

impl Default for ScopeCache {
	fn default() -> Self {
		Self::new()
	}
}

impl ScopeCache {
	pub fn new() -> Self {
		Self::with_split_threshold(DEFAULT_SPLIT_THRESHOLD)
	}
	pub fn with_split_threshold(split_threshold: usize) -> Self {
		Self {
			entries: IntMap::new(),
			split_threshold,
			stats: CacheStats::default(),
		}
	}
	pub fn stats(&self) -> CacheStats {
		self.stats
	}
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Completions visible inside `scope`, memoized by node identity.
	pub fn scope_completions(
		&mut self,
		lang: &LanguageConfig,
		scope: Node<'_>,
		contents: &[u8],
	) -> Rc<[CompletionItem]> {
		let key = scope.id() as u64;
		if let Some(entry) = self.entries.get(key) {
			if entry.kind_id == scope.kind_id() && entry.len == scope.byte_range().len() {
				trace!(kind = scope.kind(), id = key, "scope cache hit");
				self.stats.hits += 1;
				return Rc::clone(&entry.items);
			}
		}
		self.stats.misses += 1;
		let items: Rc<[CompletionItem]> = self.extract(lang, scope, contents).into();
		self.entries.insert(
			key,
			CacheEntry {
				kind_id: scope.kind_id(),
				len: scope.byte_range().len(),
				items: Rc::clone(&items),
			},
		);
		items
	}

	/// Pre-order walk of `scope`'s subtree collecting declared identifiers
	/// in source order.
	///
	/// Anonymous nodes are walked too. The scope node itself is never
	/// handed to a rule, and nested scopes are not descended into; they
	/// resolve on their own when the cursor is inside them.
	fn extract(&mut self, lang: &LanguageConfig, scope: Node<'_>, contents: &[u8]) -> Vec<CompletionItem> {
		trace!(kind = scope.kind(), "extract scope");
		let mut items = vec![];
		let mut walk = Preorder::new(scope);
		// The first node out of the walk is the scope itself.
		walk.next();
		while let Some(node) = walk.next() {
			let kind = node.kind();
			if let Some(rule) = (lang.rules)(kind) {
				let mut emit = |ident: Node<'_>, item: ItemKind| {
					let label = String::from_utf8_lossy(&contents[ident.byte_range()]).into_owned();
					items.push(CompletionItem::new(label, item));
				};
				if rule.apply(node, &mut emit) || lang.scopes.contains(kind) {
					walk.skip_subtree();
				}
			} else if lang.scopes.contains(kind) {
				walk.skip_subtree();
			} else if node.byte_range().len() > self.split_threshold {
				// Large containers get their own cache unit so an edit
				// elsewhere does not force a re-walk of the whole body.
				let nested = self.scope_completions(lang, node, contents);
				items.extend(nested.iter().cloned());
				walk.skip_subtree();
			}
		}
		items
	}
}
