use tree_sitter::Node;

use crate::item::ItemKind;

/// Kind name tree-sitter grammars use for plain identifier tokens.
/// Completion labels are only ever taken from nodes of this kind.
pub const IDENTIFIER: &str = "identifier";

/// How a [`DeclRule`] scans the children of its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
	/// Child kinds to descend through. Wrapper chains of these kinds are
	/// flattened no matter how deeply they nest.
	pub wrappers: &'static [&'static str],
	/// Top-level child kinds that end the scan, e.g. the `=` of an
	/// assignment or the `in` of a `for` statement.
	pub stop: &'static [&'static str],
	/// When set, nothing is emitted until a top-level child of this kind
	/// has been passed, e.g. the `import` keyword.
	pub after: Option<&'static str>,
}

impl Scan {
	pub const FLAT: Self = Self {
		wrappers: &[],
		stop: &[],
		after: None,
	};
}

/// Discovers the identifiers a node of a given kind declares directly
/// inside itself. Which kinds carry which rules is per-language
/// configuration; see [`crate::lang`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclRule {
	pub item: ItemKind,
	pub scan: Scan,
	/// Treat the node as a scope boundary once scanned; the extractor will
	/// not walk its subtree even when its kind opens no scope.
	pub opaque: bool,
}

impl DeclRule {
	pub const fn flat(item: ItemKind) -> Self {
		Self {
			item,
			scan: Scan::FLAT,
			opaque: false,
		}
	}
	/// Flat scan that also flattens declarator-style wrapper chains.
	pub const fn via(item: ItemKind, wrappers: &'static [&'static str]) -> Self {
		Self {
			item,
			scan: Scan {
				wrappers,
				stop: &[],
				after: None,
			},
			opaque: true,
		}
	}
	pub const fn until(item: ItemKind, stop: &'static [&'static str]) -> Self {
		Self {
			item,
			scan: Scan {
				wrappers: &[],
				stop,
				after: None,
			},
			opaque: false,
		}
	}

	/// Scans `node`'s immediate children (and wrapper chains) for declared
	/// identifiers, calling `emit` for each one found. Returns whether the
	/// node should be treated as opaque for descent purposes.
	///
	/// The walk keeps an explicit wrapper stack instead of recursing, so
	/// pathological declarator chains cannot grow the call stack.
	pub fn apply(&self, node: Node<'_>, emit: &mut dyn FnMut(Node<'_>, ItemKind)) -> bool {
		let Scan { wrappers, stop, after } = self.scan;
		let mut gated = after.is_some();
		let mut parents: Vec<Node> = vec![];
		let mut cur = node.child(0);
		loop {
			let Some(child) = cur else {
				let Some(parent) = parents.pop() else { break };
				cur = parent.next_sibling();
				continue;
			};
			let kind = child.kind();
			if parents.is_empty() {
				if gated {
					if Some(kind) == after {
						gated = false;
					}
					cur = child.next_sibling();
					continue;
				}
				if stop.contains(&kind) {
					break;
				}
			}
			if wrappers.contains(&kind) {
				parents.push(child);
				cur = child.child(0);
			} else {
				if kind == IDENTIFIER {
					emit(child, self.item);
				}
				cur = child.next_sibling();
			}
		}
		self.opaque
	}
}
