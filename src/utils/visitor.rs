use std::iter::FusedIterator;

use tree_sitter::Node;

/// Pre-order traversal over a subtree, anonymous nodes included.
///
/// [`skip_subtree`][Preorder::skip_subtree] makes the walk continue with the
/// current node's next sibling instead of its children, which is how scope
/// extraction avoids descending into nested scopes.
pub struct Preorder<'t> {
	cursor: Option<tree_sitter::TreeCursor<'t>>,
	depth: u32,
	started: bool,
	skip: bool,
}

impl<'t> Preorder<'t> {
	pub fn new(node: Node<'t>) -> Self {
		Self {
			cursor: Some(node.walk()),
			depth: 0,
			started: false,
			skip: false,
		}
	}
	/// Do not descend into the node most recently yielded.
	pub fn skip_subtree(&mut self) {
		self.skip = true;
	}
}

impl FusedIterator for Preorder<'_> {}
impl<'t> Iterator for Preorder<'t> {
	type Item = Node<'t>;
	fn next(&mut self) -> Option<Self::Item> {
		let cursor = self.cursor.as_mut()?;
		if !self.started {
			self.started = true;
			return Some(cursor.node());
		}
		if !core::mem::take(&mut self.skip) && cursor.goto_first_child() {
			self.depth += 1;
			return Some(cursor.node());
		}
		loop {
			if self.depth == 0 {
				self.cursor = None;
				return None;
			}
			if cursor.goto_next_sibling() {
				return Some(cursor.node());
			}
			assert!(cursor.goto_parent());
			self.depth -= 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use tree_sitter::Parser;

	#[test]
	fn test_preorder_includes_anonymous() {
		let mut parser = Parser::new();
		parser.set_language(&tree_sitter_python::LANGUAGE.into()).unwrap();
		let tree = parser.parse(b"a = b", None).unwrap();
		let kinds = Preorder::new(tree.root_node()).map(|node| node.kind()).collect::<Vec<_>>();
		assert_eq!(
			kinds,
			["module", "expression_statement", "assignment", "identifier", "=", "identifier"]
		);
	}

	#[test]
	fn test_preorder_skip_subtree() {
		let mut parser = Parser::new();
		parser.set_language(&tree_sitter_python::LANGUAGE.into()).unwrap();
		let tree = parser.parse(b"foo.mapped(lambda f: f.bar)", None).unwrap();
		let mut kinds = vec![];
		let mut walk = Preorder::new(tree.root_node());
		while let Some(node) = walk.next() {
			if node.kind() == "lambda" {
				walk.skip_subtree();
			}
			if node.is_named() {
				kinds.push(node.kind());
			}
		}
		assert_eq!(
			kinds,
			[
				"module",
				"expression_statement",
				"call",
				"attribute",
				"identifier",
				"identifier",
				"argument_list",
				"lambda"
			]
		);
	}
}
