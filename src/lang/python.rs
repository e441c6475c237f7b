//! The Python profile. Scoping is function-level: blocks do not open
//! scopes, so assignments anywhere in a body surface at the enclosing
//! function, class or module.

use std::sync::LazyLock;

use phf::phf_set;

use crate::item::{CompletionItem, ItemKind};
use crate::lang::LanguageConfig;
use crate::rules::{DeclRule, Scan};

pub static PYTHON: LanguageConfig = LanguageConfig {
	name: "python",
	language,
	scopes: &SCOPES,
	dont_complete: &DONT_COMPLETE,
	rules: rule_for,
	globals,
	snippets,
};

fn language() -> tree_sitter::Language {
	tree_sitter_python::LANGUAGE.into()
}

static SCOPES: phf::Set<&'static str> = phf_set!("module", "function_definition", "class_definition", "lambda");

static DONT_COMPLETE: phf::Set<&'static str> = phf_set!(
	"string",
	"string_start",
	"string_content",
	"string_end",
	"escape_sequence",
	"concatenated_string",
	"comment",
);

/// Unpacking targets the grammar nests the bound names in.
const TARGETS: &[&str] = &["pattern_list", "tuple_pattern"];

static FUNCTION_DEFINITION: DeclRule = DeclRule::flat(ItemKind::Function);
static CLASS_DEFINITION: DeclRule = DeclRule::flat(ItemKind::Class);
static PARAMETERS: DeclRule = DeclRule::via(
	ItemKind::Variable,
	&[
		"default_parameter",
		"typed_parameter",
		"typed_default_parameter",
		"list_splat_pattern",
		"dictionary_splat_pattern",
	],
);
static ASSIGNMENT: DeclRule = DeclRule {
	item: ItemKind::Variable,
	scan: Scan {
		wrappers: TARGETS,
		stop: &["=", ":"],
		after: None,
	},
	opaque: false,
};
static NAMED_EXPRESSION: DeclRule = DeclRule::until(ItemKind::Variable, &[":="]);
static FOR_STATEMENT: DeclRule = DeclRule {
	item: ItemKind::Variable,
	scan: Scan {
		wrappers: TARGETS,
		stop: &["in"],
		after: None,
	},
	opaque: false,
};
static AS_PATTERN: DeclRule = DeclRule::via(ItemKind::Variable, &["as_pattern_target"]);
static IMPORT: DeclRule = DeclRule {
	item: ItemKind::Namespace,
	scan: Scan {
		wrappers: &["dotted_name", "aliased_import"],
		stop: &[],
		after: Some("import"),
	},
	opaque: false,
};
static IMPORT_FROM: DeclRule = DeclRule {
	item: ItemKind::Variable,
	scan: Scan {
		wrappers: &["dotted_name", "aliased_import"],
		stop: &[],
		after: Some("import"),
	},
	opaque: false,
};

fn rule_for(kind: &str) -> Option<&'static DeclRule> {
	match kind {
		"function_definition" => Some(&FUNCTION_DEFINITION),
		"class_definition" => Some(&CLASS_DEFINITION),
		"parameters" | "lambda_parameters" => Some(&PARAMETERS),
		"assignment" => Some(&ASSIGNMENT),
		"named_expression" => Some(&NAMED_EXPRESSION),
		"for_statement" => Some(&FOR_STATEMENT),
		"as_pattern" => Some(&AS_PATTERN),
		"import_statement" => Some(&IMPORT),
		"import_from_statement" => Some(&IMPORT_FROM),
		_ => None,
	}
}

fn globals() -> &'static [CompletionItem] {
	GLOBALS.as_slice()
}

fn snippets() -> &'static [CompletionItem] {
	SNIPPETS.as_slice()
}

static GLOBALS: LazyLock<Vec<CompletionItem>> = LazyLock::new(|| {
	["False", "None", "True"]
		.map(|label| CompletionItem::new(label, ItemKind::Constant))
		.into_iter()
		.chain(
			["bool", "bytes", "dict", "float", "int", "list", "set", "str", "tuple"]
				.map(|label| CompletionItem::new(label, ItemKind::Type)),
		)
		.chain(
			["abs", "enumerate", "isinstance", "len", "print", "range", "repr", "sorted", "zip"]
				.map(|label| CompletionItem::new(label, ItemKind::Function)),
		)
		.collect()
});

static SNIPPETS: LazyLock<Vec<CompletionItem>> = LazyLock::new(|| {
	vec![
		CompletionItem::snippet("def", "def ${name}(${params}):\n\t${}", "function", ItemKind::Keyword),
		CompletionItem::snippet("for", "for ${name} in ${collection}:\n\t${}", "loop", ItemKind::Keyword),
		CompletionItem::snippet("class", "class ${name}:\n\t${}", "definition", ItemKind::Keyword),
	]
});

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scope::ScopeCache;
	use crate::source::{CompletionContext, CompletionSource};
	use crate::utils::ByteOffset;
	use pretty_assertions::assert_eq;
	use ropey::Rope;
	use tree_sitter::Tree;

	fn parse(contents: &str) -> Tree {
		PYTHON.parser().unwrap().parse(contents.as_bytes(), None).unwrap()
	}

	fn tagged(items: &[CompletionItem]) -> Vec<(String, ItemKind)> {
		items.iter().map(|item| (item.label.clone(), item.kind)).collect()
	}

	#[test]
	fn test_module_scope() {
		let contents = r#"import os
import numpy as np
from os.path import join

count = 0

def main(argv):
	pass

class Thing:
	def method(self):
		pass
"#;
		let tree = parse(contents);
		let mut cache = ScopeCache::new();
		let items = cache.scope_completions(&PYTHON, tree.root_node(), contents.as_bytes());
		assert_eq!(
			tagged(&items),
			[
				("os".to_string(), ItemKind::Namespace),
				// Aliased imports surface both names; callers live with it.
				("numpy".to_string(), ItemKind::Namespace),
				("np".to_string(), ItemKind::Namespace),
				("join".to_string(), ItemKind::Variable),
				("count".to_string(), ItemKind::Variable),
				("main".to_string(), ItemKind::Function),
				("Thing".to_string(), ItemKind::Class),
			]
		);
	}

	#[test]
	fn test_function_scope() {
		let contents = r#"def process(items, limit=10):
	total = 0
	for i, item in enumerate(items):
		total = total + item
	with open("data") as handle:
		text = handle.read()
	return total
"#;
		let tree = parse(contents);
		let func = tree.root_node().named_child(0).unwrap();
		assert_eq!(func.kind(), "function_definition");
		let mut cache = ScopeCache::new();
		let items = cache.scope_completions(&PYTHON, func, contents.as_bytes());
		assert_eq!(
			tagged(&items),
			[
				("items".to_string(), ItemKind::Variable),
				("limit".to_string(), ItemKind::Variable),
				("total".to_string(), ItemKind::Variable),
				("i".to_string(), ItemKind::Variable),
				("item".to_string(), ItemKind::Variable),
				("total".to_string(), ItemKind::Variable),
				("handle".to_string(), ItemKind::Variable),
				("text".to_string(), ItemKind::Variable),
			]
		);
	}

	#[test]
	fn test_nested_function_completion() {
		let contents = r#"def outer(a):
	b = 1
	def inner(c):
		d = 2
		return d
	return b
"#;
		let tree = parse(contents);
		let rope = Rope::from_str(contents);
		let offset = contents.rfind("return d").unwrap() + "return d".len();
		let mut source = CompletionSource::new(&PYTHON);
		let result = source
			.complete(CompletionContext {
				tree: &tree,
				rope: rope.slice(..),
				offset: ByteOffset(offset),
				explicit: false,
			})
			.unwrap();
		let labels = result.options.iter().map(|item| item.label.as_str()).collect::<Vec<_>>();
		assert_eq!(labels, ["c", "d", "a", "b", "inner", "outer"]);
	}

	#[test]
	fn test_class_scope_lists_methods() {
		let contents = r#"class Greeter:
	prefix = "hi"
	def greet(self, name):
		return name
"#;
		let tree = parse(contents);
		let class = tree.root_node().named_child(0).unwrap();
		assert_eq!(class.kind(), "class_definition");
		let mut cache = ScopeCache::new();
		let items = cache.scope_completions(&PYTHON, class, contents.as_bytes());
		assert_eq!(
			tagged(&items),
			[
				("prefix".to_string(), ItemKind::Variable),
				("greet".to_string(), ItemKind::Function),
			]
		);
	}
}
