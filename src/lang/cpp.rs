//! The C++ profile, Arduino-flavoured builtins included.

use std::sync::LazyLock;

use phf::phf_set;

use crate::item::{CompletionItem, ItemKind};
use crate::lang::LanguageConfig;
use crate::rules::{DeclRule, Scan};

pub static CPP: LanguageConfig = LanguageConfig {
	name: "cpp",
	language,
	scopes: &SCOPES,
	dont_complete: &DONT_COMPLETE,
	rules: rule_for,
	globals,
	snippets,
};

fn language() -> tree_sitter::Language {
	tree_sitter_cpp::LANGUAGE.into()
}

static SCOPES: phf::Set<&'static str> = phf_set!(
	"translation_unit",
	"function_definition",
	"lambda_expression",
	"preproc_function_def",
);

static DONT_COMPLETE: phf::Set<&'static str> = phf_set!(
	"string_literal",
	"raw_string_literal",
	"string_content",
	"char_literal",
	"character",
	"escape_sequence",
	"comment",
	"field_identifier",
	"\"",
	"'",
);

/// Declarator chain the grammar wraps a declared variable name in.
const DECLARATORS: &[&str] = &["init_declarator", "pointer_declarator", "array_declarator"];

static FUNCTION_DEFINITION: DeclRule = DeclRule::via(
	ItemKind::Function,
	&["function_declarator", "pointer_declarator", "parenthesized_declarator"],
);
static DECLARATION: DeclRule = DeclRule::via(ItemKind::Variable, DECLARATORS);
static PARAMETER: DeclRule = DeclRule::flat(ItemKind::Variable);
static PREPROC: DeclRule = DeclRule {
	item: ItemKind::Variable,
	scan: Scan::FLAT,
	opaque: true,
};

fn rule_for(kind: &str) -> Option<&'static DeclRule> {
	match kind {
		"function_definition" => Some(&FUNCTION_DEFINITION),
		"declaration" => Some(&DECLARATION),
		"parameter_declaration" | "preproc_params" => Some(&PARAMETER),
		"preproc_def" | "preproc_function_def" => Some(&PREPROC),
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
	["true", "false", "HIGH", "LOW"]
		.map(|label| CompletionItem::new(label, ItemKind::Constant))
		.into_iter()
		.chain(
			["bool", "byte", "int", "char", "float", "double", "long", "unsigned", "void"]
				.map(|label| CompletionItem::new(label, ItemKind::Type)),
		)
		.chain(["CRGB", "String"].map(|label| CompletionItem::new(label, ItemKind::Class)))
		.chain(["abs", "min", "max", "constrain", "map"].map(|label| CompletionItem::new(label, ItemKind::Function)))
		.collect()
});

static SNIPPETS: LazyLock<Vec<CompletionItem>> = LazyLock::new(|| {
	vec![
		CompletionItem::snippet(
			"for",
			"for ( ${type} ${name} = ${min}; ${name} < ${max}; ${name}++ )\n\t${}",
			"loop",
			ItemKind::Keyword,
		),
		CompletionItem::snippet("if", "if ()\n\t${}", "block", ItemKind::Keyword),
	]
});

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scope::ScopeCache;
	use pretty_assertions::assert_eq;
	use tree_sitter::Tree;

	fn parse(contents: &str) -> Tree {
		CPP.parser().unwrap().parse(contents.as_bytes(), None).unwrap()
	}

	fn tagged(items: &[CompletionItem]) -> Vec<(String, ItemKind)> {
		items.iter().map(|item| (item.label.clone(), item.kind)).collect()
	}

	#[test]
	fn test_translation_unit_scope() {
		let contents = r#"
#define RETRIES 3
#define CLAMP(x, hi) ((x) > (hi) ? (hi) : (x))

int shared = 0;
static unsigned *cursor_pos;

int *normalize(int raw) {
	return &shared;
}
"#;
		let tree = parse(contents);
		let mut cache = ScopeCache::new();
		let items = cache.scope_completions(&CPP, tree.root_node(), contents.as_bytes());
		assert_eq!(
			tagged(&items),
			[
				("RETRIES".to_string(), ItemKind::Variable),
				("CLAMP".to_string(), ItemKind::Variable),
				("shared".to_string(), ItemKind::Variable),
				("cursor_pos".to_string(), ItemKind::Variable),
				("normalize".to_string(), ItemKind::Function),
			]
		);
	}

	#[test]
	fn test_function_scope_params_and_locals() {
		let contents = "void blink(int pin, long wait_ms) {\n\tint state = 0;\n\tfor (int i = 0; i < 8; i++) state = i;\n}\n";
		let tree = parse(contents);
		let func = tree.root_node().named_child(0).unwrap();
		assert_eq!(func.kind(), "function_definition");
		let mut cache = ScopeCache::new();
		let items = cache.scope_completions(&CPP, func, contents.as_bytes());
		assert_eq!(
			tagged(&items),
			[
				("pin".to_string(), ItemKind::Variable),
				("wait_ms".to_string(), ItemKind::Variable),
				("state".to_string(), ItemKind::Variable),
				("i".to_string(), ItemKind::Variable),
			]
		);
	}

	#[test]
	fn test_macro_parameters_scope() {
		let contents = "#define CLAMP(x, hi) ((x) > (hi) ? (hi) : (x))\n";
		let tree = parse(contents);
		let macro_def = tree.root_node().named_child(0).unwrap();
		assert_eq!(macro_def.kind(), "preproc_function_def");
		let mut cache = ScopeCache::new();
		let items = cache.scope_completions(&CPP, macro_def, contents.as_bytes());
		assert_eq!(
			tagged(&items),
			[
				("x".to_string(), ItemKind::Variable),
				("hi".to_string(), ItemKind::Variable),
			]
		);
	}

	#[test]
	fn test_globals_reproduce_builtin_list() {
		let items = globals();
		assert!(items.iter().any(|item| item.label == "byte" && item.kind == ItemKind::Type));
		assert!(items.iter().any(|item| item.label == "CRGB" && item.kind == ItemKind::Class));
		assert!(items.iter().any(|item| item.label == "abs" && item.kind == ItemKind::Function));
		assert!(items.iter().all(|item| item.insert.is_none()));
		assert_eq!(snippets().len(), 2);
	}
}
