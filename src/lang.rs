//! Per-language configuration: which node kinds open scopes, how
//! declarations are discovered, where completion must stay quiet, and the
//! static supplement of builtins and snippets.

use thiserror::Error;
use tree_sitter::Parser;

use crate::item::CompletionItem;
use crate::rules::DeclRule;

pub mod cpp;
pub mod python;

#[derive(Debug, Error)]
pub enum GrammarError {
	#[error("failed to load the {name} grammar")]
	Load {
		name: &'static str,
		#[source]
		source: tree_sitter::LanguageError,
	},
}

pub struct LanguageConfig {
	pub name: &'static str,
	pub language: fn() -> tree_sitter::Language,
	/// Node kinds that open a lexical scope.
	pub scopes: &'static phf::Set<&'static str>,
	/// Node kinds inside which completion never fires.
	pub dont_complete: &'static phf::Set<&'static str>,
	/// Declaration-discovery table, dispatched on node kind.
	pub rules: fn(&str) -> Option<&'static DeclRule>,
	pub globals: fn() -> &'static [CompletionItem],
	pub snippets: fn() -> &'static [CompletionItem],
}

impl LanguageConfig {
	/// A parser ready to produce trees for this language.
	pub fn parser(&self) -> Result<Parser, GrammarError> {
		let mut parser = Parser::new();
		parser
			.set_language(&(self.language)())
			.map_err(|source| GrammarError::Load { name: self.name, source })?;
		Ok(parser)
	}
}
