use std::fmt::{self, Display};

/// Coarse category tag attached to a [`CompletionItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
	Function,
	Variable,
	Namespace,
	Constant,
	Type,
	Class,
	Keyword,
}

impl ItemKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Function => "function",
			Self::Variable => "variable",
			Self::Namespace => "namespace",
			Self::Constant => "constant",
			Self::Type => "type",
			Self::Class => "class",
			Self::Keyword => "keyword",
		}
	}
}

impl Display for ItemKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One completion candidate, ready to hand to the host.
///
/// `label` is the verbatim source text of the identifier that produced the
/// item. No uniqueness is enforced; the same name declared in several scopes
/// simply appears several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
	pub label: String,
	pub kind: ItemKind,
	/// Short qualifier shown next to the label, e.g. `loop`.
	pub detail: Option<String>,
	/// Snippet template with `${name}` placeholder fields. Plain-text
	/// insertion of `label` when absent.
	pub insert: Option<String>,
}

impl CompletionItem {
	pub fn new(label: impl Into<String>, kind: ItemKind) -> Self {
		Self {
			label: label.into(),
			kind,
			detail: None,
			insert: None,
		}
	}

	/// A template skeleton whose `${name}` fields are left for the editor
	/// to traverse on insertion.
	pub fn snippet(label: impl Into<String>, template: impl Into<String>, detail: impl Into<String>, kind: ItemKind) -> Self {
		Self {
			label: label.into(),
			kind,
			detail: Some(detail.into()),
			insert: Some(template.into()),
		}
	}
}
