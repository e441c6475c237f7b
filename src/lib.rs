pub mod config;
pub mod item;
pub mod lang;
pub mod rules;
pub mod scope;
pub mod source;
pub mod utils;

pub use item::{CompletionItem, ItemKind};
pub use lang::LanguageConfig;
pub use scope::ScopeCache;
pub use source::{CompletionContext, CompletionResult, CompletionSource};
pub use utils::ByteOffset;
