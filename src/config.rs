use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
	pub completions: Option<CompletionsConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CompletionsConfig {
	/// Upper bound on options returned per request.
	pub limit: Option<usize>,
	/// Span in bytes beyond which interior containers are cached on their
	/// own; see [`crate::scope::DEFAULT_SPLIT_THRESHOLD`].
	pub split_threshold: Option<usize>,
}
