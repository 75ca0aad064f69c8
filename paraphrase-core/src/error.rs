use thiserror::Error;

/// Rejections raised before any generation call is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	/// `text` is absent, not a string, or blank after trimming.
	#[error("No text provided")]
	MissingText,
	/// A diversity knob could not be coerced to an integer.
	#[error("invalid diversity value for '{field}'")]
	InvalidDiversity { field: &'static str },
}

/// Failures reported by (or while talking to) the generation capability.
#[derive(Error, Debug)]
pub enum GenerationError {
	#[error("generation backend unreachable: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("generation backend answered {status}: {body}")]
	Status { status: u16, body: String },
	#[error("malformed generation output: {0}")]
	Malformed(String),
	#[error("generation backend failed: {0}")]
	Backend(String),
	#[error("generation backend lock poisoned")]
	Poisoned,
}

/// Everything that can end a paraphrase request early.
///
/// The request boundary flattens these into `{ "error": string }`.
#[derive(Error, Debug)]
pub enum ParaphraseError {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("generation failed at window {window}: {source}")]
	Generation {
		window: usize,
		#[source]
		source: GenerationError,
	},
	#[error("invalid variant configuration: {0}")]
	Config(String),
}

impl ParaphraseError {
	/// Returns `true` for failures caused by the caller's input.
	pub fn is_validation(&self) -> bool {
		matches!(self, ParaphraseError::Validation(_))
	}
}
