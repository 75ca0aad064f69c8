use log::{debug, warn};
use rand::Rng;

use super::config::VariantConfig;
use crate::backend::{GenerationBackend, GenerationParams};
use crate::error::GenerationError;

/// One decoded continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
	pub text: String,
	/// Input tokens dropped by the truncation boundary for this call.
	pub truncated_tokens: usize,
}

/// Builds the instruction prompt used by variants without control codes.
pub fn instruction_input(window_text: &str) -> String {
	format!("Paraphrase: {}", window_text)
}

/// Output length targeted by length matching.
///
/// `max(round(ratio × source_tokens), floor)`: keeps the paraphrase close to
/// the source length while letting very short sentences breathe.
pub fn target_length(source_tokens: usize, ratio: f32, floor: usize) -> usize {
	let target = (source_tokens as f64 * ratio as f64).round() as usize;
	target.max(floor)
}

/// Issues the tokenize / generate / decode round trip for one window.
///
/// Holds no per-request state: it only borrows the shared backend and the
/// variant configuration.
pub struct GenerationInvoker<'a> {
	backend: &'a dyn GenerationBackend,
	config: &'a VariantConfig,
}

impl<'a> GenerationInvoker<'a> {
	pub fn new(backend: &'a dyn GenerationBackend, config: &'a VariantConfig) -> Self {
		Self { backend, config }
	}

	/// Generates a continuation for `formatted_input`.
	///
	/// # Parameters
	/// - `formatted_input`: the full model input for this window.
	/// - `length_source`: the untouched window text, used to size the output
	///   when length matching is enabled.
	///
	/// # Behavior
	/// - Inputs longer than `max_input_tokens` are truncated by the backend;
	///   the loss is logged and returned, never raised.
	/// - Stochastic policies get the configured seed, or a fresh random one
	///   (logged, so the call can be replayed).
	///
	/// # Errors
	/// Any backend failure is returned as-is; the caller aborts the request.
	pub fn invoke(&self, formatted_input: &str, length_source: &str) -> Result<Generated, GenerationError> {
		let tokenized = self.backend.tokenize(formatted_input, Some(self.config.max_input_tokens))?;
		if tokenized.truncated > 0 {
			warn!(
				"input truncated: {} token(s) beyond the {}-token limit were dropped",
				tokenized.truncated, self.config.max_input_tokens
			);
		}

		let max_length = if self.config.uses_length_matching {
			let source = self.backend.tokenize(length_source, None)?;
			target_length(source.ids.len(), self.config.length_ratio, self.config.min_output_tokens)
		} else {
			self.config.max_output_tokens
		};

		let seed = if self.config.sampling.is_stochastic() {
			Some(self.config.seed.unwrap_or_else(|| rand::rng().random()))
		} else {
			None
		};
		debug!("generate: {} input token(s), max_length {}, seed {:?}", tokenized.ids.len(), max_length, seed);

		let params = GenerationParams { sampling: self.config.sampling.clone(), max_length, seed };
		let output = self.backend.generate(&tokenized.ids, &params)?;
		let text = self.backend.decode(&output)?;

		Ok(Generated { text, truncated_tokens: tokenized.truncated })
	}
}
