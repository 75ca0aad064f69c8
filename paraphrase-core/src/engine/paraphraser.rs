use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use super::config::VariantConfig;
use super::context::GenerationContext;
use super::control_code::ControlCode;
use super::invoker::{GenerationInvoker, instruction_input};
use super::sanitizer::sanitize;
use super::segmenter::Segmenter;
use super::window::window;
use crate::backend::GenerationBackend;
use crate::error::ParaphraseError;
use crate::request::ParaphraseRequest;

/// Lifecycle of a single request, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Validating,
	Segmenting,
	Encoding,
	Iterating { window: usize, of: usize },
	Assembling,
	Done,
	Failed,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Stage::Iterating { window, of } => write!(f, "iterating[{}/{}]", window + 1, of),
			other => write!(f, "{}", format!("{other:?}").to_lowercase()),
		}
	}
}

/// Result of a successful paraphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
	/// The assembled paraphrase.
	pub text: String,
	pub sentences: usize,
	pub windows: usize,
	pub generation_calls: usize,
	/// Input tokens silently dropped by the truncation boundary, summed over windows.
	pub truncated_tokens: usize,
}

/// Runs the chunked, context-carrying paraphrase loop.
///
/// # Responsibilities
/// - Hold the shared generation capability and the variant configuration
/// - Segment, window and generate for each request, strictly in window order
/// - Keep every request's state in its own [`GenerationContext`]
///
/// A `Paraphraser` is immutable once built and can be shared across threads;
/// requests only contend on the backend itself.
pub struct Paraphraser {
	backend: Arc<dyn GenerationBackend>,
	config: VariantConfig,
	segmenter: Box<dyn Segmenter>,
}

impl Paraphraser {
	/// Creates a paraphraser for `config` over `backend`.
	///
	/// The segmenter is the one named by `config.segmenter`.
	///
	/// # Errors
	/// Returns [`ParaphraseError::Config`] if the configuration is unusable.
	pub fn new(backend: Arc<dyn GenerationBackend>, config: VariantConfig) -> Result<Self, ParaphraseError> {
		config.validate()?;
		let segmenter = config.segmenter.build();
		Ok(Self { backend, config, segmenter })
	}

	/// Replaces the segmenter (e.g. with a model-backed one).
	pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
		self.segmenter = segmenter;
		self
	}

	/// Returns the active variant configuration.
	pub fn config(&self) -> &VariantConfig {
		&self.config
	}

	/// Validates raw text with default knobs, then paraphrases it.
	///
	/// # Errors
	/// See [`paraphrase`](Self::paraphrase); blank text gives a validation error.
	pub fn paraphrase_text(&self, text: &str) -> Result<String, ParaphraseError> {
		let request = ParaphraseRequest::new(text)?;
		Ok(self.paraphrase(&request)?.text)
	}

	/// Paraphrases a validated request.
	///
	/// # Behavior
	/// - Normalises and segments the text, then groups sentences into windows
	/// - Encodes control codes once (control-code variants only)
	/// - For each window, in order: compose the input from the current prefix,
	///   generate, sanitise if enabled, then record the output
	/// - No text means no window and no generation call
	///
	/// # Errors
	/// A generation failure at any window aborts the whole request; outputs
	/// from earlier windows are discarded.
	pub fn paraphrase(&self, request: &ParaphraseRequest) -> Result<Outcome, ParaphraseError> {
		let variant = &self.config.name;

		debug!("[{}] {}", variant, Stage::Segmenting);
		let sentences = self.segmenter.segment(request.text());
		let windows = window(&sentences, self.config.window_size);

		let code = if self.config.uses_control_codes {
			debug!("[{}] {}", variant, Stage::Encoding);
			Some(ControlCode::from_request(request))
		} else {
			None
		};

		let invoker = GenerationInvoker::new(self.backend.as_ref(), &self.config);
		let mut context = GenerationContext::new(self.config.prefix_policy, self.config.uses_control_codes);

		for w in &windows {
			let stage = Stage::Iterating { window: w.index, of: windows.len() };
			debug!("[{}] {}", variant, stage);

			let window_text = w.text();
			let input = match &code {
				Some(code) => context.compose(code, &window_text),
				None => instruction_input(&window_text),
			};

			let generated = invoker.invoke(&input, &window_text).map_err(|source| {
				warn!("[{}] {} at {}: {}", variant, Stage::Failed, stage, source);
				ParaphraseError::Generation { window: w.index, source }
			})?;

			let decoded = if self.config.sanitizer_enabled { sanitize(&generated.text) } else { generated.text };
			context.record(&decoded, generated.truncated_tokens);
		}

		debug!("[{}] {}", variant, Stage::Assembling);
		let generation_calls = context.generation_calls();
		let truncated_tokens = context.truncated_tokens();
		let outcome = Outcome {
			text: context.finish(),
			sentences: sentences.len(),
			windows: windows.len(),
			generation_calls,
			truncated_tokens,
		};

		info!(
			"[{}] {}: {} sentence(s), {} window(s), {} truncated token(s)",
			variant, Stage::Done, outcome.sentences, outcome.windows, outcome.truncated_tokens
		);
		Ok(outcome)
	}
}

impl fmt::Debug for Paraphraser {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Paraphraser").field("config", &self.config).finish_non_exhaustive()
	}
}
