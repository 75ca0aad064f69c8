//! Generation capability seam.
//!
//! The paraphrase loop never performs inference itself. It issues three
//! calls per unit of work against a [`GenerationBackend`]:
//! - `tokenize` the formatted input, truncated to a maximum length
//! - `generate` output token ids under a [`SamplingPolicy`]
//! - `decode` the output ids back to text
//!
//! Implementations:
//! - [`remote::RemoteBackend`]: HTTP/JSON inference endpoint
//! - [`serialized::SerializedBackend`]: serialises calls to a non-reentrant backend

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// HTTP/JSON generation capability.
pub mod remote;

/// Mutex wrapper for backends that are not safely reentrant.
pub mod serialized;

pub use remote::RemoteBackend;
pub use serialized::SerializedBackend;

/// Decoding strategy used by the generation capability.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SamplingPolicy {
	/// Stochastic nucleus sampling. `top_k = None` disables top-k filtering.
	Nucleus {
		top_p: f32,
		top_k: Option<u32>,
		num_return_sequences: u32,
	},
	/// Deterministic beam search.
	Beam {
		num_beams: u32,
		no_repeat_ngram_size: u32,
		early_stopping: bool,
	},
}

impl SamplingPolicy {
	/// Nucleus sampling with `top_p = 0.75`, top-k disabled, one sample.
	pub fn nucleus() -> Self {
		SamplingPolicy::Nucleus { top_p: 0.75, top_k: None, num_return_sequences: 1 }
	}

	/// Beam search with 4 beams, no repeated bigrams, early stopping.
	pub fn beam() -> Self {
		SamplingPolicy::Beam { num_beams: 4, no_repeat_ngram_size: 2, early_stopping: true }
	}

	/// Returns `true` if the policy draws random samples.
	pub fn is_stochastic(&self) -> bool {
		matches!(self, SamplingPolicy::Nucleus { .. })
	}
}

/// Parameters of a single `generate` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationParams {
	pub sampling: SamplingPolicy,
	/// Maximum number of output tokens.
	pub max_length: usize,
	/// Sampling seed, only meaningful for stochastic policies.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub seed: Option<u64>,
}

/// Output of the tokenization boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedInput {
	pub ids: Vec<u32>,
	/// Tokens dropped because the input exceeded `max_length`.
	///
	/// Truncation is lossy on purpose: it is reported here, never raised.
	#[serde(default)]
	pub truncated: usize,
}

/// An external sequence-to-sequence generation capability.
///
/// Implementations are shared by every in-flight request, so they must be
/// `Send + Sync`. Calls must not leak state from one call into the next.
/// A backend that is not reentrant should be wrapped in
/// [`SerializedBackend`], which funnels every call through a lock.
pub trait GenerationBackend: Send + Sync {
	/// Tokenizes `text`, keeping at most `max_length` tokens when given.
	fn tokenize(&self, text: &str, max_length: Option<usize>) -> Result<TokenizedInput, GenerationError>;

	/// Generates output token ids for `input`.
	fn generate(&self, input: &[u32], params: &GenerationParams) -> Result<Vec<u32>, GenerationError>;

	/// Decodes token ids to text, skipping special tokens.
	fn decode(&self, ids: &[u32]) -> Result<String, GenerationError>;
}
