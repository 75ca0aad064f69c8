use serde::{Deserialize, Serialize};

use super::context::PrefixPolicy;
use super::segmenter::SegmenterKind;
use crate::backend::SamplingPolicy;
use crate::error::ParaphraseError;

/// Sentences per window for the control-code variant.
pub const CONTROL_CODE_WINDOW: usize = 3;

/// Input token limit of the control-code model.
pub const CONTROL_CODE_MAX_INPUT: usize = 1024;

/// Input token limit of the instruction-tuned model.
pub const LENGTH_MATCHING_MAX_INPUT: usize = 128;

/// Output-to-input length ratio targeted by length matching.
pub const LENGTH_RATIO: f32 = 1.1;

/// Minimum generation length under length matching.
pub const MIN_OUTPUT_TOKENS: usize = 30;

/// Describes one paraphrase variant.
///
/// The two known variants share a single loop and differ only in the
/// switches below. Use [`VariantConfig::control_code`] or
/// [`VariantConfig::length_matching`] as a starting point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VariantConfig {
	/// Human-readable variant name (logs, `/v1/variant`).
	pub name: String,
	/// Sentences per window.
	pub window_size: usize,
	pub sampling: SamplingPolicy,
	/// Prefix inputs with control codes and carry context between windows.
	pub uses_control_codes: bool,
	/// Cap output length relative to the window's own token length.
	pub uses_length_matching: bool,
	/// Strip echoed instructions from outputs.
	pub sanitizer_enabled: bool,
	pub segmenter: SegmenterKind,
	/// Input tokens kept by the tokenization boundary (the rest is dropped).
	pub max_input_tokens: usize,
	/// Output cap when length matching is off.
	pub max_output_tokens: usize,
	/// Output floor when length matching is on.
	pub min_output_tokens: usize,
	pub length_ratio: f32,
	pub prefix_policy: PrefixPolicy,
	/// Fixed sampling seed; a fresh one is drawn per call when absent.
	pub seed: Option<u64>,
}

impl Default for VariantConfig {
	fn default() -> Self {
		Self::control_code()
	}
}

impl VariantConfig {
	/// Control-code variant: 3-sentence windows, growing context, nucleus sampling.
	pub fn control_code() -> Self {
		Self {
			name: "control-code".to_owned(),
			window_size: CONTROL_CODE_WINDOW,
			sampling: SamplingPolicy::nucleus(),
			uses_control_codes: true,
			uses_length_matching: false,
			sanitizer_enabled: false,
			segmenter: SegmenterKind::Rules,
			max_input_tokens: CONTROL_CODE_MAX_INPUT,
			max_output_tokens: CONTROL_CODE_MAX_INPUT,
			min_output_tokens: MIN_OUTPUT_TOKENS,
			length_ratio: LENGTH_RATIO,
			prefix_policy: PrefixPolicy::Unbounded,
			seed: None,
		}
	}

	/// Length-matching variant: sentence by sentence, beam search, sanitised output.
	pub fn length_matching() -> Self {
		Self {
			name: "length-matching".to_owned(),
			window_size: 1,
			sampling: SamplingPolicy::beam(),
			uses_control_codes: false,
			uses_length_matching: true,
			sanitizer_enabled: true,
			segmenter: SegmenterKind::Punctuation,
			max_input_tokens: LENGTH_MATCHING_MAX_INPUT,
			max_output_tokens: LENGTH_MATCHING_MAX_INPUT,
			min_output_tokens: MIN_OUTPUT_TOKENS,
			length_ratio: LENGTH_RATIO,
			prefix_policy: PrefixPolicy::Unbounded,
			seed: None,
		}
	}

	/// Looks a preset up by name (`control-code`, `length-matching`).
	pub fn by_name(name: &str) -> Option<Self> {
		match name.trim().to_lowercase().replace('_', "-").as_str() {
			"control-code" | "dipper" => Some(Self::control_code()),
			"length-matching" | "t5" => Some(Self::length_matching()),
			_ => None,
		}
	}

	pub fn with_seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_prefix_policy(mut self, policy: PrefixPolicy) -> Self {
		self.prefix_policy = policy;
		self
	}

	/// Checks the switches are usable.
	///
	/// # Errors
	/// Returns [`ParaphraseError::Config`] if:
	/// - `window_size`, `max_input_tokens` or `max_output_tokens` is `0`
	/// - `top_p` is outside `(0, 1]`, or `num_beams == 0`
	/// - `length_ratio` is not a positive number
	pub fn validate(&self) -> Result<(), ParaphraseError> {
		let invalid = |reason: &str| Err(ParaphraseError::Config(reason.to_owned()));
		if self.window_size == 0 {
			return invalid("window_size must be >= 1");
		}
		if self.max_input_tokens == 0 || self.max_output_tokens == 0 {
			return invalid("token limits must be >= 1");
		}
		match self.sampling {
			SamplingPolicy::Nucleus { top_p, .. } if !(top_p > 0.0 && top_p <= 1.0) => {
				return invalid("top_p must be in (0, 1]");
			}
			SamplingPolicy::Beam { num_beams: 0, .. } => return invalid("num_beams must be >= 1"),
			_ => (),
		}
		if self.uses_length_matching && !(self.length_ratio.is_finite() && self.length_ratio > 0.0) {
			return invalid("length_ratio must be a positive number");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_are_valid() {
		assert!(VariantConfig::control_code().validate().is_ok());
		assert!(VariantConfig::length_matching().validate().is_ok());
	}

	#[test]
	fn control_code_preset_matches_model_contract() {
		let config = VariantConfig::control_code();
		assert_eq!(config.window_size, 3);
		assert_eq!(config.max_input_tokens, 1024);
		assert!(config.sampling.is_stochastic());
		assert!(config.uses_control_codes && !config.sanitizer_enabled);
	}

	#[test]
	fn length_matching_preset_uses_beams() {
		let config = VariantConfig::length_matching();
		assert_eq!(config.window_size, 1);
		assert_eq!(config.sampling, SamplingPolicy::Beam { num_beams: 4, no_repeat_ngram_size: 2, early_stopping: true });
		assert!(config.uses_length_matching && config.sanitizer_enabled);
	}

	#[test]
	fn lookup_by_name() {
		assert_eq!(VariantConfig::by_name("Length_Matching"), Some(VariantConfig::length_matching()));
		assert_eq!(VariantConfig::by_name("control-code"), Some(VariantConfig::control_code()));
		assert_eq!(VariantConfig::by_name("gpt"), None);
	}

	#[test]
	fn invalid_switches_are_rejected() {
		let mut config = VariantConfig::control_code();
		config.window_size = 0;
		assert!(config.validate().is_err());

		let mut config = VariantConfig::control_code();
		config.sampling = SamplingPolicy::Nucleus { top_p: 1.5, top_k: None, num_return_sequences: 1 };
		assert!(config.validate().is_err());

		let mut config = VariantConfig::length_matching();
		config.sampling = SamplingPolicy::Beam { num_beams: 0, no_repeat_ngram_size: 2, early_stopping: true };
		assert!(config.validate().is_err());
	}
}
