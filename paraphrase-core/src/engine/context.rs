use serde::{Deserialize, Serialize};

use super::assembler::OutputAssembler;
use super::control_code::ControlCode;
use crate::text::{last_n_words, push_joined};

/// How much of the accumulated prefix is fed back to the model.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "words", rename_all = "snake_case")]
pub enum PrefixPolicy {
	/// The whole prefix; the tokenizer's input limit truncates it (and reports the loss).
	#[default]
	Unbounded,
	/// Only the most recent `n` words of the prefix.
	RecentWords(usize),
}

/// Request-scoped generation state.
///
/// Holds the context prefix (every decoded output so far, space-joined) and
/// the output being assembled. One instance per request, owned by the loop
/// and dropped when the request ends; it is never shared.
///
/// # Invariants
/// - The prefix buffer is append-only: its length never decreases
/// - The prefix view fed to the model is always a suffix of the buffer
#[derive(Debug)]
pub struct GenerationContext {
	prefix: String,
	policy: PrefixPolicy,
	carries_prefix: bool,
	output: OutputAssembler,
	generation_calls: usize,
	truncated_tokens: usize,
}

impl GenerationContext {
	/// Creates an empty context.
	///
	/// With `carries_prefix == false` decoded outputs are only assembled,
	/// never fed back (per-sentence variants).
	pub fn new(policy: PrefixPolicy, carries_prefix: bool) -> Self {
		Self {
			prefix: String::new(),
			policy,
			carries_prefix,
			output: OutputAssembler::new(),
			generation_calls: 0,
			truncated_tokens: 0,
		}
	}

	/// Full accumulated prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Part of the prefix fed to the model under the current policy.
	pub fn prefix_view(&self) -> &str {
		match self.policy {
			PrefixPolicy::Unbounded => &self.prefix,
			PrefixPolicy::RecentWords(n) => last_n_words(&self.prefix, n),
		}
	}

	/// Builds the control-code model input for the next window:
	/// `lexical = L, order = O[ prefix] <sent> window </sent>`.
	pub fn compose(&self, code: &ControlCode, window_text: &str) -> String {
		let mut input = code.to_string();
		let view = self.prefix_view();
		if !view.is_empty() {
			input.push(' ');
			input.push_str(view);
		}
		input.push_str(" <sent> ");
		input.push_str(window_text);
		input.push_str(" </sent>");
		input
	}

	/// Records one window's decoded output.
	///
	/// The output is appended to the assembled text and, when this context
	/// carries a prefix, to the prefix as well.
	pub fn record(&mut self, decoded: &str, truncated_tokens: usize) {
		self.generation_calls += 1;
		self.truncated_tokens += truncated_tokens;
		if self.carries_prefix {
			push_joined(&mut self.prefix, decoded);
		}
		self.output.push(decoded);
	}

	/// Number of windows recorded so far.
	pub fn generation_calls(&self) -> usize {
		self.generation_calls
	}

	/// Tokens lost to input truncation so far.
	pub fn truncated_tokens(&self) -> usize {
		self.truncated_tokens
	}

	/// Consumes the context and returns the assembled output.
	pub fn finish(self) -> String {
		self.output.finish()
	}
}
