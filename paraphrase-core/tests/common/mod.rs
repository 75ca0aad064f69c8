//! Scripted in-memory generation backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use paraphrase_core::backend::{GenerationBackend, GenerationParams, TokenizedInput};
use paraphrase_core::GenerationError;

type Responder = dyn Fn(&str, usize) -> Result<String, String> + Send + Sync;

/// Whitespace "tokenizer" plus a responder closure standing in for the model.
///
/// The responder receives the decoded (possibly truncated) model input and
/// the 0-based index of the generate call.
pub struct ScriptedBackend {
	vocab: Mutex<Vec<String>>,
	tokenized: Mutex<Vec<(String, Option<usize>)>>,
	params: Mutex<Vec<GenerationParams>>,
	responder: Box<Responder>,
}

impl ScriptedBackend {
	pub fn new(responder: impl Fn(&str, usize) -> Result<String, String> + Send + Sync + 'static) -> Arc<Self> {
		Arc::new(Self {
			vocab: Mutex::new(Vec::new()),
			tokenized: Mutex::new(Vec::new()),
			params: Mutex::new(Vec::new()),
			responder: Box::new(responder),
		})
	}

	/// Answers `Out{call}.` for every call.
	pub fn numbered() -> Arc<Self> {
		Self::new(|_, call| Ok(format!("Out{call}.")))
	}

	/// Answers with the window text, upper-cased.
	pub fn shouting() -> Arc<Self> {
		Self::new(|input, _| Ok(window_of(input).to_uppercase()))
	}

	/// Model inputs, i.e. every tokenize call that carried a length limit.
	pub fn model_inputs(&self) -> Vec<String> {
		self.tokenized
			.lock()
			.unwrap()
			.iter()
			.filter(|(_, max)| max.is_some())
			.map(|(text, _)| text.clone())
			.collect()
	}

	pub fn generate_calls(&self) -> Vec<GenerationParams> {
		self.params.lock().unwrap().clone()
	}

	fn intern(&self, text: &str) -> Vec<u32> {
		let mut vocab = self.vocab.lock().unwrap();
		text.split_whitespace()
			.map(|word| match vocab.iter().position(|w| w == word) {
				Some(id) => id as u32,
				None => {
					vocab.push(word.to_owned());
					(vocab.len() - 1) as u32
				}
			})
			.collect()
	}

	fn words(&self, ids: &[u32]) -> String {
		let vocab = self.vocab.lock().unwrap();
		ids.iter().map(|&id| vocab[id as usize].as_str()).collect::<Vec<_>>().join(" ")
	}
}

impl GenerationBackend for ScriptedBackend {
	fn tokenize(&self, text: &str, max_length: Option<usize>) -> Result<TokenizedInput, GenerationError> {
		self.tokenized.lock().unwrap().push((text.to_owned(), max_length));
		let mut ids = self.intern(text);
		let truncated = match max_length {
			Some(max) if ids.len() > max => {
				let dropped = ids.len() - max;
				ids.truncate(max);
				dropped
			}
			_ => 0,
		};
		Ok(TokenizedInput { ids, truncated })
	}

	fn generate(&self, input: &[u32], params: &GenerationParams) -> Result<Vec<u32>, GenerationError> {
		let call = {
			let mut calls = self.params.lock().unwrap();
			calls.push(params.clone());
			calls.len() - 1
		};
		let prompt = self.words(input);
		let output = (self.responder)(&prompt, call).map_err(GenerationError::Backend)?;
		Ok(self.intern(&output))
	}

	fn decode(&self, ids: &[u32]) -> Result<String, GenerationError> {
		Ok(self.words(ids))
	}
}

/// Extracts the window text from either prompt format.
pub fn window_of(input: &str) -> &str {
	if let (Some(start), Some(end)) = (input.find("<sent> "), input.rfind(" </sent>")) {
		return &input[start + "<sent> ".len()..end];
	}
	input.strip_prefix("Paraphrase: ").unwrap_or(input)
}

/// `n` numbered sentences: `Sentence 1. Sentence 2. ...`
pub fn sentences(n: usize) -> String {
	(1..=n).map(|i| format!("Sentence {i}.")).collect::<Vec<_>>().join(" ")
}
