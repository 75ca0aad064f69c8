use std::sync::Mutex;

use super::{GenerationBackend, GenerationParams, TokenizedInput};
use crate::error::GenerationError;

/// Funnels every call to the wrapped backend through a single lock.
///
/// Only `B: Send` is required, so backends holding non-`Sync` state
/// (a loaded model with interior scratch buffers, for instance) can still be
/// shared across request threads. Concurrent requests queue on the lock;
/// each keeps its own context, only backend calls are serialised.
#[derive(Debug)]
pub struct SerializedBackend<B> {
	inner: Mutex<B>,
}

impl<B: Send> SerializedBackend<B> {
	pub fn new(inner: B) -> Self {
		Self { inner: Mutex::new(inner) }
	}

	/// Returns the wrapped backend.
	///
	/// # Errors
	/// Returns [`GenerationError::Poisoned`] if a previous call panicked.
	pub fn into_inner(self) -> Result<B, GenerationError> {
		self.inner.into_inner().map_err(|_| GenerationError::Poisoned)
	}

	fn with<T>(&self, call: impl FnOnce(&B) -> Result<T, GenerationError>) -> Result<T, GenerationError> {
		let backend = self.inner.lock().map_err(|_| GenerationError::Poisoned)?;
		call(&*backend)
	}
}

impl<B: GenerationBackendUnsync + Send> GenerationBackend for SerializedBackend<B> {
	fn tokenize(&self, text: &str, max_length: Option<usize>) -> Result<TokenizedInput, GenerationError> {
		self.with(|b| b.tokenize_unsync(text, max_length))
	}

	fn generate(&self, input: &[u32], params: &GenerationParams) -> Result<Vec<u32>, GenerationError> {
		self.with(|b| b.generate_unsync(input, params))
	}

	fn decode(&self, ids: &[u32]) -> Result<String, GenerationError> {
		self.with(|b| b.decode_unsync(ids))
	}
}

/// Same contract as [`GenerationBackend`] without the `Sync` requirement.
///
/// Implement this for backends that can only be used from one thread at a
/// time, then share them through [`SerializedBackend`]. Every
/// [`GenerationBackend`] implements it too.
pub trait GenerationBackendUnsync {
	fn tokenize_unsync(&self, text: &str, max_length: Option<usize>) -> Result<TokenizedInput, GenerationError>;
	fn generate_unsync(&self, input: &[u32], params: &GenerationParams) -> Result<Vec<u32>, GenerationError>;
	fn decode_unsync(&self, ids: &[u32]) -> Result<String, GenerationError>;
}

impl<T: GenerationBackend> GenerationBackendUnsync for T {
	fn tokenize_unsync(&self, text: &str, max_length: Option<usize>) -> Result<TokenizedInput, GenerationError> {
		self.tokenize(text, max_length)
	}

	fn generate_unsync(&self, input: &[u32], params: &GenerationParams) -> Result<Vec<u32>, GenerationError> {
		self.generate(input, params)
	}

	fn decode_unsync(&self, ids: &[u32]) -> Result<String, GenerationError> {
		self.decode(ids)
	}
}
