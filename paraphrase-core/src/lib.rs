//! Chunked, context-carrying paraphrase generation.
//!
//! This crate turns an arbitrary-length text into a paraphrase by driving
//! an external sequence-to-sequence generation capability over windows of
//! sentences, including:
//! - Whitespace normalisation and sentence segmentation
//! - Control-code encoding of the user-facing diversity knobs
//! - Fixed-size windowing with a growing context prefix
//! - Nucleus-sampling and beam-search generation policies
//! - Echoed-instruction sanitising and output assembly
//!
//! Model inference itself never happens here: it is reached through the
//! [`backend::GenerationBackend`] trait, which callers inject.

/// Generation capability seam and its implementations.
///
/// Exposes the tokenize / generate / decode contract, the sampling
/// policies, a serialising wrapper and an HTTP-backed capability.
pub mod backend;

/// Paraphrase loop and its building blocks.
///
/// Segmentation, windowing, control codes, context accumulation,
/// generation invocation, sanitising and assembly.
pub mod engine;

/// Error taxonomy shared by every stage.
pub mod error;

/// Request validation (text presence, diversity clamping).
pub mod request;

/// Request boundary: raw JSON in, uniform response out.
pub mod response;

/// Text helpers (whitespace, word tails, joining).
///
/// Not exposed
pub(crate) mod text;

pub use engine::paraphraser::{Outcome, Paraphraser};
pub use engine::config::VariantConfig;
pub use error::{GenerationError, ParaphraseError, ValidationError};
pub use request::ParaphraseRequest;
pub use response::{ParaphraseResponse, handle};
