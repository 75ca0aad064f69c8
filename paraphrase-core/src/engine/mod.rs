//! Top-level module for the paraphrase loop.
//!
//! This module turns a validated request into a paraphrase, including:
//! - Sentence segmentation (`Segmenter`)
//! - Control-code encoding (`ControlCode`)
//! - Fixed-size sentence windows (`Window`)
//! - Request-scoped context and output state (`GenerationContext`)
//! - Per-window backend calls (`GenerationInvoker`)
//! - Echoed-instruction stripping (`sanitize`)
//! - A high-level entry point (`Paraphraser`)

/// High-level interface running the whole loop for one request.
///
/// Validates the variant configuration once, then drives segmentation,
/// windowing and generation for each request it is handed.
pub mod paraphraser;

/// Variant configuration (window size, sampling policy, feature switches).
pub mod config;

/// Sentence segmentation with a rule-based and a punctuation-based splitter.
pub mod segmenter;

/// Inverse encoding of the diversity knobs.
pub mod control_code;

/// Partitioning of a sentence sequence into fixed-size windows.
pub mod window;

/// Request-scoped context prefix and output accumulation.
pub mod context;

/// Formatting of model inputs and the tokenize / generate / decode round trip.
pub mod invoker;

/// Cleanup of instruction echoes in generated text.
pub mod sanitizer;

/// Final concatenation of per-window outputs.
///
/// Used internally by `GenerationContext`.
pub mod assembler;
