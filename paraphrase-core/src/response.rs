use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::paraphraser::{Outcome, Paraphraser, Stage};
use crate::error::ParaphraseError;
use crate::request::ParaphraseRequest;

/// Uniform response shape.
///
/// Serialises to `{ "paraphrased": "..." }` or `{ "error": "..." }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParaphraseResponse {
	Paraphrased { paraphrased: String },
	Error { error: String },
}

impl ParaphraseResponse {
	pub fn error(message: impl Into<String>) -> Self {
		ParaphraseResponse::Error { error: message.into() }
	}

	pub fn is_error(&self) -> bool {
		matches!(self, ParaphraseResponse::Error { .. })
	}
}

impl From<Result<Outcome, ParaphraseError>> for ParaphraseResponse {
	fn from(result: Result<Outcome, ParaphraseError>) -> Self {
		match result {
			Ok(outcome) => ParaphraseResponse::Paraphrased { paraphrased: outcome.text },
			Err(e) => ParaphraseResponse::error(e.to_string()),
		}
	}
}

/// Validates a raw request and runs it, keeping the typed result.
///
/// Validation happens before any backend call.
pub fn run(paraphraser: &Paraphraser, raw: &Value) -> Result<Outcome, ParaphraseError> {
	debug!("[{}] {}", paraphraser.config().name, Stage::Validating);
	let request = ParaphraseRequest::from_json(raw).inspect_err(|e| {
		warn!("[{}] {}: {}", paraphraser.config().name, Stage::Failed, e);
	})?;
	paraphraser.paraphrase(&request)
}

/// Request boundary: raw JSON mapping in, uniform response out.
///
/// Every failure, whatever its stage, comes back as `{ "error": string }`.
pub fn handle(paraphraser: &Paraphraser, raw: &Value) -> ParaphraseResponse {
	run(paraphraser, raw).into()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn serializes_untagged() {
		let ok = ParaphraseResponse::Paraphrased { paraphrased: "Hi.".to_owned() };
		assert_eq!(serde_json::to_value(&ok).unwrap(), json!({ "paraphrased": "Hi." }));
		let err = ParaphraseResponse::error("No text provided");
		assert_eq!(serde_json::to_value(&err).unwrap(), json!({ "error": "No text provided" }));
	}

	#[test]
	fn deserializes_both_shapes() {
		let ok: ParaphraseResponse = serde_json::from_value(json!({ "paraphrased": "x" })).unwrap();
		assert!(!ok.is_error());
		let err: ParaphraseResponse = serde_json::from_value(json!({ "error": "boom" })).unwrap();
		assert!(err.is_error());
	}
}
