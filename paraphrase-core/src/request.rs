use serde_json::Value;

use crate::error::ValidationError;

/// Default lexical diversity when the caller does not provide one.
pub const DEFAULT_LEXICAL_DIVERSITY: u8 = 60;

/// Default order diversity when the caller does not provide one.
pub const DEFAULT_ORDER_DIVERSITY: u8 = 40;

/// Upper bound of both diversity knobs.
pub const MAX_DIVERSITY: u8 = 100;

/// A validated paraphrase request.
///
/// `ParaphraseRequest` holds the text to rewrite and the two user-facing
/// diversity knobs. It can only be obtained through validation, so every
/// instance satisfies the invariants below.
///
/// # Invariants
/// - `text` is non-empty after trimming
/// - `lexical_diversity` and `order_diversity` are within `[0, 100]`
///
/// Variants that do not use control codes simply ignore the knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParaphraseRequest {
	/// Raw text as received (normalised later by the segmenter).
	text: String,

	/// 0 = keep wording, 100 = change as many words as possible.
	lexical_diversity: u8,

	/// 0 = keep sentence order, 100 = reorder freely.
	order_diversity: u8,
}

impl ParaphraseRequest {
	/// Creates a request with default diversity knobs.
	///
	/// # Errors
	/// Returns [`ValidationError::MissingText`] if `text` is blank.
	pub fn new(text: &str) -> Result<Self, ValidationError> {
		if text.trim().is_empty() {
			return Err(ValidationError::MissingText);
		}
		Ok(Self {
			text: text.to_owned(),
			lexical_diversity: DEFAULT_LEXICAL_DIVERSITY,
			order_diversity: DEFAULT_ORDER_DIVERSITY,
		})
	}

	/// Validates a raw JSON mapping.
	///
	/// Recognised keys:
	/// - `text` (required string)
	/// - `lex_diversity` (alias `lexical_diversity`), optional
	/// - `order_diversity`, optional
	///
	/// Absent or `null` knobs take their defaults. Present knobs are coerced
	/// with integer semantics (see [`coerce_diversity`]) and then clamped.
	///
	/// # Errors
	/// - [`ValidationError::MissingText`] when `text` is absent, not a string or blank.
	/// - [`ValidationError::InvalidDiversity`] when a knob is not numeric.
	pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
		let text = raw.get("text").and_then(Value::as_str).unwrap_or_default();
		let mut request = Self::new(text)?;

		let present = |key: &str| raw.get(key).filter(|v| !v.is_null());
		if let Some(value) = present("lex_diversity").or_else(|| present("lexical_diversity")) {
			request.set_lexical_diversity(coerce_diversity(value, "lex_diversity")?);
		}
		if let Some(value) = present("order_diversity") {
			request.set_order_diversity(coerce_diversity(value, "order_diversity")?);
		}

		Ok(request)
	}

	/// Returns the raw text.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the clamped lexical diversity.
	pub fn lexical_diversity(&self) -> u8 {
		self.lexical_diversity
	}

	/// Returns the clamped order diversity.
	pub fn order_diversity(&self) -> u8 {
		self.order_diversity
	}

	/// Sets the lexical diversity, clamping it into `[0, 100]`.
	pub fn set_lexical_diversity(&mut self, diversity: i64) {
		self.lexical_diversity = clamp_diversity(diversity);
	}

	/// Sets the order diversity, clamping it into `[0, 100]`.
	pub fn set_order_diversity(&mut self, diversity: i64) {
		self.order_diversity = clamp_diversity(diversity);
	}

	/// Builder-style variant of [`set_lexical_diversity`](Self::set_lexical_diversity).
	pub fn with_lexical_diversity(mut self, diversity: i64) -> Self {
		self.set_lexical_diversity(diversity);
		self
	}

	/// Builder-style variant of [`set_order_diversity`](Self::set_order_diversity).
	pub fn with_order_diversity(mut self, diversity: i64) -> Self {
		self.set_order_diversity(diversity);
		self
	}
}

/// Clamps any integer into the `[0, 100]` knob range.
pub fn clamp_diversity(diversity: i64) -> u8 {
	diversity.clamp(0, MAX_DIVERSITY as i64) as u8
}

/// Coerces a JSON value to an integer knob.
///
/// # Behavior
/// - Integers are taken as-is.
/// - Finite floats are truncated toward zero (`60.9` → `60`).
/// - Strings holding an integer (surrounding whitespace allowed) are parsed.
/// - Everything else (booleans, arrays, objects, `"abc"`, `NaN`) is rejected.
///
/// # Errors
/// Returns [`ValidationError::InvalidDiversity`] naming `field`.
pub fn coerce_diversity(value: &Value, field: &'static str) -> Result<i64, ValidationError> {
	let invalid = || ValidationError::InvalidDiversity { field };
	match value {
		Value::Number(n) => {
			if let Some(i) = n.as_i64() {
				Ok(i)
			} else if let Some(u) = n.as_u64() {
				Ok(i64::try_from(u).unwrap_or(i64::MAX))
			} else {
				match n.as_f64() {
					Some(f) if f.is_finite() => Ok(f.trunc() as i64),
					_ => Err(invalid()),
				}
			}
		}
		Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
		_ => Err(invalid()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn defaults_apply_when_knobs_absent() {
		let request = ParaphraseRequest::from_json(&json!({ "text": "Hello world." })).unwrap();
		assert_eq!(request.lexical_diversity(), 60);
		assert_eq!(request.order_diversity(), 40);
		assert_eq!(request.text(), "Hello world.");
	}

	#[test]
	fn missing_or_blank_text_is_rejected() {
		for raw in [json!({}), json!({ "text": "" }), json!({ "text": "   \n" }), json!({ "text": 42 })] {
			assert_eq!(ParaphraseRequest::from_json(&raw), Err(ValidationError::MissingText));
		}
	}

	#[test]
	fn knobs_are_clamped() {
		let raw = json!({ "text": "x", "lex_diversity": 150, "order_diversity": -20 });
		let request = ParaphraseRequest::from_json(&raw).unwrap();
		assert_eq!(request.lexical_diversity(), 100);
		assert_eq!(request.order_diversity(), 0);
	}

	#[test]
	fn knobs_accept_numeric_strings_and_floats() {
		let raw = json!({ "text": "x", "lexical_diversity": " 75 ", "order_diversity": 20.9 });
		let request = ParaphraseRequest::from_json(&raw).unwrap();
		assert_eq!(request.lexical_diversity(), 75);
		assert_eq!(request.order_diversity(), 20);
	}

	#[test]
	fn null_knob_falls_back_to_default() {
		let raw = json!({ "text": "x", "lex_diversity": null });
		assert_eq!(ParaphraseRequest::from_json(&raw).unwrap().lexical_diversity(), 60);
	}

	#[test]
	fn null_knob_does_not_hide_its_alias() {
		let raw = json!({ "text": "x", "lex_diversity": null, "lexical_diversity": 70 });
		assert_eq!(ParaphraseRequest::from_json(&raw).unwrap().lexical_diversity(), 70);
	}

	#[test]
	fn non_numeric_knob_is_rejected() {
		let raw = json!({ "text": "x", "order_diversity": "lots" });
		assert_eq!(
			ParaphraseRequest::from_json(&raw),
			Err(ValidationError::InvalidDiversity { field: "order_diversity" })
		);
		let raw = json!({ "text": "x", "lex_diversity": true });
		assert!(ParaphraseRequest::from_json(&raw).is_err());
	}

	#[test]
	fn text_is_checked_before_knobs() {
		let raw = json!({ "lex_diversity": "lots" });
		assert_eq!(ParaphraseRequest::from_json(&raw), Err(ValidationError::MissingText));
	}
}
