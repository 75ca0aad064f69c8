use std::fmt;

use crate::request::{MAX_DIVERSITY, ParaphraseRequest};

/// Model-facing control values.
///
/// The model was trained on *similarity* codes: a higher code asks for
/// less change. Codes are therefore the inverse of the user-facing
/// diversity knobs (`code = 100 - diversity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCode {
	pub lexical: u8,
	pub order: u8,
}

impl ControlCode {
	/// Encodes both knobs.
	///
	/// Inputs are expected in `[0, 100]` (the request validator clamps them);
	/// anything above saturates to code `0`.
	pub fn encode(lexical_diversity: u8, order_diversity: u8) -> Self {
		Self { lexical: invert(lexical_diversity), order: invert(order_diversity) }
	}

	/// Encodes the knobs of a validated request.
	pub fn from_request(request: &ParaphraseRequest) -> Self {
		Self::encode(request.lexical_diversity(), request.order_diversity())
	}
}

fn invert(diversity: u8) -> u8 {
	MAX_DIVERSITY.saturating_sub(diversity)
}

/// Renders the control header, e.g. `lexical = 40, order = 60`.
impl fmt::Display for ControlCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "lexical = {}, order = {}", self.lexical, self.order)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_invert_every_knob_value() {
		for d in 0..=100u8 {
			let code = ControlCode::encode(d, d);
			assert_eq!(code.lexical, 100 - d);
			assert_eq!(code.order, 100 - d);
		}
	}

	#[test]
	fn clamped_request_encodes_to_zero() {
		let request = ParaphraseRequest::new("x").unwrap().with_lexical_diversity(150);
		assert_eq!(ControlCode::from_request(&request), ControlCode { lexical: 0, order: 60 });
	}

	#[test]
	fn header_format() {
		assert_eq!(ControlCode::encode(60, 40).to_string(), "lexical = 40, order = 60");
	}
}
