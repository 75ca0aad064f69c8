use crate::text::push_joined;

/// Accumulates per-window outputs in order.
///
/// Outputs are concatenated verbatim (no reordering, no deduplication),
/// separated by single spaces. Blank outputs contribute nothing.
#[derive(Debug, Default, Clone)]
pub struct OutputAssembler {
	output: String,
	parts: usize,
}

impl OutputAssembler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one window's output.
	pub fn push(&mut self, piece: &str) {
		let before = self.output.len();
		push_joined(&mut self.output, piece);
		if self.output.len() != before {
			self.parts += 1;
		}
	}

	/// Number of non-blank outputs appended so far.
	pub fn parts(&self) -> usize {
		self.parts
	}

	/// Returns the trimmed, assembled text.
	pub fn finish(self) -> String {
		self.output.trim().to_owned()
	}
}
