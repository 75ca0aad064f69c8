use super::segmenter::SentenceSequence;

/// A contiguous, non-overlapping slice of the sentence sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
	/// Position of the window (0-based).
	pub index: usize,
	pub sentences: &'a [String],
}

impl Window<'_> {
	/// Joins the window's sentences with single spaces.
	pub fn text(&self) -> String {
		self.sentences.join(" ")
	}
}

/// Partitions `sentences` into windows of at most `size` sentences.
///
/// # Behavior
/// - Produces `ceil(len / size)` windows, in order
/// - Every window but the last holds exactly `size` sentences
/// - An empty sequence yields no window
/// - `size == 0` is treated as `1`
pub fn window(sentences: &SentenceSequence, size: usize) -> Vec<Window<'_>> {
	sentences
		.as_slice()
		.chunks(size.max(1))
		.enumerate()
		.map(|(index, sentences)| Window { index, sentences })
		.collect()
}

/// Number of windows `window` produces for `len` sentences.
pub fn window_count(len: usize, size: usize) -> usize {
	len.div_ceil(size.max(1))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::segmenter::{PunctuationSegmenter, Segmenter};

	fn sequence(n: usize) -> SentenceSequence {
		let text: Vec<String> = (1..=n).map(|i| format!("Sentence {i}.")).collect();
		PunctuationSegmenter.segment(&text.join(" "))
	}

	#[test]
	fn seven_sentences_make_three_windows() {
		let sentences = sequence(7);
		let windows = window(&sentences, 3);
		let sizes: Vec<usize> = windows.iter().map(|w| w.sentences.len()).collect();
		assert_eq!(sizes, vec![3, 3, 1]);
		assert_eq!(windows[2].text(), "Sentence 7.");
		assert_eq!(windows[0].text(), "Sentence 1. Sentence 2. Sentence 3.");
	}

	#[test]
	fn windows_partition_the_sequence() {
		for n in 0..12 {
			let sentences = sequence(n);
			for size in 1..5 {
				let windows = window(&sentences, size);
				assert_eq!(windows.len(), window_count(n, size));
				let rebuilt: Vec<String> = windows.iter().flat_map(|w| w.sentences.iter().cloned()).collect();
				assert_eq!(rebuilt.as_slice(), sentences.as_slice());
				assert!(windows.iter().enumerate().all(|(i, w)| w.index == i));
			}
		}
	}

	#[test]
	fn empty_sequence_has_no_window() {
		assert!(window(&SentenceSequence::default(), 3).is_empty());
	}
}
