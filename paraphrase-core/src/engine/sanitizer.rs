use std::sync::LazyLock;

use regex::Regex;

/// Leading instruction echo, e.g. `Paraphrase:`, `Paraphrased :`, `Output:`.
static INSTRUCTION_ECHO: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(paraphrase[d]?\s*:?\s*|output\s*:?\s*)").expect("echo pattern is valid")
});

/// Strips echoed instructions from the start of a generated output.
///
/// Instruction-tuned models sometimes restate the prompt before answering.
/// The echo is removed repeatedly until none is left (`"Output: Paraphrase: x"`
/// becomes `"x"`), then the result is trimmed. This makes the function
/// idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
///
/// The match has no word boundary, so an output that genuinely starts with
/// one of these words loses it: `"Output grew 5%."` becomes `"grew 5%."`.
pub fn sanitize(raw: &str) -> String {
	let mut rest = raw.trim();
	while let Some(echo) = INSTRUCTION_ECHO.find(rest) {
		rest = rest[echo.end()..].trim_start();
	}
	rest.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_leading_echoes() {
		assert_eq!(sanitize("Paraphrase: The cat sat."), "The cat sat.");
		assert_eq!(sanitize("paraphrased :   The cat sat."), "The cat sat.");
		assert_eq!(sanitize("OUTPUT: The cat sat. "), "The cat sat.");
		assert_eq!(sanitize("  Output: Paraphrase: nested"), "nested");
	}

	#[test]
	fn leaves_inner_mentions_alone() {
		assert_eq!(sanitize("The output: fine."), "The output: fine.");
	}

	#[test]
	fn leading_echo_words_are_stripped_even_as_content() {
		assert_eq!(sanitize("Output grew 5%."), "grew 5%.");
		assert_eq!(sanitize("Paraphrased output: done"), "done");
		assert_eq!(sanitize("Outputs rose."), "s rose.");
	}

	#[test]
	fn echo_only_becomes_empty() {
		assert_eq!(sanitize("Paraphrase:"), "");
	}

	#[test]
	fn is_idempotent() {
		let samples = [
			"",
			"   ",
			"plain text",
			"Paraphrase: x",
			"Output: Output: y ",
			"paraphrasedparaphrase z",
			"Paraphrase : Output : Paraphrased: w",
			"outputs are great",
		];
		for sample in samples {
			let once = sanitize(sample);
			assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
		}
	}
}
