/// Collapses every run of whitespace into a single space and trims both ends.
///
/// Examples:
/// - `"  a\n\tb  "` → `"a b"`
/// - `"\n\n"` → `""`
pub(crate) fn normalize_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the last `n` whitespace-separated words of a string.
///
/// - Returns the whole (trimmed) string if it holds `n` words or fewer
/// - Returns an empty string when `n == 0`
///
/// The result borrows from `s`, so interior spacing is preserved as-is.
pub(crate) fn last_n_words(s: &str, n: usize) -> &str {
	let s = s.trim();
	if n == 0 {
		return "";
	}

	let mut seen = 0;
	let mut in_word = false;
	for (i, c) in s.char_indices().rev() {
		if c.is_whitespace() {
			if in_word {
				seen += 1;
				in_word = false;
				if seen == n {
					return s[i + c.len_utf8()..].trim_start();
				}
			}
		} else {
			in_word = true;
		}
	}
	s
}

/// Appends `piece` to `buffer`, separated by a single space.
///
/// Empty (or whitespace-only) pieces are ignored so the buffer never
/// carries doubled separators.
pub(crate) fn push_joined(buffer: &mut String, piece: &str) {
	let piece = piece.trim();
	if piece.is_empty() {
		return;
	}
	if !buffer.is_empty() {
		buffer.push(' ');
	}
	buffer.push_str(piece);
}
