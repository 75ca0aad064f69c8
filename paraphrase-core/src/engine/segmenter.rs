use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::normalize_whitespace;

/// Sentence-final punctuation followed by whitespace.
static PUNCTUATION_BOUNDARY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("boundary pattern is valid"));

/// Lower-cased abbreviations (without their final period) that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
	"mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd", "co",
	"corp", "fig", "vol", "ch", "sec", "approx", "dept", "est", "gen", "gov", "sgt", "capt",
	"lt", "col", "rev", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
	"nov", "dec", "e.g", "i.e", "a.m", "p.m", "u.s", "u.k", "cf", "al",
];

/// Characters that may trail sentence-final punctuation and still belong to the sentence.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Characters that may open a word before its first letter.
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '\u{201C}', '\u{2018}', '\u{00AB}'];

/// An ordered, immutable list of sentences.
///
/// # Invariants
/// - No sentence is empty
/// - Joining the sentences with single spaces yields the whitespace-normalised source text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentenceSequence(Vec<String>);

impl SentenceSequence {
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Joins all sentences with single spaces.
	pub fn join(&self) -> String {
		self.0.join(" ")
	}
}

/// Which segmenter a variant uses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
	/// [`RuleSegmenter`]
	Rules,
	/// [`PunctuationSegmenter`]
	Punctuation,
}

impl SegmenterKind {
	pub fn build(self) -> Box<dyn Segmenter> {
		match self {
			SegmenterKind::Rules => Box::new(RuleSegmenter),
			SegmenterKind::Punctuation => Box::new(PunctuationSegmenter),
		}
	}
}

/// Splits text into sentences.
///
/// Implementors only split already-normalised text; [`Segmenter::segment`]
/// does the normalisation and drops empty pieces. Splitting must be
/// deterministic.
pub trait Segmenter: Send + Sync {
	/// Splits whitespace-normalised text (single spaces, trimmed).
	fn split_normalized(&self, text: &str) -> Vec<String>;

	/// Normalises `text`, splits it and drops empty segments.
	fn segment(&self, text: &str) -> SentenceSequence {
		let normalized = normalize_whitespace(text);
		if normalized.is_empty() {
			return SentenceSequence::default();
		}
		let sentences = self
			.split_normalized(&normalized)
			.into_iter()
			.map(|s| s.trim().to_owned())
			.filter(|s| !s.is_empty())
			.collect();
		SentenceSequence(sentences)
	}
}

/// Splits after `.`, `!` or `?` followed by whitespace.
///
/// Lower fidelity: abbreviations such as `Dr.` end a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl Segmenter for PunctuationSegmenter {
	fn split_normalized(&self, text: &str) -> Vec<String> {
		let mut sentences = Vec::new();
		let mut start = 0;
		for boundary in PUNCTUATION_BOUNDARY.find_iter(text) {
			// The punctuation is ASCII, so +1 stays on a char boundary.
			let end = boundary.start() + 1;
			sentences.push(text[start..end].to_owned());
			start = boundary.end();
		}
		if start < text.len() {
			sentences.push(text[start..].to_owned());
		}
		sentences
	}
}

/// Language-aware rules for English-like text.
///
/// A word ending in `.`, `!` or `?` (optionally followed by closing quotes
/// or brackets) ends a sentence unless:
/// - it is a known abbreviation (`Dr.`, `e.g.`, `U.S.`), or `No.` before a number
/// - it is a single-letter initial inside a name (`J. R. Tolkien`, `John F. Kennedy`)
/// - the next word starts with a lowercase letter
///
/// The pronoun `I.` is never an initial.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
	fn ends_sentence(prev: Option<&str>, word: &str, next: Option<&str>) -> bool {
		let core = word.trim_end_matches(CLOSERS);
		let Some(last) = core.chars().last() else { return false };
		if !matches!(last, '.' | '!' | '?') {
			return false;
		}

		let next_first = next.and_then(|n| n.trim_start_matches(OPENERS).chars().next());
		if next_first.is_some_and(char::is_lowercase) {
			return false;
		}

		if last == '.' {
			let stem = core.trim_end_matches('.').trim_start_matches(OPENERS);
			let lower = stem.to_lowercase();
			if lower == "no" {
				return !next_first.is_some_and(|c| c.is_ascii_digit());
			}
			if ABBREVIATIONS.contains(&lower.as_str()) || Self::is_name_initial(prev, stem, next) {
				return false;
			}
		}

		true
	}

	/// `stem` is a lone capital (not `I`) followed by another initial, or
	/// by a capitalised word when the preceding word is part of the name.
	fn is_name_initial(prev: Option<&str>, stem: &str, next: Option<&str>) -> bool {
		if !is_initial_letter(stem) {
			return false;
		}
		let Some(next) = next else { return false };
		if looks_like_initial(next) {
			return true;
		}
		is_capitalized(next) && prev.is_none_or(|p| looks_like_initial(p) || is_capitalized(p))
	}
}

fn is_initial_letter(stem: &str) -> bool {
	let mut letters = stem.chars();
	matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase() && c != 'I')
}

/// A word shaped like `R.`.
fn looks_like_initial(word: &str) -> bool {
	let word = word.trim_start_matches(OPENERS).trim_end_matches(CLOSERS);
	word.strip_suffix('.').is_some_and(is_initial_letter)
}

fn is_capitalized(word: &str) -> bool {
	word.trim_start_matches(OPENERS).chars().next().is_some_and(char::is_uppercase)
}

impl Segmenter for RuleSegmenter {
	fn split_normalized(&self, text: &str) -> Vec<String> {
		let words: Vec<&str> = text.split(' ').collect();
		let mut sentences = Vec::new();
		let mut current: Vec<&str> = Vec::new();

		for (i, word) in words.iter().enumerate() {
			current.push(word);
			let prev = i.checked_sub(1).map(|j| words[j]);
			if Self::ends_sentence(prev, word, words.get(i + 1).copied()) {
				sentences.push(current.join(" "));
				current.clear();
			}
		}
		if !current.is_empty() {
			sentences.push(current.join(" "));
		}
		sentences
	}
}
