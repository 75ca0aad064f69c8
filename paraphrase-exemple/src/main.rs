use std::env;
use std::sync::Arc;

use paraphrase_core::backend::{RemoteBackend, SerializedBackend};
use paraphrase_core::engine::context::PrefixPolicy;
use paraphrase_core::engine::segmenter::{PunctuationSegmenter, RuleSegmenter, Segmenter};
use paraphrase_core::engine::window::window;
use paraphrase_core::{ParaphraseRequest, Paraphraser, VariantConfig, handle};
use serde_json::json;

const TEXT: &str = "The quick brown fox jumps over the lazy dog. Dr. Smith watched from \
    the porch. It was, e.g. for him, a normal morning. Then the dog woke up! Did the fox \
    run? It did. Nobody saw where it went.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The inference endpoint exposing /tokenize, /generate and /decode
    let url = env::args().nth(1).unwrap_or_else(|| "http://127.0.0.1:8000".to_owned());

    // Segmentation and windowing need no model
    let rules = RuleSegmenter.segment(TEXT);
    let punctuation = PunctuationSegmenter.segment(TEXT);
    println!("{} sentences with rules, {} with punctuation only", rules.len(), punctuation.len());
    for w in window(&rules, 3) {
        println!("window {}: {}", w.index, w.text());
    }

    // Knobs are clamped into [0, 100]
    let request = ParaphraseRequest::new(TEXT)?
        .with_lexical_diversity(150)
        .with_order_diversity(40);
    println!("lexical diversity clamped to {}", request.lexical_diversity());

    // Blank text never reaches the model
    match ParaphraseRequest::new("   ") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Blank text rejected: {e}"),
    }

    // Control-code variant, keeping only the last 300 words of context.
    // The endpoint handles one call at a time, so calls are serialized.
    let backend = Arc::new(SerializedBackend::new(RemoteBackend::new(&url)?));
    let config = VariantConfig::control_code().with_prefix_policy(PrefixPolicy::RecentWords(300));
    let paraphraser = Paraphraser::new(backend.clone(), config)?;

    match paraphraser.paraphrase(&request) {
        Ok(outcome) => {
            println!("Paraphrased ({} windows): {}", outcome.windows, outcome.text);
            if outcome.truncated_tokens > 0 {
                println!("{} input tokens were truncated", outcome.truncated_tokens);
            }
        }
        Err(e) => println!("Paraphrase failed: {e}"),
    }

    // Length-matching variant through the JSON boundary
    let sentence_by_sentence = Paraphraser::new(backend, VariantConfig::length_matching())?;
    let raw = json!({ "text": TEXT });
    println!("{}", serde_json::to_string(&handle(&sentence_by_sentence, &raw))?);

    Ok(())
}
