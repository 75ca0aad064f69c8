mod common;

use common::ScriptedBackend;
use paraphrase_core::response::run;
use paraphrase_core::{ParaphraseResponse, Paraphraser, VariantConfig, handle};
use serde_json::json;

fn control_code() -> (std::sync::Arc<ScriptedBackend>, Paraphraser) {
	let backend = ScriptedBackend::numbered();
	let paraphraser = Paraphraser::new(backend.clone(), VariantConfig::control_code()).unwrap();
	(backend, paraphraser)
}

#[test]
fn empty_text_fails_before_generation() {
	let (backend, paraphraser) = control_code();

	for raw in [json!({ "text": "" }), json!({}), json!({ "text": "  \n " })] {
		let response = handle(&paraphraser, &raw);
		assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "error": "No text provided" }));
	}
	assert!(backend.generate_calls().is_empty());
	assert!(backend.model_inputs().is_empty());
}

#[test]
fn successful_request_has_paraphrased_shape() {
	let (_, paraphraser) = control_code();
	let response = handle(&paraphraser, &json!({ "text": "Hello world." }));
	assert_eq!(response, ParaphraseResponse::Paraphrased { paraphrased: "Out0.".to_owned() });
}

#[test]
fn over_range_diversity_is_clamped() {
	let (backend, paraphraser) = control_code();
	let response = handle(&paraphraser, &json!({ "text": "Hello world.", "lex_diversity": 150, "order_diversity": "40" }));
	assert!(!response.is_error());
	assert!(backend.model_inputs()[0].starts_with("lexical = 0, order = 60 "));
}

#[test]
fn non_numeric_diversity_is_a_validation_error() {
	let (backend, paraphraser) = control_code();
	let err = run(&paraphraser, &json!({ "text": "Hi.", "lex_diversity": "high" })).unwrap_err();
	assert!(err.is_validation());
	assert_eq!(err.to_string(), "invalid diversity value for 'lex_diversity'");
	assert!(backend.generate_calls().is_empty());
}

#[test]
fn generation_failure_collapses_to_error_string() {
	let backend = ScriptedBackend::new(|_, call| if call == 0 { Ok("ok.".to_owned()) } else { Err("malformed token stream".to_owned()) });
	let paraphraser = Paraphraser::new(backend, VariantConfig::control_code()).unwrap();

	let text = "One. Two. Three. Four.";
	let value = serde_json::to_value(handle(&paraphraser, &json!({ "text": text }))).unwrap();

	let message = value["error"].as_str().unwrap();
	assert!(message.contains("malformed token stream"));
	assert!(value.get("paraphrased").is_none());
}

#[test]
fn length_matching_ignores_diversity_knobs() {
	let backend = ScriptedBackend::numbered();
	let paraphraser = Paraphraser::new(backend.clone(), VariantConfig::length_matching()).unwrap();
	let response = handle(&paraphraser, &json!({ "text": "Just this.", "lex_diversity": 99 }));
	assert_eq!(response, ParaphraseResponse::Paraphrased { paraphrased: "Out0.".to_owned() });
	assert_eq!(backend.model_inputs(), vec!["Paraphrase: Just this."]);
}
