use std::time::Duration;

use actix_web::error::InternalError;
use actix_web::rt::time::timeout;
use actix_web::{HttpResponse, Responder, get, post, web};
use log::{error, info, warn};
use serde_json::{Value, json};

use paraphrase_core::response::run;
use paraphrase_core::{ParaphraseResponse, Paraphraser};

/// State shared by every worker.
///
/// The paraphraser (and the generation capability inside it) is built once
/// at startup; each request gets its own context inside the loop.
pub struct AppState {
	pub paraphraser: Paraphraser,
	pub request_timeout: Duration,
}

/// HTTP POST endpoint `/v1/paraphrase`
///
/// Body: `{ "text": string, "lex_diversity"?: int, "order_diversity"?: int }`.
/// Answers `{ "paraphrased": string }` or `{ "error": string }`:
/// - 400 for validation failures
/// - 500 for generation failures
/// - 504 when the whole request exceeds the configured timeout
///
/// The loop runs on the blocking pool. A timed-out request is abandoned as a
/// whole; no partial output is returned.
#[post("/v1/paraphrase")]
async fn post_paraphrase(data: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
	let state = data.into_inner();
	let request_timeout = state.request_timeout;
	let raw = body.into_inner();

	let job = web::block(move || run(&state.paraphraser, &raw));
	match timeout(request_timeout, job).await {
		Err(_) => {
			warn!("paraphrase request timed out after {:?}", request_timeout);
			HttpResponse::GatewayTimeout().json(ParaphraseResponse::error("Request timed out"))
		}
		Ok(Err(e)) => {
			error!("paraphrase worker failed: {e}");
			HttpResponse::InternalServerError().json(ParaphraseResponse::error("Paraphrase worker failed"))
		}
		Ok(Ok(Ok(outcome))) => {
			info!(
				"paraphrased {} sentence(s) in {} call(s), {} truncated token(s)",
				outcome.sentences, outcome.generation_calls, outcome.truncated_tokens
			);
			HttpResponse::Ok().json(ParaphraseResponse::from(Ok(outcome)))
		}
		Ok(Ok(Err(e))) if e.is_validation() => HttpResponse::BadRequest().json(ParaphraseResponse::error(e.to_string())),
		Ok(Ok(Err(e))) => HttpResponse::InternalServerError().json(ParaphraseResponse::error(e.to_string())),
	}
}

#[get("/v1/health")]
async fn get_health(data: web::Data<AppState>) -> impl Responder {
	HttpResponse::Ok().json(json!({ "status": "ok", "variant": data.paraphraser.config().name }))
}

#[get("/v1/variant")]
async fn get_variant(data: web::Data<AppState>) -> impl Responder {
	HttpResponse::Ok().json(data.paraphraser.config())
}

/// Registers the endpoints, with malformed JSON answered in the uniform error shape.
pub fn configure(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
	move |cfg: &mut web::ServiceConfig| {
		let json_config = web::JsonConfig::default().limit(max_body_bytes).error_handler(|err, _req| {
			let response = HttpResponse::BadRequest().json(ParaphraseResponse::error(err.to_string()));
			InternalError::from_response(err, response).into()
		});

		cfg.app_data(json_config)
			.service(post_paraphrase)
			.service(get_health)
			.service(get_variant);
	}
}
