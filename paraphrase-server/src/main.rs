use std::io;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use env_logger::Env;
use log::info;

use paraphrase_core::Paraphraser;

mod config;
mod routes;

use config::ServerConfig;
use routes::AppState;

/// Builds the CORS policy: any origin when none is configured.
fn cors(origins: &[String]) -> Cors {
	if origins.is_empty() {
		return Cors::permissive();
	}
	origins
		.iter()
		.fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
		.allowed_methods(["GET", "POST"])
		.allow_any_header()
		.max_age(3600)
}

/// Main entry point for the server.
///
/// Builds the generation capability and the paraphraser once, shares them
/// through `web::Data`, and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000 unless configured otherwise.
/// - The backend is created before the runtime starts: its HTTP client is blocking.
fn main() -> io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let config = ServerConfig::parse();
	let variant = config.variant_config();
	let backend = config.build_backend().map_err(io::Error::other)?;
	let paraphraser = Paraphraser::new(backend, variant).map_err(io::Error::other)?;

	info!(
		"variant '{}' over {} ({} worker(s), serialized backend: {})",
		paraphraser.config().name,
		config.backend_url,
		config.workers(),
		config.serialize_backend
	);

	let state = web::Data::new(AppState { paraphraser, request_timeout: config.request_timeout() });

	actix_web::rt::System::new().block_on(async move {
		let origins = config.cors_origins.clone();
		let max_body_bytes = config.max_body_bytes;

		HttpServer::new(move || {
			App::new()
				.wrap(Logger::default())
				.wrap(cors(&origins))
				.app_data(state.clone())
				.configure(routes::configure(max_body_bytes))
		})
			.workers(config.workers())
			.bind((config.host.as_str(), config.port))?
			.run()
			.await
	})
}
