use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use paraphrase_core::backend::{GenerationBackend, RemoteBackend, SerializedBackend};
use paraphrase_core::engine::context::PrefixPolicy;
use paraphrase_core::{GenerationError, VariantConfig};

/// Command-line (and environment) configuration of the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "paraphrase-server", version, about = "HTTP front-end for the chunked paraphraser")]
pub struct ServerConfig {
	/// Address to bind.
	#[arg(long, env = "PARAPHRASE_HOST", default_value = "127.0.0.1")]
	pub host: String,

	#[arg(long, env = "PARAPHRASE_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Base URL of the inference endpoint (`/tokenize`, `/generate`, `/decode`).
	#[arg(long, env = "PARAPHRASE_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
	pub backend_url: String,

	/// `control-code` or `length-matching`.
	#[arg(long, env = "PARAPHRASE_VARIANT", default_value = "control-code", value_parser = parse_variant)]
	pub variant: VariantConfig,

	/// HTTP workers; defaults to the number of CPUs.
	#[arg(long, env = "PARAPHRASE_WORKERS")]
	pub workers: Option<usize>,

	/// Whole-request timeout in seconds.
	#[arg(long, env = "PARAPHRASE_REQUEST_TIMEOUT", default_value_t = 600)]
	pub request_timeout: u64,

	/// Per backend call timeout in seconds.
	#[arg(long, env = "PARAPHRASE_BACKEND_TIMEOUT", default_value_t = 300)]
	pub backend_timeout: u64,

	/// Fixed sampling seed (stochastic variants only).
	#[arg(long, env = "PARAPHRASE_SEED")]
	pub seed: Option<u64>,

	/// Feed only the most recent N words of context back to the model.
	#[arg(long, env = "PARAPHRASE_PREFIX_WORDS")]
	pub prefix_words: Option<usize>,

	/// Serialise backend calls (for endpoints that cannot take concurrent requests).
	#[arg(long, env = "PARAPHRASE_SERIALIZE_BACKEND")]
	pub serialize_backend: bool,

	/// Allowed CORS origins, comma separated; any origin when empty.
	#[arg(long, env = "PARAPHRASE_CORS_ORIGINS", value_delimiter = ',')]
	pub cors_origins: Vec<String>,

	/// Maximum JSON body size in bytes.
	#[arg(long, env = "PARAPHRASE_MAX_BODY", default_value_t = 1 << 20)]
	pub max_body_bytes: usize,
}

fn parse_variant(name: &str) -> Result<VariantConfig, String> {
	VariantConfig::by_name(name).ok_or_else(|| format!("unknown variant '{name}' (expected control-code or length-matching)"))
}

impl ServerConfig {
	/// Variant preset with the seed and prefix overrides applied.
	pub fn variant_config(&self) -> VariantConfig {
		let mut variant = self.variant.clone().with_seed(self.seed);
		if let Some(words) = self.prefix_words {
			variant = variant.with_prefix_policy(PrefixPolicy::RecentWords(words));
		}
		variant
	}

	pub fn workers(&self) -> usize {
		self.workers.unwrap_or_else(num_cpus::get).max(1)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout)
	}

	/// Builds the shared generation capability, once per process.
	///
	/// Must run outside the async runtime: the HTTP client is blocking.
	pub fn build_backend(&self) -> Result<Arc<dyn GenerationBackend>, GenerationError> {
		let remote = RemoteBackend::with_timeout(&self.backend_url, Duration::from_secs(self.backend_timeout))?;
		if self.serialize_backend {
			Ok(Arc::new(SerializedBackend::new(remote)))
		} else {
			Ok(Arc::new(remote))
		}
	}
}
