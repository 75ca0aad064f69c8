use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{GenerationBackend, GenerationParams, TokenizedInput};
use crate::error::GenerationError;

/// Default per-call timeout for the inference endpoint.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Serialize)]
struct TokenizeBody<'a> {
	text: &'a str,
	max_length: Option<usize>,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
	ids: &'a [u32],
	params: &'a GenerationParams,
}

#[derive(Deserialize)]
struct IdsReply {
	ids: Vec<u32>,
}

#[derive(Serialize)]
struct DecodeBody<'a> {
	ids: &'a [u32],
	skip_special_tokens: bool,
}

#[derive(Deserialize)]
struct DecodeReply {
	text: String,
}

/// Generation capability reached over HTTP.
///
/// The endpoint exposes three JSON routes mirroring the trait:
/// - `POST {base}/tokenize` `{ text, max_length }` → `{ ids, truncated }`
/// - `POST {base}/generate` `{ ids, params }` → `{ ids }`
/// - `POST {base}/decode` `{ ids, skip_special_tokens }` → `{ text }`
///
/// The client is blocking: call it from a worker thread, never from
/// inside an async task.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
	client: Client,
	base_url: String,
}

impl RemoteBackend {
	/// Creates a backend for `base_url` with the default timeout.
	pub fn new(base_url: &str) -> Result<Self, GenerationError> {
		Self::with_timeout(base_url, DEFAULT_TIMEOUT)
	}

	/// Creates a backend for `base_url` with a custom per-call timeout.
	///
	/// A trailing `/` on `base_url` is accepted.
	pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, GenerationError> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
	}

	/// Returns the endpoint base URL.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn post<B: Serialize, R: DeserializeOwned>(&self, route: &str, body: &B) -> Result<R, GenerationError> {
		let url = format!("{}/{}", self.base_url, route);
		debug!("POST {}", url);

		let response = self.client.post(&url).json(body).send()?;
		let status = response.status();
		let text = response.text()?;
		if !status.is_success() {
			return Err(GenerationError::Status { status: status.as_u16(), body: text });
		}

		serde_json::from_str(&text).map_err(|e| GenerationError::Malformed(format!("{route}: {e}")))
	}
}

impl GenerationBackend for RemoteBackend {
	fn tokenize(&self, text: &str, max_length: Option<usize>) -> Result<TokenizedInput, GenerationError> {
		self.post("tokenize", &TokenizeBody { text, max_length })
	}

	fn generate(&self, input: &[u32], params: &GenerationParams) -> Result<Vec<u32>, GenerationError> {
		let reply: IdsReply = self.post("generate", &GenerateBody { ids: input, params })?;
		Ok(reply.ids)
	}

	fn decode(&self, ids: &[u32]) -> Result<String, GenerationError> {
		let reply: DecodeReply = self.post("decode", &DecodeBody { ids, skip_special_tokens: true })?;
		Ok(reply.text)
	}
}
