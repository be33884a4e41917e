//! Request templates: the endpoint, verb, and parameters of the single request to send.
//!
//! Templates arrive as JSON documents shaped like
//! `{"endpoint": "statuses/update.json", "method": "POST", "parameters": {"status": "hi"}}`.
//! Parameter values may be strings, numbers, or booleans; numbers keep their JSON decimal
//! spelling and booleans become `true`/`false` before signing. Everything else is rejected.

// std
use std::{fs, path::Path};
// crates.io
use percent_encoding::percent_decode_str;
use serde_json::Value;
// self
use crate::{_prelude::*, error::ConfigError};

/// HTTP verbs the dispatcher knows how to sign and send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel in a form-encoded body.
	Post,
	/// Parameters travel in a form-encoded body.
	Put,
	/// Parameters travel in the query string.
	Delete,
}
impl Method {
	/// Returns the uppercase token used on the wire and in the signature base string.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}

	/// Returns true when parameters belong in a form-encoded body instead of the query string.
	pub const fn sends_body(self) -> bool {
		matches!(self, Method::Post | Method::Put)
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Method {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		[Method::Get, Method::Post, Method::Put, Method::Delete]
			.into_iter()
			.find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| ConfigError::InvalidMethod { method: s.to_owned() })
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

/// Validated request template. Immutable once built; overrides produce a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTemplate {
	endpoint: String,
	method: Method,
	parameters: BTreeMap<String, String>,
}
impl RequestTemplate {
	/// Validates the endpoint and assembles a template.
	///
	/// A single leading `/` is dropped so `"/account/settings.json"` and
	/// `"account/settings.json"` resolve to the same URL.
	pub fn new(
		endpoint: impl AsRef<str>,
		method: Method,
		parameters: BTreeMap<String, String>,
	) -> Result<Self, ConfigError> {
		let endpoint = validate_endpoint(endpoint.as_ref())?;

		Ok(Self { endpoint, method, parameters })
	}

	/// Parses a JSON template document.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(json);
		let raw: TemplateDocument = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::TemplateParse { source })?;
		let method = raw.method.parse::<Method>()?;
		let parameters = raw
			.parameters
			.into_iter()
			.map(|(key, value)| {
				let value = stringify_parameter(&key, value)?;

				Ok::<_, ConfigError>((key, value))
			})
			.collect::<Result<BTreeMap<_, _>, _>>()?;

		Self::new(raw.endpoint, method, parameters)
	}

	/// Reads and parses a JSON template file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let json = fs::read_to_string(path)
			.map_err(|source| ConfigError::TemplateRead { path: path.to_path_buf(), source })?;

		Self::from_json(&json)
	}

	/// Applies `key=value` overrides on top of the template parameters.
	///
	/// The value is everything after the first `=`, so `q=a=b` sets `q` to `a=b`. Entries
	/// without `=` or with an empty key are skipped with a warning.
	pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for raw in overrides {
			let raw = raw.as_ref();

			match raw.split_once('=') {
				Some((key, value)) if !key.is_empty() => {
					self.parameters.insert(key.to_owned(), value.to_owned());
				},
				_ => {
					#[cfg(feature = "tracing")]
					tracing::warn!(entry = raw, "Invalid parameter override detected, skipping.");
				},
			}
		}

		self
	}

	/// Endpoint path relative to the API base, without a leading `/`.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// HTTP verb.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Request parameters, already stringified.
	pub fn parameters(&self) -> &BTreeMap<String, String> {
		&self.parameters
	}
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateDocument {
	endpoint: String,
	method: String,
	#[serde(default)]
	parameters: BTreeMap<String, Value>,
}

fn validate_endpoint(endpoint: &str) -> Result<String, ConfigError> {
	let invalid =
		|reason| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), reason };
	let trimmed = endpoint.trim();
	let relative = trimmed.strip_prefix('/').unwrap_or(trimmed);

	if relative.is_empty() {
		return Err(invalid("it must not be empty"));
	}
	if relative.starts_with('/') || relative.contains('\\') {
		return Err(invalid("it must be relative to the API base"));
	}
	if relative.split('/').next().is_some_and(|first| first.contains(':')) {
		return Err(invalid("it must not carry a URL scheme"));
	}
	if relative.contains(['?', '#']) {
		return Err(invalid("query parameters belong in `parameters`"));
	}
	if relative.split('/').any(is_dot_segment) {
		return Err(invalid("`.` and `..` segments are not allowed"));
	}

	Ok(relative.to_owned())
}

/// Matches `.` and `..`, including percent-encoded spellings such as `%2e%2E`.
fn is_dot_segment(segment: &str) -> bool {
	let decoded = percent_decode_str(segment).decode_utf8_lossy();

	decoded == "." || decoded == ".."
}

fn stringify_parameter(key: &str, value: Value) -> Result<String, ConfigError> {
	let unsupported =
		|kind| ConfigError::UnsupportedParameterValue { key: key.to_owned(), kind };

	match value {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		Value::Bool(b) => Ok(b.to_string()),
		Value::Null => Err(unsupported("null")),
		Value::Array(_) => Err(unsupported("array")),
		Value::Object(_) => Err(unsupported("object")),
	}
}
