//! Dispatcher settings and `.env` loading.

// std
use std::{io::ErrorKind, path::PathBuf, time::Duration as StdDuration};
// self
use crate::{_prelude::*, error::ConfigError};

/// API prefix every template endpoint is joined onto.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1/";
/// Default TCP/TLS connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: StdDuration = StdDuration::from_secs(10);
/// Default timeout for the whole request, body included.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Settings owned by the [`Dispatcher`](crate::dispatch::Dispatcher).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatcherConfig {
	/// Host and version prefix; always ends with `/`.
	pub api_base: Url,
	/// Connect timeout; `None` waits indefinitely.
	pub connect_timeout: Option<StdDuration>,
	/// Total request timeout; `None` waits indefinitely.
	pub timeout: Option<StdDuration>,
}
impl DispatcherConfig {
	/// Replaces the API base. A trailing `/` is added when missing so the last path segment
	/// (usually the API version) is kept when endpoints are joined.
	pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
		self.api_base = parse_api_base(api_base)?;

		Ok(self)
	}

	/// Overrides the connect timeout.
	pub fn with_connect_timeout(mut self, timeout: Option<StdDuration>) -> Self {
		self.connect_timeout = timeout;

		self
	}

	/// Overrides the total request timeout.
	pub fn with_timeout(mut self, timeout: Option<StdDuration>) -> Self {
		self.timeout = timeout;

		self
	}

	/// Resolves a template endpoint into the resource URL used for signing.
	///
	/// The endpoint is appended to the API base rather than resolved against it, and the
	/// result must still sit under the base with no query or fragment.
	pub fn resolve(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let invalid =
			|reason| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), reason };
		let relative = endpoint.strip_prefix('/').unwrap_or(endpoint);
		let url = Url::parse(&format!("{}{relative}", self.api_base))
			.map_err(|source| ConfigError::InvalidApiBase { source })?;

		if !url.as_str().starts_with(self.api_base.as_str()) {
			return Err(invalid("it must stay under the API base"));
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(invalid("query parameters belong in `parameters`"));
		}

		Ok(url)
	}
}
impl Default for DispatcherConfig {
	fn default() -> Self {
		Self {
			api_base: Url::parse(DEFAULT_API_BASE).expect("Default API base must parse."),
			connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
			timeout: Some(DEFAULT_TIMEOUT),
		}
	}
}

fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidApiBase { source })?;

	if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
		return Err(ConfigError::ApiBaseNotPrefix { url: raw.to_owned() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

/// Loads `.env` from the working directory (or its ancestors) into the process environment.
///
/// A missing file is not an error. An unreadable or malformed file is logged and skipped so
/// variables exported by the shell still apply. Returns the path that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
	match dotenvy::dotenv() {
		Ok(path) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(path = %path.display(), "Loaded environment variables.");

			Some(path)
		},
		Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => None,
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::warn!(error = %e, "Failed to load .env file.");
			#[cfg(not(feature = "tracing"))]
			let _ = e;

			None
		},
	}
}
