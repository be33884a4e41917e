//! Transport primitives for sending the signed request.
//!
//! The dispatcher only depends on [`ApiHttpClient`], so tests and downstream crates can plug
//! in any HTTP stack. [`ReqwestHttpClient`] is the default implementation behind the
//! `reqwest` feature.

// std
use std::borrow::Cow;
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, template::Method};
#[cfg(feature = "reqwest")]
use crate::{
	config::DispatcherConfig,
	error::{ConfigError, TransportError},
};

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Content type used for POST/PUT bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type ExecuteFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse>> + 'a + Send>>;

/// Fully built request, ready to go on the wire exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute URL, including the query string for GET/DELETE.
	pub url: Url,
	/// Header name/value pairs, `Authorization` included.
	pub headers: Vec<(&'static str, String)>,
	/// Form-encoded body for POST/PUT with parameters; `None` otherwise.
	pub body: Option<String>,
}
impl SignedRequest {
	/// Returns the first header value registered under `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Status and body of the response, returned verbatim regardless of the status class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body exactly as received; no charset decoding is applied.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Lossy UTF-8 view of the body for logging and assertions.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}

/// Abstraction over HTTP transports able to execute one [`SignedRequest`].
///
/// Implementations must send the request as given (no extra signing, no retries) and return
/// the body of every response that arrives, including 4xx/5xx ones. Only failures to obtain a
/// response are errors.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and captures the response status and body.
	fn execute(&self, request: SignedRequest) -> ExecuteFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clients built through [`ReqwestHttpClient::from_config`] do not follow redirects: a 3xx
/// response is handed back verbatim like any other status, and the signed `Authorization`
/// header never travels to a URL it was not computed for.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the connect and total timeouts from `config`.
	pub fn from_config(config: &DispatcherConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

		if let Some(timeout) = config.connect_timeout {
			builder = builder.connect_timeout(timeout);
		}
		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: SignedRequest) -> ExecuteFuture<'_> {
		Box::pin(async move {
			let SignedRequest { method, url, headers, body } = request;
			let mut builder = self.0.request(method.into(), url);

			for (name, value) in headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = body {
				builder = builder.body(body);
			}

			let request = builder.build().map_err(ConfigError::http_request)?;
			let response = self.0.execute(request).await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?;

			Ok(RawResponse { status, body: body.to_vec() })
		})
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
