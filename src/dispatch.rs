//! Turns a [`RequestTemplate`] into one signed HTTP request and sends it.
//!
//! GET/DELETE parameters go into the query string through the standard
//! `application/x-www-form-urlencoded` serializer of the `url` crate, while POST/PUT
//! parameters become a form body encoded with the OAuth percent-encoding rules. Both paths
//! sign exactly the parameters they send. Whatever status comes back is returned as a
//! [`RawResponse`]; only configuration and transport problems are errors.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	config::DispatcherConfig,
	http::{
		AUTHORIZATION, ApiHttpClient, CONTENT_TYPE, FORM_URLENCODED, RawResponse, SignedRequest,
	},
	oauth::{self, encoding},
	obs::{self, DispatchOutcome, DispatchSpan},
	template::RequestTemplate,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default reqwest transport.
pub type ReqwestDispatcher = Dispatcher<ReqwestHttpClient>;

/// Signs and sends one request per [`Dispatcher::send`] call.
///
/// The dispatcher holds no per-request state: every call signs with a fresh nonce and
/// timestamp, and credentials are passed in explicitly each time.
#[derive(Clone)]
pub struct Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Transport used for the outbound request.
	pub http_client: Arc<C>,
	/// API base and timeouts.
	pub config: DispatcherConfig,
}
impl<C> Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a dispatcher that reuses the caller-provided transport.
	pub fn with_http_client(config: DispatcherConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config }
	}

	/// Builds the signed request without sending it.
	pub fn prepare(
		&self,
		template: &RequestTemplate,
		credentials: &Credentials,
	) -> Result<SignedRequest> {
		let method = template.method();
		let parameters = template.parameters();
		let base_url = self.config.resolve(template.endpoint())?;
		let signature = oauth::sign(method, &base_url, parameters, credentials)?;
		let mut url = base_url;
		let mut headers = vec![(AUTHORIZATION, signature.authorization)];
		let body = if parameters.is_empty() {
			None
		} else if method.sends_body() {
			headers.push((CONTENT_TYPE, FORM_URLENCODED.to_owned()));

			Some(form_body(parameters))
		} else {
			url.query_pairs_mut().extend_pairs(parameters);

			None
		};

		Ok(SignedRequest { method, url, headers, body })
	}

	/// Signs and sends the template, returning the response whatever its status.
	pub async fn send(
		&self,
		template: &RequestTemplate,
		credentials: &Credentials,
	) -> Result<RawResponse> {
		let method = template.method();
		let span = DispatchSpan::new(method, "send");

		obs::record_dispatch_outcome(method, DispatchOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = self.prepare(template, credentials)?;

				#[cfg(feature = "tracing")]
				tracing::debug!(url = %request.url, body = ?request.body, "Sending request.");

				let response = self.http_client.execute(request).await?;

				span.record_status(response.status);

				#[cfg(feature = "tracing")]
				tracing::info!(
					status = response.status,
					bytes = response.body.len(),
					"Received response."
				);

				Ok::<_, Error>(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_dispatch_outcome(method, DispatchOutcome::Completed),
			Err(_) => obs::record_dispatch_outcome(method, DispatchOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl Dispatcher<ReqwestHttpClient> {
	/// Creates a dispatcher with a reqwest transport built from `config`.
	pub fn new(config: DispatcherConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Debug for Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher").field("config", &self.config).finish()
	}
}

/// Encodes parameters as `k=v&...` with RFC 3986 escaping (`%20` for spaces).
fn form_body(parameters: &BTreeMap<String, String>) -> String {
	parameters
		.iter()
		.map(|(key, value)| {
			format!("{}={}", encoding::percent_encode(key), encoding::percent_encode(value))
		})
		.collect::<Vec<_>>()
		.join("&")
}
