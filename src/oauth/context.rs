//! One-shot signing context carrying the nonce and timestamp of a single request.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::ConfigError,
	oauth::{self, OAUTH_VERSION, RESERVED_PARAMETERS, SIGNATURE_METHOD, Signature, encoding},
	template::Method,
};

type HmacSha1 = Hmac<Sha1>;

const NONCE_LEN: usize = 32;

/// Everything that participates in one signature.
///
/// A context is built per request and consumed by [`SignatureContext::sign`], so a nonce can
/// never be attached to two requests. [`SignatureContext::new`] draws a fresh nonce and reads
/// the clock; [`SignatureContext::with_nonce_and_timestamp`] pins both for reproducible
/// signatures.
#[derive(Debug)]
pub struct SignatureContext<'a> {
	method: Method,
	base_uri: String,
	parameters: &'a BTreeMap<String, String>,
	credentials: &'a Credentials,
	nonce: String,
	timestamp: i64,
}
impl<'a> SignatureContext<'a> {
	/// Creates a context with a fresh random nonce and the current Unix time.
	pub fn new(
		method: Method,
		base_url: &Url,
		parameters: &'a BTreeMap<String, String>,
		credentials: &'a Credentials,
	) -> Result<Self, ConfigError> {
		Self::with_nonce_and_timestamp(
			method,
			base_url,
			parameters,
			credentials,
			generate_nonce(),
			OffsetDateTime::now_utc().unix_timestamp(),
		)
	}

	/// Creates a context with caller-supplied nonce and timestamp.
	///
	/// Fails when a user parameter collides with an OAuth protocol parameter.
	pub fn with_nonce_and_timestamp(
		method: Method,
		base_url: &Url,
		parameters: &'a BTreeMap<String, String>,
		credentials: &'a Credentials,
		nonce: impl Into<String>,
		timestamp: i64,
	) -> Result<Self, ConfigError> {
		let reserved = parameters.keys().find(|key| RESERVED_PARAMETERS.contains(&key.as_str()));

		if let Some(key) = reserved {
			return Err(ConfigError::ReservedParameter { key: key.clone() });
		}

		Ok(Self {
			method,
			base_uri: encoding::base_string_uri(base_url),
			parameters,
			credentials,
			nonce: nonce.into(),
			timestamp,
		})
	}

	/// Nonce that will be embedded in the signature.
	pub fn nonce(&self) -> &str {
		&self.nonce
	}

	/// Unix timestamp (seconds) that will be embedded in the signature.
	pub fn timestamp(&self) -> i64 {
		self.timestamp
	}

	/// Computes the HMAC-SHA1 signature and the `Authorization` header value.
	pub fn sign(self) -> Result<Signature, ConfigError> {
		let mut oauth_params = self.protocol_parameters();
		let parameter_string = encoding::normalize_parameters(
			oauth_params
				.iter()
				.map(|(k, v)| (*k, v.as_str()))
				.chain(self.parameters.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
		);
		let base_string =
			encoding::signature_base_string(self.method.as_str(), &self.base_uri, &parameter_string);
		let signing_key = format!(
			"{}&{}",
			encoding::percent_encode(self.credentials.consumer_secret.expose()),
			encoding::percent_encode(self.credentials.access_token_secret.expose())
		);
		let mut mac =
			HmacSha1::new_from_slice(signing_key.as_bytes()).map_err(|_| ConfigError::SigningKey)?;

		mac.update(base_string.as_bytes());

		let signature = STANDARD.encode(mac.finalize().into_bytes());

		#[cfg(feature = "tracing")]
		tracing::debug!(
			method = self.method.as_str(),
			base_uri = %self.base_uri,
			consumer_key = %self.credentials.consumer_key,
			token = %self.credentials.access_token,
			nonce = %self.nonce,
			timestamp = self.timestamp,
			parameters = ?self.parameters,
			"Signed request."
		);

		oauth_params.insert(oauth::SIGNATURE, signature);

		let authorization = oauth::authorization_header(&oauth_params);

		Ok(Signature { authorization, oauth_params, base_string })
	}

	fn protocol_parameters(&self) -> BTreeMap<&'static str, String> {
		BTreeMap::from([
			(oauth::CONSUMER_KEY, self.credentials.consumer_key.clone()),
			(oauth::NONCE, self.nonce.clone()),
			(oauth::SIGNATURE_METHOD_KEY, SIGNATURE_METHOD.to_owned()),
			(oauth::TIMESTAMP, self.timestamp.to_string()),
			(oauth::TOKEN, self.credentials.access_token.clone()),
			(oauth::VERSION, OAUTH_VERSION.to_owned()),
		])
	}
}

/// Draws a 32-character alphanumeric nonce from the thread-local CSPRNG.
pub fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
