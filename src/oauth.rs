//! OAuth 1.0a HMAC-SHA1 request signing (RFC 5849, as profiled by Twitter).
//!
//! Signing is pure: given the verb, the resource URL, the parameters that take part in the
//! signature, and the four credential strings, it produces the `Authorization` header value.
//! Only `application/x-www-form-urlencoded` bodies are signed; raw JSON or multipart bodies
//! are not supported by this crate.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use twitter_raw::{
//! 	auth::Credentials, oauth::SignatureContext, template::Method, url::Url,
//! };
//!
//! let credentials = Credentials::new("ck", "cs", "at", "ats").unwrap();
//! let url = Url::parse("https://api.twitter.com/1.1/account/settings.json").unwrap();
//! let parameters = BTreeMap::new();
//! let signature = SignatureContext::with_nonce_and_timestamp(
//! 	Method::Get,
//! 	&url,
//! 	&parameters,
//! 	&credentials,
//! 	"fixed-nonce",
//! 	1_700_000_000,
//! )
//! .unwrap()
//! .sign()
//! .unwrap();
//!
//! assert!(signature.authorization.starts_with("OAuth oauth_consumer_key=\"ck\", "));
//! ```

pub mod encoding;

mod context;

pub use context::*;

// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError, template::Method};

/// `oauth_consumer_key` parameter name.
pub const CONSUMER_KEY: &str = "oauth_consumer_key";
/// `oauth_nonce` parameter name.
pub const NONCE: &str = "oauth_nonce";
/// `oauth_signature` parameter name.
pub const SIGNATURE: &str = "oauth_signature";
/// `oauth_signature_method` parameter name.
pub const SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// `oauth_timestamp` parameter name.
pub const TIMESTAMP: &str = "oauth_timestamp";
/// `oauth_token` parameter name.
pub const TOKEN: &str = "oauth_token";
/// `oauth_version` parameter name.
pub const VERSION: &str = "oauth_version";

/// Signature method advertised in every request.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in every request.
pub const OAUTH_VERSION: &str = "1.0";

/// Parameter names owned by the protocol; user parameters may not reuse them.
pub const RESERVED_PARAMETERS: [&str; 7] =
	[CONSUMER_KEY, NONCE, SIGNATURE, SIGNATURE_METHOD_KEY, TIMESTAMP, TOKEN, VERSION];

/// Result of signing one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
	/// Ready-to-send `Authorization` header value (`OAuth k="v", ...`).
	pub authorization: String,
	/// The seven `oauth_*` parameters including `oauth_signature`, unencoded.
	pub oauth_params: BTreeMap<&'static str, String>,
	/// Signature base string that was fed to HMAC-SHA1.
	pub base_string: String,
}
impl Signature {
	/// Returns the base64 HMAC-SHA1 digest.
	pub fn signature(&self) -> &str {
		self.oauth_params.get(SIGNATURE).map(String::as_str).unwrap_or_default()
	}
}

/// Signs a request with a fresh nonce and the current time.
///
/// `base_url` must not carry the query string; `parameters` are every query parameter for
/// GET/DELETE or every form body parameter for POST/PUT.
pub fn sign(
	method: Method,
	base_url: &Url,
	parameters: &BTreeMap<String, String>,
	credentials: &Credentials,
) -> Result<Signature, ConfigError> {
	SignatureContext::new(method, base_url, parameters, credentials)?.sign()
}

/// Formats the `Authorization` header from already-computed protocol parameters.
pub(crate) fn authorization_header(oauth_params: &BTreeMap<&'static str, String>) -> String {
	let mut header = String::from("OAuth ");

	for (idx, (key, value)) in oauth_params.iter().enumerate() {
		if idx > 0 {
			header.push_str(", ");
		}

		header.push_str(&encoding::percent_encode(key));
		header.push_str("=\"");
		header.push_str(&encoding::percent_encode(value));
		header.push('"');
	}

	header
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const CONSUMER_KEY_VALUE: &str = "xvz1evFS4wEEPTGEFPHBog";
	const CONSUMER_SECRET_VALUE: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
	const TOKEN_VALUE: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
	const TOKEN_SECRET_VALUE: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
	const NONCE_VALUE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
	const TIMESTAMP_VALUE: i64 = 1_318_622_958;

	fn twitter_credentials() -> Credentials {
		Credentials::new(CONSUMER_KEY_VALUE, CONSUMER_SECRET_VALUE, TOKEN_VALUE, TOKEN_SECRET_VALUE)
			.expect("Published credentials should build.")
	}

	fn twitter_parameters() -> BTreeMap<String, String> {
		BTreeMap::from([
			("include_entities".to_owned(), "true".to_owned()),
			("status".to_owned(), "Hello Ladies + Gentlemen, a signed OAuth request!".to_owned()),
		])
	}

	fn update_url() -> Url {
		Url::parse("https://api.twitter.com/1.1/statuses/update.json")
			.expect("Published URL should parse.")
	}

	fn sign_fixed(
		method: Method,
		parameters: &BTreeMap<String, String>,
		credentials: &Credentials,
	) -> Signature {
		SignatureContext::with_nonce_and_timestamp(
			method,
			&update_url(),
			parameters,
			credentials,
			NONCE_VALUE,
			TIMESTAMP_VALUE,
		)
		.expect("Context should build.")
		.sign()
		.expect("Signing should succeed.")
	}

	#[test]
	fn twitter_published_example_matches() {
		let credentials = twitter_credentials();
		let parameters = twitter_parameters();
		let signature = sign_fixed(Method::Post, &parameters, &credentials);

		assert_eq!(
			signature.base_string,
			concat!(
				"POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&",
				"include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26",
				"oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26",
				"oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26",
				"oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26",
				"oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen",
				"%252C%2520a%2520signed%2520OAuth%2520request%2521"
			)
		);
		assert_eq!(signature.signature(), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
		assert_eq!(
			signature.authorization,
			concat!(
				"OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", ",
				"oauth_nonce=\"kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg\", ",
				"oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\", ",
				"oauth_signature_method=\"HMAC-SHA1\", ",
				"oauth_timestamp=\"1318622958\", ",
				"oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\", ",
				"oauth_version=\"1.0\""
			)
		);
	}

	#[test]
	fn fixed_inputs_sign_identically() {
		let credentials = twitter_credentials();
		let parameters = twitter_parameters();
		let first = sign_fixed(Method::Post, &parameters, &credentials);
		let second = sign_fixed(Method::Post, &parameters, &credentials);

		assert_eq!(first, second);
	}

	#[test]
	fn method_and_parameters_change_the_signature() {
		let credentials = twitter_credentials();
		let parameters = twitter_parameters();
		let post = sign_fixed(Method::Post, &parameters, &credentials);
		let get = sign_fixed(Method::Get, &parameters, &credentials);
		let empty = sign_fixed(Method::Post, &BTreeMap::new(), &credentials);

		assert!(get.base_string.starts_with("GET&"));
		assert_ne!(post.signature(), get.signature());
		assert_ne!(post.signature(), empty.signature());
	}

	#[test]
	fn secrets_are_encoded_into_the_signing_key() {
		let plain = Credentials::new("ck", "a&b", "at", "c d").expect("Credentials should build.");
		let other = Credentials::new("ck", "a", "at", "b&c d").expect("Credentials should build.");
		let parameters = BTreeMap::new();

		assert_ne!(
			sign_fixed(Method::Get, &parameters, &plain).signature(),
			sign_fixed(Method::Get, &parameters, &other).signature()
		);
	}

	#[test]
	fn header_lists_all_seven_protocol_parameters() {
		let credentials = twitter_credentials();
		let signature = sign_fixed(Method::Get, &BTreeMap::new(), &credentials);

		assert_eq!(signature.oauth_params.len(), RESERVED_PARAMETERS.len());

		for key in RESERVED_PARAMETERS {
			assert!(signature.authorization.contains(&format!("{key}=\"")), "{key} missing");
		}
	}

	#[test]
	fn collision_is_a_configuration_error() {
		let credentials = twitter_credentials();
		let parameters = BTreeMap::from([(TIMESTAMP.to_owned(), "0".to_owned())]);
		let err = sign(Method::Get, &update_url(), &parameters, &credentials)
			.expect_err("Shadowing oauth_timestamp must fail.");

		assert!(matches!(err, ConfigError::ReservedParameter { .. }));
	}
}
