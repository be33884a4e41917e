//! The four OAuth 1.0a credential strings and their environment bindings.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Environment variable holding the consumer (API) key.
pub const CONSUMER_KEY_VAR: &str = "TWITTER_CK";
/// Environment variable holding the consumer (API) secret.
pub const CONSUMER_SECRET_VAR: &str = "TWITTER_CS";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_VAR: &str = "TWITTER_AT";
/// Environment variable holding the access token secret.
pub const ACCESS_TOKEN_SECRET_VAR: &str = "TWITTER_ATS";

/// Consumer and access-token credentials used to sign every request.
///
/// Values are validated once at construction and never mutated afterwards. Both secrets are
/// wrapped in [`Secret`] so `Debug` output stays safe to log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Identifies the calling application.
	pub consumer_key: String,
	/// Shared secret of the calling application.
	pub consumer_secret: Secret,
	/// Identifies the user on whose behalf the request is made.
	pub access_token: String,
	/// Shared secret bound to the access token.
	pub access_token_secret: Secret,
}
impl Credentials {
	/// Builds credentials, rejecting any empty value.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		access_token: impl Into<String>,
		access_token_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let consumer_key = non_empty(CONSUMER_KEY_VAR, consumer_key.into())?;
		let consumer_secret = non_empty(CONSUMER_SECRET_VAR, consumer_secret.into())?;
		let access_token = non_empty(ACCESS_TOKEN_VAR, access_token.into())?;
		let access_token_secret = non_empty(ACCESS_TOKEN_SECRET_VAR, access_token_secret.into())?;

		Ok(Self {
			consumer_key,
			consumer_secret: Secret::new(consumer_secret),
			access_token,
			access_token_secret: Secret::new(access_token_secret),
		})
	}

	/// Reads the four `TWITTER_*` variables through `lookup`.
	///
	/// The lookup indirection keeps tests away from the process environment; production code
	/// goes through [`Credentials::from_env`].
	pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
	where
		F: FnMut(&str) -> Option<String>,
	{
		let mut fetch = |var: &'static str| {
			lookup(var)
				.filter(|value| !value.is_empty())
				.ok_or(ConfigError::MissingCredential { var })
		};
		let consumer_key = fetch(CONSUMER_KEY_VAR)?;
		let consumer_secret = fetch(CONSUMER_SECRET_VAR)?;
		let access_token = fetch(ACCESS_TOKEN_VAR)?;
		let access_token_secret = fetch(ACCESS_TOKEN_SECRET_VAR)?;

		Self::new(consumer_key, consumer_secret, access_token, access_token_secret)
	}

	/// Reads the four `TWITTER_*` variables from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|var| std::env::var(var).ok())
	}
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
	if value.is_empty() { Err(ConfigError::MissingCredential { var }) } else { Ok(value) }
}
