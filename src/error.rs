//! Crate-level error types separating configuration mistakes from transport failures.
//!
//! HTTP responses with a non-2xx status are deliberately absent from this taxonomy: the
//! dispatcher hands them back as ordinary [`RawResponse`](crate::http::RawResponse) values.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; nothing was sent.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Exit status used by the command-line front end for configuration failures.
	pub const CONFIG_EXIT_CODE: u8 = 2;
	/// Exit status used by the command-line front end for transport failures.
	pub const TRANSPORT_EXIT_CODE: u8 = 3;

	/// Maps the error class onto a process exit status.
	pub const fn exit_code(&self) -> u8 {
		match self {
			Error::Config(_) => Self::CONFIG_EXIT_CODE,
			Error::Transport(_) => Self::TRANSPORT_EXIT_CODE,
		}
	}
}

/// Configuration and validation failures. All of them are raised before any request leaves
/// the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A credential environment variable is unset or empty.
	#[error("Environment variable `{var}` is missing or empty.")]
	MissingCredential {
		/// Name of the environment variable.
		var: &'static str,
	},
	/// Template file could not be read.
	#[error("Template file `{}` could not be read.", path.display())]
	TemplateRead {
		/// Path passed on the command line.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Template JSON is malformed or has the wrong shape.
	#[error("Template is malformed at `{}`.", source.path())]
	TemplateParse {
		/// Structured parsing failure carrying the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// HTTP method is not one of GET, POST, PUT, DELETE.
	#[error("HTTP method `{method}` is not supported.")]
	InvalidMethod {
		/// Method string as supplied.
		method: String,
	},
	/// Endpoint is empty, absolute, or carries a query string.
	#[error("Endpoint `{endpoint}` is invalid: {reason}.")]
	InvalidEndpoint {
		/// Endpoint string as supplied.
		endpoint: String,
		/// Short explanation.
		reason: &'static str,
	},
	/// Template parameter holds a JSON value without a string form.
	#[error("Parameter `{key}` holds a {kind} value; only strings, numbers, and booleans are allowed.")]
	UnsupportedParameterValue {
		/// Parameter name.
		key: String,
		/// JSON kind that was rejected.
		kind: &'static str,
	},
	/// User parameter shadows one of the OAuth protocol parameters.
	#[error("Parameter `{key}` is reserved for the OAuth protocol.")]
	ReservedParameter {
		/// Offending parameter name.
		key: String,
	},
	/// API base URL cannot be parsed or joined with the endpoint.
	#[error("API base URL is invalid.")]
	InvalidApiBase {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// API base URL must be hierarchical and end with `/` so endpoints join beneath it.
	#[error("API base URL `{url}` cannot be used as a prefix.")]
	ApiBaseNotPrefix {
		/// Offending URL.
		url: String,
	},
	/// HMAC key could not be initialized.
	#[error("Signing key was rejected by the HMAC implementation.")]
	SigningKey,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Outbound request could not be assembled (for example, a header value with control
	/// characters).
	#[error("HTTP request could not be built.")]
	HttpRequest {
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a request builder failure inside [`ConfigError`].
	pub fn http_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpRequest { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Connect or read timeout expired.
	#[error("Timed out while calling the API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn exit_codes_separate_config_from_transport() {
		let config: Error = ConfigError::MissingCredential { var: "TWITTER_CK" }.into();
		let transport: Error =
			TransportError::Io(std::io::Error::other("connection reset")).into();

		assert_eq!(config.exit_code(), Error::CONFIG_EXIT_CODE);
		assert_eq!(transport.exit_code(), Error::TRANSPORT_EXIT_CODE);
		assert_ne!(config.exit_code(), 0);
		assert_ne!(config.exit_code(), transport.exit_code());
	}

	#[test]
	fn config_messages_name_the_offender() {
		let err = ConfigError::ReservedParameter { key: "oauth_nonce".into() };

		assert_eq!(err.to_string(), "Parameter `oauth_nonce` is reserved for the OAuth protocol.");
	}
}
