//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::{collections::BTreeMap, time::Duration};
// self
use twitter_raw::{
	auth::Credentials,
	config::DispatcherConfig,
	dispatch::{Dispatcher, ReqwestDispatcher},
	http::ReqwestHttpClient,
	reqwest::Client,
	template::{Method, RequestTemplate},
};

pub const TEST_CONSUMER_KEY: &str = "test-consumer-key";
pub const TEST_CONSUMER_SECRET: &str = "test-consumer-secret";
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const TEST_ACCESS_TOKEN_SECRET: &str = "test-access-token-secret";

pub fn test_credentials() -> Credentials {
	Credentials::new(
		TEST_CONSUMER_KEY,
		TEST_CONSUMER_SECRET,
		TEST_ACCESS_TOKEN,
		TEST_ACCESS_TOKEN_SECRET,
	)
	.expect("Test credentials should be accepted.")
}

pub fn test_template(endpoint: &str, method: Method, parameters: &[(&str, &str)]) -> RequestTemplate {
	let parameters = parameters
		.iter()
		.map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
		.collect::<BTreeMap<_, _>>();

	RequestTemplate::new(endpoint, method, parameters).expect("Test template should be valid.")
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Points a dispatcher at `api_base` (typically an `httpmock` server URL).
pub fn build_test_dispatcher(api_base: &str) -> ReqwestDispatcher {
	let config = DispatcherConfig::default()
		.with_api_base(api_base)
		.expect("Mock API base should parse successfully.");

	Dispatcher::with_http_client(config, test_reqwest_http_client())
}

/// Same as [`build_test_dispatcher`] but with the production client and a short total timeout.
pub fn build_timed_dispatcher(api_base: &str, timeout: Duration) -> ReqwestDispatcher {
	let config = DispatcherConfig::default()
		.with_api_base(api_base)
		.expect("Mock API base should parse successfully.")
		.with_connect_timeout(Some(timeout))
		.with_timeout(Some(timeout));

	Dispatcher::new(config).expect("Dispatcher should build.")
}
