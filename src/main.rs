//! `twitter-raw`: send one OAuth 1.0a signed request described by a JSON template and print the
//! raw response body.

// std
use std::{
	io::{self, Write},
	path::PathBuf,
	process::ExitCode,
	time::Duration,
};
// crates.io
use clap::Parser;
use color_eyre::{Report, eyre::WrapErr};
use tracing_subscriber::EnvFilter;
// self
use twitter_raw::{
	auth::Credentials,
	config::{self, DEFAULT_API_BASE, DispatcherConfig},
	dispatch::Dispatcher,
	error::Result,
	http::RawResponse,
	template::RequestTemplate,
};

/// Send a raw request to Twitter.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
	/// Request template file (*.json).
	template_file: PathBuf,
	/// Overrides or adds a template parameter; may be repeated.
	#[arg(short, long = "param", value_name = "KEY=VALUE")]
	parameters: Vec<String>,
	/// Host and version prefix the template endpoint is joined onto.
	#[arg(long, env = "TWITTER_API_BASE", default_value = DEFAULT_API_BASE)]
	api_base: String,
	/// Connect timeout in seconds; 0 disables it.
	#[arg(long, value_name = "SECS", default_value_t = 10)]
	connect_timeout: u64,
	/// Whole-request timeout in seconds; 0 disables it.
	#[arg(long, value_name = "SECS", default_value_t = 30)]
	timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
	init_tracing();

	if let Err(e) = color_eyre::install() {
		tracing::warn!(error = %e, "Failed to install the error report handler.");
	}

	config::load_dotenv();

	let cli = Cli::parse();

	match run(cli).await {
		Ok(response) => match print_body(&response) {
			Ok(()) => ExitCode::SUCCESS,
			Err(report) => {
				tracing::error!(error = %report, "Response was received but could not be printed.");
				eprintln!("Error: {report:?}");

				ExitCode::FAILURE
			},
		},
		Err(e) => {
			let code = e.exit_code();

			eprintln!("Error: {:?}", Report::new(e));

			ExitCode::from(code)
		},
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();
}

async fn run(cli: Cli) -> Result<RawResponse> {
	let credentials = Credentials::from_env()?;
	let template = RequestTemplate::load(&cli.template_file)?.with_overrides(&cli.parameters);
	let config = DispatcherConfig::default()
		.with_api_base(&cli.api_base)?
		.with_connect_timeout(seconds(cli.connect_timeout))
		.with_timeout(seconds(cli.timeout));
	let dispatcher = Dispatcher::new(config)?;
	let response = dispatcher.send(&template, &credentials).await?;

	if !response.is_success() {
		tracing::info!(status = response.status, "API answered with a non-success status.");
	}

	Ok(response)
}

/// Writes the body bytes unchanged, followed by a newline.
fn print_body(response: &RawResponse) -> color_eyre::Result<()> {
	let mut stdout = io::stdout().lock();

	stdout
		.write_all(&response.body)
		.and_then(|_| stdout.write_all(b"\n"))
		.and_then(|_| stdout.flush())
		.wrap_err("Failed to write the response to stdout.")
}

fn seconds(secs: u64) -> Option<Duration> {
	(secs > 0).then(|| Duration::from_secs(secs))
}
