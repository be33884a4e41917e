//! Optional observability helpers for request dispatch.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `twitter_raw.dispatch` with the `method`
//!   (HTTP verb) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `twitter_raw_dispatch_total` counter for every
//!   attempt/completion/failure, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
	/// Entry to [`Dispatcher::send`](crate::dispatch::Dispatcher::send).
	Attempt,
	/// A response arrived, whatever its status code.
	Completed,
	/// Configuration or transport failure propagated back to the caller.
	Failure,
}
impl DispatchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchOutcome::Attempt => "attempt",
			DispatchOutcome::Completed => "completed",
			DispatchOutcome::Failure => "failure",
		}
	}
}
impl Display for DispatchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
