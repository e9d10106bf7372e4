//! Observability helpers shared by every client call.
//!
//! Each call runs inside a `tracing` span named `apptrack_client.call` with a `call` field.
//! Enable the `metrics` feature to increment the `apptrack_client_call_total` counter for every
//! attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod span;

pub use metrics::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Application token fetch (client-credentials grant).
	Token,
	/// User login (password grant).
	Login,
	/// `create` (POST).
	Create,
	/// `read` (GET).
	Read,
	/// `update` (PUT).
	Update,
	/// `destroy` (DELETE).
	Destroy,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Token => "token",
			CallKind::Login => "login",
			CallKind::Create => "create",
			CallKind::Read => "read",
			CallKind::Update => "update",
			CallKind::Destroy => "destroy",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure returned to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside the call span, recording attempt and outcome.
pub(crate) async fn observe<T, Fut>(kind: CallKind, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(kind);

	record_call_outcome(kind, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_call_outcome(kind, CallOutcome::Success),
		Err(e) => {
			record_call_outcome(kind, CallOutcome::Failure);
			tracing::debug!(call = kind.as_str(), error = %e, "call failed");
		},
	}

	result
}
