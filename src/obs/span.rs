// crates.io
use tracing::{Instrument, instrument::Instrumented};
// self
use crate::{_prelude::*, obs::CallKind};

/// Span wrapper used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind.
	pub fn new(kind: CallKind) -> Self {
		Self { span: tracing::info_span!("apptrack_client.call", call = kind.as_str()) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
