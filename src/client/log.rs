//! Event logging layered on [`Client::create`].

// self
use crate::{
	_prelude::*,
	client::Client,
	host::{LogFn, LogFuture},
	http::{ApiHttpClient, TransportErrorMapper},
	resource::ApiRequest,
};

/// API path events are posted to.
pub const LOG_PATH: &str = "/log";

/// One entry sent to the log endpoint.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEntry {
	/// Named action with optional parameters, sent as `{"action": .., "params": ..}`.
	Action {
		/// Action name.
		action: String,
		/// Action parameters; omitted from the payload when absent.
		params: Option<Value>,
	},
	/// Caller-built payload, sent unchanged. `null` sends nothing.
	Payload(Value),
}
impl LogEntry {
	/// Builds an action entry.
	pub fn action(action: impl Into<String>, params: Option<Value>) -> Self {
		Self::Action { action: action.into(), params }
	}

	/// Renders the request body, or `None` when there is nothing to send.
	pub fn into_payload(self) -> Option<Value> {
		match self {
			Self::Action { action, params } => {
				let mut payload = Map::new();

				payload.insert("action".into(), Value::String(action));

				if let Some(params) = params {
					payload.insert("params".into(), params);
				}

				Some(Value::Object(payload))
			},
			Self::Payload(Value::Null) => None,
			Self::Payload(payload) => Some(payload),
		}
	}
}
impl From<Value> for LogEntry {
	fn from(payload: Value) -> Self {
		Self::Payload(payload)
	}
}
impl From<&str> for LogEntry {
	fn from(action: &str) -> Self {
		Self::action(action, None)
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Posts `entry` to [`LOG_PATH`] and returns the response body.
	///
	/// Resolves to `Ok(None)` without a request when the entry carries no payload.
	pub async fn log(&self, entry: impl Into<LogEntry>) -> Result<Option<Value>> {
		let entry: LogEntry = entry.into();
		let Some(payload) = entry.into_payload() else {
			tracing::debug!("empty log entry; nothing sent");

			return Ok(None);
		};

		self.create(ApiRequest::path(LOG_PATH).with_data(payload)).await.map(Some)
	}

	/// Logs a named action.
	pub async fn log_action(
		&self,
		action: impl Into<String>,
		params: Option<Value>,
	) -> Result<Option<Value>> {
		self.log(LogEntry::action(action, params)).await
	}

	/// Logs a caller-built payload.
	pub async fn log_payload(&self, payload: Value) -> Result<Option<Value>> {
		self.log(LogEntry::Payload(payload)).await
	}

	/// Returns a log function bound to a clone of this client.
	pub fn log_fn(&self) -> LogFn {
		let client = self.clone();

		Arc::new(move |entry: LogEntry| -> LogFuture {
			let client = client.clone();

			Box::pin(async move { client.log(entry).await })
		})
	}
}
