//! Contract for the host web application the client installs itself into.

// self
use crate::{_prelude::*, auth::Middleware, client::LogEntry};

/// Future returned by a bound [`LogFn`].
pub type LogFuture = Pin<Box<dyn Future<Output = Result<Option<Value>>> + Send>>;
/// Log function bound to a client, callable without a reference to the client.
pub type LogFn = Arc<dyn Fn(LogEntry) -> LogFuture + Send + Sync>;

/// Host web application able to mount middleware and expose a log function.
pub trait HostApp {
	/// Appends a middleware to the application's request pipeline.
	fn use_middleware(&mut self, middleware: Middleware);

	/// Exposes the client's log function on the application.
	fn set_log(&mut self, log: LogFn);
}
