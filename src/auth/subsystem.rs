//! Contract for the host auth subsystem the client registers its user strategy with.
//!
//! The subsystem is injected at construction instead of being a process-wide singleton. Its
//! middleware handles are opaque to this crate; host frameworks downcast them back into their own
//! handler types.

// std
use std::any::Any;
// self
use crate::{
	_prelude::*,
	auth::{AuthenticateCallback, AuthenticateOptions, StrategyRegistration, UserHook},
};

/// Pluggable authentication subsystem provided by the host framework.
pub trait AuthSubsystem
where
	Self: Send + Sync,
{
	/// Registers an authentication strategy.
	fn use_strategy(&self, strategy: StrategyRegistration);

	/// Registers the hook used to store a user in the session.
	fn serialize_user(&self, hook: UserHook);

	/// Registers the hook used to restore a user from the session.
	fn deserialize_user(&self, hook: UserHook);

	/// Returns the request-initialization middleware.
	fn initialize(&self) -> Middleware;

	/// Returns the session-attachment middleware.
	fn session(&self) -> Middleware;

	/// Returns a middleware that authenticates requests with the named strategy.
	fn authenticate(
		&self,
		strategy: &str,
		options: AuthenticateOptions,
		callback: Option<AuthenticateCallback>,
	) -> Middleware;
}

/// Type-erased middleware handle produced by an [`AuthSubsystem`].
#[derive(Clone)]
pub struct Middleware {
	name: String,
	handler: Arc<dyn Any + Send + Sync>,
}
impl Middleware {
	/// Wraps a framework-specific handler under a descriptive name.
	pub fn new<H>(name: impl Into<String>, handler: H) -> Self
	where
		H: 'static + Send + Sync,
	{
		Self { name: name.into(), handler: Arc::new(handler) }
	}

	/// Descriptive name supplied by the subsystem.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Recovers the concrete handler, if it has type `H`.
	pub fn handler<H>(&self) -> Option<&H>
	where
		H: 'static,
	{
		self.handler.downcast_ref()
	}
}
impl Debug for Middleware {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Middleware").field(&self.name).finish()
	}
}
