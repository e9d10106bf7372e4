//! Auth subsystem registration and host application wiring.

// self
use crate::{
	_prelude::*,
	auth::{
		self, AuthSubsystem, AuthenticateCallback, AuthenticateOptions, CALLBACK_PATH, Middleware,
		STRATEGY_NAME, StrategyRegistration,
	},
	client::Client,
	error::ConfigError,
	host::HostApp,
	http::{ApiHttpClient, TransportErrorMapper},
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Installs the client into a host application.
	///
	/// With user authentication enabled the subsystem's `initialize` and `session` middleware are
	/// appended in that order. A log function bound to this client is attached either way.
	pub fn middleware<A>(&self, app: &mut A)
	where
		A: ?Sized + HostApp,
	{
		if let Some(subsystem) = &self.auth {
			app.use_middleware(subsystem.initialize());
			app.use_middleware(subsystem.session());
		}

		app.set_log(self.log_fn());
	}

	/// Returns the subsystem middleware that authenticates requests with the AppTrack strategy.
	pub fn auth(
		&self,
		options: AuthenticateOptions,
		callback: Option<AuthenticateCallback>,
	) -> Result<Middleware> {
		let subsystem = self.auth.as_ref().ok_or(ConfigError::UserAuthDisabled)?;

		Ok(subsystem.authenticate(STRATEGY_NAME, options, callback))
	}

	/// Injected auth subsystem, present only when user authentication is enabled.
	pub fn auth_subsystem(&self) -> Option<&Arc<dyn AuthSubsystem>> {
		self.auth.as_ref()
	}

	pub(super) fn register_user_auth(&self) {
		let Some(subsystem) = &self.auth else {
			return;
		};

		subsystem.use_strategy(StrategyRegistration {
			name: STRATEGY_NAME,
			client_id: self.settings.key().to_owned(),
			client_secret: self.settings.secret().to_owned(),
			callback_url: CALLBACK_PATH,
			url: self.settings.custom_url().cloned(),
			verify: self.settings.callback().clone(),
		});
		subsystem.serialize_user(auth::pass_through_user());
		subsystem.deserialize_user(auth::pass_through_user());

		tracing::debug!(strategy = STRATEGY_NAME, "registered user authentication strategy");
	}
}
