//! The AppTrack client facade.
//!
//! [`Client`] owns the validated settings, the application token slot, the scratch store, and
//! the transport. Operations are split by concern: `token` (application token and user login),
//! `crud` (the request facade), `log` (logging over `create`), `middleware` (auth subsystem and
//! host wiring), and `scratch` (the key-value store).

pub mod crud;
pub mod log;
pub mod scratch;

mod middleware;
mod token;

pub use crud::*;
pub use log::*;
pub use scratch::*;

// crates.io
use oauth2::{HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	auth::{AuthSubsystem, TokenSlot},
	config::{Config, Settings},
	error::ConfigError,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::CallKind,
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// AppTrack API client.
///
/// Cloning is cheap: clones share the transport, the token slot, and the scratch store, so a
/// token fetched through one clone is visible to all of them.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	settings: Arc<Settings>,
	token: TokenSlot,
	scratch: ScratchStore,
	auth: Option<Arc<dyn AuthSubsystem>>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// `auth` is required when `config.auth.users` is enabled; the AppTrack strategy and the
	/// pass-through user hooks are registered with it before this returns. When `config.auth.app`
	/// is enabled, the application token fetch is spawned on the current tokio runtime and not
	/// awaited.
	pub fn with_http_client(
		config: Config,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
		auth: Option<Arc<dyn AuthSubsystem>>,
	) -> Result<Self> {
		let settings = config.resolve()?;
		let options = settings.auth();
		let auth = if options.users {
			Some(auth.ok_or(ConfigError::MissingAuthSubsystem)?)
		} else {
			if auth.is_some() {
				tracing::debug!("user authentication is disabled; ignoring the auth subsystem");
			}

			None
		};
		let client = Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			settings: Arc::new(settings),
			token: TokenSlot::default(),
			scratch: ScratchStore::default(),
			auth,
		};

		if options.users {
			client.register_user_auth();
		}
		if options.app {
			client.spawn_app_token();
		}

		Ok(client)
	}

	/// Validated configuration.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Shared application token slot.
	pub fn token_slot(&self) -> &TokenSlot {
		&self.token
	}

	async fn send(&self, call: CallKind, request: HttpRequest) -> Result<HttpResponse> {
		self.http_client
			.execute(request)
			.await
			.map_err(|e| self.transport_mapper.map_transport_error(call, e))
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by its own reqwest transport, without user authentication.
	///
	/// Fails with [`ConfigError::MissingAuthSubsystem`] when `config.auth.users` is enabled;
	/// use [`Client::with_auth_subsystem`] for that mode.
	pub fn new(config: Config) -> Result<Self> {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
			None,
		)
	}

	/// Creates a reqwest-backed client that registers user authentication with `auth`.
	pub fn with_auth_subsystem(config: Config, auth: Arc<dyn AuthSubsystem>) -> Result<Self> {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
			Some(auth),
		)
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			settings: self.settings.clone(),
			token: self.token.clone(),
			scratch: self.scratch.clone(),
			auth: self.auth.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("settings", &self.settings)
			.field("token_set", &self.token.is_set())
			.field("user_auth", &self.auth.is_some())
			.finish()
	}
}
