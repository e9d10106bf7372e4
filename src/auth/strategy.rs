//! AppTrack user-strategy registration handed to the host auth subsystem.
//!
//! The strategy itself (redirects, code exchange, profile lookup) lives in the host auth
//! subsystem. This module only describes what the client registers: credentials, the fixed
//! callback path, the optional custom server URL, and the verify hook invoked once the
//! third-party login succeeds.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Name under which the AppTrack strategy is registered.
pub const STRATEGY_NAME: &str = "apptrack";
/// Callback path the strategy redirects back to after authorization.
pub const CALLBACK_PATH: &str = "/auth/apptrack/callback";

/// Hook invoked by the strategy after a successful third-party authentication.
///
/// The returned value becomes the session user.
pub type VerifyCallback = Arc<dyn Fn(VerifyRequest) -> Result<Value> + Send + Sync>;
/// User (de)serialization hook registered with the auth subsystem.
pub type UserHook = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;
/// Completion hook for [`crate::client::Client::auth`]; receives the authenticated user.
pub type AuthenticateCallback = Arc<dyn Fn(Result<Value>) + Send + Sync>;

/// Inputs handed to a [`VerifyCallback`].
#[derive(Clone, Debug)]
pub struct VerifyRequest {
	/// User access token issued by AppTrack.
	pub access_token: AccessToken,
	/// Refresh token, when the server issued one.
	pub refresh_token: Option<AccessToken>,
	/// Profile document returned by the strategy.
	pub profile: Value,
}

/// Default verify hook: the profile becomes the session user.
pub fn forward_profile() -> VerifyCallback {
	Arc::new(|request: VerifyRequest| -> Result<Value> { Ok(request.profile) })
}

/// Identity (de)serialization hook; the user value is stored and restored unchanged.
pub fn pass_through_user() -> UserHook {
	Arc::new(|user: Value| -> Result<Value> { Ok(user) })
}

/// Everything the client registers for the AppTrack strategy.
#[derive(Clone)]
pub struct StrategyRegistration {
	/// Strategy name ([`STRATEGY_NAME`]).
	pub name: &'static str,
	/// OAuth client identifier (the configured key).
	pub client_id: String,
	/// OAuth client secret (the configured secret).
	pub client_secret: String,
	/// Callback path ([`CALLBACK_PATH`]).
	pub callback_url: &'static str,
	/// Custom AppTrack server, when one was configured explicitly.
	pub url: Option<Url>,
	/// Verify hook run after successful authentication.
	pub verify: VerifyCallback,
}
impl StrategyRegistration {
	/// Runs the verify hook.
	pub fn verify(&self, request: VerifyRequest) -> Result<Value> {
		(self.verify)(request)
	}
}
impl Debug for StrategyRegistration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyRegistration")
			.field("name", &self.name)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("callback_url", &self.callback_url)
			.field("url", &self.url)
			.finish()
	}
}

/// Options forwarded to the auth subsystem's `authenticate` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticateOptions {
	/// Redirect target after a successful login.
	pub success_redirect: Option<String>,
	/// Redirect target after a failed login.
	pub failure_redirect: Option<String>,
	/// Scopes requested from AppTrack.
	pub scope: Vec<String>,
	/// Whether the authenticated user should be attached to the session.
	pub session: bool,
}
impl AuthenticateOptions {
	/// Sets the success redirect.
	pub fn with_success_redirect(mut self, target: impl Into<String>) -> Self {
		self.success_redirect = Some(target.into());

		self
	}

	/// Sets the failure redirect.
	pub fn with_failure_redirect(mut self, target: impl Into<String>) -> Self {
		self.failure_redirect = Some(target.into());

		self
	}

	/// Appends a requested scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope.push(scope.into());

		self
	}

	/// Disables session attachment.
	pub fn without_session(mut self) -> Self {
		self.session = false;

		self
	}
}
impl Default for AuthenticateOptions {
	fn default() -> Self {
		Self { success_redirect: None, failure_redirect: None, scope: Vec::new(), session: true }
	}
}
