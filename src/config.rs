//! Client configuration: caller-supplied options merged over defaults and validated once.
//!
//! [`Config`] is the partial, caller-facing record. Every field is optional so JSON documents and
//! builder chains only state what differs from the defaults. [`Config::resolve`] applies the
//! defaults, enforces the mandatory key/secret pair, and yields an immutable [`Settings`].

// self
use crate::{
	_prelude::*,
	auth::{self, VerifyCallback},
	error::ConfigError,
};

/// AppTrack server used when no `url` is configured.
pub const DEFAULT_URL: &str = "https://api.apptrack.io";

/// Toggles for the two authentication modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthOptions {
	/// Fetch an application (client-credentials) token at construction.
	pub app: bool,
	/// Register the AppTrack user strategy with the host auth subsystem.
	pub users: bool,
}
impl Default for AuthOptions {
	fn default() -> Self {
		Self { app: true, users: false }
	}
}

/// Caller-supplied configuration; unset fields fall back to defaults.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	/// OAuth client key. Required.
	pub key: Option<String>,
	/// OAuth client secret. Required.
	pub secret: Option<String>,
	/// AppTrack server base URL, without a trailing slash.
	pub url: Option<String>,
	/// Authentication mode toggles.
	pub auth: AuthOptions,
	/// Verify hook for the user strategy; defaults to forwarding the profile.
	#[serde(skip)]
	pub callback: Option<VerifyCallback>,
}
impl Config {
	/// Starts a configuration with the mandatory credentials.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: Some(key.into()), secret: Some(secret.into()), ..Default::default() }
	}

	/// Parses a (possibly partial) JSON document; absent fields keep their defaults.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(de).map_err(|source| ConfigError::Parse { source })
	}

	/// Overrides the server base URL.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Overrides the authentication toggles.
	pub fn with_auth(mut self, auth: AuthOptions) -> Self {
		self.auth = auth;

		self
	}

	/// Enables or disables the eager application token fetch.
	pub fn with_app_auth(mut self, enabled: bool) -> Self {
		self.auth.app = enabled;

		self
	}

	/// Enables or disables user authentication through the host auth subsystem.
	pub fn with_user_auth(mut self, enabled: bool) -> Self {
		self.auth.users = enabled;

		self
	}

	/// Sets the verify hook run by the user strategy.
	pub fn with_callback(mut self, callback: VerifyCallback) -> Self {
		self.callback = Some(callback);

		self
	}

	/// Applies defaults and validates the mandatory fields.
	pub fn resolve(self) -> Result<Settings, ConfigError> {
		let key = self.key.filter(|value| !value.trim().is_empty()).ok_or(ConfigError::MissingKey)?;
		let secret =
			self.secret.filter(|value| !value.trim().is_empty()).ok_or(ConfigError::MissingSecret)?;
		let custom_url = self
			.url
			.as_deref()
			.map(|raw| Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { source }))
			.transpose()?;
		let url = match &custom_url {
			Some(url) => url.clone(),
			None => Url::parse(DEFAULT_URL).map_err(|source| ConfigError::InvalidUrl { source })?,
		};

		Ok(Settings {
			key,
			secret,
			url,
			custom_url,
			auth: self.auth,
			callback: self.callback.unwrap_or_else(auth::forward_profile),
		})
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("key", &self.key)
			.field("secret_set", &self.secret.is_some())
			.field("url", &self.url)
			.field("auth", &self.auth)
			.field("callback_set", &self.callback.is_some())
			.finish()
	}
}

/// Validated, immutable configuration held by a client.
#[derive(Clone)]
pub struct Settings {
	key: String,
	secret: String,
	url: Url,
	custom_url: Option<Url>,
	auth: AuthOptions,
	callback: VerifyCallback,
}
impl Settings {
	/// OAuth client key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// OAuth client secret. Callers must avoid logging this string.
	pub fn secret(&self) -> &str {
		&self.secret
	}

	/// Effective server URL (the configured one or [`DEFAULT_URL`]).
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Server URL only when it was configured explicitly.
	pub fn custom_url(&self) -> Option<&Url> {
		self.custom_url.as_ref()
	}

	/// Authentication toggles.
	pub fn auth(&self) -> AuthOptions {
		self.auth
	}

	/// Verify hook for the user strategy.
	pub fn callback(&self) -> &VerifyCallback {
		&self.callback
	}

	/// Server URL rendered without a trailing slash, ready for path concatenation.
	pub fn base(&self) -> &str {
		self.url.as_str().trim_end_matches('/')
	}
}
impl Debug for Settings {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Settings")
			.field("key", &self.key)
			.field("secret", &"<redacted>")
			.field("url", &self.url.as_str())
			.field("auth", &self.auth)
			.finish()
	}
}
