//! Token endpoint requests for the two grants the client speaks.
//!
//! AppTrack serves both grants from `GET {url}/oauth/token` with every parameter in the query
//! string: `client_credentials` for the application token and `password` for user logins.

pub use oauth2::{ResourceOwnerPassword, ResourceOwnerUsername};

// crates.io
use oauth2::{
	HttpRequest,
	http::{Method, header::ACCEPT},
};
// self
use crate::{_prelude::*, auth::AccessToken, config::Settings, error::ConfigError};

/// Token endpoint path, relative to the configured server URL.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Username/password pair for the password grant.
#[derive(Clone, Debug)]
pub struct Credentials {
	/// Account username.
	pub username: ResourceOwnerUsername,
	/// Account password; redacted in `Debug` output.
	pub password: ResourceOwnerPassword,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: ResourceOwnerUsername::new(username.into()),
			password: ResourceOwnerPassword::new(password.into()),
		}
	}
}

/// Grant requested from the token endpoint.
#[derive(Clone, Copy, Debug)]
pub enum TokenGrant<'a> {
	/// Application token.
	ClientCredentials,
	/// User token for the supplied credentials.
	Password(&'a Credentials),
}
impl TokenGrant<'_> {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(&self) -> &'static str {
		match self {
			TokenGrant::ClientCredentials => "client_credentials",
			TokenGrant::Password(_) => "password",
		}
	}
}

/// Decoded token endpoint payload.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Issued access token.
	pub access_token: AccessToken,
	/// Refresh token, when the server issued one.
	#[serde(default)]
	pub refresh_token: Option<AccessToken>,
	/// Remaining fields (token type, expiry, profile data).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl TokenResponse {
	/// Decodes a parsed payload, reporting the failing field path on error.
	pub fn from_payload(payload: &Value) -> Result<Self> {
		serde_path_to_error::deserialize(payload).map_err(|source| Error::TokenResponse { source })
	}
}

/// Builds the token endpoint URL for `grant`, credentials included.
pub fn token_url(settings: &Settings, grant: TokenGrant) -> Result<Url, ConfigError> {
	let mut url = Url::parse(&format!("{}{TOKEN_PATH}", settings.base()))
		.map_err(|source| ConfigError::InvalidUrl { source })?;

	{
		let mut query = url.query_pairs_mut();

		query
			.append_pair("client_id", settings.key())
			.append_pair("client_secret", settings.secret());

		if let TokenGrant::Password(credentials) = grant {
			query
				.append_pair("username", credentials.username.as_str())
				.append_pair("password", credentials.password.secret());
		}

		query.append_pair("grant_type", grant.as_str());
	}

	Ok(url)
}

/// Builds the `GET` request for `grant`.
pub fn token_request(settings: &Settings, grant: TokenGrant) -> Result<HttpRequest, ConfigError> {
	let url = token_url(settings, grant)?;

	Ok(oauth2::http::Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, "application/json")
		.body(Vec::new())?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::Config;

	fn settings() -> Settings {
		Config::new("app key", "s&cret")
			.with_url("https://auth.example.com/")
			.resolve()
			.expect("Test settings should resolve.")
	}

	#[test]
	fn client_credentials_url_carries_app_credentials() {
		let url = token_url(&settings(), TokenGrant::ClientCredentials)
			.expect("Token URL should build.");

		assert_eq!(url.path(), "/oauth/token");

		let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

		assert_eq!(
			pairs,
			vec![
				("client_id".into(), "app key".into()),
				("client_secret".into(), "s&cret".into()),
				("grant_type".into(), "client_credentials".into()),
			]
		);
	}

	#[test]
	fn password_url_adds_user_credentials() {
		let credentials = Credentials::new("ada", "p@ss word");
		let url = token_url(&settings(), TokenGrant::Password(&credentials))
			.expect("Token URL should build.");
		let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("username").map(String::as_str), Some("ada"));
		assert_eq!(pairs.get("password").map(String::as_str), Some("p@ss word"));
		assert_eq!(pairs.get("grant_type").map(String::as_str), Some("password"));
	}

	#[test]
	fn token_request_is_a_json_get() {
		let request = token_request(&settings(), TokenGrant::ClientCredentials)
			.expect("Token request should build.");

		assert_eq!(request.method(), &Method::GET);
		assert_eq!(
			request.headers().get(ACCEPT).and_then(|value| value.to_str().ok()),
			Some("application/json")
		);
		assert!(request.body().is_empty());
	}

	#[test]
	fn token_response_requires_access_token() {
		let decoded = TokenResponse::from_payload(&json!({
			"access_token": "abc",
			"token_type": "bearer",
			"user": { "id": 1 }
		}))
		.expect("Payload with access_token should decode.");

		assert_eq!(decoded.access_token.expose(), "abc");
		assert!(decoded.refresh_token.is_none());
		assert_eq!(decoded.extra.get("token_type"), Some(&json!("bearer")));

		let err = TokenResponse::from_payload(&json!({ "token_type": "bearer" }))
			.expect_err("Payload without access_token should be rejected.");

		assert!(matches!(err, Error::TokenResponse { .. }));
	}

	#[test]
	fn credentials_debug_hides_password() {
		let rendered = format!("{:?}", Credentials::new("ada", "hunter2"));

		assert!(!rendered.contains("hunter2"));
	}
}
