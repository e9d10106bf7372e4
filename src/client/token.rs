//! Application token acquisition and user login against the token endpoint.
//!
//! Both grants share one normalized error path: transport failures, malformed bodies, and payloads
//! carrying an `error` field all come back as `Err`. The only difference is that `token` caches
//! its result in the client's slot while `login` hands the full payload to the caller.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::Client,
	http::{ApiHttpClient, ResponseMetadata, TransportErrorMapper},
	oauth::{self, Credentials, TokenGrant, TokenResponse},
	obs::{self, CallKind},
	response,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns the application token, fetching it with the `client_credentials` grant if the
	/// slot is empty.
	///
	/// A held token is returned without a network call. Concurrent calls on an empty slot each
	/// issue their own request; the last response to arrive wins the slot.
	pub async fn token(&self) -> Result<AccessToken> {
		if let Some(token) = self.token.get() {
			return Ok(token);
		}

		obs::observe(CallKind::Token, async {
			let request = oauth::token_request(&self.settings, TokenGrant::ClientCredentials)?;
			let payload = self.token_endpoint(CallKind::Token, request).await?;
			let TokenResponse { access_token, .. } = TokenResponse::from_payload(&payload)?;

			self.token.set(access_token.clone());

			Ok(access_token)
		})
		.await
	}

	/// Logs a user in with the `password` grant and returns the full token payload.
	///
	/// An empty response body yields [`Error::NoValidCredentials`]; payloads carrying an `error`
	/// field yield [`Error::Upstream`]. The application token slot is left untouched.
	pub async fn login(&self, credentials: &Credentials) -> Result<Value> {
		obs::observe(CallKind::Login, async {
			let request = oauth::token_request(&self.settings, TokenGrant::Password(credentials))?;

			self.token_endpoint(CallKind::Login, request).await
		})
		.await
	}

	pub(super) fn spawn_app_token(&self) {
		match tokio::runtime::Handle::try_current() {
			Ok(handle) => {
				let client = self.clone();

				handle.spawn(async move {
					if let Err(e) = client.token().await {
						tracing::warn!(error = %e, "application token fetch failed");
					}
				});
			},
			Err(_) => tracing::warn!(
				"no tokio runtime is running; call `token()` to fetch the application token"
			),
		}
	}

	async fn token_endpoint(&self, call: CallKind, request: oauth2::HttpRequest) -> Result<Value> {
		let response = self.send(call, request).await?;
		let meta = ResponseMetadata::from_response(&response);
		let body = String::from_utf8_lossy(response.body());

		if call == CallKind::Login && body.trim().is_empty() {
			return Err(Error::NoValidCredentials);
		}

		let payload = response::parse_response(&body);

		response::into_result(payload, Some(&meta)).inspect_err(|e| {
			tracing::warn!(call = call.as_str(), error = %e, "token endpoint returned an error");
		})
	}
}
