//! Transport primitives for AppTrack API calls.
//!
//! [`ApiHttpClient`] is the client's only dependency on an HTTP stack. Requests and responses use
//! the `oauth2` crate's `http`-based [`HttpRequest`]/[`HttpResponse`] aliases so custom
//! transports never need reqwest types. Transport failures travel as [`HttpClientError`] and are
//! turned into client errors by a [`TransportErrorMapper`].

// std
use std::ops::Deref;
// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderMap, header::RETRY_AFTER},
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::CallKind,
};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute API requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many client clones,
/// and the futures they return must be `Send` so client calls can be spawned onto any executor.
/// Redirect and timeout policy belong to the transport.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes one request and returns the full response, whatever its status.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(&self, call: CallKind, error: HttpClientError<E>) -> Error;
}

/// Status and retry hint captured from a response.
///
/// Additional metadata fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code, if a response was received.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Captures the metadata of a received response.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self {
			status: Some(response.status().as_u16()),
			retry_after: parse_retry_after(response.headers()),
		}
	}
}

/// Thin wrapper around reqwest's client so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub HttpClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest client.
	pub fn with_client(client: HttpClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<HttpClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &HttpClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = HttpClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, call: CallKind, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(call, *inner),
			other => map_common_transport_error(call, other),
		}
	}
}

/// Maps the transport-independent [`HttpClientError`] variants.
///
/// Custom [`TransportErrorMapper`] implementations can delegate here once they have handled
/// their own transport variant.
pub fn map_common_transport_error<E>(call: CallKind, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	tracing::debug!(call = call.as_str(), error = %err, "transport failure");

	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		other => TransportError::Other { message: other.to_string() }.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(call: CallKind, err: ReqwestError) -> Error {
	tracing::debug!(call = call.as_str(), error = %err, "reqwest transport failure");

	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<i64>() {
		return Some(Duration::seconds(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
