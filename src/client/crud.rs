//! CRUD request facade.
//!
//! Every operation resolves the target URL and a bearer token before touching the network; if
//! either is missing the call fails with [`Error::InvalidQuery`] and no request is sent. Response
//! bodies are returned whatever the HTTP status, so callers inspect them for an `error` field
//! (see [`crate::response::upstream_error`]). Transport failures are returned as errors.

// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	client::Client,
	error::ConfigError,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::{self, CallKind},
	resource::{self, ApiRequest},
	response,
};

/// Boxed future returned by [`Crud`] operations.
pub type CrudFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + 'a + Send>>;

/// The CRUD capability set, for code that is generic over API clients.
pub trait Crud
where
	Self: Send + Sync,
{
	/// Creates a resource (`POST`).
	fn create(&self, request: ApiRequest) -> CrudFuture<'_>;

	/// Reads a resource (`GET`).
	fn read(&self, request: ApiRequest) -> CrudFuture<'_>;

	/// Updates a resource (`PUT`).
	fn update(&self, request: ApiRequest) -> CrudFuture<'_>;

	/// Deletes a resource (`DELETE`).
	fn destroy(&self, request: ApiRequest) -> CrudFuture<'_>;

	/// Alias for [`Crud::destroy`].
	fn del(&self, request: ApiRequest) -> CrudFuture<'_> {
		self.destroy(request)
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `POST`s `request.data` (default `{}`) as JSON.
	pub async fn create(&self, request: impl Into<ApiRequest>) -> Result<Value> {
		self.dispatch(CallKind::Create, Method::POST, request.into()).await
	}

	/// `GET`s the addressed resource.
	pub async fn read(&self, request: impl Into<ApiRequest>) -> Result<Value> {
		self.dispatch(CallKind::Read, Method::GET, request.into()).await
	}

	/// `PUT`s `request.data` (default `{}`) as JSON.
	pub async fn update(&self, request: impl Into<ApiRequest>) -> Result<Value> {
		self.dispatch(CallKind::Update, Method::PUT, request.into()).await
	}

	/// `DELETE`s the addressed resource.
	pub async fn destroy(&self, request: impl Into<ApiRequest>) -> Result<Value> {
		self.dispatch(CallKind::Destroy, Method::DELETE, request.into()).await
	}

	/// Alias for [`Client::destroy`].
	pub async fn del(&self, request: impl Into<ApiRequest>) -> Result<Value> {
		self.destroy(request).await
	}

	async fn dispatch(&self, call: CallKind, method: Method, request: ApiRequest) -> Result<Value> {
		obs::observe(call, async move {
			let url = resource::resolve_url(self.settings.base(), &request.target);
			let token = resource::resolve_token(request.token.as_ref(), &self.token);
			let (Some(url), Some(token)) = (url, token) else {
				return Err(Error::InvalidQuery);
			};
			let mut builder = Request::builder()
				.method(method.clone())
				.uri(url.as_str())
				.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
				.header(ACCEPT, "application/json");
			let body = if method == Method::POST || method == Method::PUT {
				builder = builder.header(CONTENT_TYPE, "application/json");

				serde_json::to_vec(&request.data.unwrap_or_else(|| json!({})))
					.map_err(ConfigError::from)?
			} else {
				Vec::new()
			};
			let response = self.send(call, builder.body(body).map_err(ConfigError::from)?).await?;

			if !response.status().is_success() {
				tracing::debug!(
					call = call.as_str(),
					status = response.status().as_u16(),
					"API answered with a non-success status"
				);
			}

			Ok(response::decode_body(response.body()))
		})
		.await
	}
}
impl<C, M> Crud for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn create(&self, request: ApiRequest) -> CrudFuture<'_> {
		Box::pin(self.dispatch(CallKind::Create, Method::POST, request))
	}

	fn read(&self, request: ApiRequest) -> CrudFuture<'_> {
		Box::pin(self.dispatch(CallKind::Read, Method::GET, request))
	}

	fn update(&self, request: ApiRequest) -> CrudFuture<'_> {
		Box::pin(self.dispatch(CallKind::Update, Method::PUT, request))
	}

	fn destroy(&self, request: ApiRequest) -> CrudFuture<'_> {
		Box::pin(self.dispatch(CallKind::Destroy, Method::DELETE, request))
	}
}
