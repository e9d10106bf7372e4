//! Request descriptors and the rules that turn them into API URLs and bearer tokens.
//!
//! URLs are composed by plain concatenation onto `{url}/api/`. A bare path has one leading slash
//! stripped. A [`Resource`] applies `path`, `name`, `id`, and `type` in that order, each only when
//! present and non-empty, so `{path: "/a", name: "b", id: 1, type: "c"}` yields `/api/ab/1/c`.

// crates.io
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSlot},
};

/// Segment-composed addressing (`path`, then `name`, `/id`, `/type`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
	/// Raw API path; one leading slash is stripped.
	pub path: Option<String>,
	/// Collection name, appended as-is.
	pub name: Option<String>,
	/// Item identifier, appended as `/id`. Accepts JSON strings or numbers.
	///
	/// Identifiers are opaque text, so only an empty string is skipped; a numeric `0` is
	/// appended as `/0`.
	#[serde(deserialize_with = "de_identifier")]
	pub id: Option<String>,
	/// Sub-resource type, appended as `/type`.
	#[serde(rename = "type")]
	pub kind: Option<String>,
}
impl Resource {
	/// Addresses a named collection.
	pub fn named(name: impl Into<String>) -> Self {
		Self { name: Some(name.into()), ..Default::default() }
	}

	/// Sets the raw path segment.
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());

		self
	}

	/// Sets the item identifier.
	pub fn with_id(mut self, id: impl Display) -> Self {
		self.id = Some(id.to_string());

		self
	}

	/// Sets the sub-resource type.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());

		self
	}

	fn append_to(&self, url: &mut String) {
		if let Some(path) = non_empty(&self.path) {
			url.push_str(strip_leading_slash(path));
		}
		if let Some(name) = non_empty(&self.name) {
			url.push_str(name);
		}
		if let Some(id) = non_empty(&self.id) {
			url.push('/');
			url.push_str(id);
		}
		if let Some(kind) = non_empty(&self.kind) {
			url.push('/');
			url.push_str(kind);
		}
	}
}

/// What a request addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
	/// Complete API path (a bare string descriptor).
	Path(String),
	/// Segment-composed descriptor.
	Resource(Resource),
}
impl Default for Target {
	fn default() -> Self {
		Self::Resource(Resource::default())
	}
}

/// Descriptor passed to the CRUD operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiRequest {
	/// Addressed resource.
	pub target: Target,
	/// Bearer token overriding the client's application token.
	pub token: Option<AccessToken>,
	/// JSON body for `create`/`update`; defaults to `{}`.
	pub data: Option<Value>,
}
impl ApiRequest {
	/// Addresses a complete API path.
	pub fn path(path: impl Into<String>) -> Self {
		Self { target: Target::Path(path.into()), ..Default::default() }
	}

	/// Addresses a segment-composed resource.
	pub fn resource(resource: Resource) -> Self {
		Self { target: Target::Resource(resource), ..Default::default() }
	}

	/// Overrides the bearer token for this request only.
	pub fn with_token(mut self, token: impl Into<AccessToken>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Attaches a JSON body.
	pub fn with_data(mut self, data: Value) -> Self {
		self.data = Some(data);

		self
	}
}
impl From<&str> for ApiRequest {
	fn from(path: &str) -> Self {
		Self::path(path)
	}
}
impl From<String> for ApiRequest {
	fn from(path: String) -> Self {
		Self::path(path)
	}
}
impl From<Resource> for ApiRequest {
	fn from(resource: Resource) -> Self {
		Self::resource(resource)
	}
}

/// Resolves `target` against the server `base` (no trailing slash).
///
/// Returns `None` when the composed string is not a valid URL.
pub fn resolve_url(base: &str, target: &Target) -> Option<Url> {
	let mut url = format!("{base}/api/");

	match target {
		Target::Path(path) => url.push_str(strip_leading_slash(path)),
		Target::Resource(resource) => resource.append_to(&mut url),
	}

	match Url::parse(&url) {
		Ok(url) => Some(url),
		Err(e) => {
			tracing::debug!(url = %url, error = %e, "descriptor resolved to an invalid URL");

			None
		},
	}
}

/// Picks the bearer token: a non-empty per-request token wins over the slot.
pub fn resolve_token(request: Option<&AccessToken>, slot: &TokenSlot) -> Option<AccessToken> {
	request.filter(|token| !token.expose().is_empty()).cloned().or_else(|| slot.get())
}

fn strip_leading_slash(path: &str) -> &str {
	path.strip_prefix('/').unwrap_or(path)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.is_empty())
}

fn de_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(Value::String(id)) => Some(id),
		Some(Value::Number(id)) => Some(id.to_string()),
		_ => None,
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const BASE: &str = "https://api.example.com";

	fn resolve(target: Target) -> String {
		resolve_url(BASE, &target).expect("Descriptor should resolve to a URL.").to_string()
	}

	#[test]
	fn bare_paths_strip_one_leading_slash() {
		assert_eq!(resolve(Target::Path("foo".into())), "https://api.example.com/api/foo");
		assert_eq!(resolve(Target::Path("/foo".into())), "https://api.example.com/api/foo");
		assert_eq!(resolve(Target::Path("//foo".into())), "https://api.example.com/api//foo");
	}

	#[test]
	fn resource_fields_append_sequentially() {
		let resource = Resource::named("b").with_path("/a").with_id(1).with_kind("c");

		assert_eq!(resolve(Target::Resource(resource)), "https://api.example.com/api/ab/1/c");
	}

	#[test]
	fn named_resources_skip_absent_segments() {
		assert_eq!(
			resolve(Target::Resource(Resource::named("apps").with_id("42"))),
			"https://api.example.com/api/apps/42"
		);
		assert_eq!(
			resolve(Target::Resource(Resource::named("/apps").with_kind("events"))),
			"https://api.example.com/api//apps/events"
		);
		assert_eq!(resolve(Target::default()), "https://api.example.com/api/");
	}

	#[test]
	fn zero_identifier_is_a_real_segment() {
		assert_eq!(
			resolve(Target::Resource(Resource::named("apps").with_id(0))),
			"https://api.example.com/api/apps/0"
		);
		assert_eq!(
			resolve(Target::Resource(Resource::named("apps").with_id(""))),
			"https://api.example.com/api/apps"
		);
	}

	#[test]
	fn resource_deserializes_numeric_ids() {
		let resource: Resource =
			serde_json::from_value(json!({ "name": "apps", "id": 7, "type": "stats" }))
				.expect("Resource descriptor should deserialize.");

		assert_eq!(resource, Resource::named("apps").with_id(7).with_kind("stats"));
	}

	#[test]
	fn request_token_overrides_slot() {
		let slot = TokenSlot::default();

		assert!(resolve_token(None, &slot).is_none());

		slot.set("app-token".into());

		let explicit = AccessToken::new("user-token");
		let empty = AccessToken::new("");

		assert_eq!(
			resolve_token(Some(&explicit), &slot).map(|token| token.expose().to_owned()),
			Some("user-token".into())
		);
		assert_eq!(
			resolve_token(Some(&empty), &slot).map(|token| token.expose().to_owned()),
			Some("app-token".into())
		);
	}
}
