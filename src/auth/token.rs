//! Access token secret wrapper and the in-memory slot holding the application token.

// self
use crate::_prelude::*;

/// Redacted access token wrapper keeping bearer credentials out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for AccessToken {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for AccessToken {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Token currently held by a [`TokenSlot`], stamped with the instant it was stored.
#[derive(Clone, Debug)]
pub struct StoredToken {
	/// Application access token.
	pub token: AccessToken,
	/// Instant the token was written into the slot.
	pub stored_at: OffsetDateTime,
}

/// Single shared slot for the application token.
///
/// The slot never expires or refreshes its contents. Concurrent writers race and the last
/// write wins; the lock only guards memory safety, not request de-duplication.
#[derive(Clone, Debug, Default)]
pub struct TokenSlot(Arc<RwLock<Option<StoredToken>>>);
impl TokenSlot {
	/// Returns the held token, if any.
	pub fn get(&self) -> Option<AccessToken> {
		self.0.read().as_ref().map(|stored| stored.token.clone())
	}

	/// Returns the held token together with the instant it was stored.
	pub fn stored(&self) -> Option<StoredToken> {
		self.0.read().clone()
	}

	/// Replaces the held token.
	pub fn set(&self, token: AccessToken) {
		*self.0.write() = Some(StoredToken { token, stored_at: OffsetDateTime::now_utc() });
	}

	/// Returns `true` when a token is present.
	pub fn is_set(&self) -> bool {
		self.0.read().is_some()
	}
}
