//! Process-local key-value scratch space shared by client clones.

// self
use crate::{
	_prelude::*,
	client::Client,
	http::{ApiHttpClient, TransportErrorMapper},
};

/// In-memory map of JSON values; writes merge and the last write for a key wins.
#[derive(Clone, Debug, Default)]
pub struct ScratchStore(Arc<RwLock<HashMap<String, Value>>>);
impl ScratchStore {
	/// Returns a copy of the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<Value> {
		self.0.read().get(key).cloned()
	}

	/// Merges `entries` into the store.
	pub fn set<I, K>(&self, entries: I) -> &Self
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let mut guard = self.0.write();

		for (key, value) in entries {
			guard.insert(key.into(), value);
		}

		self
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing has been stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Reads a scratch value.
	pub fn get(&self, key: &str) -> Option<Value> {
		self.scratch.get(key)
	}

	/// Merges `entries` into the scratch store and returns the client for chaining.
	pub fn set<I, K>(&self, entries: I) -> &Self
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		self.scratch.set(entries);

		self
	}
}
