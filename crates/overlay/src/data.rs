use jst_primitives::TransferId;
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Initialization payloads handed to nested frame popups, keyed by transfer id.
///
/// Only the root coordinator holds entries. Owners of non-reusable frame
/// popups must delete their entry when the popup is destroyed; nothing else
/// ever removes it.
#[derive(Debug, Default)]
pub struct InjectedDataStore {
	entries: FxHashMap<TransferId, Value>,
}

impl InjectedDataStore {
	pub fn insert(&mut self, id: TransferId, data: Value) -> Option<Value> {
		self.entries.insert(id, data)
	}

	pub fn get(&self, id: &TransferId) -> Option<&Value> {
		self.entries.get(id)
	}

	pub fn remove(&mut self, id: &TransferId) -> Option<Value> {
		self.entries.remove(id)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
