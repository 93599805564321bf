use indexmap::IndexMap;
use jst_primitives::ClientId;

use crate::client::{ClientHandle, Hosting};

/// Outcome of [`ReusableRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
	Added,
	AlreadyCached,
	/// Frame popups not marked reusable are owned and destroyed by their creator.
	Ineligible,
}

/// Memoization cache of reusable popups keyed by id.
///
/// Entries are never evicted.
#[derive(Default)]
pub struct ReusableRegistry {
	clients: IndexMap<ClientId, ClientHandle>,
}

impl ReusableRegistry {
	pub fn register(&mut self, id: ClientId, hosting: Hosting, client: ClientHandle) -> Registration {
		if !hosting.is_reusable() {
			return Registration::Ineligible;
		}
		if self.clients.contains_key(&id) {
			return Registration::AlreadyCached;
		}
		self.clients.insert(id, client);
		Registration::Added
	}

	pub fn get(&self, id: &ClientId) -> Option<&ClientHandle> {
		self.clients.get(id)
	}

	/// Cached clients in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (&ClientId, &ClientHandle)> {
		self.clients.iter()
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}
