use jst_primitives::ClientId;

use crate::client::{ClientHandle, ClientKind, Hosting};

/// A client on the stack together with the capabilities captured at push time.
///
/// Caching `id`, `kind` and `hosting` keeps stack inspection free of
/// `RefCell` borrows, so it works while the client itself is mid-callback.
#[derive(Clone)]
pub struct StackEntry {
	pub id: ClientId,
	pub kind: ClientKind,
	pub hosting: Hosting,
	pub client: ClientHandle,
}

impl std::fmt::Debug for StackEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StackEntry")
			.field("id", &self.id)
			.field("kind", &self.kind)
			.field("hosting", &self.hosting)
			.finish_non_exhaustive()
	}
}

/// LIFO stack of popup clients. Only the tail is interactive.
#[derive(Debug, Default)]
pub struct OverlayStack {
	entries: Vec<StackEntry>,
}

impl OverlayStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn top(&self) -> Option<&StackEntry> {
		self.entries.last()
	}

	pub fn is_top(&self, id: &ClientId) -> bool {
		self.top().is_some_and(|entry| &entry.id == id)
	}

	pub fn contains(&self, id: &ClientId) -> bool {
		self.entries.iter().any(|entry| &entry.id == id)
	}

	/// Ids from bottom to top.
	pub fn ids(&self) -> impl Iterator<Item = &ClientId> {
		self.entries.iter().map(|entry| &entry.id)
	}

	pub fn iter(&self) -> impl Iterator<Item = &StackEntry> {
		self.entries.iter()
	}

	pub(crate) fn push(&mut self, entry: StackEntry) {
		self.entries.push(entry);
	}

	/// Pops the tail only if it is `id`.
	pub(crate) fn pop_if_top(&mut self, id: &ClientId) -> Option<StackEntry> {
		if self.is_top(id) { self.entries.pop() } else { None }
	}

	/// Removes `id` wherever it sits.
	pub(crate) fn remove(&mut self, id: &ClientId) -> Option<StackEntry> {
		let index = self.entries.iter().position(|entry| &entry.id == id)?;
		Some(self.entries.remove(index))
	}
}
