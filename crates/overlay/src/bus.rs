//! Upward-only event bus letting nested popups notify their ancestors.

use indexmap::IndexMap;
use jst_primitives::SubscriptionId;
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Whether an emission continues to the parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
	#[default]
	Continue,
	Stop,
}

impl From<bool> for Propagation {
	fn from(keep_going: bool) -> Self {
		if keep_going { Self::Continue } else { Self::Stop }
	}
}

/// Topic callback.
pub type Subscriber = Box<dyn FnMut(&Value) -> Propagation>;

/// Topic → subscription → callback map of one frame.
#[derive(Default)]
pub struct EventBus {
	topics: FxHashMap<String, IndexMap<SubscriptionId, Subscriber>>,
	topic_of: FxHashMap<SubscriptionId, String>,
}

impl EventBus {
	pub(crate) fn subscribe(&mut self, topic: String, id: SubscriptionId, callback: Subscriber) {
		self.topic_of.insert(id, topic.clone());
		self.topics.entry(topic).or_default().insert(id, callback);
	}

	/// Returns false for an unknown id.
	pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let Some(topic) = self.topic_of.remove(&id) else {
			return false;
		};
		let Some(subscribers) = self.topics.get_mut(&topic) else {
			return false;
		};
		let removed = subscribers.shift_remove(&id).is_some();
		if subscribers.is_empty() {
			self.topics.remove(&topic);
		}
		removed
	}

	/// Runs every subscriber of `topic` in subscription order.
	///
	/// All subscribers run even after one stops propagation; the result only
	/// decides whether the parent frame sees the emission.
	pub(crate) fn publish(&mut self, topic: &str, data: &Value) -> Propagation {
		let Some(subscribers) = self.topics.get_mut(topic) else {
			return Propagation::Continue;
		};
		let mut flow = Propagation::Continue;
		for callback in subscribers.values_mut() {
			if callback(data) == Propagation::Stop {
				flow = Propagation::Stop;
			}
		}
		flow
	}

	pub fn subscriber_count(&self, topic: &str) -> usize {
		self.topics.get(topic).map_or(0, IndexMap::len)
	}
}
