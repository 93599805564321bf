use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Rejection reasons for a malformed [`ClientId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
	/// The id was empty.
	#[error("client id must not be empty")]
	Empty,
	/// The id contained whitespace at the given byte offset.
	#[error("client id {id:?} contains whitespace at byte {at}")]
	Whitespace {
		/// Offending id.
		id: String,
		/// Byte offset of the first whitespace character.
		at: usize,
	},
}

/// Stable identifier of a popup client.
///
/// Ids are application supplied. They double as keys of the reusable-client
/// registry, so they must be non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
	/// Validates and wraps an id.
	pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
		let id = id.into();
		if id.is_empty() {
			return Err(IdError::Empty);
		}
		if let Some((at, _)) = id.char_indices().find(|(_, c)| c.is_whitespace()) {
			return Err(IdError::Whitespace { id, at });
		}
		Ok(Self(id))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ClientId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for ClientId {
	type Err = IdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for ClientId {
	type Error = IdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<ClientId> for String {
	fn from(id: ClientId) -> Self {
		id.0
	}
}

/// Identifier of one browsing-context-equivalent (a frame) in a coordinator tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u32);

impl fmt::Display for FrameId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "frame#{}", self.0)
	}
}

/// Handle returned by an event-bus subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Identifier of an element that can be the target of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Randomly generated key for data injected into a nested frame popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(Uuid);

impl TransferId {
	/// Generates a fresh random transfer id.
	pub fn random() -> Self {
		Self(Uuid::new_v4())
	}

	pub fn as_uuid(&self) -> Uuid {
		self.0
	}
}

impl fmt::Display for TransferId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl FromStr for TransferId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Uuid::parse_str(s).map(Self)
	}
}
