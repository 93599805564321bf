//! Usage errors surfaced by the coordinator tree.
//!
//! Only programmer errors become [`OverlayError`]s. Ordering races such as a
//! release from a client that is not on top are logged and ignored instead.

use jst_primitives::{ClientId, FrameId};
use thiserror::Error;

/// Errors returned by [`OverlayTree`](crate::OverlayTree) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
	/// The frame was never created or has been removed.
	#[error("unknown frame {0}")]
	UnknownFrame(FrameId),

	/// A reusable client was requested but never cached.
	#[error("client {id} is not registered as reusable in {frame}")]
	NotRegistered {
		/// Frame whose registry was searched.
		frame: FrameId,
		/// Requested client id.
		id: ClientId,
	},

	/// The client was handed to the tree while the caller still borrowed it.
	#[error("popup client is borrowed elsewhere")]
	ClientBorrowed,

	/// The root frame owns the tree and cannot be removed.
	#[error("the root frame cannot be removed")]
	RootFrame,
}

/// Result type for coordinator operations.
pub type Result<T> = std::result::Result<T, OverlayError>;
