//! Messages exchanged between coordinators of neighbouring frames.

use jst_primitives::{FrameId, Theme, UiEvent};
use serde_json::Value;

/// Cross-frame request from one coordinator to its parent or child.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameMessage {
	/// Child → parent: the sender's stack went from empty to non-empty.
	AttachChild(FrameId),
	/// Child → parent: the sender's stack stayed empty past the grace window.
	DetachChild(FrameId),
	/// Child → parent: a frame popup took over, the parent's top is hidden behind it.
	CoverTop,
	/// Parent → child: dismissal already validated by an ancestor.
	Escape { event: UiEvent, originated_from_child: bool },
	/// Child → parent: upward event-bus emission.
	Emit { topic: String, data: Value },
	/// Parent → child: theme propagation.
	Theme(Theme),
}

impl FrameMessage {
	pub fn name(&self) -> &'static str {
		match self {
			Self::AttachChild(_) => "attach_child",
			Self::DetachChild(_) => "detach_child",
			Self::CoverTop => "cover_top",
			Self::Escape { .. } => "escape",
			Self::Emit { .. } => "emit",
			Self::Theme(_) => "theme",
		}
	}
}

/// Addressed [`FrameMessage`].
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
	pub from: FrameId,
	pub to: FrameId,
	pub message: FrameMessage,
}

impl Envelope {
	pub fn new(from: FrameId, to: FrameId, message: FrameMessage) -> Self {
		Self { from, to, message }
	}
}
