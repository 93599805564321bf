//! The capability surface every popup implements to take part in stacking.

use std::cell::RefCell;
use std::rc::Rc;

use jst_primitives::{ClientId, FrameId, Opacity, Theme};
use serde_json::Value;

use crate::transition::Transition;

/// Shared handle to a popup client.
///
/// Application code keeps its own typed handle; the coordinator stores the
/// type-erased one on its stack and in the reusable registry.
pub type ClientHandle = Rc<RefCell<dyn PopupClient>>;

/// Whether a client may be refused by the current top client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientKind {
	/// Acquisition is declined when the current top refuses to hide.
	#[default]
	Regular,
	/// Acquisition always succeeds (alerts).
	Critical,
}

/// Where a popup's content lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hosting {
	/// Content rendered in the current frame.
	#[default]
	Inline,
	/// Content rendered in a nested same-origin frame.
	Frame {
		/// Whether the popup survives being closed and may be cached by id.
		reusable: bool,
	},
}

impl Hosting {
	pub fn is_frame(self) -> bool {
		matches!(self, Self::Frame { .. })
	}

	/// Inline popups are always cacheable; frame popups only when marked reusable.
	pub fn is_reusable(self) -> bool {
		match self {
			Self::Inline => true,
			Self::Frame { reusable } => reusable,
		}
	}
}

/// Change in the nesting state of a frame popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
	/// A popup opened inside this popup's frame: hide the close affordance and
	/// freeze scrolling.
	Attached,
	/// The nested popups are gone: restore the close affordance and scrolling.
	Detached,
}

/// A modal, dialog or alert managed by a [`Coordinator`](crate::Coordinator).
///
/// The coordinator never touches animation timing. `hide` and `make_visible`
/// start whatever transition the popup uses and hand back a [`Transition`]
/// signalling its completion.
///
/// Implementations should tolerate redundant calls (hiding a hidden popup,
/// revealing a visible one) because animation callbacks can race with
/// coordinator decisions.
pub trait PopupClient {
	fn id(&self) -> &ClientId;

	fn kind(&self) -> ClientKind {
		ClientKind::Regular
	}

	fn hosting(&self) -> Hosting {
		Hosting::Inline
	}

	/// Asked before another regular client takes over.
	fn can_hide(&self) -> bool {
		true
	}

	/// Escape key or outside click routed to this client while it is on top.
	fn handle_escape(&mut self, cx: &mut ClientCx);

	/// The client became topmost again.
	fn make_visible(&mut self, cx: &mut ClientCx) -> Transition;

	/// Another client took over.
	fn hide(&mut self, cx: &mut ClientCx) -> Transition;

	/// Whether the shared backdrop is shown while this client is on top.
	fn show_overlay(&self) -> bool {
		true
	}

	fn opacity(&self) -> Opacity {
		Opacity::Unset
	}

	fn set_theme(&mut self, theme: Theme) {
		let _ = theme;
	}

	/// A frame popup was opened inside this client's nested frame.
	fn covered_by_frame(&mut self) {}

	/// Pre/post-nesting adjustment hook, only called on frame-hosted clients.
	fn nesting_changed(&mut self, nesting: Nesting) {
		let _ = nesting;
	}
}

/// Work a client asks the coordinator to perform once the current callback
/// has returned.
pub(crate) enum ClientRequest {
	Release(ClientId),
	Acquire(ClientHandle),
	Emit { topic: String, data: Value },
}

/// Callback context handed to a client.
///
/// Clients cannot reach the tree while it is calling them. Requests are
/// queued and processed in FIFO order before the public operation that
/// triggered the callback returns.
pub struct ClientCx {
	frame: FrameId,
	client: ClientId,
	requests: Vec<ClientRequest>,
}

impl ClientCx {
	pub(crate) fn new(frame: FrameId, client: ClientId) -> Self {
		Self {
			frame,
			client,
			requests: Vec::new(),
		}
	}

	/// Frame whose coordinator is calling.
	pub fn frame(&self) -> FrameId {
		self.frame
	}

	/// Id of the client being called.
	pub fn client(&self) -> &ClientId {
		&self.client
	}

	/// Releases the calling client.
	pub fn release(&mut self) {
		self.requests.push(ClientRequest::Release(self.client.clone()));
	}

	/// Acquires another client in the same frame.
	pub fn acquire(&mut self, client: ClientHandle) {
		self.requests.push(ClientRequest::Acquire(client));
	}

	/// Emits on the event bus of the calling frame.
	pub fn emit(&mut self, topic: impl Into<String>, data: Value) {
		self.requests.push(ClientRequest::Emit {
			topic: topic.into(),
			data,
		});
	}

	pub fn has_requests(&self) -> bool {
		!self.requests.is_empty()
	}

	pub(crate) fn into_requests(self) -> Vec<ClientRequest> {
		self.requests
	}
}
