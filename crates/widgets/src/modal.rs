use std::cell::RefCell;
use std::rc::Rc;

use jst_overlay::{ClientCx, ClientHandle, ClientKind, Hosting, Nesting, OverlayTree, PopupClient, Registration, Transition};
use jst_primitives::{ClientId, FrameId, Opacity, Theme, TransferId};
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::error::Result;
use crate::popup::{self, Animation, HasCore, PopupCore, PopupState};

/// Topic emitted with `{ "id" }` whenever a modal closes, whether by escape,
/// an outside click, [`Modal::close`] or [`Modal::destroy`].
pub const MODAL_CLOSED: &str = "modal:closed";

/// Construction options for a [`Modal`].
#[derive(Debug, Clone)]
pub struct ModalOptions {
	id: String,
	cancelable: bool,
	show_overlay: bool,
	opacity: Opacity,
	hosting: Hosting,
	data: Option<Value>,
	animation: Animation,
}

impl ModalOptions {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			cancelable: true,
			show_overlay: true,
			opacity: Opacity::Unset,
			hosting: Hosting::Inline,
			data: None,
			animation: Animation::Instant,
		}
	}

	/// Whether escape and backdrop clicks close the modal.
	pub fn cancelable(mut self, cancelable: bool) -> Self {
		self.cancelable = cancelable;
		self
	}

	pub fn overlay(mut self, show: bool) -> Self {
		self.show_overlay = show;
		self
	}

	pub fn opacity(mut self, opacity: f32) -> Self {
		self.opacity = Opacity::Value(opacity);
		self
	}

	/// Hosts the content in a nested frame.
	pub fn in_frame(mut self, reusable: bool) -> Self {
		self.hosting = Hosting::Frame { reusable };
		self
	}

	/// Initialization data handed to the content frame through the root's
	/// injected data store.
	pub fn with_data(mut self, data: Value) -> Self {
		self.data = Some(data);
		self
	}

	pub fn animated(mut self) -> Self {
		self.animation = Animation::Animated;
		self
	}
}

struct ModalClient {
	core: PopupCore,
	cancelable: bool,
	show_overlay: bool,
	opacity: Opacity,
}

impl HasCore for ModalClient {
	fn core(&self) -> &PopupCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut PopupCore {
		&mut self.core
	}
}

impl PopupClient for ModalClient {
	fn id(&self) -> &ClientId {
		self.core.id()
	}

	fn kind(&self) -> ClientKind {
		self.core.kind()
	}

	fn hosting(&self) -> Hosting {
		self.core.hosting()
	}

	fn handle_escape(&mut self, cx: &mut ClientCx) {
		if !self.cancelable {
			trace!(client = %self.core.id(), "modal is not cancelable");
			return;
		}
		if self.core.dismiss() {
			cx.release();
			cx.emit(MODAL_CLOSED, json!({ "id": self.core.id().as_str() }));
		}
	}

	fn make_visible(&mut self, _cx: &mut ClientCx) -> Transition {
		self.core.make_visible()
	}

	fn hide(&mut self, _cx: &mut ClientCx) -> Transition {
		self.core.hide()
	}

	fn show_overlay(&self) -> bool {
		self.show_overlay
	}

	fn opacity(&self) -> Opacity {
		self.opacity
	}

	fn set_theme(&mut self, theme: Theme) {
		self.core.set_theme(theme);
	}

	fn covered_by_frame(&mut self) {
		self.core.cover();
	}

	fn nesting_changed(&mut self, nesting: Nesting) {
		self.core.set_nesting(nesting);
	}
}

/// A general purpose popup, optionally hosted in its own nested frame.
pub struct Modal {
	client: Rc<RefCell<ModalClient>>,
	frame: FrameId,
	content: Option<FrameId>,
	transfer: Option<TransferId>,
}

impl Modal {
	/// Creates the modal in `frame`.
	///
	/// Frame-hosted modals get a nested content frame. Reusable modals are
	/// cached in `frame`'s registry so they can be shown again by id.
	pub fn new(tree: &mut OverlayTree, frame: FrameId, options: ModalOptions) -> Result<Self> {
		let id = ClientId::new(options.id)?;
		let hosting = options.hosting;
		let content = if hosting.is_frame() { Some(tree.nest_frame(frame)?) } else { None };
		let transfer = options.data.map(|data| tree.inject_client_data(frame, data)).transpose()?;
		let client = Rc::new(RefCell::new(ModalClient {
			core: PopupCore::new(id, ClientKind::Regular, hosting, options.animation),
			cancelable: options.cancelable,
			show_overlay: options.show_overlay,
			opacity: options.opacity,
		}));
		client.borrow_mut().core.set_theme(tree.theme(frame)?);

		let handle: ClientHandle = client.clone();
		if tree.cache_reusable(frame, handle)? == Registration::Ineligible {
			trace!(%frame, "modal is not reusable; owner must destroy it");
		}
		Ok(Self {
			client,
			frame,
			content,
			transfer,
		})
	}

	pub fn id(&self) -> ClientId {
		self.client.borrow().core.id().clone()
	}

	pub fn frame(&self) -> FrameId {
		self.frame
	}

	/// Nested frame holding the content of a frame-hosted modal.
	pub fn content_frame(&self) -> Option<FrameId> {
		self.content
	}

	/// Key of the injected initialization data.
	pub fn transfer_id(&self) -> Option<TransferId> {
		self.transfer
	}

	pub fn state(&self) -> PopupState {
		self.client.borrow().core.state()
	}

	pub fn theme(&self) -> Theme {
		self.client.borrow().core.theme()
	}

	pub fn is_nested(&self) -> bool {
		self.client.borrow().core.is_nested()
	}

	pub fn is_covered(&self) -> bool {
		self.client.borrow().core.is_covered()
	}

	pub fn is_animating(&self) -> bool {
		self.client.borrow().core.is_animating()
	}

	pub fn finish_transition(&self) {
		self.client.borrow_mut().core.finish_transition();
	}

	/// Acquires the top of the stack. Returns false when the current top refuses.
	pub fn show(&self, tree: &mut OverlayTree) -> Result<bool> {
		popup::show(tree, self.frame, &self.client)
	}

	/// Releases the modal. Returns false when it is not the visible top.
	pub fn close(&self, tree: &mut OverlayTree) -> Result<bool> {
		let closed = popup::close(tree, self.frame, &self.client)?;
		if closed {
			tree.emit(self.frame, MODAL_CLOSED, json!({ "id": self.id().as_str() }))?;
		}
		Ok(closed)
	}

	/// Takes the modal off the stack even when it is buried, then deletes its
	/// injected data and removes its content frame.
	pub fn destroy(self, tree: &mut OverlayTree) -> Result<()> {
		let id = self.id();
		if self.state().is_stacked() {
			self.client.borrow_mut().core.dismiss();
			if tree.discard(self.frame, &id)? {
				tree.emit(self.frame, MODAL_CLOSED, json!({ "id": id.as_str() }))?;
			}
		}
		if let Some(transfer) = self.transfer {
			tree.delete_client_data(self.frame, &transfer)?;
		}
		if let Some(content) = self.content {
			tree.remove_frame(content)?;
		}
		debug!(frame = %self.frame, client = %id, "modal destroyed");
		Ok(())
	}
}
