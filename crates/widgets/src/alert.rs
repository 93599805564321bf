use std::cell::RefCell;
use std::rc::Rc;

use jst_overlay::{ClientCx, ClientKind, Hosting, OverlayTree, PopupClient, Transition};
use jst_primitives::{ClientId, FrameId, Theme};
use tracing::debug;

use crate::error::Result;
use crate::popup::{self, Animation, HasCore, PopupCore, PopupState};

struct AlertClient {
	core: PopupCore,
	message: String,
	acknowledged: bool,
}

impl HasCore for AlertClient {
	fn core(&self) -> &PopupCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut PopupCore {
		&mut self.core
	}
}

impl PopupClient for AlertClient {
	fn id(&self) -> &ClientId {
		self.core.id()
	}

	fn kind(&self) -> ClientKind {
		self.core.kind()
	}

	fn handle_escape(&mut self, cx: &mut ClientCx) {
		if self.core.dismiss() {
			self.acknowledged = true;
			debug!(client = %self.core.id(), "alert acknowledged");
			cx.release();
		}
	}

	fn make_visible(&mut self, _cx: &mut ClientCx) -> Transition {
		self.core.make_visible()
	}

	fn hide(&mut self, _cx: &mut ClientCx) -> Transition {
		self.core.hide()
	}

	fn set_theme(&mut self, theme: Theme) {
		self.core.set_theme(theme);
	}
}

/// A message that always opens, even over a blocking dialog.
pub struct Alert {
	client: Rc<RefCell<AlertClient>>,
	frame: FrameId,
}

impl Alert {
	pub fn new(tree: &OverlayTree, frame: FrameId, id: impl Into<String>, message: impl Into<String>) -> Result<Self> {
		let mut core = PopupCore::new(ClientId::new(id)?, ClientKind::Critical, Hosting::Inline, Animation::Instant);
		core.set_theme(tree.theme(frame)?);
		Ok(Self {
			client: Rc::new(RefCell::new(AlertClient {
				core,
				message: message.into(),
				acknowledged: false,
			})),
			frame,
		})
	}

	pub fn id(&self) -> ClientId {
		self.client.borrow().core.id().clone()
	}

	pub fn message(&self) -> String {
		self.client.borrow().message.clone()
	}

	pub fn state(&self) -> PopupState {
		self.client.borrow().core.state()
	}

	pub fn is_acknowledged(&self) -> bool {
		self.client.borrow().acknowledged
	}

	/// Opens the alert over whatever is on top. An acknowledged alert stays closed.
	pub fn show(&self, tree: &mut OverlayTree) -> Result<bool> {
		popup::show(tree, self.frame, &self.client)
	}

	/// Acknowledges and closes the alert.
	pub fn acknowledge(&self, tree: &mut OverlayTree) -> Result<bool> {
		let closed = popup::close(tree, self.frame, &self.client)?;
		if closed {
			self.client.borrow_mut().acknowledged = true;
		}
		Ok(closed)
	}
}
