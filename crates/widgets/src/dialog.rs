use std::cell::RefCell;
use std::rc::Rc;

use jst_overlay::{ClientCx, ClientKind, Hosting, OverlayTree, PopupClient, Transition};
use jst_primitives::{ClientId, FrameId, Theme};
use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::popup::{self, Animation, HasCore, PopupCore, PopupState};

/// Topic emitted when a dialog resolves, with `{ "id", "outcome" }`.
pub const DIALOG_RESOLVED: &str = "dialog:resolved";

/// How a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
	Confirmed,
	/// Escape, a backdrop click or an explicit cancel.
	Cancelled,
}

impl DialogOutcome {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Confirmed => "confirmed",
			Self::Cancelled => "cancelled",
		}
	}
}

struct DialogClient {
	core: PopupCore,
	blocking: bool,
	outcome: Option<DialogOutcome>,
}

impl DialogClient {
	fn resolve(&mut self, outcome: DialogOutcome) -> bool {
		if !self.core.dismiss() {
			return false;
		}
		debug!(client = %self.core.id(), outcome = outcome.as_str(), "dialog resolved");
		self.outcome = Some(outcome);
		true
	}
}

impl HasCore for DialogClient {
	fn core(&self) -> &PopupCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut PopupCore {
		&mut self.core
	}
}

impl PopupClient for DialogClient {
	fn id(&self) -> &ClientId {
		self.core.id()
	}

	fn kind(&self) -> ClientKind {
		self.core.kind()
	}

	fn can_hide(&self) -> bool {
		!self.blocking
	}

	fn handle_escape(&mut self, cx: &mut ClientCx) {
		if self.resolve(DialogOutcome::Cancelled) {
			cx.release();
			cx.emit(
				DIALOG_RESOLVED,
				json!({ "id": self.core.id().as_str(), "outcome": DialogOutcome::Cancelled.as_str() }),
			);
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

/// A question awaiting a confirm or cancel answer.
///
/// A blocking dialog refuses to be hidden, so only critical popups can open
/// on top of it.
pub struct Dialog {
	client: Rc<RefCell<DialogClient>>,
	frame: FrameId,
}

impl Dialog {
	pub fn new(tree: &OverlayTree, frame: FrameId, id: impl Into<String>, blocking: bool) -> Result<Self> {
		Self::with_animation(tree, frame, id, blocking, Animation::Instant)
	}

	pub fn with_animation(tree: &OverlayTree, frame: FrameId, id: impl Into<String>, blocking: bool, animation: Animation) -> Result<Self> {
		let mut core = PopupCore::new(ClientId::new(id)?, ClientKind::Regular, Hosting::Inline, animation);
		core.set_theme(tree.theme(frame)?);
		Ok(Self {
			client: Rc::new(RefCell::new(DialogClient {
				core,
				blocking,
				outcome: None,
			})),
			frame,
		})
	}

	pub fn id(&self) -> ClientId {
		self.client.borrow().core.id().clone()
	}

	pub fn state(&self) -> PopupState {
		self.client.borrow().core.state()
	}

	pub fn is_blocking(&self) -> bool {
		self.client.borrow().blocking
	}

	pub fn outcome(&self) -> Option<DialogOutcome> {
		self.client.borrow().outcome
	}

	pub fn theme(&self) -> Theme {
		self.client.borrow().core.theme()
	}

	/// Opens the dialog. A resolved dialog cannot be opened again.
	pub fn show(&self, tree: &mut OverlayTree) -> Result<bool> {
		popup::show(tree, self.frame, &self.client)
	}

	pub fn confirm(&self, tree: &mut OverlayTree) -> Result<bool> {
		self.answer(tree, DialogOutcome::Confirmed)
	}

	pub fn cancel(&self, tree: &mut OverlayTree) -> Result<bool> {
		self.answer(tree, DialogOutcome::Cancelled)
	}

	fn answer(&self, tree: &mut OverlayTree, outcome: DialogOutcome) -> Result<bool> {
		let closed = popup::close(tree, self.frame, &self.client)?;
		if closed {
			self.client.borrow_mut().outcome = Some(outcome);
			let data = json!({ "id": self.id().as_str(), "outcome": outcome.as_str() });
			tree.emit(self.frame, DIALOG_RESOLVED, data)?;
		}
		Ok(closed)
	}
}
