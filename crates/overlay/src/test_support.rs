use std::cell::RefCell;
use std::rc::Rc;

use jst_primitives::{ClientId, Opacity, Theme};
use serde_json::json;

use crate::client::{ClientCx, ClientKind, Hosting, Nesting, PopupClient};
use crate::transition::{Transition, TransitionHandle};

pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn call_log() -> CallLog {
	Rc::new(RefCell::new(Vec::new()))
}

pub(crate) fn cid(id: &str) -> ClientId {
	ClientId::new(id).unwrap()
}

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).with_test_writer().try_init();
}

pub(crate) enum OnEscape {
	Record,
	Release,
	Emit(&'static str),
}

/// Popup double that appends every coordinator callback to a shared log as
/// `"<id>:<call>"`.
pub(crate) struct RecordingClient {
	id: ClientId,
	kind: ClientKind,
	hosting: Hosting,
	can_hide: bool,
	show_overlay: bool,
	opacity: Opacity,
	on_escape: OnEscape,
	animated: bool,
	pending: Vec<TransitionHandle>,
	pub(crate) theme: Option<Theme>,
	log: CallLog,
}

impl RecordingClient {
	pub(crate) fn new(id: &str, log: &CallLog) -> Self {
		Self {
			id: cid(id),
			kind: ClientKind::Regular,
			hosting: Hosting::Inline,
			can_hide: true,
			show_overlay: true,
			opacity: Opacity::Unset,
			on_escape: OnEscape::Record,
			animated: false,
			pending: Vec::new(),
			theme: None,
			log: Rc::clone(log),
		}
	}

	pub(crate) fn critical(mut self) -> Self {
		self.kind = ClientKind::Critical;
		self
	}

	pub(crate) fn framed(mut self, reusable: bool) -> Self {
		self.hosting = Hosting::Frame { reusable };
		self
	}

	pub(crate) fn refusing_hide(mut self) -> Self {
		self.can_hide = false;
		self
	}

	pub(crate) fn without_overlay(mut self) -> Self {
		self.show_overlay = false;
		self
	}

	pub(crate) fn with_opacity(mut self, opacity: f32) -> Self {
		self.opacity = Opacity::Value(opacity);
		self
	}

	pub(crate) fn releasing_on_escape(mut self) -> Self {
		self.on_escape = OnEscape::Release;
		self
	}

	pub(crate) fn emitting_on_escape(mut self, topic: &'static str) -> Self {
		self.on_escape = OnEscape::Emit(topic);
		self
	}

	pub(crate) fn animated(mut self) -> Self {
		self.animated = true;
		self
	}

	pub(crate) fn set_can_hide(&mut self, can_hide: bool) {
		self.can_hide = can_hide;
	}

	pub(crate) fn finish_animations(&mut self) {
		for handle in self.pending.drain(..) {
			handle.complete();
		}
	}

	pub(crate) fn into_handle(self) -> Rc<RefCell<Self>> {
		Rc::new(RefCell::new(self))
	}

	fn record(&self, call: &str) {
		self.log.borrow_mut().push(format!("{}:{call}", self.id));
	}

	fn transition(&mut self) -> Transition {
		if !self.animated {
			return Transition::immediate();
		}
		let (transition, handle) = Transition::pending();
		self.pending.push(handle);
		transition
	}
}

impl PopupClient for RecordingClient {
	fn id(&self) -> &ClientId {
		&self.id
	}

	fn kind(&self) -> ClientKind {
		self.kind
	}

	fn hosting(&self) -> Hosting {
		self.hosting
	}

	fn can_hide(&self) -> bool {
		self.can_hide
	}

	fn handle_escape(&mut self, cx: &mut ClientCx) {
		self.record("escape");
		match self.on_escape {
			OnEscape::Record => {}
			OnEscape::Release => cx.release(),
			OnEscape::Emit(topic) => cx.emit(topic, json!({ "from": self.id.as_str() })),
		}
	}

	fn make_visible(&mut self, _cx: &mut ClientCx) -> Transition {
		self.record("visible");
		self.transition()
	}

	fn hide(&mut self, _cx: &mut ClientCx) -> Transition {
		self.record("hide");
		self.transition()
	}

	fn show_overlay(&self) -> bool {
		self.show_overlay
	}

	fn opacity(&self) -> Opacity {
		self.opacity
	}

	fn set_theme(&mut self, theme: Theme) {
		self.record(&format!("theme:{theme}"));
		self.theme = Some(theme);
	}

	fn covered_by_frame(&mut self) {
		self.record("covered");
	}

	fn nesting_changed(&mut self, nesting: Nesting) {
		let call = match nesting {
			Nesting::Attached => "nested",
			Nesting::Detached => "unnested",
		};
		self.record(call);
	}
}
