//! State shared by every popup widget.
//!
//! Coordinator callbacks can race with animation completions, so every
//! transition here tolerates being asked for the state it is already in.

use std::cell::RefCell;
use std::rc::Rc;

use jst_overlay::{ClientKind, Hosting, Nesting, OverlayTree, PopupClient, Transition, TransitionHandle};
use jst_primitives::{ClientId, FrameId, Theme};
use tracing::{debug, trace, warn};

use crate::error::Result;

/// Lifecycle of a popup as seen by its coordinator.
///
/// ```text
/// Unacquired -> Active <-> Hidden
///                 |          |
///                 v          v
///              Released <----+
/// ```
///
/// Released is terminal for one-shot popups. Only a reusable popup cached in
/// its frame's registry may be shown again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
	#[default]
	Unacquired,
	/// Topmost and interactive.
	Active,
	/// Covered by another popup of the same frame.
	Hidden,
	Released,
}

impl PopupState {
	/// Whether the popup is on its coordinator's stack.
	pub fn is_stacked(self) -> bool {
		matches!(self, Self::Active | Self::Hidden)
	}
}

/// How hide and reveal complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
	#[default]
	Instant,
	/// Transitions stay pending until [`PopupCore::finish_transition`].
	Animated,
}

/// Identity, state and presentation flags of one popup.
#[derive(Debug)]
pub struct PopupCore {
	id: ClientId,
	kind: ClientKind,
	hosting: Hosting,
	state: PopupState,
	animation: Animation,
	pending: Option<TransitionHandle>,
	theme: Theme,
	/// A frame popup opened inside this popup's own frame.
	nested: bool,
	covered: bool,
}

impl PopupCore {
	pub fn new(id: ClientId, kind: ClientKind, hosting: Hosting, animation: Animation) -> Self {
		Self {
			id,
			kind,
			hosting,
			state: PopupState::Unacquired,
			animation,
			pending: None,
			theme: Theme::default(),
			nested: false,
			covered: false,
		}
	}

	pub fn id(&self) -> &ClientId {
		&self.id
	}

	pub fn kind(&self) -> ClientKind {
		self.kind
	}

	pub fn hosting(&self) -> Hosting {
		self.hosting
	}

	pub fn state(&self) -> PopupState {
		self.state
	}

	pub fn theme(&self) -> Theme {
		self.theme
	}

	/// Close affordance hidden and scrolling frozen while a popup is nested inside.
	pub fn is_nested(&self) -> bool {
		self.nested
	}

	pub fn is_covered(&self) -> bool {
		self.covered
	}

	pub fn is_animating(&self) -> bool {
		self.pending.is_some()
	}

	/// Completes the running hide or reveal animation, if any.
	pub fn finish_transition(&mut self) {
		if let Some(handle) = self.pending.take() {
			handle.complete();
		}
	}

	pub(crate) fn activated(&mut self) {
		if self.state != PopupState::Active {
			debug!(client = %self.id, from = ?self.state, "popup active");
		}
		self.state = PopupState::Active;
	}

	/// Marks the popup released. Returns false when it already was.
	pub(crate) fn dismiss(&mut self) -> bool {
		if !self.state.is_stacked() {
			debug!(client = %self.id, state = ?self.state, "popup already dismissed");
			return false;
		}
		self.state = PopupState::Released;
		self.covered = false;
		self.finish_transition();
		true
	}

	pub(crate) fn hide(&mut self) -> Transition {
		match self.state {
			PopupState::Active => {
				self.state = PopupState::Hidden;
				self.start_transition()
			}
			state => {
				warn!(client = %self.id, ?state, "hide requested for a popup that is not active");
				Transition::immediate()
			}
		}
	}

	pub(crate) fn make_visible(&mut self) -> Transition {
		self.covered = false;
		match self.state {
			PopupState::Hidden => {
				self.state = PopupState::Active;
				self.start_transition()
			}
			PopupState::Active => {
				trace!(client = %self.id, "popup already visible");
				Transition::immediate()
			}
			state => {
				warn!(client = %self.id, ?state, "reveal requested for a popup that is not stacked");
				Transition::immediate()
			}
		}
	}

	pub(crate) fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
	}

	pub(crate) fn cover(&mut self) {
		self.covered = true;
	}

	pub(crate) fn set_nesting(&mut self, nesting: Nesting) {
		self.nested = nesting == Nesting::Attached;
		trace!(client = %self.id, nested = self.nested, "nesting changed");
	}

	fn start_transition(&mut self) -> Transition {
		match self.animation {
			Animation::Instant => Transition::immediate(),
			Animation::Animated => {
				let (transition, handle) = Transition::pending();
				// Replacing an unfinished handle completes its transition.
				self.pending = Some(handle);
				transition
			}
		}
	}
}

/// Access to the [`PopupCore`] of a widget client.
pub(crate) trait HasCore: PopupClient {
	fn core(&self) -> &PopupCore;
	fn core_mut(&mut self) -> &mut PopupCore;
}

/// Acquires `client` in `frame`, marking it active when the coordinator accepts.
///
/// A released popup is refused unless it is reusable and cached in `frame`.
pub(crate) fn show<C: HasCore + 'static>(tree: &mut OverlayTree, frame: FrameId, client: &Rc<RefCell<C>>) -> Result<bool> {
	let (id, state, hosting) = {
		let client = client.borrow();
		let core = client.core();
		(core.id().clone(), core.state(), core.hosting())
	};
	if state == PopupState::Released && !(hosting.is_reusable() && tree.reusable(frame, &id).is_ok()) {
		debug!(%frame, client = %id, "released popup is not reusable; show refused");
		return Ok(false);
	}
	let handle = Rc::clone(client);
	let accepted = tree.acquire(frame, handle)?;
	if accepted {
		client.borrow_mut().core_mut().activated();
	}
	Ok(accepted)
}

/// Releases `client` if it is the top of `frame`.
///
/// Returns false for a popup that was already dismissed or is buried under
/// another popup.
pub(crate) fn close<C: HasCore + 'static>(tree: &mut OverlayTree, frame: FrameId, client: &Rc<RefCell<C>>) -> Result<bool> {
	let id = client.borrow().core().id().clone();
	if !client.borrow().core().state().is_stacked() {
		debug!(%frame, client = %id, "close of a popup that is not shown");
		return Ok(false);
	}
	if tree.top_id(frame)?.as_ref() != Some(&id) {
		warn!(%frame, client = %id, "close of a popup that is not topmost; ignoring");
		return Ok(false);
	}
	client.borrow_mut().core_mut().dismiss();
	tree.release(frame, &id)?;
	Ok(true)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn fresh(animation: Animation) -> PopupCore {
		PopupCore::new(ClientId::new("popup").unwrap(), ClientKind::Regular, Hosting::Inline, animation)
	}

	#[test]
	fn redundant_calls_are_tolerated() {
		let mut core = fresh(Animation::Instant);
		assert!(core.hide().is_complete(), "hiding an unacquired popup");
		assert_eq!(core.state(), PopupState::Unacquired);

		core.activated();
		assert!(core.make_visible().is_complete());
		assert_eq!(core.state(), PopupState::Active);

		core.hide();
		core.hide();
		assert_eq!(core.state(), PopupState::Hidden);
	}

	#[test]
	fn dismiss_only_once() {
		let mut core = fresh(Animation::Instant);
		assert!(!core.dismiss());
		core.activated();
		assert!(core.dismiss());
		assert!(!core.dismiss());
		assert_eq!(core.state(), PopupState::Released);
	}

	#[test]
	fn animated_transition_completes_on_finish() {
		let mut core = fresh(Animation::Animated);
		core.activated();
		let mut hiding = core.hide();
		assert!(!hiding.is_complete());

		let mut revealing = core.make_visible();
		assert!(hiding.is_complete(), "superseded animation counts as finished");
		assert!(!revealing.is_complete());

		core.finish_transition();
		assert!(revealing.is_complete());
		assert!(!core.is_animating());
	}

	#[test]
	fn cover_clears_on_reveal() {
		let mut core = fresh(Animation::Instant);
		core.activated();
		core.hide();
		core.cover();
		core.set_nesting(Nesting::Attached);
		assert!(core.is_covered() && core.is_nested());

		core.make_visible();
		assert!(!core.is_covered());
		core.set_nesting(Nesting::Detached);
		assert!(!core.is_nested());
	}
}
