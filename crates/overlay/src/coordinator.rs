//! Per-frame coordinator state.
//!
//! A [`Coordinator`] owns everything that belongs to one frame. Behavior that
//! crosses frames or touches the clock lives on [`OverlayTree`], which owns
//! every coordinator of the tree.
//!
//! [`OverlayTree`]: crate::OverlayTree

use jst_primitives::{ClientId, ElementId, FrameId, Theme, UiEvent};

use crate::backdrop::Backdrop;
use crate::bus::EventBus;
use crate::data::InjectedDataStore;
use crate::registry::ReusableRegistry;
use crate::stack::OverlayStack;
use crate::transition::{Transition, TransitionKind};

/// A hide or reveal the coordinator started and has not seen complete.
#[derive(Debug)]
pub(crate) struct PendingTransition {
	pub(crate) client: ClientId,
	pub(crate) kind: TransitionKind,
	pub(crate) transition: Transition,
}

/// Stacking state of one frame.
pub struct Coordinator {
	pub(crate) frame: FrameId,
	pub(crate) parent: Option<FrameId>,
	/// First nested frame whose stack became non-empty.
	pub(crate) child: Option<FrameId>,
	pub(crate) stack: OverlayStack,
	pub(crate) backdrop: Backdrop,
	pub(crate) reusable: ReusableRegistry,
	pub(crate) bus: EventBus,
	pub(crate) theme: Theme,
	/// Token of the grace timer allowed to hide the backdrop.
	pub(crate) grace: Option<u64>,
	pub(crate) transitions: Vec<PendingTransition>,
	/// Only ever populated on the root coordinator.
	pub(crate) data: Option<InjectedDataStore>,
}

impl Coordinator {
	pub(crate) fn new(frame: FrameId, parent: Option<FrameId>, backdrop: ElementId, theme: Theme) -> Self {
		Self {
			frame,
			parent,
			child: None,
			stack: OverlayStack::new(),
			backdrop: Backdrop::new(backdrop, theme),
			reusable: ReusableRegistry::default(),
			bus: EventBus::default(),
			theme,
			grace: None,
			transitions: Vec::new(),
			data: None,
		}
	}

	pub fn frame(&self) -> FrameId {
		self.frame
	}

	pub fn parent(&self) -> Option<FrameId> {
		self.parent
	}

	pub fn has_parent(&self) -> bool {
		self.parent.is_some()
	}

	pub fn child(&self) -> Option<FrameId> {
		self.child
	}

	pub fn stack(&self) -> &OverlayStack {
		&self.stack
	}

	pub fn backdrop(&self) -> &Backdrop {
		&self.backdrop
	}

	pub fn reusable(&self) -> &ReusableRegistry {
		&self.reusable
	}

	pub fn bus(&self) -> &EventBus {
		&self.bus
	}

	pub fn grace_pending(&self) -> bool {
		self.grace.is_some()
	}

	/// Escape key, or a click on this frame's visible backdrop.
	pub fn is_dismissal(&self, event: &UiEvent) -> bool {
		event.is_escape_key() || (self.backdrop.is_visible() && event.clicked(self.backdrop.element()))
	}

	/// Clients and the transitions still running for them.
	pub fn pending_transitions(&self) -> impl Iterator<Item = (&ClientId, TransitionKind)> {
		self.transitions.iter().map(|pending| (&pending.client, pending.kind))
	}

	pub(crate) fn prune_transitions(&mut self) -> usize {
		self.transitions.retain_mut(|pending| !pending.transition.is_complete());
		self.transitions.len()
	}
}
