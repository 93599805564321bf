//! The explicit context object owning every coordinator of one frame tree.

use std::collections::VecDeque;
use std::time::Duration;

use jst_primitives::{ClientId, ElementId, FrameId, SubscriptionId, Theme, TransferId, UiEvent};
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::backdrop::Backdrop;
use crate::bus::Propagation;
use crate::client::{ClientCx, ClientHandle, ClientKind, ClientRequest, Nesting, PopupClient};
use crate::config::OverlayConfig;
use crate::coordinator::{Coordinator, PendingTransition};
use crate::data::InjectedDataStore;
use crate::error::{OverlayError, Result};
use crate::message::{Envelope, FrameMessage};
use crate::registry::Registration;
use crate::stack::StackEntry;
use crate::timer::{TimerKind, TimerQueue};
use crate::transition::{Transition, TransitionKind};

/// Coordinators of one root frame and every frame nested below it.
///
/// Create one per document and pass it to every popup widget. Operations are
/// addressed by [`FrameId`]; requests clients queue through [`ClientCx`]
/// during callbacks are drained before each public operation returns.
pub struct OverlayTree {
	config: OverlayConfig,
	root: FrameId,
	frames: FxHashMap<FrameId, Coordinator>,
	timers: TimerQueue,
	requests: VecDeque<(FrameId, ClientRequest)>,
	draining: bool,
	next_frame: u32,
	next_element: u64,
	next_subscription: u64,
	next_grace_token: u64,
}

impl Default for OverlayTree {
	fn default() -> Self {
		Self::new(OverlayConfig::default())
	}
}

impl OverlayTree {
	pub fn new(config: OverlayConfig) -> Self {
		let theme = config.initial_theme;
		let mut tree = Self {
			config,
			root: FrameId(0),
			frames: FxHashMap::default(),
			timers: TimerQueue::default(),
			requests: VecDeque::new(),
			draining: false,
			next_frame: 0,
			next_element: 0,
			next_subscription: 0,
			next_grace_token: 0,
		};
		tree.root = tree.insert_frame(None, theme);
		tree
	}

	pub fn config(&self) -> &OverlayConfig {
		&self.config
	}

	/// The top-level frame.
	pub fn root(&self) -> FrameId {
		self.root
	}

	/// Current virtual time.
	pub fn now(&self) -> Duration {
		self.timers.now()
	}

	fn insert_frame(&mut self, parent: Option<FrameId>, theme: Theme) -> FrameId {
		let frame = FrameId(self.next_frame);
		self.next_frame += 1;
		let element = ElementId(self.next_element);
		self.next_element += 1;
		self.frames.insert(frame, Coordinator::new(frame, parent, element, theme));
		frame
	}

	fn frame(&self, frame: FrameId) -> Result<&Coordinator> {
		self.frames.get(&frame).ok_or(OverlayError::UnknownFrame(frame))
	}

	fn frame_mut(&mut self, frame: FrameId) -> Result<&mut Coordinator> {
		self.frames.get_mut(&frame).ok_or(OverlayError::UnknownFrame(frame))
	}

	fn ensure_frame(&self, frame: FrameId) -> Result<()> {
		self.frame(frame).map(|_| ())
	}

	fn root_of(&self, frame: FrameId) -> Result<FrameId> {
		let mut current = frame;
		while let Some(parent) = self.frame(current)?.parent {
			current = parent;
		}
		Ok(current)
	}

	/// Creates the coordinator of a frame nested in `parent`.
	///
	/// The new frame starts with the tree's current theme. It only becomes
	/// `parent`'s child once one of its popups is acquired.
	pub fn nest_frame(&mut self, parent: FrameId) -> Result<FrameId> {
		let theme = self.theme(parent)?;
		let frame = self.insert_frame(Some(parent), theme);
		debug!(%frame, %parent, "nested frame created");
		Ok(frame)
	}

	/// Drops a nested frame, every frame below it, and its child link in the parent.
	pub fn remove_frame(&mut self, frame: FrameId) -> Result<()> {
		if frame == self.root {
			return Err(OverlayError::RootFrame);
		}
		let parent = self.frame(frame)?.parent;
		let nested: Vec<FrameId> = self.frames.values().filter(|c| c.parent == Some(frame)).map(|c| c.frame).collect();
		for nested in nested {
			self.remove_frame(nested)?;
		}
		self.frames.remove(&frame);
		debug!(%frame, "frame removed");
		if let Some(parent) = parent {
			self.route(Envelope::new(frame, parent, FrameMessage::DetachChild(frame)));
		}
		self.drain_requests();
		Ok(())
	}

	pub fn coordinator(&self, frame: FrameId) -> Result<&Coordinator> {
		self.frame(frame)
	}

	/// Capability probe to run before any cross-frame assumption.
	pub fn has_parent(&self, frame: FrameId) -> Result<bool> {
		Ok(self.frame(frame)?.has_parent())
	}

	pub fn parent(&self, frame: FrameId) -> Result<Option<FrameId>> {
		Ok(self.frame(frame)?.parent)
	}

	pub fn child(&self, frame: FrameId) -> Result<Option<FrameId>> {
		Ok(self.frame(frame)?.child)
	}

	/// Stack depth of `frame`.
	pub fn depth(&self, frame: FrameId) -> Result<usize> {
		Ok(self.frame(frame)?.stack.len())
	}

	pub fn top(&self, frame: FrameId) -> Result<Option<ClientHandle>> {
		Ok(self.frame(frame)?.stack.top().map(|entry| entry.client.clone()))
	}

	pub fn top_id(&self, frame: FrameId) -> Result<Option<ClientId>> {
		Ok(self.frame(frame)?.stack.top().map(|entry| entry.id.clone()))
	}

	pub fn backdrop(&self, frame: FrameId) -> Result<&Backdrop> {
		Ok(&self.frame(frame)?.backdrop)
	}

	/// Makes `client` the interactive popup of `frame`.
	///
	/// Returns `Ok(false)` when the current top refuses to hide and `client`
	/// is not [`ClientKind::Critical`]; nothing changes in that case.
	pub fn acquire(&mut self, frame: FrameId, client: ClientHandle) -> Result<bool> {
		let accepted = self.acquire_inner(frame, client)?;
		self.drain_requests();
		Ok(accepted)
	}

	/// Acquires a client previously cached with [`Self::cache_reusable`].
	pub fn acquire_reusable(&mut self, frame: FrameId, id: &ClientId) -> Result<bool> {
		let client = self.reusable(frame, id)?;
		self.acquire(frame, client)
	}

	fn acquire_inner(&mut self, frame: FrameId, client: ClientHandle) -> Result<bool> {
		let (id, kind, hosting) = {
			let guard = client.try_borrow().map_err(|_| OverlayError::ClientBorrowed)?;
			(guard.id().clone(), guard.kind(), guard.hosting())
		};
		let coordinator = self.frame(frame)?;
		if coordinator.stack.is_top(&id) {
			trace!(%frame, client = %id, "client already topmost");
			return Ok(true);
		}
		if coordinator.stack.contains(&id) {
			warn!(%frame, client = %id, "acquire from a client buried in the stack; declining");
			return Ok(false);
		}
		let parent = coordinator.parent;
		let previous = coordinator.stack.top().map(|entry| (entry.id.clone(), entry.client.clone()));

		if previous.is_none()
			&& let Some(parent) = parent
		{
			self.route(Envelope::new(frame, parent, FrameMessage::AttachChild(frame)));
		}
		let cover_parent = if hosting.is_frame() { parent } else { None };

		if let Some((previous_id, previous)) = &previous {
			let permitted = match previous.try_borrow() {
				Ok(guard) => guard.can_hide(),
				Err(_) => {
					warn!(%frame, client = %previous_id, "top client is borrowed; treating as refusal");
					false
				}
			};
			if !permitted {
				if kind != ClientKind::Critical {
					debug!(%frame, client = %id, top = %previous_id, "acquire declined by top client");
					return Ok(false);
				}
				debug!(%frame, client = %id, top = %previous_id, "critical client overrides refusal");
			}
		}

		let coordinator = self.frame_mut(frame)?;
		coordinator.stack.push(StackEntry {
			id: id.clone(),
			kind,
			hosting,
			client,
		});
		coordinator.grace = None;
		debug!(%frame, client = %id, depth = coordinator.stack.len(), "client acquired");

		if let Some(parent) = cover_parent {
			self.route(Envelope::new(frame, parent, FrameMessage::CoverTop));
		}
		if let Some((previous_id, previous)) = previous {
			let transition = self.call_client(frame, &previous, |client, cx| client.hide(cx));
			self.track(frame, previous_id, TransitionKind::Hide, transition);
		}
		self.apply_overlay_policy(frame);
		Ok(true)
	}

	/// Releases `id` if it is the top of `frame`'s stack.
	///
	/// A release from any other client leaves the stack untouched and only
	/// recomputes the backdrop.
	pub fn release(&mut self, frame: FrameId, id: &ClientId) -> Result<()> {
		self.release_inner(frame, id)?;
		self.drain_requests();
		Ok(())
	}

	fn release_inner(&mut self, frame: FrameId, id: &ClientId) -> Result<()> {
		let coordinator = self.frame_mut(frame)?;
		let Some(released) = coordinator.stack.pop_if_top(id) else {
			if coordinator.stack.contains(id) {
				warn!(%frame, client = %id, "release from a client that is not topmost; ignoring");
			} else {
				debug!(%frame, client = %id, "release from a client that is not stacked");
			}
			self.recompute(frame);
			return Ok(());
		};
		let next = coordinator.stack.top().map(|entry| (entry.id.clone(), entry.client.clone()));
		debug!(%frame, client = %released.id, depth = coordinator.stack.len(), "client released");
		drop(released);

		match next {
			Some((next_id, next)) => {
				let transition = self.call_client(frame, &next, |client, cx| client.make_visible(cx));
				self.track(frame, next_id, TransitionKind::Reveal, transition);
				self.apply_overlay_policy(frame);
			}
			None => self.schedule_grace(frame),
		}
		Ok(())
	}

	/// Takes `id` off `frame`'s stack for good, wherever it sits.
	///
	/// A topmost client is released normally. A buried client is cut out
	/// without touching the clients around it. Returns false when `id` is not
	/// stacked.
	pub fn discard(&mut self, frame: FrameId, id: &ClientId) -> Result<bool> {
		let coordinator = self.frame(frame)?;
		if coordinator.stack.is_top(id) {
			self.release(frame, id)?;
			return Ok(true);
		}
		if !coordinator.stack.contains(id) {
			return Ok(false);
		}
		warn!(%frame, client = %id, "discarding a client buried in the stack");
		let coordinator = self.frame_mut(frame)?;
		coordinator.stack.remove(id);
		coordinator.transitions.retain(|pending| &pending.client != id);
		self.recompute(frame);
		self.drain_requests();
		Ok(true)
	}

	fn recompute(&mut self, frame: FrameId) {
		let Some(coordinator) = self.frames.get(&frame) else {
			return;
		};
		if !coordinator.stack.is_empty() {
			self.apply_overlay_policy(frame);
		} else if coordinator.backdrop.is_visible() && coordinator.grace.is_none() {
			self.schedule_grace(frame);
		}
	}

	fn apply_overlay_policy(&mut self, frame: FrameId) {
		let defaults = self.config.opacity;
		let Some(coordinator) = self.frames.get_mut(&frame) else {
			return;
		};
		let Some(top) = coordinator.stack.top() else {
			return;
		};
		let (show, opacity) = match top.client.try_borrow() {
			Ok(client) => (client.show_overlay(), client.opacity()),
			Err(_) => {
				warn!(%frame, client = %top.id, "top client is borrowed; backdrop left unchanged");
				return;
			}
		};
		let theme = coordinator.theme;
		if show {
			coordinator.backdrop.show(opacity.resolve(defaults.for_theme(theme)));
		} else {
			coordinator.backdrop.hide();
		}
	}

	fn schedule_grace(&mut self, frame: FrameId) {
		let token = self.next_grace_token;
		self.next_grace_token += 1;
		let Some(coordinator) = self.frames.get_mut(&frame) else {
			return;
		};
		coordinator.grace = Some(token);
		self.timers.schedule(self.config.grace_window(), TimerKind::BackdropGrace { frame, token });
		trace!(%frame, token, "backdrop grace window started");
	}

	/// Advances the virtual clock, firing every timer due on the way.
	pub fn advance(&mut self, elapsed: Duration) {
		let until = self.timers.now() + elapsed;
		while let Some(timer) = self.timers.pop_due(until) {
			self.fire(timer);
		}
		self.timers.settle_at(until);
		self.drain_requests();
	}

	/// Whether `frame` is inside its backdrop grace window.
	pub fn grace_pending(&self, frame: FrameId) -> Result<bool> {
		Ok(self.frame(frame)?.grace.is_some())
	}

	fn fire(&mut self, timer: TimerKind) {
		match timer {
			TimerKind::BackdropGrace { frame, token } => {
				let Some(coordinator) = self.frames.get_mut(&frame) else {
					trace!(%frame, "grace timer for a removed frame");
					return;
				};
				if coordinator.grace != Some(token) {
					trace!(%frame, token, "grace timer superseded");
					return;
				}
				coordinator.grace = None;
				if !coordinator.stack.is_empty() {
					trace!(%frame, "stack refilled during grace window");
					return;
				}
				coordinator.backdrop.hide();
				let parent = coordinator.parent;
				debug!(%frame, "backdrop hidden after grace window");
				if let Some(parent) = parent {
					self.route(Envelope::new(frame, parent, FrameMessage::DetachChild(frame)));
				}
			}
		}
	}

	/// Routes an escape key or outside click captured in `frame`.
	///
	/// The event is classified against `frame` (Escape key, or a click on its
	/// visible backdrop). A dismissal then descends through registered child
	/// coordinators and only the deepest top client receives
	/// [`PopupClient::handle_escape`]. Returns whether a client received it.
	pub fn handle_escape_event(&mut self, frame: FrameId, event: UiEvent) -> Result<bool> {
		if !self.frame(frame)?.is_dismissal(&event) {
			trace!(%frame, ?event, "event is not a dismissal");
			return Ok(false);
		}
		let handled = self.dispatch_escape(frame, event, false);
		self.drain_requests();
		Ok(handled)
	}

	fn dispatch_escape(&mut self, frame: FrameId, event: UiEvent, originated_from_child: bool) -> bool {
		let Some(coordinator) = self.frames.get(&frame) else {
			return false;
		};
		if let Some(child) = coordinator.child {
			let message = FrameMessage::Escape {
				event,
				originated_from_child: true,
			};
			return self.route(Envelope::new(frame, child, message));
		}
		if !originated_from_child && !coordinator.is_dismissal(&event) {
			return false;
		}
		let Some(top) = coordinator.stack.top().map(|entry| entry.client.clone()) else {
			trace!(%frame, "dismissal with an empty stack");
			return false;
		};
		self.call_client(frame, &top, |client, cx| client.handle_escape(cx)).is_some()
	}

	/// Caches `client` for reuse by id.
	pub fn cache_reusable(&mut self, frame: FrameId, client: ClientHandle) -> Result<Registration> {
		let (id, hosting) = {
			let guard = client.try_borrow().map_err(|_| OverlayError::ClientBorrowed)?;
			(guard.id().clone(), guard.hosting())
		};
		let registration = self.frame_mut(frame)?.reusable.register(id.clone(), hosting, client);
		trace!(%frame, client = %id, ?registration, "reusable registration");
		Ok(registration)
	}

	pub fn reusable(&self, frame: FrameId, id: &ClientId) -> Result<ClientHandle> {
		self.frame(frame)?.reusable.get(id).cloned().ok_or_else(|| OverlayError::NotRegistered {
			frame,
			id: id.clone(),
		})
	}

	/// Applies `theme` to `frame`, its clients, and every frame nested below it.
	pub fn set_theme(&mut self, frame: FrameId, theme: Theme) -> Result<()> {
		self.ensure_frame(frame)?;
		self.apply_theme(frame, theme);
		Ok(())
	}

	/// The theme of the whole tree, as held by the root coordinator.
	pub fn theme(&self, frame: FrameId) -> Result<Theme> {
		let root = self.root_of(frame)?;
		Ok(self.frame(root)?.theme)
	}

	fn apply_theme(&mut self, frame: FrameId, theme: Theme) {
		let Some(coordinator) = self.frames.get_mut(&frame) else {
			return;
		};
		coordinator.theme = theme;
		coordinator.backdrop.set_theme(theme);
		let mut seen = FxHashSet::default();
		let clients: Vec<ClientHandle> = coordinator
			.stack
			.iter()
			.map(|entry| (&entry.id, &entry.client))
			.chain(coordinator.reusable.iter())
			.filter(|(id, _)| seen.insert((*id).clone()))
			.map(|(_, client)| client.clone())
			.collect();
		for client in &clients {
			notify(client, |client| client.set_theme(theme));
		}
		let nested: Vec<FrameId> = self.frames.values().filter(|c| c.parent == Some(frame)).map(|c| c.frame).collect();
		for nested in nested {
			self.route(Envelope::new(frame, nested, FrameMessage::Theme(theme)));
		}
	}

	fn root_data_mut(&mut self, frame: FrameId) -> Result<&mut InjectedDataStore> {
		let root = self.root_of(frame)?;
		Ok(self.frame_mut(root)?.data.get_or_insert_with(InjectedDataStore::default))
	}

	/// Stores `data` under `id` at the root coordinator.
	pub fn set_client_data(&mut self, frame: FrameId, id: TransferId, data: Value) -> Result<Option<Value>> {
		Ok(self.root_data_mut(frame)?.insert(id, data))
	}

	/// Stores `data` under a freshly generated transfer id.
	pub fn inject_client_data(&mut self, frame: FrameId, data: Value) -> Result<TransferId> {
		let id = TransferId::random();
		self.root_data_mut(frame)?.insert(id, data);
		trace!(%frame, transfer = %id, "client data injected");
		Ok(id)
	}

	pub fn client_data(&self, frame: FrameId, id: &TransferId) -> Result<Option<&Value>> {
		let root = self.root_of(frame)?;
		Ok(self.frame(root)?.data.as_ref().and_then(|data| data.get(id)))
	}

	pub fn delete_client_data(&mut self, frame: FrameId, id: &TransferId) -> Result<Option<Value>> {
		Ok(self.root_data_mut(frame)?.remove(id))
	}

	/// Number of injected entries still held by the root.
	pub fn client_data_len(&self) -> usize {
		self.frames.get(&self.root).and_then(|root| root.data.as_ref()).map_or(0, InjectedDataStore::len)
	}

	pub fn subscribe(&mut self, frame: FrameId, topic: impl Into<String>, callback: impl FnMut(&Value) -> Propagation + 'static) -> Result<SubscriptionId> {
		self.ensure_frame(frame)?;
		let id = SubscriptionId(self.next_subscription);
		self.next_subscription += 1;
		self.frame_mut(frame)?.bus.subscribe(topic.into(), id, Box::new(callback));
		Ok(id)
	}

	/// Returns false when `id` is not subscribed in `frame`.
	pub fn unsubscribe(&mut self, frame: FrameId, id: SubscriptionId) -> Result<bool> {
		Ok(self.frame_mut(frame)?.bus.unsubscribe(id))
	}

	/// Emits on `frame` and, unless a subscriber stops it, on each ancestor in turn.
	pub fn emit(&mut self, frame: FrameId, topic: &str, data: Value) -> Result<()> {
		self.ensure_frame(frame)?;
		self.publish(frame, topic, &data);
		self.drain_requests();
		Ok(())
	}

	fn publish(&mut self, frame: FrameId, topic: &str, data: &Value) -> bool {
		let Some(coordinator) = self.frames.get_mut(&frame) else {
			return false;
		};
		let flow = coordinator.bus.publish(topic, data);
		let parent = coordinator.parent;
		match (flow, parent) {
			(Propagation::Continue, Some(parent)) => {
				let message = FrameMessage::Emit {
					topic: topic.to_owned(),
					data: data.clone(),
				};
				self.route(Envelope::new(frame, parent, message))
			}
			(Propagation::Stop, _) => {
				trace!(%frame, topic, "emission stopped by a subscriber");
				true
			}
			(Propagation::Continue, None) => true,
		}
	}

	/// Drops completed transitions and returns how many are still running.
	pub fn poll_transitions(&mut self) -> usize {
		self.frames.values_mut().map(Coordinator::prune_transitions).sum()
	}

	/// Whether every hide/reveal started in `frame` has completed.
	pub fn is_settled(&mut self, frame: FrameId) -> Result<bool> {
		Ok(self.frame_mut(frame)?.prune_transitions() == 0)
	}

	fn track(&mut self, frame: FrameId, client: ClientId, kind: TransitionKind, transition: Option<Transition>) {
		let Some(mut transition) = transition else {
			return;
		};
		if transition.is_complete() {
			return;
		}
		if let Some(coordinator) = self.frames.get_mut(&frame) {
			coordinator.prune_transitions();
			coordinator.transitions.push(PendingTransition { client, kind, transition });
		}
	}

	/// Delivers a cross-frame message. Delivery is synchronous and in send order.
	fn route(&mut self, envelope: Envelope) -> bool {
		let Envelope { from, to, message } = envelope;
		if !self.frames.contains_key(&to) {
			warn!(%from, %to, message = message.name(), "frame message for an unknown frame dropped");
			return false;
		}
		trace!(%from, %to, message = message.name(), "routing frame message");
		match message {
			FrameMessage::AttachChild(child) => self.attach_child(to, child),
			FrameMessage::DetachChild(child) => self.detach_child(to, child),
			FrameMessage::CoverTop => self.cover_top(to),
			FrameMessage::Escape {
				event,
				originated_from_child,
			} => self.dispatch_escape(to, event, originated_from_child),
			FrameMessage::Emit { topic, data } => self.publish(to, &topic, &data),
			FrameMessage::Theme(theme) => {
				self.apply_theme(to, theme);
				true
			}
		}
	}

	fn attach_child(&mut self, frame: FrameId, child: FrameId) -> bool {
		let Some(coordinator) = self.frames.get_mut(&frame) else {
			return false;
		};
		if let Some(existing) = coordinator.child {
			if existing != child {
				trace!(%frame, %existing, %child, "child slot already taken");
			}
			return false;
		}
		coordinator.child = Some(child);
		debug!(%frame, %child, "child coordinator attached");
		if let Some(top) = frame_hosted_top(coordinator) {
			notify(&top, |client| client.nesting_changed(Nesting::Attached));
		}
		true
	}

	fn detach_child(&mut self, frame: FrameId, child: FrameId) -> bool {
		let Some(coordinator) = self.frames.get_mut(&frame) else {
			return false;
		};
		if coordinator.child != Some(child) {
			return false;
		}
		coordinator.child = None;
		debug!(%frame, %child, "child coordinator detached");
		if let Some(top) = frame_hosted_top(coordinator) {
			notify(&top, |client| client.nesting_changed(Nesting::Detached));
		}
		true
	}

	fn cover_top(&mut self, frame: FrameId) -> bool {
		let Some(top) = self.frames.get(&frame).and_then(|c| c.stack.top()).map(|entry| entry.client.clone()) else {
			return false;
		};
		notify(&top, |client| client.covered_by_frame());
		true
	}

	fn call_client<R>(&mut self, frame: FrameId, client: &ClientHandle, f: impl FnOnce(&mut dyn PopupClient, &mut ClientCx) -> R) -> Option<R> {
		let Ok(mut guard) = client.try_borrow_mut() else {
			warn!(%frame, "popup client is borrowed; callback skipped");
			return None;
		};
		let mut cx = ClientCx::new(frame, guard.id().clone());
		let out = f(&mut *guard, &mut cx);
		drop(guard);
		self.requests.extend(cx.into_requests().into_iter().map(|request| (frame, request)));
		Some(out)
	}

	/// Processes queued client requests in FIFO order.
	fn drain_requests(&mut self) {
		if self.draining {
			return;
		}
		self.draining = true;
		while let Some((frame, request)) = self.requests.pop_front() {
			let outcome = match request {
				ClientRequest::Release(id) => self.release_inner(frame, &id),
				ClientRequest::Acquire(client) => self.acquire_inner(frame, client).map(|accepted| {
					if !accepted {
						debug!(%frame, "deferred acquire declined");
					}
				}),
				ClientRequest::Emit { topic, data } => self.ensure_frame(frame).map(|()| {
					self.publish(frame, &topic, &data);
				}),
			};
			if let Err(error) = outcome {
				warn!(%frame, %error, "deferred client request failed");
			}
		}
		self.draining = false;
	}
}

fn frame_hosted_top(coordinator: &Coordinator) -> Option<ClientHandle> {
	coordinator.stack.top().filter(|entry| entry.hosting.is_frame()).map(|entry| entry.client.clone())
}

fn notify(client: &ClientHandle, f: impl FnOnce(&mut dyn PopupClient)) {
	match client.try_borrow_mut() {
		Ok(mut guard) => f(&mut *guard),
		Err(_) => warn!("popup client is borrowed; notification skipped"),
	}
}
