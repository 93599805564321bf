use std::time::Duration;

use jst_primitives::{KeyCode, UiEvent};
use pretty_assertions::assert_eq;

use crate::OverlayTree;
use crate::test_support::{RecordingClient, call_log, cid, init_tracing};

const ESCAPE: UiEvent = UiEvent::Key(KeyCode::Escape);

/// Must keep the most recently acquired, unreleased client on top, with depth
/// equal to acquires minus releases.
///
/// - Enforced in: `OverlayTree::acquire`, `OverlayTree::release`
/// - Failure symptom: A buried popup receives keyboard input while another is visible.
#[cfg_attr(test, test)]
pub(crate) fn test_stack_discipline() {
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();

	for (n, id) in ["a", "b", "c"].into_iter().enumerate() {
		assert!(tree.acquire(root, RecordingClient::new(id, &log).into_handle()).unwrap());
		assert_eq!(tree.depth(root).unwrap(), n + 1);
		assert_eq!(tree.top_id(root).unwrap(), Some(cid(id)));
	}

	tree.release(root, &cid("c")).unwrap();
	assert_eq!(tree.depth(root).unwrap(), 2);
	assert_eq!(tree.top_id(root).unwrap(), Some(cid("b")));
}

/// Must deliver a dismissal to the top client only.
///
/// - Enforced in: `OverlayTree::handle_escape_event`
/// - Failure symptom: One Escape press closes every stacked popup.
#[cfg_attr(test, test)]
pub(crate) fn test_single_owner_escape_routing() {
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();
	tree.acquire(root, RecordingClient::new("a", &log).into_handle()).unwrap();
	tree.acquire(root, RecordingClient::new("b", &log).into_handle()).unwrap();
	log.borrow_mut().clear();

	assert!(tree.handle_escape_event(root, ESCAPE).unwrap());
	assert_eq!(*log.borrow(), vec!["b:escape".to_string()]);
}

/// Must let a critical client take over even when the top refuses to hide.
///
/// - Enforced in: `OverlayTree::acquire`
/// - Failure symptom: An alert is swallowed behind a blocking dialog.
#[cfg_attr(test, test)]
pub(crate) fn test_critical_client_override() {
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();
	tree.acquire(root, RecordingClient::new("a", &log).refusing_hide().into_handle()).unwrap();

	assert!(!tree.acquire(root, RecordingClient::new("b", &log).into_handle()).unwrap());
	assert_eq!(tree.depth(root).unwrap(), 1);

	assert!(tree.acquire(root, RecordingClient::new("alert", &log).critical().into_handle()).unwrap());
	assert_eq!(tree.depth(root).unwrap(), 2);
	assert_eq!(tree.top_id(root).unwrap(), Some(cid("alert")));
}

/// Must delegate dismissals to the registered child before touching the
/// parent's own top client.
///
/// - Enforced in: `OverlayTree::dispatch_escape`
/// - Failure symptom: Escape closes the outer frame popup while a nested popup is open.
#[cfg_attr(test, test)]
pub(crate) fn test_child_coordinator_delegation() {
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();
	tree.acquire(root, RecordingClient::new("outer", &log).framed(false).into_handle()).unwrap();
	let nested = tree.nest_frame(root).unwrap();
	tree.acquire(nested, RecordingClient::new("inner", &log).into_handle()).unwrap();
	assert_eq!(tree.child(root).unwrap(), Some(nested));
	log.borrow_mut().clear();

	assert!(tree.handle_escape_event(root, ESCAPE).unwrap());
	assert_eq!(*log.borrow(), vec!["inner:escape".to_string()]);
}

/// Must leave the stack untouched when a non-topmost client releases.
///
/// - Enforced in: `OverlayTree::release`
/// - Failure symptom: A late animation callback pops the wrong popup.
#[cfg_attr(test, test)]
pub(crate) fn test_non_topmost_release_is_noop() {
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();
	tree.acquire(root, RecordingClient::new("a", &log).into_handle()).unwrap();
	tree.acquire(root, RecordingClient::new("b", &log).into_handle()).unwrap();

	tree.release(root, &cid("a")).unwrap();
	tree.release(root, &cid("never-acquired")).unwrap();

	let ids: Vec<_> = tree.coordinator(root).unwrap().stack().ids().cloned().collect();
	assert_eq!(ids, vec![cid("a"), cid("b")]);
	assert!(tree.backdrop(root).unwrap().is_visible());
}

/// Must keep the backdrop visible when a client is acquired inside the grace window.
///
/// - Enforced in: `OverlayTree::fire`
/// - Failure symptom: The backdrop flickers off and on while one popup replaces another.
#[cfg_attr(test, test)]
pub(crate) fn test_grace_window_cancellation() {
	init_tracing();
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();
	tree.acquire(root, RecordingClient::new("a", &log).into_handle()).unwrap();
	let toggles = tree.backdrop(root).unwrap().toggles();

	tree.release(root, &cid("a")).unwrap();
	assert!(tree.grace_pending(root).unwrap());
	tree.advance(Duration::from_millis(10));
	tree.acquire(root, RecordingClient::new("b", &log).into_handle()).unwrap();
	tree.advance(Duration::from_millis(500));

	let backdrop = tree.backdrop(root).unwrap();
	assert!(backdrop.is_visible());
	assert_eq!(backdrop.toggles(), toggles, "backdrop must never flip during replacement");
}

/// Must replay the reference acquire/release walk-through exactly.
///
/// - Enforced in: `OverlayTree::acquire`, `OverlayTree::release`, `OverlayTree::advance`
/// - Failure symptom: Stacking diverges from the documented behavior.
#[cfg_attr(test, test)]
pub(crate) fn test_reference_scenario() {
	let log = call_log();
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let a = RecordingClient::new("a", &log).into_handle();

	assert!(tree.acquire(root, a.clone()).unwrap());
	a.borrow_mut().set_can_hide(false);
	assert!(!tree.acquire(root, RecordingClient::new("b", &log).into_handle()).unwrap());
	assert_eq!(tree.depth(root).unwrap(), 1);

	assert!(tree.acquire(root, RecordingClient::new("c", &log).critical().into_handle()).unwrap());
	assert_eq!(tree.depth(root).unwrap(), 2);

	tree.release(root, &cid("c")).unwrap();
	assert_eq!(tree.top_id(root).unwrap(), Some(cid("a")));

	tree.release(root, &cid("a")).unwrap();
	assert_eq!(tree.depth(root).unwrap(), 0);
	assert!(tree.backdrop(root).unwrap().is_visible(), "hidden only after the grace window");
	tree.advance(tree.config().grace_window());
	assert!(!tree.backdrop(root).unwrap().is_visible());

	assert_eq!(*log.borrow(), vec!["a:hide".to_string(), "a:visible".to_string()]);
}
