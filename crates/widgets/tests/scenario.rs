use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use jst_overlay::{OverlayError, OverlayTree, Propagation};
use jst_primitives::{IdError, KeyCode, Theme, UiEvent};
use jst_widgets::{Alert, DIALOG_RESOLVED, Dialog, DialogOutcome, MODAL_CLOSED, Modal, ModalOptions, PopupState, WidgetError};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const ESCAPE: UiEvent = UiEvent::Key(KeyCode::Escape);

fn capture(tree: &mut OverlayTree, topic: &str) -> Rc<RefCell<Vec<Value>>> {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	let root = tree.root();
	tree.subscribe(root, topic, move |data| {
		sink.borrow_mut().push(data.clone());
		Propagation::Continue
	})
	.unwrap();
	seen
}

#[test]
fn alert_opens_over_blocking_dialog() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let dialog = Dialog::new(&tree, root, "unsaved-changes", true).unwrap();
	let modal = Modal::new(&mut tree, root, ModalOptions::new("preferences")).unwrap();
	let alert = Alert::new(&tree, root, "session-expired", "Your session expired").unwrap();

	assert!(dialog.show(&mut tree).unwrap());
	assert!(!modal.show(&mut tree).unwrap());
	assert_eq!(modal.state(), PopupState::Unacquired);

	assert!(alert.show(&mut tree).unwrap());
	assert_eq!(dialog.state(), PopupState::Hidden);
	assert_eq!(tree.depth(root).unwrap(), 2);

	tree.handle_escape_event(root, ESCAPE).unwrap();
	assert!(alert.is_acknowledged());
	assert_eq!(alert.state(), PopupState::Released);
	assert_eq!(dialog.state(), PopupState::Active);

	tree.handle_escape_event(root, ESCAPE).unwrap();
	assert_eq!(dialog.outcome(), Some(DialogOutcome::Cancelled));
	assert_eq!(tree.depth(root).unwrap(), 0);
	assert!(tree.backdrop(root).unwrap().is_visible());
	tree.advance(Duration::from_millis(75));
	assert!(!tree.backdrop(root).unwrap().is_visible());
}

#[test]
fn frame_modal_hosts_nested_dialog() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let resolved = capture(&mut tree, DIALOG_RESOLVED);
	let modal = Modal::new(&mut tree, root, ModalOptions::new("record-editor").in_frame(false).with_data(json!({ "row": 7 }))).unwrap();
	let content = modal.content_frame().unwrap();
	let transfer = modal.transfer_id().unwrap();
	assert_eq!(tree.parent(content).unwrap(), Some(root));
	assert_eq!(tree.client_data(content, &transfer).unwrap(), Some(&json!({ "row": 7 })));

	modal.show(&mut tree).unwrap();
	let dialog = Dialog::new(&tree, content, "confirm-delete", false).unwrap();
	dialog.show(&mut tree).unwrap();
	assert_eq!(tree.child(root).unwrap(), Some(content));
	assert!(modal.is_nested());

	assert!(tree.handle_escape_event(root, ESCAPE).unwrap());
	assert_eq!(dialog.outcome(), Some(DialogOutcome::Cancelled));
	assert_eq!(modal.state(), PopupState::Active, "escape must not reach the outer modal");
	assert_eq!(*resolved.borrow(), vec![json!({ "id": "confirm-delete", "outcome": "cancelled" })]);

	tree.advance(Duration::from_millis(75));
	assert!(!modal.is_nested());
	assert_eq!(tree.child(root).unwrap(), None);

	modal.destroy(&mut tree).unwrap();
	assert_eq!(tree.client_data_len(), 0);
	assert_eq!(tree.depth(root).unwrap(), 0);
	assert_eq!(tree.coordinator(content).err(), Some(OverlayError::UnknownFrame(content)));
}

#[test]
fn frame_dialog_covers_the_outer_frame_modal() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let outer = Modal::new(&mut tree, root, ModalOptions::new("outer").in_frame(true)).unwrap();
	let content = outer.content_frame().unwrap();
	outer.show(&mut tree).unwrap();

	let inline = Modal::new(&mut tree, content, ModalOptions::new("list")).unwrap();
	let framed = Modal::new(&mut tree, content, ModalOptions::new("detail").in_frame(true)).unwrap();
	inline.show(&mut tree).unwrap();
	assert!(!outer.is_covered());

	framed.show(&mut tree).unwrap();
	assert!(outer.is_covered());
	assert_eq!(inline.state(), PopupState::Hidden);
}

#[test]
fn cancelable_modal_closes_on_backdrop_click() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let closed = capture(&mut tree, MODAL_CLOSED);
	let sticky = Modal::new(&mut tree, root, ModalOptions::new("wizard").cancelable(false)).unwrap();
	let picker = Modal::new(&mut tree, root, ModalOptions::new("picker").opacity(0.3)).unwrap();

	sticky.show(&mut tree).unwrap();
	tree.handle_escape_event(root, ESCAPE).unwrap();
	assert_eq!(sticky.state(), PopupState::Active);

	picker.show(&mut tree).unwrap();
	assert_eq!(tree.backdrop(root).unwrap().opacity(), 0.3);
	let backdrop = tree.backdrop(root).unwrap().element();
	tree.handle_escape_event(root, UiEvent::Click { target: backdrop }).unwrap();

	assert_eq!(picker.state(), PopupState::Released);
	assert_eq!(sticky.state(), PopupState::Active);
	assert_eq!(tree.backdrop(root).unwrap().opacity(), 0.5);
	assert_eq!(*closed.borrow(), vec![json!({ "id": "picker" })]);
}

#[test]
fn close_guards() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let first = Modal::new(&mut tree, root, ModalOptions::new("first")).unwrap();
	let second = Modal::new(&mut tree, root, ModalOptions::new("second")).unwrap();
	assert!(!first.close(&mut tree).unwrap());

	first.show(&mut tree).unwrap();
	second.show(&mut tree).unwrap();
	assert!(!first.close(&mut tree).unwrap(), "buried popup cannot close");
	assert_eq!(tree.depth(root).unwrap(), 2);

	assert!(second.close(&mut tree).unwrap());
	assert!(!second.close(&mut tree).unwrap(), "already dismissed");
	assert_eq!(first.state(), PopupState::Active);
}

#[test]
fn reusable_modal_shows_again() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let modal = Modal::new(&mut tree, root, ModalOptions::new("settings")).unwrap();
	assert!(tree.reusable(root, &modal.id()).is_ok());

	for _ in 0..2 {
		assert!(modal.show(&mut tree).unwrap());
		assert_eq!(modal.state(), PopupState::Active);
		assert!(modal.close(&mut tree).unwrap());
		assert_eq!(modal.state(), PopupState::Released);
	}

	let throwaway = Modal::new(&mut tree, root, ModalOptions::new("one-shot").in_frame(false)).unwrap();
	assert!(matches!(tree.reusable(root, &throwaway.id()), Err(OverlayError::NotRegistered { .. })));
}

#[test]
fn animated_hide_keeps_tree_unsettled() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let below = Modal::new(&mut tree, root, ModalOptions::new("below").animated()).unwrap();
	let above = Modal::new(&mut tree, root, ModalOptions::new("above")).unwrap();

	below.show(&mut tree).unwrap();
	above.show(&mut tree).unwrap();
	assert!(below.is_animating());
	assert!(!tree.is_settled(root).unwrap());

	below.finish_transition();
	assert!(tree.is_settled(root).unwrap());
}

#[test]
fn theme_reaches_cached_widgets() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let modal = Modal::new(&mut tree, root, ModalOptions::new("cached")).unwrap();
	let dialog = Dialog::new(&tree, root, "question", false).unwrap();
	dialog.show(&mut tree).unwrap();

	tree.set_theme(root, Theme::Dark).unwrap();
	assert_eq!(modal.theme(), Theme::Dark);
	assert_eq!(dialog.theme(), Theme::Dark);

	let late = Dialog::new(&tree, root, "late", false).unwrap();
	assert_eq!(late.theme(), Theme::Dark);
}

#[test]
fn confirm_emits_resolution() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let resolved = capture(&mut tree, DIALOG_RESOLVED);
	let dialog = Dialog::new(&tree, root, "delete", true).unwrap();

	dialog.show(&mut tree).unwrap();
	assert!(dialog.confirm(&mut tree).unwrap());
	assert!(!dialog.cancel(&mut tree).unwrap());
	assert_eq!(dialog.outcome(), Some(DialogOutcome::Confirmed));
	assert_eq!(*resolved.borrow(), vec![json!({ "id": "delete", "outcome": "confirmed" })]);
}

#[test]
fn invalid_ids_are_rejected() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	assert_eq!(
		Modal::new(&mut tree, root, ModalOptions::new("two words")).err(),
		Some(WidgetError::InvalidId(IdError::Whitespace {
			id: "two words".to_owned(),
			at: 3
		}))
	);
	assert!(matches!(Alert::new(&tree, root, "", "empty"), Err(WidgetError::InvalidId(IdError::Empty))));
	assert_eq!(tree.client_data_len(), 0);
}

#[test]
fn destroying_a_buried_modal_takes_it_off_the_stack() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let closed = capture(&mut tree, MODAL_CLOSED);
	let buried = Modal::new(&mut tree, root, ModalOptions::new("buried").in_frame(false).with_data(json!(1))).unwrap();
	let content = buried.content_frame().unwrap();
	let alert = Alert::new(&tree, root, "quota", "Storage almost full").unwrap();
	buried.show(&mut tree).unwrap();
	alert.show(&mut tree).unwrap();

	buried.destroy(&mut tree).unwrap();
	assert_eq!(tree.depth(root).unwrap(), 1);
	assert_eq!(tree.top_id(root).unwrap(), Some(alert.id()));
	assert_eq!(tree.client_data_len(), 0);
	assert!(tree.coordinator(content).is_err());
	assert_eq!(*closed.borrow(), vec![json!({ "id": "buried" })]);

	assert!(alert.acknowledge(&mut tree).unwrap());
	assert_eq!(tree.top_id(root).unwrap(), None);
}

#[test]
fn released_one_shot_popups_stay_closed() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let dialog = Dialog::new(&tree, root, "once", false).unwrap();
	let alert = Alert::new(&tree, root, "notice", "Saved").unwrap();
	let framed = Modal::new(&mut tree, root, ModalOptions::new("viewer").in_frame(false)).unwrap();

	dialog.show(&mut tree).unwrap();
	dialog.confirm(&mut tree).unwrap();
	assert!(!dialog.show(&mut tree).unwrap());
	assert_eq!(dialog.state(), PopupState::Released);
	assert_eq!(dialog.outcome(), Some(DialogOutcome::Confirmed));

	alert.show(&mut tree).unwrap();
	alert.acknowledge(&mut tree).unwrap();
	assert!(!alert.show(&mut tree).unwrap());
	assert!(alert.is_acknowledged());

	framed.show(&mut tree).unwrap();
	framed.close(&mut tree).unwrap();
	assert!(!framed.show(&mut tree).unwrap());
	assert_eq!(tree.depth(root).unwrap(), 0);

	let kept = Modal::new(&mut tree, root, ModalOptions::new("gallery").in_frame(true)).unwrap();
	kept.show(&mut tree).unwrap();
	kept.close(&mut tree).unwrap();
	assert!(kept.show(&mut tree).unwrap(), "cached frame modal may be shown again");
}

#[test]
fn explicit_close_emits_like_escape() {
	let mut tree = OverlayTree::default();
	let root = tree.root();
	let closed = capture(&mut tree, MODAL_CLOSED);
	let first = Modal::new(&mut tree, root, ModalOptions::new("first")).unwrap();
	let second = Modal::new(&mut tree, root, ModalOptions::new("second")).unwrap();
	first.show(&mut tree).unwrap();
	second.show(&mut tree).unwrap();

	tree.handle_escape_event(root, ESCAPE).unwrap();
	assert!(first.close(&mut tree).unwrap());
	assert!(!first.close(&mut tree).unwrap());

	assert_eq!(*closed.borrow(), vec![json!({ "id": "second" }), json!({ "id": "first" })]);
}
