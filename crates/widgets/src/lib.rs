//! Popup widgets built on the overlay coordinator.
//!
//! [`Modal`], [`Dialog`] and [`Alert`] each wrap a [`PopupClient`] that takes
//! part in stacking. The widget handle keeps the frame it lives in and takes
//! the [`OverlayTree`] by reference on every operation; it never holds a
//! borrow of its client across a tree call.
//!
//! [`PopupClient`]: jst_overlay::PopupClient
//! [`OverlayTree`]: jst_overlay::OverlayTree

pub mod alert;
pub mod cookie;
pub mod dialog;
pub mod error;
pub mod modal;
pub mod popup;
pub mod theme_store;

pub use alert::Alert;
pub use cookie::{Cookie, CookieJar};
pub use dialog::{DIALOG_RESOLVED, Dialog, DialogOutcome};
pub use error::{Result, WidgetError};
pub use modal::{MODAL_CLOSED, Modal, ModalOptions};
pub use popup::{Animation, PopupCore, PopupState};
pub use theme_store::ThemeStore;
