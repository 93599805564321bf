//! Popup stacking coordinator.
//!
//! One [`Coordinator`] per frame arbitrates which popup client is interactive:
//! clients acquire the top of a LIFO stack, the previous top is hidden, and a
//! shared [`Backdrop`] follows the policy of whichever client is on top.
//!
//! Frames nest. A coordinator whose stack becomes non-empty registers itself
//! as its parent's child, and escape/outside-click events captured anywhere in
//! the tree are routed to the deepest child's top client. All coordinators of
//! one tree live in an [`OverlayTree`], the explicit context object handed to
//! every popup widget. Cross-frame interaction goes through [`FrameMessage`]
//! envelopes delivered by the tree in send order.
//!
//! The tree runs on a virtual clock. Embedders call [`OverlayTree::advance`]
//! to fire due timers, which currently means the grace window that delays
//! hiding the backdrop after the last popup is released.

pub mod backdrop;
pub mod bus;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod data;
pub mod error;
pub mod message;
pub mod registry;
pub mod stack;
pub mod timer;
pub mod transition;
pub mod tree;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_support;

pub use backdrop::Backdrop;
pub use bus::{EventBus, Propagation, Subscriber};
pub use client::{ClientCx, ClientHandle, ClientKind, Hosting, Nesting, PopupClient};
pub use config::{ConfigError, OpacityDefaults, OverlayConfig};
pub use coordinator::Coordinator;
pub use data::InjectedDataStore;
pub use error::{OverlayError, Result};
pub use message::{Envelope, FrameMessage};
pub use registry::{Registration, ReusableRegistry};
pub use stack::{OverlayStack, StackEntry};
pub use transition::{Transition, TransitionHandle, TransitionKind};
pub use tree::OverlayTree;
