//! Core types shared by the popup toolkit: identifiers, UI events and theming.

/// UI event types routed to popups.
pub mod event;
/// Identifier types for frames, clients, subscriptions and injected data.
pub mod ids;
/// Theme and backdrop opacity types.
pub mod theme;

pub use event::{KeyCode, UiEvent};
pub use ids::{ClientId, ElementId, FrameId, IdError, SubscriptionId, TransferId};
pub use theme::{Opacity, Theme};
