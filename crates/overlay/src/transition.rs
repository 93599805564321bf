//! Completion signals for hide/reveal animations.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Which coordinator call started a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
	Hide,
	Reveal,
}

enum State {
	Done,
	Pending(oneshot::Receiver<()>),
}

/// Completion of a popup's hide or reveal animation.
///
/// Awaitable, or pollable without an executor through [`Self::is_complete`].
/// Dropping the paired [`TransitionHandle`] without completing it also counts
/// as completion, so a popup destroyed mid-animation never wedges the
/// coordinator.
pub struct Transition {
	state: State,
}

/// Completes the paired [`Transition`].
#[derive(Debug)]
pub struct TransitionHandle(oneshot::Sender<()>);

impl Transition {
	/// A transition that is already finished (no animation).
	pub fn immediate() -> Self {
		Self { state: State::Done }
	}

	/// A transition finished later through the returned handle.
	pub fn pending() -> (Self, TransitionHandle) {
		let (tx, rx) = oneshot::channel();
		(
			Self {
				state: State::Pending(rx),
			},
			TransitionHandle(tx),
		)
	}

	pub fn is_complete(&mut self) -> bool {
		let done = match &mut self.state {
			State::Done => return true,
			State::Pending(rx) => !matches!(rx.try_recv(), Err(TryRecvError::Empty)),
		};
		if done {
			self.state = State::Done;
		}
		done
	}
}

impl std::fmt::Debug for Transition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = match self.state {
			State::Done => "done",
			State::Pending(_) => "pending",
		};
		f.debug_struct("Transition").field("state", &state).finish()
	}
}

impl Future for Transition {
	type Output = ();

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
		let ready = match &mut self.state {
			State::Done => true,
			State::Pending(rx) => Pin::new(rx).poll(cx).is_ready(),
		};
		if ready {
			self.state = State::Done;
			Poll::Ready(())
		} else {
			Poll::Pending
		}
	}
}

impl TransitionHandle {
	pub fn complete(self) {
		let _ = self.0.send(());
	}
}
