//! Deterministic virtual clock and timer queue.

use std::collections::BTreeMap;
use std::time::Duration;

use jst_primitives::FrameId;

/// Deferred work owned by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
	/// Hide the backdrop of `frame` if its stack is still empty and `token`
	/// is still the frame's current grace token.
	BackdropGrace { frame: FrameId, token: u64 },
}

/// Timers ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
	now: Duration,
	seq: u64,
	timers: BTreeMap<(Duration, u64), TimerKind>,
}

impl TimerQueue {
	pub fn now(&self) -> Duration {
		self.now
	}

	pub fn len(&self) -> usize {
		self.timers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.timers.is_empty()
	}

	/// Schedules `kind` to fire `delay` after the current time.
	pub fn schedule(&mut self, delay: Duration, kind: TimerKind) {
		let seq = self.seq;
		self.seq = self.seq.wrapping_add(1);
		self.timers.insert((self.now + delay, seq), kind);
	}

	/// Pops the earliest timer due at or before `until`, moving the clock to
	/// its due time.
	pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
		let entry = self.timers.first_entry()?;
		if entry.key().0 > until {
			return None;
		}
		let ((due, _), kind) = entry.remove_entry();
		self.now = self.now.max(due);
		Some(kind)
	}

	/// Moves the clock forward without firing anything.
	pub fn settle_at(&mut self, until: Duration) {
		self.now = self.now.max(until);
	}
}
