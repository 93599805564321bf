use crate::ids::ElementId;

/// Keys the popup toolkit distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	Escape,
	Enter,
	Tab,
	Char(char),
}

/// A user interaction captured by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
	/// Key press.
	Key(KeyCode),
	/// Pointer click on an element.
	Click {
		/// Element the click landed on.
		target: ElementId,
	},
}

impl UiEvent {
	pub fn is_escape_key(&self) -> bool {
		matches!(self, Self::Key(KeyCode::Escape))
	}

	/// Returns true when this is a click on `element`.
	pub fn clicked(&self, element: ElementId) -> bool {
		matches!(self, Self::Click { target } if *target == element)
	}
}
