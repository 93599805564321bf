use jst_primitives::{ElementId, Theme};

/// The single dimmed background shared by every popup of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
	element: ElementId,
	visible: bool,
	opacity: f32,
	theme: Theme,
	/// Number of hidden/visible flips, used to detect flicker.
	toggles: u64,
}

impl Backdrop {
	pub(crate) fn new(element: ElementId, theme: Theme) -> Self {
		Self {
			element,
			visible: false,
			opacity: 0.0,
			theme,
			toggles: 0,
		}
	}

	/// Click target identifying the backdrop.
	pub fn element(&self) -> ElementId {
		self.element
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Opacity applied while visible.
	pub fn opacity(&self) -> f32 {
		self.opacity
	}

	pub fn theme(&self) -> Theme {
		self.theme
	}

	pub fn class(&self) -> &'static str {
		self.theme.backdrop_class()
	}

	pub fn toggles(&self) -> u64 {
		self.toggles
	}

	pub(crate) fn show(&mut self, opacity: f32) {
		if !self.visible {
			self.visible = true;
			self.toggles += 1;
		}
		self.opacity = opacity;
	}

	pub(crate) fn hide(&mut self) {
		if self.visible {
			self.visible = false;
			self.toggles += 1;
		}
	}

	pub(crate) fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
	}
}
