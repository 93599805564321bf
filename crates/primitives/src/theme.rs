use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Visual theme shared by every frame of a coordinator tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

impl Theme {
	/// CSS-style class applied to the shared backdrop.
	pub fn backdrop_class(self) -> &'static str {
		match self {
			Self::Light => "jst-overlay-light",
			Self::Dark => "jst-overlay-dark",
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}
}

/// Backdrop opacity requested by a popup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Opacity {
	/// Inherit the theme default.
	#[default]
	Unset,
	/// Explicit opacity, clamped to `0.0..=1.0` when applied.
	Value(f32),
}

impl Opacity {
	/// Resolves against the theme default.
	pub fn resolve(self, theme_default: f32) -> f32 {
		match self {
			Self::Unset => theme_default,
			Self::Value(v) if v.is_nan() => theme_default,
			Self::Value(v) => v.clamp(0.0, 1.0),
		}
	}
}
