//! Coordinator configuration, loadable from TOML.
//!
//! ```toml
//! grace-window-ms = 75
//! initial-theme = "dark"
//!
//! [opacity]
//! light = 0.5
//! dark = 0.7
//! ```
//!
//! Every key is optional.

use std::time::Duration;

use jst_primitives::Theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading an [`OverlayConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("default {theme} backdrop opacity {value} is outside 0.0..=1.0")]
	OpacityOutOfRange { theme: Theme, value: f32 },
}

/// Backdrop opacity used when the top client leaves it unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityDefaults {
	pub light: f32,
	pub dark: f32,
}

impl Default for OpacityDefaults {
	fn default() -> Self {
		Self { light: 0.5, dark: 0.7 }
	}
}

impl OpacityDefaults {
	pub fn for_theme(&self, theme: Theme) -> f32 {
		match theme {
			Theme::Light => self.light,
			Theme::Dark => self.dark,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OverlayConfig {
	/// Delay before hiding the backdrop once the stack is empty.
	pub grace_window_ms: u64,
	pub initial_theme: Theme,
	pub opacity: OpacityDefaults,
}

impl Default for OverlayConfig {
	fn default() -> Self {
		Self {
			grace_window_ms: 75,
			initial_theme: Theme::Light,
			opacity: OpacityDefaults::default(),
		}
	}
}

impl OverlayConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		for theme in [Theme::Light, Theme::Dark] {
			let value = self.opacity.for_theme(theme);
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigError::OpacityOutOfRange { theme, value });
			}
		}
		Ok(())
	}

	pub fn grace_window(&self) -> Duration {
		Duration::from_millis(self.grace_window_ms)
	}
}
