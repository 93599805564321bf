use jst_overlay::OverlayTree;
use jst_primitives::Theme;
use tracing::debug;

use crate::cookie::CookieJar;
use crate::error::Result;

/// Persists the tree's theme in a cookie and restores it on load.
#[derive(Debug, Clone)]
pub struct ThemeStore {
	key: String,
	days: i64,
}

impl Default for ThemeStore {
	fn default() -> Self {
		Self {
			key: "theme".to_owned(),
			days: 365,
		}
	}
}

impl ThemeStore {
	pub fn new(key: impl Into<String>, days: i64) -> Self {
		Self { key: key.into(), days }
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Stored theme, or `None` when missing or unrecognised.
	pub fn load(&self, jar: &CookieJar) -> Option<Theme> {
		let value = jar.get(&self.key)?;
		match value.parse() {
			Ok(theme) => Some(theme),
			Err(_) => {
				debug!(key = %self.key, value, "stored theme not recognised");
				None
			}
		}
	}

	pub fn save(&self, jar: &mut CookieJar, theme: Theme) {
		jar.set(&self.key, &theme.to_string(), self.days);
	}

	/// Applies the stored theme to the whole tree. Returns the theme in effect.
	pub fn restore(&self, jar: &CookieJar, tree: &mut OverlayTree) -> Result<Theme> {
		let root = tree.root();
		match self.load(jar) {
			Some(theme) => {
				tree.set_theme(root, theme)?;
				Ok(theme)
			}
			None => Ok(tree.theme(root)?),
		}
	}

	/// Switches the tree between light and dark and persists the choice.
	pub fn toggle(&self, jar: &mut CookieJar, tree: &mut OverlayTree) -> Result<Theme> {
		let root = tree.root();
		let theme = tree.theme(root)?.toggled();
		tree.set_theme(root, theme)?;
		self.save(jar, theme);
		Ok(theme)
	}
}
