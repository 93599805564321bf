//! Key/value preference storage in the `document.cookie` format.
//!
//! Writing produces one header per cookie, `key=value; expires=<date>; path=/`.
//! Reading parses the `a=b; c=d` form a browser hands back, which carries no
//! expiry information.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use tracing::debug;

/// RFC 1123 date as used by the `expires` attribute.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
	pub name: String,
	pub value: String,
	/// `None` for session cookies.
	pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
	/// Whether the cookie is still readable at `now`.
	pub fn is_live(&self, now: DateTime<Utc>) -> bool {
		self.expires.is_none_or(|expires| expires > now)
	}

	/// The `Set-Cookie`-style assignment for this cookie.
	pub fn header(&self) -> String {
		match self.expires {
			Some(expires) => format!("{}={}; expires={}; path=/", self.name, self.value, expires.format(EXPIRES_FORMAT)),
			None => format!("{}={}; path=/", self.name, self.value),
		}
	}
}

/// In-memory cookie store for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
	cookies: IndexMap<String, Cookie>,
}

impl CookieJar {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses `a=b; c=d`. Malformed pairs are skipped.
	pub fn parse(input: &str) -> Self {
		let mut jar = Self::new();
		for pair in input.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
			let Some((name, value)) = pair.split_once('=') else {
				debug!(pair, "cookie pair without '=' skipped");
				continue;
			};
			let name = name.trim();
			if name.is_empty() {
				debug!(pair, "cookie pair without a name skipped");
				continue;
			}
			jar.cookies.insert(
				name.to_owned(),
				Cookie {
					name: name.to_owned(),
					value: value.trim().to_owned(),
					expires: None,
				},
			);
		}
		jar
	}

	/// Stores `value` under `name`, expiring `days` from now.
	pub fn set(&mut self, name: &str, value: &str, days: i64) -> &Cookie {
		self.set_at(name, value, days, Utc::now())
	}

	/// Like [`Self::set`] at a fixed time. An expiry beyond the representable
	/// date range falls back to a session cookie.
	pub fn set_at(&mut self, name: &str, value: &str, days: i64, now: DateTime<Utc>) -> &Cookie {
		let expires = Duration::try_days(days).and_then(|delta| now.checked_add_signed(delta));
		if expires.is_none() {
			debug!(name, days, "cookie expiry out of range; storing a session cookie");
		}
		let cookie = Cookie {
			name: name.to_owned(),
			value: value.to_owned(),
			expires,
		};
		let (index, _) = self.cookies.insert_full(name.to_owned(), cookie);
		&self.cookies[index]
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.get_at(name, Utc::now())
	}

	/// Value of `name` unless it expired before `now`.
	pub fn get_at(&self, name: &str, now: DateTime<Utc>) -> Option<&str> {
		self.cookies.get(name).filter(|cookie| cookie.is_live(now)).map(|cookie| cookie.value.as_str())
	}

	pub fn remove(&mut self, name: &str) -> Option<Cookie> {
		self.cookies.shift_remove(name)
	}

	pub fn len(&self) -> usize {
		self.cookies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cookies.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
		self.cookies.values()
	}

	/// The `a=b; c=d` string a document would read back, live cookies only.
	pub fn to_document_string(&self, now: DateTime<Utc>) -> String {
		self.cookies
			.values()
			.filter(|cookie| cookie.is_live(now))
			.map(|cookie| format!("{}={}", cookie.name, cookie.value))
			.collect::<Vec<_>>()
			.join("; ")
	}
}
