use std::fmt;

/// Name of the cookie that stores the last visited URL.
pub const REFERER_COOKIE: &str = "referer";

/// A session cookie (no expiry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
	pub name: String,
	pub value: String,
	pub path: String,
}

impl fmt::Display for Cookie {
	/// Renders the `Set-Cookie` header value. The value is form-urlencoded.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let value: String = form_urlencoded::byte_serialize(self.value.as_bytes()).collect();
		write!(f, "{}={}; Path={}", self.name, value, self.path)
	}
}

/// Destination for cookies set while handling a request.
pub trait CookieSink {
	fn set_cookie(&mut self, cookie: Cookie);
}

/// Collects cookies as `Set-Cookie` header values.
#[derive(Debug, Clone, Default)]
pub struct SetCookieHeaders {
	headers: Vec<String>,
}

impl SetCookieHeaders {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn headers(&self) -> &[String] {
		&self.headers
	}
}

impl CookieSink for SetCookieHeaders {
	fn set_cookie(&mut self, cookie: Cookie) {
		self.headers.push(cookie.to_string());
	}
}

/// Remember `url` in the referer cookie, valid for the whole site.
pub fn persist_referer(sink: &mut impl CookieSink, url: &str) {
	tracing::debug!(url, "persisting referer cookie");
	sink.set_cookie(Cookie {
		name: REFERER_COOKIE.to_string(),
		value: url.to_string(),
		path: "/".to_string(),
	});
}
