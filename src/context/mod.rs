//! Request collaborators for uri-rewrite.
//!
//! This module handles:
//! - Reading request metadata (server name, scheme, host, request URI)
//! - Reconstructing the full URL of the current request
//! - Writing the referer cookie
//! - Extracting form fields from a POST body

pub mod cookie;
pub mod post;

pub use cookie::{Cookie, CookieSink, SetCookieHeaders, persist_referer};
pub use post::extract_post_fields;

/// Request metadata provided by the hosting environment.
pub trait RequestContext {
	/// Configured server name, or an empty string.
	fn server_name(&self) -> String;

	fn is_https(&self) -> bool;

	/// Value of the `Host` header.
	fn host(&self) -> String;

	/// Raw request line target, e.g. `/en/products?page=2`.
	fn request_uri(&self) -> String;
}

/// Request metadata read from CGI environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CgiEnvironment;

impl CgiEnvironment {
	fn var(name: &str) -> String {
		std::env::var(name).unwrap_or_default()
	}
}

impl RequestContext for CgiEnvironment {
	fn server_name(&self) -> String {
		Self::var("SERVER_NAME")
	}

	fn is_https(&self) -> bool {
		https_flag(&Self::var("HTTPS"))
	}

	fn host(&self) -> String {
		Self::var("HTTP_HOST")
	}

	fn request_uri(&self) -> String {
		Self::var("REQUEST_URI")
	}
}

/// CGI servers set `HTTPS` to a non-empty value (usually `on`) for TLS
/// requests; IIS sets it to `off` otherwise.
fn https_flag(value: &str) -> bool {
	!value.is_empty() && !value.eq_ignore_ascii_case("off")
}

/// Request metadata with explicit values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRequest {
	pub server_name: String,
	pub https: bool,
	pub host: String,
	pub request_uri: String,
}

impl RequestContext for StaticRequest {
	fn server_name(&self) -> String {
		self.server_name.clone()
	}

	fn is_https(&self) -> bool {
		self.https
	}

	fn host(&self) -> String {
		self.host.clone()
	}

	fn request_uri(&self) -> String {
		self.request_uri.clone()
	}
}

/// Full URL of the current request: `scheme://host` followed by the request URI.
pub fn full_url(ctx: &impl RequestContext) -> String {
	let scheme = if ctx.is_https() { "https" } else { "http" };
	format!("{scheme}://{}{}", ctx.host(), ctx.request_uri())
}
