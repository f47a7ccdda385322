use crate::error::{Result, UriError};
use crate::uri::filter::sanitize;
use crate::uri::query::Query;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// RFC 3986 Appendix B decomposition: scheme, authority, path, query, fragment.
static URI_PARTS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
		.expect("static URI pattern is valid")
});

/// Schemes a record may carry. Anything else falls back to [`Scheme::Http`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
	#[default]
	Http,
	Https,
	Ftp,
}

impl Scheme {
	/// Match a raw scheme against the whitelist. The comparison is case-sensitive.
	pub fn from_raw(raw: Option<&str>) -> Self {
		match raw {
			Some("https") => Scheme::Https,
			Some("ftp") => Scheme::Ftp,
			_ => Scheme::Http,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Scheme::Http => "http",
			Scheme::Https => "https",
			Scheme::Ftp => "ftp",
		}
	}
}

impl fmt::Display for Scheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A decomposed, sanitized URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriRecord {
	raw: String,

	pub scheme: Scheme,

	/// Host labels, most general first: `www.example.com` is `["com", "example", "www"]`.
	pub host: Vec<String>,

	pub path: Vec<String>,

	pub query: Query,

	pub fragment: String,

	/// True if a host label was expanded into path segments.
	pub rewritten: bool,

	/// Extracted display-mode needle.
	pub mode: Option<String>,

	/// Extracted language needle.
	pub lang: Option<String>,
}

impl UriRecord {
	/// Percent-decode and decompose a raw URL.
	///
	/// Fails with [`UriError::InvalidUrl`] if no host label survives decomposition.
	pub fn parse(raw: &str) -> Result<Self> {
		let decoded = percent_decode_str(raw).decode_utf8_lossy();
		let caps = URI_PARTS
			.captures(&decoded)
			.ok_or_else(|| UriError::InvalidUrl {
				url: raw.to_string(),
			})?;

		let group = |index: usize| caps.get(index).map(|m| m.as_str());

		let record = UriRecord {
			raw: raw.to_string(),
			scheme: Scheme::from_raw(group(1)),
			host: group(2).map(authority_host).map(split_host).unwrap_or_default(),
			path: split_path(group(3).unwrap_or_default()),
			query: group(4).map(split_query).unwrap_or_default(),
			fragment: group(5).map(sanitize).unwrap_or_default(),
			rewritten: false,
			mode: None,
			lang: None,
		};

		if record.host.is_empty() {
			return Err(UriError::InvalidUrl {
				url: raw.to_string(),
			});
		}

		Ok(record)
	}

	/// The raw string the record was parsed from, before percent-decoding.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Host labels in conventional order, joined with `.`.
	pub fn host_string(&self) -> String {
		self.host
			.iter()
			.rev()
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(".")
	}

	/// Serialize the record as a link.
	///
	/// Host and path each end with a single `/` when present.
	pub fn to_link(&self) -> String {
		let mut link = format!("{}://", self.scheme);
		if !self.host.is_empty() {
			link.push_str(&self.host_string());
			link.push('/');
		}
		if !self.path.is_empty() {
			link.push_str(self.path.join("/").trim_end_matches('/'));
			link.push('/');
		}
		link.push_str(&self.query.to_query_string());
		if !self.fragment.is_empty() {
			link.push('#');
			link.push_str(&self.fragment);
		}
		link
	}
}

/// Strip userinfo and port from an authority component.
fn authority_host(authority: &str) -> &str {
	let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
	if host_port.starts_with('[') {
		return host_port
			.find(']')
			.map_or(host_port, |end| &host_port[..=end]);
	}
	host_port.split_once(':').map_or(host_port, |(host, _)| host)
}

fn split_host(host: &str) -> Vec<String> {
	if host.trim_matches('.').is_empty() {
		return Vec::new();
	}
	host.trim_end_matches('.')
		.split('.')
		.rev()
		.map(sanitize)
		.collect()
}

/// Empty segments between consecutive slashes are kept positionally.
fn split_path(path: &str) -> Vec<String> {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		return Vec::new();
	}
	trimmed.split('/').map(sanitize).collect()
}

/// Pairs without a value, or with an empty one, are dropped.
fn split_query(query: &str) -> Query {
	let mut pairs = Query::new();
	for pair in query.split('&') {
		if let Some((key, value)) = pair.split_once('=')
			&& !value.is_empty()
		{
			pairs.insert_first(sanitize(key), value.to_string());
		}
	}
	pairs
}
