use crate::rules::{NEEDLE_POSITION, Needle, NeedleOrder, NeedleRegistry, RuleTable, insert_needle};
use crate::uri::{Query, UriRecord};

/// Path override for a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PathArg {
	/// Keep the path of the active record.
	#[default]
	Keep,

	/// A `/`-separated path. Surrounding slashes are trimmed; `"/"` links to the root.
	Text(String),

	/// Explicit path segments.
	Segments(Vec<String>),
}

/// Query handling for a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryArg {
	/// Keep the query of the active record.
	#[default]
	Keep,

	/// Merge these pairs over the query of the active record.
	Merge(Query),

	/// Drop every query parameter.
	Clear,
}

/// Arguments for [`crate::Engine::link`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
	pub path: PathArg,
	pub query: QueryArg,

	/// Language needle to insert. `Some("")` suppresses the needle.
	pub lang: Option<String>,

	/// Mode needle to insert. `Some("")` suppresses the needle.
	pub mode: Option<String>,
}

impl LinkOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = PathArg::Text(path.into());
		self
	}

	pub fn segments<S: Into<String>>(mut self, segments: impl IntoIterator<Item = S>) -> Self {
		self.path = PathArg::Segments(segments.into_iter().map(Into::into).collect());
		self
	}

	pub fn query<K: Into<String>, V: Into<String>>(
		mut self,
		pairs: impl IntoIterator<Item = (K, V)>,
	) -> Self {
		self.query = QueryArg::Merge(pairs.into_iter().collect());
		self
	}

	pub fn clear_query(mut self) -> Self {
		self.query = QueryArg::Clear;
		self
	}

	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = Some(lang.into());
		self
	}

	pub fn mode(mut self, mode: impl Into<String>) -> Self {
		self.mode = Some(mode.into());
		self
	}

	fn needle_value(&self, needle: Needle) -> Option<&str> {
		match needle {
			Needle::Lang => self.lang.as_deref(),
			Needle::Mode => self.mode.as_deref(),
		}
	}
}

/// Build a link from `active` without touching it.
///
/// Steps: path override, query merge, path → host collapsing, needle
/// reinsertion (reverse of the extraction order), serialization.
pub(crate) fn build_link(
	active: &UriRecord,
	rules: &RuleTable,
	registry: &NeedleRegistry,
	order: NeedleOrder,
	options: &LinkOptions,
) -> String {
	let mut uri = active.clone();

	match &options.path {
		PathArg::Keep => {}
		PathArg::Text(text) if text.is_empty() => {}
		PathArg::Text(text) => {
			let trimmed = text.trim_matches('/');
			uri.path = if trimmed.is_empty() {
				Vec::new()
			} else {
				trimmed.split('/').map(str::to_string).collect()
			};
		}
		PathArg::Segments(segments) if segments.is_empty() => {}
		PathArg::Segments(segments) => uri.path = segments.clone(),
	}

	match &options.query {
		QueryArg::Keep => {}
		QueryArg::Merge(extra) => {
			let mut merged = active.query.clone();
			merged.merge(extra);
			uri.query = merged;
		}
		QueryArg::Clear => uri.query.clear(),
	}

	rules.collapse_path(&mut uri);

	for needle in order.insertion() {
		insert_needle(
			&mut uri,
			registry,
			needle,
			options.needle_value(needle),
			NEEDLE_POSITION,
		);
	}

	uri.to_link()
}
