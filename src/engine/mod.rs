//! Request-time rewriting and link building for uri-rewrite.
//!
//! An [`Engine`] is created per request. It borrows a shared [`RuleTable`]
//! and owns everything that changes while the request is handled: the active
//! record, the remembered needle candidates and the path cursor.

pub mod link;

pub use link::{LinkOptions, PathArg, QueryArg};

use crate::error::Result;
use crate::rules::{
	NEEDLE_POSITION, NeedleCandidates, NeedleOrder, NeedleRegistry, RuleTable, extract_needle,
};
use crate::uri::{Query, UriRecord};

/// Per-request rewrite engine.
#[derive(Debug)]
pub struct Engine<'r> {
	rules: &'r RuleTable,
	uri: UriRecord,
	needles: NeedleRegistry,
	order: NeedleOrder,
	cursor: usize,
}

impl<'r> Engine<'r> {
	/// Parse `raw`, extract needles and expand the host into the path.
	///
	/// Needles are extracted in `candidates.order` (mode first by default),
	/// both at the front of the path, before host expansion runs.
	pub fn initialize(
		rules: &'r RuleTable,
		raw: &str,
		candidates: &NeedleCandidates,
	) -> Result<Self> {
		Self::initialize_with_order(rules, raw, candidates, candidates.order)
	}

	/// Like [`Engine::initialize`], with an explicit extraction order that
	/// overrides `candidates.order`. Links reinsert needles in reverse.
	pub fn initialize_with_order(
		rules: &'r RuleTable,
		raw: &str,
		candidates: &NeedleCandidates,
		order: NeedleOrder,
	) -> Result<Self> {
		let mut uri = UriRecord::parse(raw)?;
		let mut needles = NeedleRegistry::new();

		for needle in order.extraction() {
			extract_needle(
				&mut uri,
				&mut needles,
				needle,
				candidates.for_needle(needle),
				NEEDLE_POSITION,
			);
		}
		uri.rewritten = rules.expand_host(&mut uri);

		tracing::debug!(
			url = raw,
			host = %uri.host_string(),
			path = ?uri.path,
			rewritten = uri.rewritten,
			"initialized request"
		);

		Ok(Engine {
			rules,
			uri,
			needles,
			order,
			cursor: 0,
		})
	}

	/// The active record.
	pub fn record(&self) -> &UriRecord {
		&self.uri
	}

	/// Path segment at `offset`, or the next segment under the cursor when
	/// `offset` is `None`. Out of range yields an empty string.
	pub fn current(&mut self, offset: Option<usize>) -> String {
		let offset = offset.unwrap_or_else(|| {
			let next = self.cursor;
			self.cursor += 1;
			next
		});
		self.uri.path.get(offset).cloned().unwrap_or_default()
	}

	pub fn path(&self) -> &[String] {
		&self.uri.path
	}

	pub fn query(&self) -> &Query {
		&self.uri.query
	}

	pub fn query_value(&self, key: &str) -> Option<&str> {
		self.uri.query.get(key)
	}

	/// Return a query value and remove it from the active record.
	pub fn take_query(&mut self, key: &str) -> Option<String> {
		self.uri.query.remove(key)
	}

	/// Remove one query variable, or all of them when `key` is `None` or empty.
	///
	/// Returns false if a named key does not exist.
	pub fn unset_query(&mut self, key: Option<&str>) -> bool {
		match key {
			Some(key) if !key.is_empty() => self.uri.query.remove(key).is_some(),
			_ => {
				self.uri.query.clear();
				true
			}
		}
	}

	pub fn was_rewritten(&self) -> bool {
		self.uri.rewritten
	}

	pub fn lang(&self) -> Option<&str> {
		self.uri.lang.as_deref()
	}

	pub fn mode(&self) -> Option<&str> {
		self.uri.mode.as_deref()
	}

	/// Build a link from the active record. The active record is not modified.
	pub fn link(&self, options: &LinkOptions) -> String {
		link::build_link(&self.uri, self.rules, &self.needles, self.order, options)
	}
}
