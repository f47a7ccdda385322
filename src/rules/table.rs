use crate::error::{Result, UriError};
use crate::uri::UriRecord;

/// A rewrite rule: a subdomain alias standing in for a fixed run of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	pub alias: String,
	pub segments: Vec<String>,
}

/// Rewrite rules in registration order.
///
/// Built once before any request is parsed and then shared read-only
/// between engine instances.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
	rules: Vec<Rule>,
}

impl RuleTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a rule, or overwrite the segments of an existing alias.
	///
	/// An overwritten rule keeps its original registration position.
	pub fn add_rule<S: Into<String>>(
		&mut self,
		alias: impl Into<String>,
		segments: impl IntoIterator<Item = S>,
	) -> Result<()> {
		let alias = alias.into();
		let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

		if alias.is_empty() || segments.is_empty() {
			return Err(UriError::RuleRejected { alias });
		}

		match self.rules.iter_mut().find(|rule| rule.alias == alias) {
			Some(existing) => existing.segments = segments,
			None => self.rules.push(Rule { alias, segments }),
		}
		Ok(())
	}

	pub fn get(&self, alias: &str) -> Option<&Rule> {
		self.rules.iter().find(|rule| rule.alias == alias)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Rule> {
		self.rules.iter()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Expand the most specific host label into path segments.
	///
	/// Only the last label is inspected. On a match the rule's segments are
	/// spliced onto the front of the path and the label is removed.
	pub fn expand_host(&self, record: &mut UriRecord) -> bool {
		let Some(rule) = record.host.last().and_then(|label| self.get(label)) else {
			return false;
		};

		record.path.splice(0..0, rule.segments.iter().cloned());
		record.host.pop();
		tracing::debug!(alias = %rule.alias, path = ?record.path, "expanded host label into path");
		true
	}

	/// Collapse a rule's segments out of the path back into a host label.
	///
	/// The first rule (in registration order) whose segments all occur in the
	/// path wins. For each rule segment the first occurrence in the path is
	/// removed, then the alias is appended as the most specific host label.
	pub fn collapse_path(&self, record: &mut UriRecord) -> bool {
		let Some(rule) = self.rules.iter().find(|rule| {
			rule.segments
				.iter()
				.all(|segment| record.path.contains(segment))
		}) else {
			return false;
		};

		for segment in &rule.segments {
			if let Some(index) = record.path.iter().position(|s| s == segment) {
				record.path.remove(index);
			}
		}
		record.host.push(rule.alias.clone());
		tracing::debug!(alias = %rule.alias, path = ?record.path, "collapsed path into host label");
		true
	}
}
