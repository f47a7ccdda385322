use crate::uri::UriRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// A positional path token that is lifted out of the path at parse time and
/// put back at link time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Needle {
	Lang,
	Mode,
}

impl Needle {
	pub fn as_str(&self) -> &'static str {
		match self {
			Needle::Lang => "lang",
			Needle::Mode => "mode",
		}
	}

	fn slot<'a>(&self, record: &'a mut UriRecord) -> &'a mut Option<String> {
		match self {
			Needle::Lang => &mut record.lang,
			Needle::Mode => &mut record.mode,
		}
	}
}

impl fmt::Display for Needle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Order in which needles are extracted at parse time.
///
/// Link building reinserts them in the reverse order, so both needles end up
/// where they were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeedleOrder {
	#[default]
	ModeFirst,
	LangFirst,
}

impl NeedleOrder {
	pub fn extraction(&self) -> [Needle; 2] {
		match self {
			NeedleOrder::ModeFirst => [Needle::Mode, Needle::Lang],
			NeedleOrder::LangFirst => [Needle::Lang, Needle::Mode],
		}
	}

	pub fn insertion(&self) -> [Needle; 2] {
		let [first, second] = self.extraction();
		[second, first]
	}
}

/// Position in the path where needles are looked up and reinserted.
pub const NEEDLE_POSITION: usize = 0;

/// Candidate values for each needle, supplied when a request is initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NeedleCandidates {
	/// Language markers, e.g. `["en", "ru"]`.
	#[serde(default)]
	pub lang: Vec<String>,

	/// Display-mode markers, e.g. `["print", "amp"]`.
	#[serde(default)]
	pub mode: Vec<String>,

	#[serde(default)]
	pub order: NeedleOrder,
}

impl NeedleCandidates {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_lang<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
		self.lang = values.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_mode<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
		self.mode = values.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_order(mut self, order: NeedleOrder) -> Self {
		self.order = order;
		self
	}

	pub fn for_needle(&self, needle: Needle) -> &[String] {
		match needle {
			Needle::Lang => &self.lang,
			Needle::Mode => &self.mode,
		}
	}
}

/// Candidate values remembered per needle, used to validate explicit link values.
#[derive(Debug, Clone, Default)]
pub struct NeedleRegistry {
	candidates: HashMap<Needle, Vec<String>>,
}

impl NeedleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn remember(&mut self, needle: Needle, candidates: &[String]) {
		self.candidates.insert(needle, candidates.to_vec());
	}

	pub fn candidates(&self, needle: Needle) -> &[String] {
		self.candidates
			.get(&needle)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn is_candidate(&self, needle: Needle, value: &str) -> bool {
		self.candidates(needle).iter().any(|c| c == value)
	}
}

/// Look for a needle at `position` in the path.
///
/// Candidates are tried in order; the first one equal to the segment at
/// `position` is removed from the path, stored on the record and returned.
/// The candidate set is remembered in `registry` whenever it is non-empty.
pub fn extract_needle(
	record: &mut UriRecord,
	registry: &mut NeedleRegistry,
	needle: Needle,
	candidates: &[String],
	position: usize,
) -> Option<String> {
	if candidates.is_empty() {
		return None;
	}
	registry.remember(needle, candidates);

	let segment = record.path.get(position)?;
	let found = candidates.iter().find(|c| *c == segment)?.clone();
	record.path.remove(position);
	*needle.slot(record) = Some(found.clone());
	tracing::debug!(needle = %needle, value = %found, "extracted needle from path");
	Some(found)
}

/// Put a needle back into the path at `position`.
///
/// - `Some("")` skips the needle entirely.
/// - `Some(value)` is inserted if it is a remembered candidate.
/// - Otherwise the value stored on the record (if any) is moved into the path.
///
/// Returns the inserted value.
pub fn insert_needle(
	record: &mut UriRecord,
	registry: &NeedleRegistry,
	needle: Needle,
	explicit: Option<&str>,
	position: usize,
) -> Option<String> {
	let value = match explicit {
		Some("") => return None,
		Some(value) if registry.is_candidate(needle, value) => Some(value.to_string()),
		_ => needle.slot(record).take(),
	}?;

	let index = position.min(record.path.len());
	record.path.insert(index, value.clone());
	Some(value)
}
