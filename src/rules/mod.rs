//! Rewrite rules and needles for uri-rewrite.
//!
//! This module handles:
//! - The alias → path-segment rule table (host expansion and path collapsing)
//! - Extraction and reinsertion of positional needles such as language or mode

pub mod needle;
pub mod table;

pub use needle::{
	NEEDLE_POSITION, Needle, NeedleCandidates, NeedleOrder, NeedleRegistry, extract_needle,
	insert_needle,
};
pub use table::{Rule, RuleTable};
