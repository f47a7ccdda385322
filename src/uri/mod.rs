//! URL decomposition for uri-rewrite.
//!
//! This module handles:
//! - Token sanitization (extension stripping, character filtering, truncation)
//! - Splitting a raw URL into scheme, host labels, path segments, query and fragment
//! - Ordered query parameter storage

pub mod filter;
pub mod query;
pub mod record;

pub use filter::{MAX_TOKEN_LEN, sanitize};
pub use query::Query;
pub use record::{Scheme, UriRecord};
