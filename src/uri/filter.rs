use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a sanitized host label, path segment, query key or fragment.
pub const MAX_TOKEN_LEN: usize = 32;

/// Everything outside `-`, `_`, digits and lowercase ASCII letters.
static UNSAFE_CHARS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^-_0-9a-z]").expect("static character class is valid"));

/// Sanitize a single URL token.
///
/// Drops everything from the first `.` onward (file extensions included),
/// removes every character outside `[-_0-9a-z]` and truncates the rest to
/// [`MAX_TOKEN_LEN`] characters. Uppercase letters are removed, not lowercased.
pub fn sanitize(token: &str) -> String {
	let stem = token.split_once('.').map_or(token, |(stem, _)| stem);
	UNSAFE_CHARS
		.replace_all(stem, "")
		.chars()
		.take(MAX_TOKEN_LEN)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sanitize_strips_extension_and_uppercase() {
		assert_eq!(sanitize("Report.PDF"), "eport");
		assert_eq!(sanitize("index.html"), "index");
	}

	#[test]
	fn test_sanitize_removes_uppercase_instead_of_lowercasing() {
		assert_eq!(sanitize("FooBar"), "ooar");
		assert_eq!(sanitize("ABC"), "");
	}

	#[test]
	fn test_sanitize_keeps_allowed_characters() {
		assert_eq!(sanitize("my-page_2"), "my-page_2");
	}

	#[test]
	fn test_sanitize_removes_unsafe_characters() {
		assert_eq!(sanitize("a b<script>"), "abscript");
		assert_eq!(sanitize("привет-x"), "-x");
		assert_eq!(sanitize("../etc"), "");
	}

	#[test]
	fn test_sanitize_truncates() {
		let long = "a".repeat(40);
		assert_eq!(sanitize(&long).len(), MAX_TOKEN_LEN);
	}

	#[test]
	fn test_sanitize_truncates_after_filtering() {
		let token = format!("{}{}", "A".repeat(10), "b".repeat(40));
		assert_eq!(sanitize(&token), "b".repeat(MAX_TOKEN_LEN));
	}

	#[test]
	fn test_sanitize_is_idempotent() {
		for token in ["Report.PDF", "FooBar", "my-page_2", "x.y.z", "", "a%20b"] {
			let once = sanitize(token);
			assert_eq!(sanitize(&once), once);
		}
	}
}
