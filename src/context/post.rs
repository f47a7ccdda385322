use crate::uri::Query;

/// Pick `fields` out of an `application/x-www-form-urlencoded` body.
///
/// Every requested field is present in the result (missing ones are empty).
/// Returns `None` if all requested fields are empty.
pub fn extract_post_fields(body: &str, fields: &[&str]) -> Option<Query> {
	let parsed: Vec<(String, String)> = form_urlencoded::parse(body.as_bytes())
		.into_owned()
		.collect();

	let mut result = Query::new();
	let mut all_empty = true;

	for field in fields {
		let value = parsed
			.iter()
			.find(|(key, _)| key == field)
			.map(|(_, value)| value.clone())
			.unwrap_or_default();
		if !value.is_empty() {
			all_empty = false;
		}
		result.insert(*field, value);
	}

	if all_empty { None } else { Some(result) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_extract_post_fields() {
		let fields = extract_post_fields("login=alice&password=p%40ss+word&extra=1", &[
			"login", "password", "remember",
		])
		.unwrap();

		assert_eq!(fields.get("login"), Some("alice"));
		assert_eq!(fields.get("password"), Some("p@ss word"));
		assert_eq!(fields.get("remember"), Some(""));
		assert!(!fields.contains_key("extra"));
	}

	#[test]
	fn test_extract_post_fields_all_empty() {
		assert!(extract_post_fields("login=&other=x", &["login", "password"]).is_none());
		assert!(extract_post_fields("", &["login"]).is_none());
	}

	#[test]
	fn test_extract_post_fields_first_occurrence() {
		let fields = extract_post_fields("a=1&a=2", &["a"]).unwrap();
		assert_eq!(fields.get("a"), Some("1"));
	}
}
