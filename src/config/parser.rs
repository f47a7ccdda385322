use crate::config::types::Config;
use crate::error::{Result, UriError};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| UriError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| UriError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Validate the parsed config
	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::NeedleOrder;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(!config.root);
		assert!(!config.no_external_lookup);
		assert!(config.root_config_lookup_disable_env_var.is_none());
		assert!(config.needles.is_none());
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_basic_config() {
		let content = r#"
root = true
no-external-lookup = true
root-config-lookup-disable-env-var = "CI"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert!(config.no_external_lookup);
		assert_eq!(
			config.root_config_lookup_disable_env_var,
			Some("CI".to_string())
		);
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
[[rules]]
alias = "blog"
segments = ["posts", "archive"]

[[rules]]
alias = "shop"
segments = ["catalog"]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 2);
		assert_eq!(config.rules[0].alias, "blog");
		assert_eq!(config.rules[0].segments, vec!["posts", "archive"]);
		assert_eq!(config.rules[1].alias, "shop");
	}

	#[test]
	fn test_parse_rules_inline_tables() {
		let content = r#"
rules = [
    { alias = "blog", segments = ["posts"] },
    { alias = "docs", segments = ["help", "manual"] },
]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 2);
	}

	#[test]
	fn test_parse_needles() {
		let content = r#"
[needles]
lang = ["en", "ru"]
mode = ["print"]
order = "lang-first"
"#;
		let path = PathBuf::from("test.toml");
		let needles = parse_config_str(content, &path).unwrap().needles.unwrap();

		assert_eq!(needles.lang, vec!["en", "ru"]);
		assert_eq!(needles.mode, vec!["print"]);
		assert_eq!(needles.order, NeedleOrder::LangFirst);
	}

	#[test]
	fn test_needle_order_defaults_to_mode_first() {
		let content = r#"
[needles]
lang = ["en"]
"#;
		let path = PathBuf::from("test.toml");
		let needles = parse_config_str(content, &path).unwrap().needles.unwrap();

		assert!(needles.mode.is_empty());
		assert_eq!(needles.order, NeedleOrder::ModeFirst);
	}

	#[test]
	fn test_rule_without_segments_rejected() {
		let content = r#"
[[rules]]
alias = "blog"
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		match result.unwrap_err() {
			UriError::RuleRejected { alias } => assert_eq!(alias, "blog"),
			_ => panic!("Expected RuleRejected error"),
		}
	}

	#[test]
	fn test_rule_with_empty_alias_rejected() {
		let content = r#"
[[rules]]
alias = ""
segments = ["posts"]
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_config_str(content, &path),
			Err(UriError::RuleRejected { .. })
		));
	}

	#[test]
	fn test_invalid_toml() {
		let path = PathBuf::from("test.toml");
		match parse_config_str("invalid toml [[[", &path).unwrap_err() {
			UriError::ConfigParseError { path, .. } => assert_eq!(path, PathBuf::from("test.toml")),
			_ => panic!("Expected ConfigParseError"),
		}
	}
}
