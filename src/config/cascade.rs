use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, RuleWithSource};
use crate::error::{Result, UriError};
use std::path::{Path, PathBuf};

/// File name looked up in each directory of the cascade and in the home directory.
pub const CONFIG_FILE_NAME: &str = ".urirw.toml";

/// Discover and load all config files in the cascade.
///
/// Walks from `start_dir` up to the filesystem root collecting every
/// `.urirw.toml`. A config with `root = true` ends the walk, one with
/// `no-external-lookup = true` ends discovery entirely. `~/.urirw.toml` is
/// appended last unless a loaded config disables it through its env var.
///
/// Returns configs most specific first.
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();

	for dir in start_dir.ancestors() {
		let path = dir.join(CONFIG_FILE_NAME);
		if !path.exists() {
			continue;
		}

		tracing::debug!(path = %path.display(), "loading config");
		let config = parse_config_file(&path)?;
		let isolated = config.no_external_lookup;
		let stop = config.root;
		configs.push(LoadedConfig { config, path });

		if isolated {
			return Ok(configs);
		}
		if stop {
			break;
		}
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load ~/.urirw.toml if it exists and no loaded config disables it.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	if user_config_disabled(existing_configs) {
		return Ok(None);
	}
	load_config_if_present(user_config_path()?)
}

/// True if any loaded config names an opt-out env var that is currently truthy.
fn user_config_disabled(existing_configs: &[LoadedConfig]) -> bool {
	existing_configs.iter().any(|loaded| {
		loaded
			.config
			.root_config_lookup_disable_env_var
			.as_deref()
			.is_some_and(is_env_truthy)
	})
}

fn load_config_if_present(path: PathBuf) -> Result<Option<LoadedConfig>> {
	if !path.exists() {
		return Ok(None);
	}
	let config = parse_config_file(&path)?;
	Ok(Some(LoadedConfig { config, path }))
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into a single effective config.
///
/// Rules are collected in cascade order; [`MergedConfig::rule_table`] keeps
/// the first definition of each alias. Needles come from the most specific
/// config that defines them.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	if let Some(needles) = configs.iter().find_map(|loaded| loaded.config.needles.as_ref()) {
		merged.needles = needles.clone();
	}

	for loaded in configs {
		merged
			.rules
			.extend(loaded.config.rules.iter().map(|rule| RuleWithSource {
				rule: rule.clone(),
				source: loaded.path.clone(),
			}));
	}

	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(UriError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;

	fn loaded(content: &str, path: &str) -> LoadedConfig {
		let path = PathBuf::from(path);
		LoadedConfig {
			config: parse_config_str(content, &path).unwrap(),
			path,
		}
	}

	#[test]
	fn test_is_env_truthy() {
		// SAFETY: tests run on parallel threads; every variable name here is
		// unique to this test and no other test reads it.
		unsafe {
			std::env::remove_var("TEST_URIRW_ENV_1");
			assert!(!is_env_truthy("TEST_URIRW_ENV_1"));

			for (i, value) in ["", "0", "false", "FALSE", "no"].iter().enumerate() {
				let name = format!("TEST_URIRW_ENV_FALSY_{i}");
				std::env::set_var(&name, value);
				assert!(!is_env_truthy(&name), "{value:?} should be falsy");
				std::env::remove_var(&name);
			}

			for (i, value) in ["1", "true", "yes"].iter().enumerate() {
				let name = format!("TEST_URIRW_ENV_TRUTHY_{i}");
				std::env::set_var(&name, value);
				assert!(is_env_truthy(&name), "{value:?} should be truthy");
				std::env::remove_var(&name);
			}
		}
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path().unwrap();
		assert!(path.ends_with(CONFIG_FILE_NAME));
	}

	#[test]
	fn test_merge_needles_most_specific_wins() {
		let configs = vec![
			loaded("", "/a/b/.urirw.toml"),
			loaded("[needles]\nlang = [\"en\"]\n", "/a/.urirw.toml"),
			loaded("[needles]\nlang = [\"ru\"]\nmode = [\"print\"]\n", "/.urirw.toml"),
		];

		let merged = merge_configs(&configs);
		assert_eq!(merged.needles.lang, vec!["en"]);
		assert!(merged.needles.mode.is_empty());
	}

	#[test]
	fn test_merge_rules_first_alias_wins() {
		let configs = vec![
			loaded(
				"[[rules]]\nalias = \"blog\"\nsegments = [\"posts\"]\n",
				"/a/.urirw.toml",
			),
			loaded(
				"no-external-lookup = true\n[[rules]]\nalias = \"blog\"\nsegments = [\"old\"]\n\n[[rules]]\nalias = \"shop\"\nsegments = [\"catalog\"]\n",
				"/.urirw.toml",
			),
		];

		let merged = merge_configs(&configs);
		assert_eq!(merged.rules.len(), 3);

		let table = merged.rule_table().unwrap();
		assert_eq!(table.len(), 2);
		assert_eq!(table.get("blog").unwrap().segments, vec!["posts"]);
		assert_eq!(table.get("shop").unwrap().segments, vec!["catalog"]);
	}

	#[test]
	fn test_discover_no_external_lookup_isolates() {
		let temp_dir = tempfile::tempdir().unwrap();
		let inner = temp_dir.path().join("site");
		std::fs::create_dir(&inner).unwrap();
		std::fs::write(
			temp_dir.path().join(CONFIG_FILE_NAME),
			"[[rules]]\nalias = \"outer\"\nsegments = [\"x\"]\n",
		)
		.unwrap();
		std::fs::write(
			inner.join(CONFIG_FILE_NAME),
			"no-external-lookup = true\n[[rules]]\nalias = \"inner\"\nsegments = [\"y\"]\n",
		)
		.unwrap();

		let configs = discover_configs(&inner).unwrap();
		assert_eq!(configs.len(), 1);
		assert_eq!(configs[0].config.rules[0].alias, "inner");
	}

	#[test]
	fn test_discover_stops_at_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let inner = temp_dir.path().join("site");
		std::fs::create_dir(&inner).unwrap();
		let outer_path = temp_dir.path().join(CONFIG_FILE_NAME);
		let inner_path = inner.join(CONFIG_FILE_NAME);
		std::fs::write(
			&outer_path,
			"[[rules]]\nalias = \"outer\"\nsegments = [\"x\"]\n",
		)
		.unwrap();
		std::fs::write(
			&inner_path,
			"root = true\n[[rules]]\nalias = \"inner\"\nsegments = [\"y\"]\n",
		)
		.unwrap();

		let configs = discover_configs(&inner).unwrap();
		assert_eq!(configs[0].path, inner_path);
		assert!(configs.iter().all(|loaded| loaded.path != outer_path));

		// Only ~/.urirw.toml may follow the root config.
		let user_path = user_config_path().unwrap();
		assert!(configs[1..].iter().all(|loaded| loaded.path == user_path));
	}

	#[test]
	fn test_user_config_skipped_when_env_var_truthy() {
		let configs = vec![loaded(
			"root = true\nroot-config-lookup-disable-env-var = \"TEST_URIRW_SKIP_USER_CONFIG\"\n",
			"/site/.urirw.toml",
		)];

		// SAFETY: tests run on parallel threads; this variable name is unique
		// to this test and no other test reads it.
		unsafe {
			std::env::set_var("TEST_URIRW_SKIP_USER_CONFIG", "1");
		}
		assert!(user_config_disabled(&configs));
		assert!(load_user_config(&configs).unwrap().is_none());

		unsafe {
			std::env::set_var("TEST_URIRW_SKIP_USER_CONFIG", "false");
		}
		assert!(!user_config_disabled(&configs));

		unsafe {
			std::env::remove_var("TEST_URIRW_SKIP_USER_CONFIG");
		}
		assert!(!user_config_disabled(&configs));
	}

	#[test]
	fn test_load_config_if_present() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(CONFIG_FILE_NAME);

		assert!(load_config_if_present(path.clone()).unwrap().is_none());

		std::fs::write(&path, "[[rules]]\nalias = \"home\"\nsegments = [\"me\"]\n").unwrap();
		let loaded = load_config_if_present(path.clone()).unwrap().unwrap();
		assert_eq!(loaded.path, path);
		assert_eq!(loaded.config.rules[0].alias, "home");
	}
}
