use crate::error::{Result, UriError};
use crate::rules::{NeedleCandidates, RuleTable};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.urirw.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.urirw.toml.
	#[serde(default)]
	pub root: bool,

	/// If true, ignore every other config file, including ~/.urirw.toml.
	#[serde(default)]
	pub no_external_lookup: bool,

	/// Environment variable name that, if truthy, skips ~/.urirw.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Needle candidates extracted from the front of the path.
	#[serde(default)]
	pub needles: Option<NeedleCandidates>,

	/// Subdomain rewrite rules. Registration order decides which rule
	/// collapses a link when several match.
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// A subdomain alias and the path segments it stands in for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
	pub alias: String,

	#[serde(default)]
	pub segments: Vec<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All rules from all configs, in cascade order.
	pub rules: Vec<RuleWithSource>,

	/// Needle candidates from the most specific config that defines them.
	pub needles: NeedleCandidates,
}

/// A rule with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct RuleWithSource {
	/// The rule itself.
	pub rule: RuleConfig,

	/// The config file this rule came from.
	pub source: PathBuf,
}

impl RuleConfig {
	/// A rule needs an alias and at least one segment.
	pub fn validate(&self) -> Result<()> {
		if self.alias.is_empty() || self.segments.is_empty() {
			return Err(UriError::RuleRejected {
				alias: self.alias.clone(),
			});
		}
		Ok(())
	}
}

impl Config {
	/// Validate all rules in this config.
	pub fn validate(&self) -> Result<()> {
		for rule in &self.rules {
			rule.validate()?;
		}
		Ok(())
	}
}

impl MergedConfig {
	/// Build the rule table. When an alias is defined more than once, the
	/// most specific config wins.
	pub fn rule_table(&self) -> Result<RuleTable> {
		let mut table = RuleTable::new();
		for rws in &self.rules {
			if table.get(&rws.rule.alias).is_some() {
				tracing::debug!(
					alias = %rws.rule.alias,
					source = %rws.source.display(),
					"skipping shadowed rule"
				);
				continue;
			}
			table.add_rule(rws.rule.alias.clone(), rws.rule.segments.iter().cloned())?;
		}
		Ok(table)
	}
}
