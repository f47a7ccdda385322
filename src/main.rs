use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use uri_rewrite::config::{
	CONFIG_FILE_NAME, MergedConfig, discover_configs, load_merged_config, user_config_path,
};
use uri_rewrite::context::{CgiEnvironment, SetCookieHeaders, full_url, persist_referer};
use uri_rewrite::logging::init_logging;
use uri_rewrite::{Engine, LinkOptions, PathArg, Query, QueryArg, RuleTable};

#[derive(Parser)]
#[command(name = "urirw")]
#[command(
	author,
	version,
	about = "Decompose URLs and build links with subdomain rewrite rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .urirw.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .urirw.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Log rewrite decisions to stderr
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Show how a URL is decomposed and rewritten
	Parse {
		/// The URL to parse
		url: String,
	},
	/// Build a link relative to a request URL
	Link {
		/// The request URL
		url: String,

		/// Replacement path, e.g. "posts/archive/42"
		#[arg(long, conflicts_with = "segment")]
		path: Option<String>,

		/// Replacement path segment (repeatable)
		#[arg(long = "segment", value_name = "SEGMENT")]
		segment: Vec<String>,

		/// Query parameter to merge, as key=value (repeatable)
		#[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_val, conflicts_with = "clear_query")]
		query: Vec<(String, String)>,

		/// Drop every query parameter
		#[arg(long)]
		clear_query: bool,

		/// Language needle for the link; an empty value drops it
		#[arg(long)]
		lang: Option<String>,

		/// Mode needle for the link; an empty value drops it
		#[arg(long)]
		mode: Option<String>,
	},
	/// Print path segments of a rewritten URL
	Current {
		/// The request URL
		url: String,

		/// Print only the segment at this offset
		#[arg(long)]
		offset: Option<usize>,
	},
	/// Reconstruct the request URL from the CGI environment
	FullUrl {
		/// Also print the referer Set-Cookie header
		#[arg(long)]
		save_referer: bool,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display every config file in the cascade with its rules and needles
	Show,
	/// Check all config files for errors
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if cli.init {
		return handle_init(cli.force);
	}

	match cli.command {
		Some(Commands::Parse { url }) => handle_parse(&url),
		Some(Commands::Link {
			url,
			path,
			segment,
			query,
			clear_query,
			lang,
			mode,
		}) => {
			let path = match path {
				Some(path) => PathArg::Text(path),
				None if !segment.is_empty() => PathArg::Segments(segment),
				None => PathArg::Keep,
			};
			let query = if clear_query {
				QueryArg::Clear
			} else if query.is_empty() {
				QueryArg::Keep
			} else {
				QueryArg::Merge(query.into_iter().collect())
			};
			let options = LinkOptions {
				path,
				query,
				lang,
				mode,
			};
			handle_link(&url, &options)
		}
		Some(Commands::Current { url, offset }) => handle_current(&url, offset),
		Some(Commands::FullUrl { save_referer }) => handle_full_url(save_referer),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Validate => handle_config_validate(),
		},
		// Unreachable in practice due to arg_required_else_help
		None => Ok(ExitCode::SUCCESS),
	}
}

fn parse_key_val(input: &str) -> std::result::Result<(String, String), String> {
	input
		.split_once('=')
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.ok_or_else(|| format!("expected KEY=VALUE, got `{input}`"))
}

fn load_config() -> Result<(MergedConfig, RuleTable)> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let config = load_merged_config(&cwd).context("Failed to load configuration")?;
	let rules = config
		.rule_table()
		.context("Failed to register rewrite rules")?;
	Ok((config, rules))
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, INIT_TEMPLATE)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_parse(url: &str) -> Result<ExitCode> {
	let (config, rules) = load_config()?;
	let engine = Engine::initialize(&rules, url, &config.needles)
		.with_context(|| format!("Failed to parse {url}"))?;
	let record = engine.record();

	println!("scheme: {}", record.scheme);
	println!("host: {}", record.host_string());
	println!("path: {}", record.path.join("/"));
	println!("query: {}", format_query(&record.query));
	println!("fragment: {}", record.fragment);
	println!("lang: {}", engine.lang().unwrap_or("-"));
	println!("mode: {}", engine.mode().unwrap_or("-"));
	println!("rewritten: {}", engine.was_rewritten());

	Ok(ExitCode::SUCCESS)
}

fn format_query(query: &Query) -> String {
	query.to_query_string().trim_start_matches('?').to_string()
}

fn handle_link(url: &str, options: &LinkOptions) -> Result<ExitCode> {
	let (config, rules) = load_config()?;
	let engine = Engine::initialize(&rules, url, &config.needles)
		.with_context(|| format!("Failed to parse {url}"))?;

	println!("{}", engine.link(options));
	Ok(ExitCode::SUCCESS)
}

fn handle_current(url: &str, offset: Option<usize>) -> Result<ExitCode> {
	let (config, rules) = load_config()?;
	let mut engine = Engine::initialize(&rules, url, &config.needles)
		.with_context(|| format!("Failed to parse {url}"))?;

	if offset.is_some() {
		println!("{}", engine.current(offset));
		return Ok(ExitCode::SUCCESS);
	}

	for _ in 0..engine.path().len() {
		println!("{}", engine.current(None));
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_full_url(save_referer: bool) -> Result<ExitCode> {
	let url = full_url(&CgiEnvironment);
	println!("{url}");

	if save_referer {
		let mut headers = SetCookieHeaders::new();
		persist_referer(&mut headers, &url);
		for header in headers.headers() {
			println!("Set-Cookie: {header}");
		}
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		println!("# no-external-lookup: {}", loaded.config.no_external_lookup);
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var {
			println!("# root-config-lookup-disable-env-var: {}", env_var);
		}
		if let Some(ref needles) = loaded.config.needles {
			println!("# needles.lang: {}", needles.lang.join(", "));
			println!("# needles.mode: {}", needles.mode.join(", "));
			println!("# needles.order: {:?}", needles.order);
		}
		println!("# rules: {}", loaded.config.rules.len());
		println!();

		for rule in &loaded.config.rules {
			println!("  {} -> /{}", rule.alias, rule.segments.join("/"));
		}
		if !loaded.config.rules.is_empty() {
			println!();
		}
	}

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} rules)",
						loaded.path.display(),
						loaded.config.rules.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

const INIT_TEMPLATE: &str = r#"# urirw configuration
root = true

# Path tokens lifted out of the front of the path before rewriting.
[needles]
lang = ["en", "ru"]
mode = ["print"]
order = "mode-first"

# blog.example.com/42 is served as example.com/posts/archive/42
[[rules]]
alias = "blog"
segments = ["posts", "archive"]
"#;
