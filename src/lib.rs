//! uri-rewrite - URL decomposition with bidirectional subdomain/path rewrite rules.
//!
//! This library provides:
//! - Decomposition of a raw URL into sanitized host labels, path segments, query and fragment
//! - Rewrite rules that let a subdomain stand in for a fixed run of path segments
//! - Extraction of positional needles (language, display mode) from the path
//! - A link builder that inverts all of the above
//! - Request collaborators (full URL, referer cookie, POST fields) and config loading
//!
//! # Example
//!
//! ```
//! use uri_rewrite::{Engine, LinkOptions, NeedleCandidates, RuleTable};
//!
//! let mut rules = RuleTable::new();
//! rules.add_rule("blog", ["posts", "archive"]).unwrap();
//!
//! let needles = NeedleCandidates::new().with_lang(["en", "ru"]);
//! let mut engine = Engine::initialize(&rules, "http://blog.example.com/ru/42", &needles).unwrap();
//!
//! assert_eq!(engine.lang(), Some("ru"));
//! assert_eq!(engine.path(), ["posts", "archive", "42"]);
//! assert_eq!(engine.current(None), "posts");
//!
//! let link = engine.link(&LinkOptions::new().lang("en"));
//! assert_eq!(link, "http://blog.example.com/en/42/");
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod logging;
pub mod rules;
pub mod uri;

pub use engine::{Engine, LinkOptions, PathArg, QueryArg};
pub use error::{Result, UriError};
pub use rules::{Needle, NeedleCandidates, NeedleOrder, RuleTable};
pub use uri::{Query, Scheme, UriRecord};
