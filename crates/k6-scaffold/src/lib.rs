//! # k6-scaffold
//!
//! Scaffolding library for the create-k6-extension CLI providing:
//! - Option model with fill-if-blank field derivation
//! - Git operations (shallow clone, init, remotes, commits)
//! - Template tree expansion with placeholder substitution
//! - External command execution with output capture
//!
//! # Examples
//!
//! ## Derive missing options from a target directory
//!
//! ```
//! use k6_scaffold::options::{Kind, Options};
//!
//! let mut opts = Options {
//!     dir: "xk6-output-kafka".to_string(),
//!     ..Default::default()
//! };
//!
//! opts.guess_all();
//!
//! assert_eq!(opts.kind, Some(Kind::OutputExtension));
//! assert_eq!(opts.name, "kafka");
//! assert_eq!(opts.repo_name, "xk6-output-kafka");
//! ```
//!
//! ## Initialize a git repository with an origin remote
//!
//! ```no_run
//! use camino::Utf8Path;
//! use k6_scaffold::git;
//!
//! # async fn example() -> k6_scaffold::Result<()> {
//! git::init_repository(Utf8Path::new("xk6-example")).await?;
//! git::add_origin(
//!     Utf8Path::new("xk6-example"),
//!     "git@github.com:acme/xk6-example.git",
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exec;
pub mod git;
pub mod options;
pub mod prereq;
pub mod template;
pub mod validate;

pub use error::{Error, Result};

// Re-export the option types for convenience
pub use options::{Kind, Options, Protocol};
