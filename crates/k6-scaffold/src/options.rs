//! Option model with fill-if-blank field derivation.
//!
//! Every `guess_*` operation checks whether its target field is already set
//! and returns without touching it if so. `guess_all` runs the guessers in
//! dependency order, so a partially filled `Options` converges to a complete
//! one without overwriting any explicit user value.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// The two supported extension categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    /// Extends the JavaScript APIs available to test scripts
    ScriptExtension,
    /// Sends metrics to a custom file format or service
    OutputExtension,
}

impl Kind {
    /// Repository name prefix for script extensions
    pub const SCRIPT_PREFIX: &'static str = "xk6-";

    /// Repository name prefix for output extensions
    pub const OUTPUT_PREFIX: &'static str = "xk6-output-";

    /// Kind-specific repository name prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::ScriptExtension => Self::SCRIPT_PREFIX,
            Self::OutputExtension => Self::OUTPUT_PREFIX,
        }
    }

    /// Suffix of the kind-specific template repository name
    pub fn template_suffix(&self) -> &'static str {
        match self {
            Self::ScriptExtension => "javascript",
            Self::OutputExtension => "output",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScriptExtension => "ScriptExtension",
            Self::OutputExtension => "OutputExtension",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ScriptExtension" => Ok(Self::ScriptExtension),
            "OutputExtension" => Ok(Self::OutputExtension),
            other => Err(format!(
                "unknown extension type: {other}. Available types: ScriptExtension, OutputExtension"
            )),
        }
    }
}

/// Protocol used to access the origin git repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ssh,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "ssh",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ssh" => Ok(Self::Ssh),
            "https" => Ok(Self::Https),
            other => Err(format!("unknown protocol: {other} (expected ssh or https)")),
        }
    }
}

/// User-supplied and derived configuration for the new extension.
///
/// Serialization keys follow the placeholder names used by the template
/// repositories; zero-value fields are omitted so `to_map` produces a
/// projection of only the meaningful fields.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Target directory of the new extension
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dir: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub git_origin: String,

    #[serde(rename = "useGitHub", skip_serializing_if = "std::ops::Not::not")]
    pub use_github: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub repo_owner: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub repo_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_protocol: Option<Protocol>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub go_module: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub go_package: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_git_init: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_git_origin: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_ask: bool,

    /// Camel-cased class name derived from the extension name. The capital
    /// key matches the placeholder spelling in the template repositories.
    #[serde(rename = "PrimaryClass", skip_serializing_if = "String::is_empty")]
    pub primary_class: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub env_prefix: String,

    /// Whether xk6 is already available on PATH (probed at startup)
    #[serde(skip)]
    pub installed: bool,

    /// Skip the xk6 install step
    #[serde(skip)]
    pub no_install: bool,

    /// Show captured command output even on success
    #[serde(skip)]
    pub debug: bool,
}

impl Options {
    /// Kind-specific prefix, defaulting to the script extension prefix when
    /// the kind has not been determined yet
    fn prefix(&self) -> &'static str {
        self.kind.unwrap_or(Kind::ScriptExtension).prefix()
    }

    /// Base name of the target directory
    fn dir_base(&self) -> &str {
        Utf8Path::new(&self.dir).file_name().unwrap_or_default()
    }

    /// Infer the extension kind from the target directory's base name
    pub fn guess_kind(&mut self) {
        if self.kind.is_some() || self.dir.is_empty() {
            return;
        }

        if self.dir_base().starts_with(Kind::OUTPUT_PREFIX) {
            self.kind = Some(Kind::OutputExtension);
        } else {
            self.kind = Some(Kind::ScriptExtension);
        }
    }

    /// Infer the extension name by stripping the kind prefix from the
    /// directory's base name
    pub fn guess_name(&mut self) {
        if !self.name.is_empty() || self.dir.is_empty() {
            return;
        }

        let base = self.dir_base();

        if let Some(rest) = base.strip_prefix(Kind::OUTPUT_PREFIX) {
            self.name = rest.to_string();
        } else if let Some(rest) = base.strip_prefix(Kind::SCRIPT_PREFIX) {
            self.name = rest.to_string();
        }
    }

    /// Default the repository name to prefix + name
    pub fn guess_repo_name(&mut self) {
        if !self.repo_name.is_empty() {
            return;
        }

        self.repo_name = format!("{}{}", self.prefix(), self.name);
    }

    /// GitHub hosting is implied when owner, repository name and protocol
    /// are all known
    pub fn guess_use_github(&mut self) {
        self.use_github = self.use_github
            || (!self.repo_owner.is_empty()
                && !self.repo_name.is_empty()
                && self.repo_protocol.is_some());
    }

    /// Default the go module path from the GitHub coordinates, falling back
    /// to prefix + name
    pub fn guess_go_module(&mut self) {
        if !self.go_module.is_empty() {
            return;
        }

        self.guess_use_github();
        self.guess_name();

        if !self.repo_owner.is_empty() && !self.repo_name.is_empty() {
            self.go_module = format!("github.com/{}/{}", self.repo_owner, self.repo_name);
        } else if !self.name.is_empty() {
            self.go_module = format!("{}{}", self.prefix(), self.name);
        }
    }

    /// Default the go package name to the snake-cased extension name
    pub fn guess_go_package(&mut self) {
        if !self.go_package.is_empty() || self.name.is_empty() {
            return;
        }

        self.go_package = self.name.to_snake_case();
    }

    /// Synthesize the origin URL from owner, repository name and protocol.
    /// Only computed when GitHub hosting is implied and all three are known.
    pub fn guess_git_origin(&mut self) {
        self.guess_use_github();

        if !self.git_origin.is_empty() || !self.use_github {
            return;
        }

        if self.repo_owner.is_empty() || self.repo_name.is_empty() {
            return;
        }

        let Some(protocol) = self.repo_protocol else {
            return;
        };

        self.git_origin = match protocol {
            Protocol::Ssh => format!("git@github.com:{}/{}.git", self.repo_owner, self.repo_name),
            Protocol::Https => format!(
                "https://github.com/{}/{}.git",
                self.repo_owner, self.repo_name
            ),
        };
    }

    /// Default the primary class name to the camel-cased extension name
    pub fn guess_primary_class(&mut self) {
        if !self.primary_class.is_empty() {
            return;
        }

        self.primary_class = self.name.to_upper_camel_case();
    }

    /// Default the target directory to prefix + name
    pub fn guess_dir(&mut self) {
        if !self.dir.is_empty() {
            return;
        }

        self.dir = format!("{}{}", self.prefix(), self.name);
    }

    /// Recompute the environment variable prefix. Called after every field
    /// change so the derived value always reflects current state.
    pub fn update_env_prefix(&mut self) {
        let from = if self.repo_name.is_empty() {
            format!("{}_{}", self.prefix(), self.name)
        } else {
            self.repo_name.clone()
        };

        self.env_prefix = from.to_shouty_snake_case();
    }

    /// Run every guesser once, in dependency order.
    ///
    /// A kind that is still undetermined after directory inference falls
    /// back to [`Kind::ScriptExtension`], so the kind is always exported.
    pub fn guess_all(&mut self) {
        self.guess_kind();
        if self.kind.is_none() {
            self.kind = Some(Kind::ScriptExtension);
        }
        self.guess_name();
        self.guess_repo_name();
        self.guess_use_github();
        self.guess_go_module();
        self.guess_go_package();
        self.guess_git_origin();
        self.guess_primary_class();
        self.guess_dir();
    }

    /// Project the non-empty fields into a string-keyed map for template
    /// substitution. Fields with zero values are omitted entirely.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // rename_all on a struct always yields an object
            _ => unreachable!("Options serializes to a JSON object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_kind_output_prefix() {
        let mut opts = Options {
            dir: "xk6-output-foo".to_string(),
            ..Default::default()
        };

        opts.guess_kind();
        assert_eq!(opts.kind, Some(Kind::OutputExtension));
    }

    #[test]
    fn test_guess_kind_script_prefix() {
        let mut opts = Options {
            dir: "xk6-bar".to_string(),
            ..Default::default()
        };

        opts.guess_kind();
        assert_eq!(opts.kind, Some(Kind::ScriptExtension));
    }

    #[test]
    fn test_guess_kind_defaults_to_script() {
        let mut opts = Options {
            dir: "something-else".to_string(),
            ..Default::default()
        };

        opts.guess_kind();
        assert_eq!(opts.kind, Some(Kind::ScriptExtension));
    }

    #[test]
    fn test_guess_kind_keeps_explicit_value() {
        let mut opts = Options {
            dir: "xk6-output-foo".to_string(),
            kind: Some(Kind::ScriptExtension),
            ..Default::default()
        };

        opts.guess_kind();
        assert_eq!(opts.kind, Some(Kind::ScriptExtension));
    }

    #[test]
    fn test_guess_name_strips_prefixes() {
        let mut opts = Options {
            dir: "xk6-output-foo".to_string(),
            ..Default::default()
        };
        opts.guess_name();
        assert_eq!(opts.name, "foo");

        let mut opts = Options {
            dir: "xk6-bar".to_string(),
            ..Default::default()
        };
        opts.guess_name();
        assert_eq!(opts.name, "bar");
    }

    #[test]
    fn test_guess_name_uses_base_name() {
        let mut opts = Options {
            dir: "projects/xk6-bar".to_string(),
            ..Default::default()
        };

        opts.guess_name();
        assert_eq!(opts.name, "bar");
    }

    #[test]
    fn test_guess_name_ignores_unprefixed_dir() {
        let mut opts = Options {
            dir: "my-extension".to_string(),
            ..Default::default()
        };

        opts.guess_name();
        assert_eq!(opts.name, "");
    }

    #[test]
    fn test_guessers_are_idempotent_on_set_fields() {
        let mut opts = Options {
            dir: "explicit-dir".to_string(),
            kind: Some(Kind::OutputExtension),
            name: "explicit".to_string(),
            repo_name: "xk6-explicit".to_string(),
            go_module: "example.com/explicit".to_string(),
            go_package: "explicit_pkg".to_string(),
            git_origin: "git@example.com:explicit.git".to_string(),
            primary_class: "Explicit".to_string(),
            ..Default::default()
        };

        opts.guess_all();

        assert_eq!(opts.dir, "explicit-dir");
        assert_eq!(opts.kind, Some(Kind::OutputExtension));
        assert_eq!(opts.name, "explicit");
        assert_eq!(opts.repo_name, "xk6-explicit");
        assert_eq!(opts.go_module, "example.com/explicit");
        assert_eq!(opts.go_package, "explicit_pkg");
        assert_eq!(opts.git_origin, "git@example.com:explicit.git");
        assert_eq!(opts.primary_class, "Explicit");
    }

    #[test]
    fn test_guess_all_from_directory_only() {
        let mut opts = Options {
            dir: "xk6-hitchhiker".to_string(),
            ..Default::default()
        };

        opts.guess_all();

        assert_eq!(opts.kind, Some(Kind::ScriptExtension));
        assert_eq!(opts.name, "hitchhiker");
        assert_eq!(opts.repo_name, "xk6-hitchhiker");
        assert_eq!(opts.go_module, "xk6-hitchhiker");
        assert_eq!(opts.go_package, "hitchhiker");
        assert_eq!(opts.primary_class, "Hitchhiker");
        assert!(opts.git_origin.is_empty());
        assert!(!opts.use_github);
    }

    #[test]
    fn test_guess_all_from_name_only_exports_kind() {
        let mut opts = Options {
            name: "foo".to_string(),
            ..Default::default()
        };

        opts.guess_all();

        assert_eq!(opts.kind, Some(Kind::ScriptExtension));
        assert_eq!(opts.dir, "xk6-foo");

        let map = opts.to_map().unwrap();
        assert_eq!(map["kind"], "ScriptExtension");
    }

    #[test]
    fn test_guess_go_module_from_github_coordinates() {
        let mut opts = Options {
            repo_owner: "acme".to_string(),
            repo_name: "xk6-widget".to_string(),
            ..Default::default()
        };

        opts.guess_go_module();
        assert_eq!(opts.go_module, "github.com/acme/xk6-widget");
    }

    #[test]
    fn test_guess_git_origin_ssh() {
        let mut opts = Options {
            repo_owner: "acme".to_string(),
            repo_name: "xk6-widget".to_string(),
            repo_protocol: Some(Protocol::Ssh),
            ..Default::default()
        };

        opts.guess_git_origin();
        assert_eq!(opts.git_origin, "git@github.com:acme/xk6-widget.git");
        assert!(opts.use_github);
    }

    #[test]
    fn test_guess_git_origin_https() {
        let mut opts = Options {
            repo_owner: "acme".to_string(),
            repo_name: "xk6-widget".to_string(),
            repo_protocol: Some(Protocol::Https),
            ..Default::default()
        };

        opts.guess_git_origin();
        assert_eq!(opts.git_origin, "https://github.com/acme/xk6-widget.git");
    }

    #[test]
    fn test_guess_git_origin_requires_all_coordinates() {
        let mut opts = Options {
            repo_owner: "acme".to_string(),
            repo_protocol: Some(Protocol::Ssh),
            use_github: true,
            ..Default::default()
        };

        opts.guess_git_origin();
        assert!(opts.git_origin.is_empty());
    }

    #[test]
    fn test_update_env_prefix_from_repo_name() {
        let mut opts = Options {
            repo_name: "xk6-hitchhiker".to_string(),
            ..Default::default()
        };

        opts.update_env_prefix();
        assert_eq!(opts.env_prefix, "XK6_HITCHHIKER");
    }

    #[test]
    fn test_update_env_prefix_without_repo_name() {
        let mut opts = Options {
            kind: Some(Kind::OutputExtension),
            name: "kafka".to_string(),
            ..Default::default()
        };

        opts.update_env_prefix();
        assert_eq!(opts.env_prefix, "XK6_OUTPUT_KAFKA");
    }

    #[test]
    fn test_to_map_empty() {
        let opts = Options::default();

        let map = opts.to_map().unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_to_map_with_values() {
        let opts = Options {
            kind: Some(Kind::ScriptExtension),
            name: "hitchhiker".to_string(),
            primary_class: "Guide".to_string(),
            repo_name: "xk6-hitchhiker".to_string(),
            ..Default::default()
        };

        let map = opts.to_map().unwrap();

        assert_eq!(map.len(), 4);
        assert_eq!(map["kind"], "ScriptExtension");
        assert_eq!(map["name"], "hitchhiker");
        assert_eq!(map["PrimaryClass"], "Guide");
        assert_eq!(map["repoName"], "xk6-hitchhiker");
    }

    #[test]
    fn test_to_map_includes_set_booleans() {
        let opts = Options {
            use_github: true,
            no_git_init: true,
            ..Default::default()
        };

        let map = opts.to_map().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["useGitHub"], true);
        assert_eq!(map["noGitInit"], true);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "ScriptExtension".parse::<Kind>().unwrap(),
            Kind::ScriptExtension
        );
        assert_eq!(
            "OutputExtension".parse::<Kind>().unwrap(),
            Kind::OutputExtension
        );
        assert!("JavaScript".parse::<Kind>().is_err());
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!("ssh".parse::<Protocol>().unwrap(), Protocol::Ssh);
        assert_eq!("https".parse::<Protocol>().unwrap(), Protocol::Https);
        assert!("ftp".parse::<Protocol>().is_err());
    }
}
