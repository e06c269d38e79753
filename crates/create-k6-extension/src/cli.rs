//! CLI argument parsing with clap

use clap::Parser;
use k6_scaffold::{Kind, Options, Protocol};

/// Scaffold a new k6 extension project
#[derive(Parser, Debug)]
#[command(name = "create-k6-extension")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target directory of the new extension
    pub directory: Option<String>,

    /// Disable interactive questions
    #[arg(long)]
    pub no_ask: bool,

    /// Extension name
    #[arg(long)]
    pub name: Option<String>,

    /// A brief summary of the extension
    #[arg(long)]
    pub summary: Option<String>,

    /// go module path
    #[arg(long)]
    pub go_module: Option<String>,

    /// go package name (default: extension name)
    #[arg(long)]
    pub go_package: Option<String>,

    /// git origin URL
    #[arg(long)]
    pub git_origin: Option<String>,

    /// GitHub repository owner
    #[arg(long)]
    pub repo_owner: Option<String>,

    /// GitHub repository name
    #[arg(long)]
    pub repo_name: Option<String>,

    /// git repository origin protocol
    #[arg(long, default_value_t = Protocol::Ssh)]
    pub repo_protocol: Protocol,

    /// Extension type (default: ScriptExtension, inferred from the
    /// directory name when possible)
    #[arg(long = "type", value_name = "KIND")]
    pub kind: Option<Kind>,

    /// Disable git repository initialization
    #[arg(long)]
    pub no_git_init: bool,

    /// Disable setting git origin
    #[arg(long)]
    pub no_git_origin: bool,

    /// Disable xk6 install
    #[arg(long)]
    pub no_install: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Project the parsed flags onto the option model
    pub fn into_options(self) -> Options {
        Options {
            dir: self.directory.unwrap_or_default(),
            kind: self.kind,
            name: self.name.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            git_origin: self.git_origin.unwrap_or_default(),
            repo_owner: self.repo_owner.unwrap_or_default(),
            repo_name: self.repo_name.unwrap_or_default(),
            repo_protocol: Some(self.repo_protocol),
            go_module: self.go_module.unwrap_or_default(),
            go_package: self.go_package.unwrap_or_default(),
            no_git_init: self.no_git_init,
            no_git_origin: self.no_git_origin,
            no_ask: self.no_ask,
            no_install: self.no_install,
            debug: self.debug,
            ..Default::default()
        }
    }
}
