//! create-k6-extension - scaffold a new k6 extension project
//!
//! This is the main entry point for the create-k6-extension command-line
//! interface.

mod ask;
mod cli;
mod create;
mod output;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use k6_scaffold::{prereq, Error, Options};

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    check_prerequisites()?;

    let mut opts = cli.into_options();

    // Piped input implies non-interactive mode
    opts.no_ask = opts.no_ask || !std::io::stdin().is_terminal();
    opts.installed = prereq::is_available("xk6");
    opts.update_env_prefix();

    if opts.no_ask {
        opts.guess_all();
        check_required(&opts)?;
        tracing::debug!(?opts, "resolved options");
    }

    if !ask::ask(&mut opts)? {
        // Cancelled at a prompt: no project created, no error
        return Ok(());
    }

    create::create(&opts).await
}

/// Verify every required external tool independently, with remediation
/// guidance for the first one missing
fn check_prerequisites() -> Result<()> {
    for tool in prereq::PREREQUISITES {
        if let Err(err) = prereq::check(tool) {
            eprintln!("{}", style(tool.message).red());
            eprintln!("{}", style(tool.link).cyan());
            return Err(err.into());
        }
    }

    Ok(())
}

/// With prompting disabled, the fields normally collected interactively
/// must have been supplied via flags or be derivable from them
fn check_required(opts: &Options) -> k6_scaffold::Result<()> {
    if opts.name.is_empty() {
        return Err(Error::missing_flag("name"));
    }

    if opts.go_module.is_empty() {
        return Err(Error::missing_flag("go-module"));
    }

    if opts.dir.is_empty() {
        return Err(Error::missing_argument("directory"));
    }

    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        // Keep the wizard output clean by default
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
