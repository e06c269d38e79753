//! Interactive question sections
//!
//! Walks the ordered question list with dialoguer, running the relevant
//! guessers before each prompt so the shown default reflects current state,
//! and recomputing the environment prefix after every answer. The whole
//! sequence repeats until the user confirms the collected answers.

use dialoguer::{Confirm, Input, Select};

use k6_scaffold::options::{Kind, Options, Protocol};
use k6_scaffold::validate;

use crate::output;

type QResult = Result<(), dialoguer::Error>;

/// Collect options interactively.
///
/// Returns `Ok(true)` when the user confirmed the answers, `Ok(false)` when
/// the prompt sequence was cancelled (Ctrl-C), which is not an error. When
/// `no_ask` is set the collector is bypassed and confirmation is implied.
pub fn ask(opts: &mut Options) -> anyhow::Result<bool> {
    if opts.no_ask {
        return Ok(true);
    }

    let mut asker = Asker { opts };

    match asker.ask_loop() {
        Ok(confirmed) => Ok(confirmed),
        Err(err) if is_interrupted(&err) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn is_interrupted(err: &dialoguer::Error) -> bool {
    let dialoguer::Error::IO(io_err) = err;
    io_err.kind() == std::io::ErrorKind::Interrupted
}

struct Asker<'a> {
    opts: &'a mut Options,
}

impl<'a> Asker<'a> {
    fn ask_loop(&mut self) -> Result<bool, dialoguer::Error> {
        loop {
            output::header("Create k6 extension");

            self.ask_all()?;

            output::header("✓ Confirmation");
            println!();

            // A bare Enter repeats the sections; accepting takes an explicit yes
            if Confirm::new()
                .with_prompt("Are the above answers correct?")
                .default(false)
                .interact()?
            {
                break;
            }
        }

        self.opts.guess_primary_class();

        Ok(true)
    }

    fn ask_all(&mut self) -> QResult {
        self.section(
            "General options",
            &[
                Self::ask_kind,
                Self::ask_name,
                Self::ask_summary,
                Self::ask_dir,
                Self::ask_no_install,
            ],
        )?;

        self.section(
            "Git repository",
            &[
                Self::ask_no_git_init,
                Self::ask_use_github,
                Self::ask_repo_owner,
                Self::ask_repo_name,
                Self::ask_no_git_origin,
                Self::ask_repo_protocol,
                Self::ask_git_origin,
            ],
        )?;

        self.section("Go", &[Self::ask_go_module, Self::ask_go_package])?;

        self.opts.update_env_prefix();

        Ok(())
    }

    fn section(&mut self, title: &str, questions: &[fn(&mut Self) -> QResult]) -> QResult {
        output::header(title);

        for question in questions {
            question(self)?;
            self.opts.update_env_prefix();
        }

        Ok(())
    }

    fn ask_kind(&mut self) -> QResult {
        self.opts.guess_kind();

        let kinds = [Kind::ScriptExtension, Kind::OutputExtension];
        let default = kinds
            .iter()
            .position(|k| Some(*k) == self.opts.kind)
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt("Extension type")
            .items(&kinds)
            .default(default)
            .interact()?;

        self.opts.kind = Some(kinds[selection]);

        Ok(())
    }

    fn ask_name(&mut self) -> QResult {
        self.opts.guess_name();

        let mut input = Input::<String>::new().with_prompt("Extension name");
        if !self.opts.name.is_empty() {
            input = input.default(self.opts.name.clone());
        }

        self.opts.name = input
            .validate_with(|v: &String| validate::extension_name(v))
            .interact_text()?;

        Ok(())
    }

    fn ask_summary(&mut self) -> QResult {
        let mut input = Input::<String>::new()
            .with_prompt("Short description")
            .allow_empty(true);
        if !self.opts.summary.is_empty() {
            input = input.default(self.opts.summary.clone());
        }

        self.opts.summary = input.interact_text()?;

        Ok(())
    }

    fn ask_dir(&mut self) -> QResult {
        self.opts.guess_dir();

        let mut input = Input::<String>::new().with_prompt("Directory name");
        if !self.opts.dir.is_empty() {
            input = input.default(self.opts.dir.clone());
        }

        self.opts.dir = input
            .validate_with(|v: &String| validate::required(v))
            .interact_text()?;

        Ok(())
    }

    fn ask_no_install(&mut self) -> QResult {
        if self.opts.installed {
            return Ok(());
        }

        self.opts.no_install = Confirm::new()
            .with_prompt("Disable xk6 install")
            .default(self.opts.no_install)
            .interact()?;

        Ok(())
    }

    fn ask_no_git_init(&mut self) -> QResult {
        self.opts.no_git_init = Confirm::new()
            .with_prompt("Disable git repository initialization")
            .default(self.opts.no_git_init)
            .interact()?;

        Ok(())
    }

    fn ask_use_github(&mut self) -> QResult {
        self.opts.guess_use_github();

        if self.opts.no_git_init {
            return Ok(());
        }

        self.opts.use_github = Confirm::new()
            .with_prompt("Host the repository on GitHub")
            .default(self.opts.use_github)
            .interact()?;

        Ok(())
    }

    fn ask_repo_owner(&mut self) -> QResult {
        self.opts.guess_use_github();

        if !self.opts.use_github {
            return Ok(());
        }

        let mut input = Input::<String>::new().with_prompt("GitHub repository owner");
        if !self.opts.repo_owner.is_empty() {
            input = input.default(self.opts.repo_owner.clone());
        }

        self.opts.repo_owner = input
            .validate_with(|v: &String| validate::required(v))
            .interact_text()?;

        Ok(())
    }

    fn ask_repo_name(&mut self) -> QResult {
        self.opts.guess_use_github();
        self.opts.guess_repo_name();

        if !self.opts.use_github {
            return Ok(());
        }

        let prefix = self.opts.kind.unwrap_or(Kind::ScriptExtension).prefix();

        let mut input = Input::<String>::new().with_prompt("GitHub repository name");
        if !self.opts.repo_name.is_empty() {
            input = input.default(self.opts.repo_name.clone());
        }

        self.opts.repo_name = input
            .validate_with(move |v: &String| validate::repo_name(v, prefix))
            .interact_text()?;

        Ok(())
    }

    fn ask_no_git_origin(&mut self) -> QResult {
        if self.opts.no_git_init {
            return Ok(());
        }

        self.opts.no_git_origin = Confirm::new()
            .with_prompt("Disable setting git origin")
            .default(self.opts.no_git_origin)
            .interact()?;

        Ok(())
    }

    fn ask_repo_protocol(&mut self) -> QResult {
        if self.opts.no_git_origin || !self.opts.use_github {
            return Ok(());
        }

        let protocols = [Protocol::Https, Protocol::Ssh];
        let current = self.opts.repo_protocol.unwrap_or(Protocol::Ssh);
        let default = protocols
            .iter()
            .position(|p| *p == current)
            .unwrap_or(protocols.len() - 1);

        let selection = Select::new()
            .with_prompt("Choose git origin protocol")
            .items(&protocols)
            .default(default)
            .interact()?;

        self.opts.repo_protocol = Some(protocols[selection]);

        Ok(())
    }

    fn ask_git_origin(&mut self) -> QResult {
        self.opts.guess_git_origin();

        if self.opts.no_git_init || self.opts.no_git_origin {
            return Ok(());
        }

        let mut input = Input::<String>::new().with_prompt("git origin URL");
        if !self.opts.git_origin.is_empty() {
            input = input.default(self.opts.git_origin.clone());
        }

        self.opts.git_origin = input
            .validate_with(|v: &String| validate::required(v))
            .interact_text()?;

        Ok(())
    }

    fn ask_go_module(&mut self) -> QResult {
        self.opts.guess_go_module();

        let mut input = Input::<String>::new().with_prompt("go module path");
        if !self.opts.go_module.is_empty() {
            input = input.default(self.opts.go_module.clone());
        }

        self.opts.go_module = input
            .validate_with(|v: &String| validate::required(v))
            .interact_text()?;

        Ok(())
    }

    fn ask_go_package(&mut self) -> QResult {
        self.opts.guess_go_package();

        let mut input = Input::<String>::new().with_prompt("go package name");
        if !self.opts.go_package.is_empty() {
            input = input.default(self.opts.go_package.clone());
        }

        self.opts.go_package = input
            .validate_with(|v: &String| validate::required(v))
            .interact_text()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ask_bypasses_collector() {
        let mut opts = Options {
            no_ask: true,
            ..Default::default()
        };

        let confirmed = ask(&mut opts).unwrap();
        assert!(confirmed);
    }

    #[test]
    fn test_interrupt_detection() {
        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(is_interrupted(&err));

        let err = dialoguer::Error::IO(std::io::Error::other("boom"));
        assert!(!is_interrupted(&err));
    }
}
