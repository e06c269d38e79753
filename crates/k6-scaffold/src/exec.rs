//! External command execution with output capture

use camino::Utf8Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Run an external command and capture its combined stdout/stderr.
///
/// # Arguments
/// * `dir` - Working directory for the command, if any
/// * `program` - Executable name
/// * `args` - Command arguments
///
/// # Returns
/// The combined output on success
///
/// # Errors
/// Returns `CommandNotFound` if the program cannot be spawned, or
/// `CommandFailed` carrying the combined output on a non-zero exit.
pub async fn run(dir: Option<&Utf8Path>, program: &str, args: &[&str]) -> Result<String> {
    debug!("Running: {} {}", program, args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::command_not_found(program)
        } else {
            Error::Io(err)
        }
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(Error::command_failed(program, combined));
    }

    Ok(combined)
}

/// Run an external command and return its trimmed stdout.
///
/// Unlike [`run`], stderr is not captured into the result; it is only used
/// for the failure diagnostic.
pub async fn stdout(dir: Option<&Utf8Path>, program: &str, args: &[&str]) -> Result<String> {
    debug!("Querying: {} {}", program, args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::command_not_found(program)
        } else {
            Error::Io(err)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(Error::command_failed(program, stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_output() {
        let out = run(None, "git", &["--version"]).await.unwrap();
        assert!(out.contains("git version"));
    }

    #[tokio::test]
    async fn test_run_failure_carries_output() {
        let err = run(None, "git", &["definitely-not-a-subcommand"])
            .await
            .unwrap_err();

        match err {
            Error::CommandFailed { program, output } => {
                assert_eq!(program, "git");
                assert!(!output.is_empty());
            }
            other => panic!("expected CommandFailed, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_run_unknown_program() {
        let err = run(None, "no-such-program-exists", &[]).await.unwrap_err();
        assert!(matches!(err, Error::CommandNotFound { .. }));
    }

    #[tokio::test]
    async fn test_stdout_is_trimmed() {
        let out = stdout(None, "git", &["--version"]).await.unwrap();
        assert!(!out.ends_with('\n'));
    }
}
