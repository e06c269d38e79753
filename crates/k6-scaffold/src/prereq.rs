//! Startup prerequisite checks for required external tools

use crate::error::{Error, Result};

/// A required external tool with remediation guidance
#[derive(Debug, Clone, Copy)]
pub struct Prerequisite {
    /// Executable name looked up on PATH
    pub command: &'static str,
    /// Message shown when the tool is missing
    pub message: &'static str,
    /// Installation documentation URL
    pub link: &'static str,
}

/// Tools that must be resolvable before any work starts.
///
/// Each entry is looked up independently.
pub const PREREQUISITES: &[Prerequisite] = &[
    Prerequisite {
        command: "go",
        message: "To use this command, you need the go toolchain!",
        link: "https://go.dev/doc/install",
    },
    Prerequisite {
        command: "git",
        message: "To use this command, you need the git CLI!",
        link: "https://git-scm.com/downloads",
    },
];

/// Check whether a command is resolvable on PATH
pub fn is_available(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Verify that a prerequisite is present
pub fn check(prereq: &Prerequisite) -> Result<()> {
    if is_available(prereq.command) {
        Ok(())
    } else {
        Err(Error::missing_prerequisite(prereq.command))
    }
}
