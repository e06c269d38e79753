//! Answer validators for the interactive questions.
//!
//! Returned error strings are shown next to the re-prompted question, so
//! they are phrased as user guidance rather than as error codes.

/// Extension names are 3-32 lowercase alphanumeric characters
pub fn extension_name(value: &str) -> Result<(), String> {
    let valid = (3..=32).contains(&value.len())
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err("Minimum 3 maximum 32 lower case alphanumeric characters are required".to_string())
    }
}

/// Repository names must start with the kind-specific prefix
pub fn repo_name(value: &str, prefix: &str) -> Result<(), String> {
    if value.starts_with(prefix) {
        Ok(())
    } else {
        Err(format!("The name must start with {prefix}"))
    }
}

/// A non-empty value is required
pub fn required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("A value is required".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_name_too_short() {
        assert!(extension_name("ab").is_err());
    }

    #[test]
    fn test_extension_name_uppercase_rejected() {
        assert!(extension_name("ABC123").is_err());
    }

    #[test]
    fn test_extension_name_accepted() {
        assert!(extension_name("abc123").is_ok());
    }

    #[test]
    fn test_extension_name_too_long() {
        assert!(extension_name(&"a".repeat(33)).is_err());
        assert!(extension_name(&"a".repeat(32)).is_ok());
    }

    #[test]
    fn test_extension_name_rejects_separators() {
        assert!(extension_name("foo-bar").is_err());
        assert!(extension_name("foo_bar").is_err());
    }

    #[test]
    fn test_repo_name_prefix() {
        assert!(repo_name("xk6-widget", "xk6-").is_ok());
        assert!(repo_name("widget", "xk6-").is_err());
        assert!(repo_name("xk6-kafka", "xk6-output-").is_err());
    }

    #[test]
    fn test_required() {
        assert!(required("value").is_ok());
        assert!(required("").is_err());
        assert!(required("   ").is_err());
    }
}
