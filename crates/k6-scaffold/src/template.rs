//! Template tree expansion with placeholder substitution.
//!
//! Placeholders are key names wrapped in a pair of `ˮ` (U+02EE) characters,
//! the delimiter used by the k6 extension template repositories. The
//! unusual character keeps template files valid Go sources while still
//! carrying substitution points in both path names and file contents.

use std::fs;

use camino::Utf8Path;
use serde_json::{Map, Value};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Placeholder delimiter (U+02EE MODIFIER LETTER DOUBLE APOSTROPHE)
const DELIMITER: char = 'ˮ';

/// Substitute `ˮkeyˮ` placeholders in `input` using `vars`.
///
/// Keys not present in the map expand to the empty string. An opening
/// delimiter without a closing one is emitted literally.
pub fn expand_str(input: &str, vars: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(DELIMITER) {
        out.push_str(&rest[..start]);
        let after = &rest[start + DELIMITER.len_utf8()..];

        match after.find(DELIMITER) {
            Some(end) => {
                if let Some(value) = vars.get(&after[..end]) {
                    out.push_str(&value_text(value));
                }
                rest = &after[end + DELIMITER.len_utf8()..];
            }
            None => {
                out.push(DELIMITER);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Substitution text of a map value
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Expand the template tree at `src` into the target directory `dst`.
///
/// The target directory itself is created (and must not already exist).
/// Every other entry's path relative to `src` is substituted through
/// [`expand_str`] before being created under `dst`. File contents undergo
/// the same substitution, and every literal occurrence of the template's
/// own module path `src_module` is then replaced with `go_module`, because
/// template sources reference their module through import statements that
/// are not expressed as placeholders.
///
/// Directories are created with restrictive permissions and files are
/// written non-executable. The walk is not atomic: an interrupted
/// expansion leaves a partial tree behind for the caller to clean up.
pub fn expand_tree(
    src: &Utf8Path,
    dst: &Utf8Path,
    vars: &Map<String, Value>,
    src_module: &str,
    go_module: &str,
) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let path = Utf8Path::from_path(entry.path())
            .ok_or_else(|| Error::invalid_path(entry.path().to_string_lossy()))?;

        if path == src {
            make_dir(dst)?;
            continue;
        }

        // strip_prefix cannot fail for entries yielded under src
        let rel = path
            .strip_prefix(src)
            .map_err(|_| Error::invalid_path(path.as_str()))?;
        let target = dst.join(expand_str(rel.as_str(), vars));

        debug!("Expanding: {} -> {}", rel, target);

        if entry.file_type().is_dir() {
            make_dir(&target)?;
            continue;
        }

        let raw = fs::read(path)?;

        match String::from_utf8(raw) {
            Ok(text) => {
                let expanded = expand_str(&text, vars).replace(src_module, go_module);
                write_file(&target, expanded.as_bytes())?;
            }
            // Non-text entries carry no placeholders and are copied as-is
            Err(err) => write_file(&target, err.as_bytes())?,
        }
    }

    Ok(())
}

#[cfg(unix)]
fn make_dir(path: &Utf8Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().mode(0o750).create(path)
}

#[cfg(not(unix))]
fn make_dir(path: &Utf8Path) -> std::io::Result<()> {
    fs::create_dir(path)
}

#[cfg(unix)]
fn write_file(path: &Utf8Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;

    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_file(path: &Utf8Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_expand_str_known_key() {
        let vars = vars(&[("name", "hitchhiker")]);
        assert_eq!(expand_str("xk6-ˮnameˮ", &vars), "xk6-hitchhiker");
    }

    #[test]
    fn test_expand_str_unknown_key_removed() {
        let vars = Map::new();
        assert_eq!(expand_str("beforeˮmissingˮafter", &vars), "beforeafter");
    }

    #[test]
    fn test_expand_str_multiple_keys() {
        let vars = vars(&[("owner", "acme"), ("repoName", "xk6-widget")]);
        assert_eq!(
            expand_str("github.com/ˮownerˮ/ˮrepoNameˮ", &vars),
            "github.com/acme/xk6-widget"
        );
    }

    #[test]
    fn test_expand_str_unterminated_delimiter_kept() {
        let vars = vars(&[("name", "foo")]);
        assert_eq!(expand_str("leftˮdangling", &vars), "leftˮdangling");
    }

    #[test]
    fn test_expand_str_bool_value() {
        let mut vars = Map::new();
        vars.insert("useGitHub".to_string(), Value::Bool(true));
        assert_eq!(expand_str("ˮuseGitHubˮ", &vars), "true");
    }

    #[test]
    fn test_expand_str_no_placeholders() {
        let vars = vars(&[("name", "foo")]);
        assert_eq!(expand_str("plain text", &vars), "plain text");
    }
}
