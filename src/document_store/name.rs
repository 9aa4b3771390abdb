//! # Cheat Sheet Names
//!
//! A name doubles as the file stem on disk, so it is validated before any
//! path is built from it. Anything that can't leave the data directory or
//! name a hidden file is allowed, spaces and non-ASCII included.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{StoreError, StoreResult};

/// Maximum length of a name in bytes, leaving room for `.yaml` in a
/// 255-byte file name
pub const MAX_NAME_LEN: usize = 250;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^./\\\x00-\x1f][^/\\\x00-\x1f]*$").expect("name pattern is a valid regex")
    })
}

/// Validate a cheat sheet name.
///
/// Rejects empty names, path separators, NUL and other control characters,
/// and a leading dot (which covers `..`).
pub fn validate_name(name: &str) -> StoreResult<()> {
    if name.len() > MAX_NAME_LEN || !name_pattern().is_match(name) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_names() {
        for name in [
            "git",
            "docker-compose",
            "node.js",
            "vim_2",
            "K8s",
            "my notes",
            "café",
            "a..b",
            "日本語",
        ] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        for name in [
            "",
            ".",
            "..",
            "../etc/passwd",
            "a/b",
            "a\\b",
            ".hidden",
            "nul\0byte",
            "line\nbreak",
        ] {
            assert!(
                matches!(validate_name(name), Err(StoreError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overlong_name() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name(&name).is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
    }
}
