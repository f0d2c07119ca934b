use crate::error::{Result, SetupError};

/// Highest numeric suffix tried before giving up on a slug.
pub const MAX_SUFFIX: usize = 10_000;

/// Lowercases, turns every run of non-alphanumeric characters into a single
/// hyphen and strips hyphens from both ends. Marks that only appear through
/// case mapping (`İ` lowercases to `i` plus U+0307) are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase().filter(|lower| lower.is_alphanumeric()));
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Returns `base` if free, otherwise the first of `base-2`, `base-3`, ...
/// that `taken` rejects.
pub fn unique_slug(base: &str, taken: impl Fn(&str) -> bool) -> Result<String> {
    if !taken(base) {
        return Ok(base.to_string());
    }
    for suffix in 2..=MAX_SUFFIX {
        let candidate = format!("{base}-{suffix}");
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(SetupError::DuplicateIdentifier(base.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Visual Studio Code"), "visual-studio-code");
        assert_eq!(slugify("  Node.js  (LTS) "), "node-js-lts");
        assert_eq!(slugify("C++ / Clang"), "c-clang");
        assert_eq!(slugify("--git--"), "git");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_output_is_a_valid_identifier() {
        for name in ["İzmir CLI", "ǅemal Tool", "Straße", "ΣΊΣΥΦΟΣ"] {
            let slug = slugify(name);
            assert!(!slug.is_empty(), "{name:?} slugified to nothing");
            assert!(
                crate::utils::ToolValidator::validate_identifier(&slug).is_ok(),
                "{name:?} slugified to invalid {slug:?}"
            );
        }
        assert_eq!(slugify("İzmir CLI"), "izmir-cli");
    }

    #[test]
    fn unique_slug_appends_suffix() {
        let taken = ["git", "git-2"];
        let slug = unique_slug("git", |candidate| taken.contains(&candidate)).unwrap();
        assert_eq!(slug, "git-3");
        assert_eq!(unique_slug("node", |_| false).unwrap(), "node");
    }

    #[test]
    fn unique_slug_exhaustion_is_duplicate_error() {
        let err = unique_slug("git", |_| true).unwrap_err();
        assert!(matches!(err, SetupError::DuplicateIdentifier(ref id) if id == "git"));
    }
}
