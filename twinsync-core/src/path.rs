//! Path normalization for user-supplied and list-file path strings.
//!
//! Only structure is touched: surrounding whitespace and quotes, separators,
//! and `.` / `..` segments. Characters inside a component are left alone, so
//! `Project Notes - 2024/draft v2.docx` keeps its spaces and hyphens.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

use crate::error::PathError;

/// Normalize a raw path string into a comparable host path.
///
/// - trims surrounding whitespace and one layer of matching `"` or `'` quotes
/// - maps both `/` and `\` to the host separator
/// - lexically resolves `.` and `..` (see [`clean`])
///
/// Returns [`PathError::Empty`] for blank input rather than an empty path.
pub fn normalize(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = strip_quotes(raw.trim()).trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if trimmed.contains('\0') {
        return Err(PathError::Invalid("path contains a NUL byte".to_string()));
    }

    let unified = trimmed.replace(['\\', '/'], MAIN_SEPARATOR_STR);
    Ok(clean(Path::new(&unified)))
}

/// Lexically resolve `.` and `..` segments without touching the filesystem.
///
/// `..` directly under a root or prefix is dropped (`/..` is `/`); a leading
/// `..` on a relative path is kept because there is nothing to pop.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(s: &str) -> PathBuf {
        PathBuf::from(s.replace('/', MAIN_SEPARATOR_STR))
    }

    #[test]
    fn strips_whitespace_and_quotes() {
        assert_eq!(normalize("  \"docs/report.txt\" ").unwrap(), host("docs/report.txt"));
        assert_eq!(normalize("'docs/report.txt'").unwrap(), host("docs/report.txt"));
    }

    #[test]
    fn mixed_separators_are_unified() {
        assert_eq!(normalize(r"docs\2024/q1\report.txt").unwrap(), host("docs/2024/q1/report.txt"));
    }

    #[test]
    fn dot_segments_are_resolved() {
        assert_eq!(normalize("a/./b/../c.txt").unwrap(), host("a/c.txt"));
        assert_eq!(normalize("a//b").unwrap(), host("a/b"));
    }

    #[test]
    fn leading_parent_is_kept_on_relative_paths() {
        assert_eq!(normalize("../x.txt").unwrap(), host("../x.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn parent_above_root_is_dropped() {
        assert_eq!(normalize("/../etc/./hosts").unwrap(), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn spaces_inside_components_survive() {
        let p = normalize("  Project Notes - 2024/draft  v2.docx ").unwrap();
        assert_eq!(p, host("Project Notes - 2024/draft  v2.docx"));
    }

    #[test]
    fn empty_and_quote_only_inputs_are_rejected() {
        assert_eq!(normalize(""), Err(PathError::Empty));
        assert_eq!(normalize("   "), Err(PathError::Empty));
        assert_eq!(normalize("\"\""), Err(PathError::Empty));
    }

    #[test]
    fn nul_byte_is_invalid() {
        assert!(matches!(normalize("a\0b"), Err(PathError::Invalid(_))));
    }
}
