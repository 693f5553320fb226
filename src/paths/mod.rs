//! Path utilities: base directory resolution, prefix removal and glob escaping.

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::SniffError;

/// Variables consulted, in order, when no explicit variable supplies the base directory.
pub const HOME_VARS: [&str; 2] = ["HOME", "HOMEPATH"];

/// Removes a prefix from a path if it exists.
///
/// This function checks if `path` starts with the given `prefix` and removes
/// the prefix if it does. Matching is done per path component, so
/// `/home/username` does not start with `/home/user`. If the path doesn't
/// start with the prefix, the original path is returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use sniff::paths::remove_path_prefix;
///
/// let path = Path::new("/home/user/notebooks/**/*.ipynb");
/// let prefix = Path::new("/home/user");
///
/// let result = remove_path_prefix(path, prefix);
/// assert_eq!(result, PathBuf::from("notebooks/**/*.ipynb"));
///
/// // If the prefix doesn't match, the original path is returned
/// let unchanged = remove_path_prefix(path, Path::new("/tmp"));
/// assert_eq!(unchanged, path);
/// ```
pub fn remove_path_prefix<P: AsRef<Path>, Q: AsRef<Path>>(path: P, prefix: Q) -> PathBuf {
    let path = path.as_ref();
    match path.strip_prefix(prefix.as_ref()) {
        Ok(stripped) => stripped.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Resolves the directory that anchors relative search patterns.
///
/// When `environ` names a variable that is set, its value is used;
/// otherwise the first of [`HOME_VARS`] that is set. The result is
/// canonicalized and must be an existing directory.
///
/// # Errors
///
/// * [`SniffError::NoHomeDirectory`] if none of the variables is set
/// * [`SniffError::BaseDirNotFound`] if the value is not an existing directory
pub fn resolve_base_dir(environ: Option<&str>) -> Result<PathBuf> {
    resolve_base_dir_with(environ, |key| std::env::var_os(key))
}

/// Same as [`resolve_base_dir`] with an explicit variable lookup.
pub fn resolve_base_dir_with<F>(environ: Option<&str>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let value = environ
        .into_iter()
        .chain(HOME_VARS)
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .ok_or(SniffError::NoHomeDirectory)?;

    canonical_dir(Path::new(&value))
}

/// Canonicalizes `path`, requiring it to be an existing directory.
pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) if resolved.is_dir() => Ok(resolved),
        _ => Err(SniffError::BaseDirNotFound {
            path: path.to_path_buf(),
        }
        .into()),
    }
}

const OPEN_PLACEHOLDER: char = '\u{E000}';
const CLOSE_PLACEHOLDER: char = '\u{E001}';

/// Makes every `[`, `]`, `{` and `}` in `path` match itself in a glob.
///
/// Brackets become the one-character classes `[[]` and `[]]`. The
/// substitution runs in two phases through placeholder characters, so the
/// brackets introduced by the escapes are never escaped a second time.
/// Braces would otherwise start an alternation.
///
/// ```
/// use sniff::paths::escape_glob_brackets;
///
/// assert_eq!(escape_glob_brackets("/data/[2023]/*.txt"), "/data/[[]2023[]]/*.txt");
/// assert_eq!(escape_glob_brackets("a[]b"), "a[[][]]b");
/// ```
pub fn escape_glob_brackets(path: &str) -> String {
    let marked = path
        .replace('[', &OPEN_PLACEHOLDER.to_string())
        .replace(']', &CLOSE_PLACEHOLDER.to_string());

    marked
        .replace(OPEN_PLACEHOLDER, "[[]")
        .replace(CLOSE_PLACEHOLDER, "[]]")
        .replace('{', "[{]")
        .replace('}', "[}]")
}

/// Escapes every glob metacharacter in `path`, wildcards included.
///
/// Used for the base directory, whose name is never a pattern.
///
/// ```
/// use sniff::paths::escape_glob_literal;
///
/// assert_eq!(escape_glob_literal("/data/q?a/[x]"), "/data/q[?]a/[[]x[]]");
/// ```
pub fn escape_glob_literal(path: &str) -> String {
    escape_glob_brackets(path)
        .replace('*', "[*]")
        .replace('?', "[?]")
}
