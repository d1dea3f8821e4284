//! POSIX shell quoting and `export` / `unset` statement rendering.
use crate::error::KeyError;
use crate::vars::{self, Vars};

/// Quote `value` for the right-hand side of a POSIX assignment.
///
/// The value is wrapped in single quotes and every embedded `'` becomes
/// `'"'"'`, so the shell performs no expansion on the contents.
///
/// # Examples
///
/// ```
/// use gpx_cli::shell::export::quote_for_shell;
///
/// assert_eq!(quote_for_shell("abc"), "'abc'");
/// assert_eq!(quote_for_shell("a'b"), r#"'a'"'"'b'"#);
/// assert_eq!(quote_for_shell(""), "''");
/// ```
#[must_use]
pub fn quote_for_shell(value: &str) -> String {
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

/// Render one `export KEY='value'` line per variable, sorted by key.
///
/// # Errors
///
/// Returns [`KeyError::InvalidKey`] if any key fails validation.
pub fn export_lines(vars: &Vars) -> Result<Vec<String>, KeyError> {
    vars.iter()
        .map(|(key, value)| {
            vars::validate_key(key)?;
            Ok(format!("export {key}={}", quote_for_shell(value)))
        })
        .collect()
}

/// Render one `unset KEY` line per key, sorted.
///
/// Keys are trimmed and uppercased before validation.  Duplicates are kept.
///
/// # Errors
///
/// Returns [`KeyError::NoKeysProvided`] for empty input, or the first
/// [`KeyError::InvalidKey`] encountered.
pub fn unset_lines<S: AsRef<str>>(keys: &[S]) -> Result<Vec<String>, KeyError> {
    if keys.is_empty() {
        return Err(KeyError::NoKeysProvided);
    }
    let mut normalized = keys
        .iter()
        .map(|k| {
            let key = vars::normalize_key(k.as_ref());
            vars::validate_key(&key).map(|()| key)
        })
        .collect::<Result<Vec<_>, _>>()?;
    normalized.sort();
    Ok(normalized
        .into_iter()
        .map(|key| format!("unset {key}"))
        .collect())
}

/// Parse `KEY=VALUE` tokens and render them as export lines.
///
/// # Errors
///
/// Propagates any parse or key validation error.
pub fn render_assignments<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, KeyError> {
    export_lines(&vars::parse_assignments(tokens)?)
}
