//! Environment-variable key validation and `KEY=VALUE` parsing.
use std::collections::BTreeMap;

use crate::error::KeyError;

/// A profile's variable assignments, ordered by key.
pub type Vars = BTreeMap<String, String>;

/// Check that `key` matches `[A-Z_][A-Z0-9_]*`.
///
/// # Errors
///
/// Returns [`KeyError::InvalidKey`] naming the rule that `key` breaks.
///
/// # Examples
///
/// ```
/// use gpx_cli::vars::validate_key;
///
/// assert!(validate_key("GOPROXY").is_ok());
/// assert!(validate_key("_PRIVATE_2").is_ok());
/// assert!(validate_key("1BAD").is_err());
/// assert!(validate_key("lower").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    let invalid = |reason| KeyError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("empty key"));
    };
    if !(first == '_' || first.is_ascii_uppercase()) {
        return Err(invalid("must start with A-Z or _"));
    }
    if !chars.all(|c| c == '_' || c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(invalid("only A-Z, 0-9, _ allowed"));
    }
    Ok(())
}

/// Trim surrounding whitespace and uppercase `raw`. Does not validate.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Parse `KEY=VALUE` tokens into a key-sorted map.
///
/// Each token is split on its first `=`. The key is uppercased (but not
/// trimmed) and validated; the value is kept verbatim, including any further
/// `=` characters. A later token overwrites an earlier one with the same key.
///
/// # Errors
///
/// Returns [`KeyError::InvalidAssignment`] for a token without `=` or with
/// an empty key, and [`KeyError::InvalidKey`] for a key containing
/// whitespace or otherwise failing [`validate_key`].
pub fn parse_assignments<S: AsRef<str>>(tokens: &[S]) -> Result<Vars, KeyError> {
    let mut vars = Vars::new();
    for token in tokens {
        let token = token.as_ref();
        let (key, value) = match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => (key, value),
            _ => return Err(KeyError::InvalidAssignment(token.to_string())),
        };
        let key = key.to_uppercase();
        if key.chars().any(char::is_whitespace) {
            return Err(KeyError::InvalidKey {
                key,
                reason: "contains whitespace",
            });
        }
        validate_key(&key)?;
        vars.insert(key, value.to_string());
    }
    Ok(vars)
}
