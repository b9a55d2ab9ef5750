//! Environment variable expansion for declaration strings.
//!
//! Supports `${VAR}` (error if unset) and `${VAR:-default}` (default if
//! unset). Bare `$VAR` and other dollar signs are left as written.

use std::borrow::Cow;

use crate::error::LoadError;

/// Expand environment variable references in `value`.
///
/// `field` names the declaration field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, LoadError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let (literal, tail) = rest.split_at(start);
        let (reference, tail) = tail.split_at(len + 1);
        expanded.push_str(literal);
        expanded.push_str(&expand_reference(reference, field, &lookup)?);
        rest = tail;
    }
    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${...}` reference.
///
/// Each reference is expanded on its own, so shellexpand never sees text
/// outside the braces.
fn expand_reference<F>(reference: &str, field: &str, lookup: &F) -> Result<String, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    shellexpand::env_with_context(reference, |var| lookup(var).map(Some).ok_or("not set"))
        .map(Cow::into_owned)
        .map_err(|e| LoadError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {}", e.var_name, e.cause),
        })
}
