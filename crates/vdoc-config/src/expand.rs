//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` references in `value`.
///
/// A variable that is unset is an error unless the reference carries a
/// `:-default`. Values without `${` are returned as is.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| -> Result<Option<String>, String> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) if value.contains(&format!("${{{var}:-")) => Ok(None),
            Err(_) => Err(var.to_owned()),
        }
    };
    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_without_pattern_is_identity() {
        let result = expand_env("docs.example.com/{locale}/", "site.base_url").unwrap();
        assert_eq!(result, "docs.example.com/{locale}/");
    }

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VDOC_TEST_HOST", "docs.internal");
        }
        let result = expand_env("${VDOC_TEST_HOST}/{locale}/", "site.base_url").unwrap();
        assert_eq!(result, "docs.internal/{locale}/");
        unsafe {
            std::env::remove_var("VDOC_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default_for_unset_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VDOC_TEST_UNSET");
        }
        let result = expand_env("${VDOC_TEST_UNSET:-public}/html", "paths.html").unwrap();
        assert_eq!(result, "public/html");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VDOC_TEST_MISSING");
        }
        let err = expand_env("${VDOC_TEST_MISSING}", "paths.html").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("paths.html"));
        assert!(message.contains("VDOC_TEST_MISSING"));
    }
}
