//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left alone. A `${VAR}` whose variable is unset is an
/// error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("FD_TEST_FORUM_HOST", "forum.example.com");
        }
        let result = expand_env("https://${FD_TEST_FORUM_HOST}/", "extensions.discourse_url");
        assert_eq!(result.unwrap(), "https://forum.example.com/");
        unsafe {
            std::env::remove_var("FD_TEST_FORUM_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::remove_var("FD_TEST_UNSET_TITLE");
        }
        let result = expand_env("${FD_TEST_UNSET_TITLE:-Manual}", "project.title").unwrap();
        assert_eq!(result, "Manual");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::remove_var("FD_TEST_MISSING");
        }
        let err = expand_env("${FD_TEST_MISSING}", "extensions.discourse_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in extensions.discourse_url: ${FD_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literals_unchanged() {
        assert_eq!(expand_env("plain", "project.title").unwrap(), "plain");
        assert_eq!(expand_env("$HOME/x", "project.title").unwrap(), "$HOME/x");
    }
}
