//! API-key resolution.
//!
//! A non-blank user-supplied key always wins; otherwise the key read from
//! the environment at startup is used; otherwise no credential exists.

use std::fmt;

/// Environment fallback for the model-service key.
#[derive(Clone, Default)]
pub struct Credentials {
    env_key: Option<String>,
}

impl Credentials {
    /// Use `env_key` as the fallback.  Blank values count as absent.
    pub fn new(env_key: Option<String>) -> Self {
        Self {
            env_key: env_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        }
    }

    /// Read the fallback from the environment variable `var`.
    pub fn from_env(var: &str) -> Self {
        let credentials = Self::new(std::env::var(var).ok());
        if credentials.has_env_key() {
            log::info!("using {var} from the environment as the fallback API key");
        }
        credentials
    }

    /// No fallback key.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_env_key(&self) -> bool {
        self.env_key.is_some()
    }

    /// The key to send, if any.
    pub fn resolve<'a>(&'a self, user_key: Option<&'a str>) -> Option<&'a str> {
        user_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.env_key.as_deref())
    }

    /// `true` when [`resolve`](Self::resolve) would yield a key.
    pub fn is_available(&self, user_key: Option<&str>) -> bool {
        self.resolve(user_key).is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("env_key", &self.env_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_key_takes_precedence() {
        let creds = Credentials::new(Some("env-key".into()));
        assert_eq!(creds.resolve(Some("user-key")), Some("user-key"));
    }

    #[test]
    fn blank_user_key_falls_back_to_env() {
        let creds = Credentials::new(Some("env-key".into()));
        assert_eq!(creds.resolve(Some("   ")), Some("env-key"));
        assert_eq!(creds.resolve(None), Some("env-key"));
    }

    #[test]
    fn user_key_is_trimmed() {
        let creds = Credentials::none();
        assert_eq!(creds.resolve(Some("  AIza-1  ")), Some("AIza-1"));
    }

    #[test]
    fn nothing_resolves_without_any_key() {
        let creds = Credentials::none();
        assert!(creds.resolve(None).is_none());
        assert!(!creds.is_available(Some("")));
    }

    #[test]
    fn blank_env_key_counts_as_absent() {
        let creds = Credentials::new(Some("  ".into()));
        assert!(!creds.has_env_key());
        assert!(!creds.is_available(None));
    }

    #[test]
    fn debug_output_hides_key() {
        let creds = Credentials::new(Some("secret-value".into()));
        let shown = format!("{creds:?}");
        assert!(!shown.contains("secret-value"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn unset_env_var_gives_no_fallback() {
        let creds = Credentials::from_env("BILINGUAL_PROOFREADER_TEST_UNSET_VAR");
        assert!(!creds.has_env_key());
    }
}
