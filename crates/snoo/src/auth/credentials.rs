//! Login credentials type.

use std::fmt;

/// User name and password for [`Session::login`](crate::Session::login).
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use snoo::Credentials;
///
/// let creds = Credentials::new("spez", "hunter2");
/// assert_eq!(creds.user(), "spez");
/// assert!(creds.is_complete());
/// ```
#[derive(Clone)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns `true` when neither field is empty.
    pub fn is_complete(&self) -> bool {
        !self.user.is_empty() && !self.password.is_empty()
    }

    /// Returns the password. Only for building the login form.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hide_password_in_debug() {
        let creds = Credentials::new("spez", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("spez"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn empty_fields_are_incomplete() {
        assert!(!Credentials::new("spez", "").is_complete());
        assert!(!Credentials::new("", "pw").is_complete());
    }
}
