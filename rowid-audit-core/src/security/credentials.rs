//! Secure credential container with automatic memory zeroing.
//!
//! # Security
//! - Credentials are stored in `Zeroizing<T>` containers
//! - Memory is automatically cleared when credentials go out of scope
//! - Passwords are never exposed in debug output or logs

use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Login credentials for the audit session, zeroed on drop.
///
/// # Example
///
/// ```rust
/// use rowid_audit_core::security::Credentials;
///
/// let creds = Credentials::new("root".to_string(), Some("secret".to_string()));
/// assert_eq!(creds.username(), "root");
/// assert!(creds.has_password());
/// assert!(!format!("{creds:?}").contains("secret"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    ///
    /// An empty password is treated as no password.
    pub fn new(username: String, password: Option<String>) -> Self {
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password.filter(|p| !p.is_empty())),
        }
    }

    /// Gets the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks if password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Password for handing to the driver; never log the returned value.
    #[cfg_attr(not(feature = "mysql"), allow(dead_code))]
    pub(crate) fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}
