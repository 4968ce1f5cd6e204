//! Credential checking and sessions.
//!
//! Mutating operations take a [`Session`], and the only way to get one is
//! [`Session::login`]. How credentials are checked is up to the
//! [`CredentialVerifier`] passed in.

use std::fmt;

use crate::error::{Error, Result};

/// Checks a username/password pair.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier {
    /// Returns `true` if the credentials are accepted.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single fixed account, usually taken from configuration.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    /// Creates a verifier that accepts exactly this account.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Accepts everyone. Used when no account is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl CredentialVerifier for OpenAccess {
    fn verify(&self, _username: &str, _password: &str) -> bool {
        true
    }
}

/// Proof that someone logged in.
///
/// # Examples
///
/// ```
/// use yardplan::auth::{Session, StaticCredentials};
///
/// let verifier = StaticCredentials::new("yard", "secret");
/// let session = Session::login(&verifier, "yard", "secret").unwrap();
/// assert_eq!(session.username(), "yard");
///
/// assert!(Session::login(&verifier, "yard", "guess").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    /// Opens a session if `verifier` accepts the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if the credentials are rejected.
    pub fn login(verifier: &dyn CredentialVerifier, username: &str, password: &str) -> Result<Self> {
        if verifier.verify(username, password) {
            log::debug!("user '{username}' logged in");
            Ok(Self {
                username: username.to_string(),
            })
        } else {
            Err(Error::Unauthorized {
                username: username.to_string(),
            })
        }
    }

    /// Returns the name the session was opened with.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}
