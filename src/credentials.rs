// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use secrecy::{ExposeSecret as _, SecretString};

use crate::error::{self, Result};

/// Domain name that denotes the local machine's account database.
pub const LOCAL_DOMAIN: &str = ".";

/// The input to a single logon attempt.
///
/// The secret is zeroized when the credentials are dropped and never appears
/// in `Debug` output.
pub struct Credentials {
    username: String,
    domain: String,
    secret: SecretString,
}

impl Credentials {
    /// Empty domains and secrets are accepted here; whether a logon mode
    /// permits them is up to the credential store.
    ///
    /// # Errors
    ///
    /// Fails if the username is empty or any field contains a NUL character.
    pub fn new<U, D>(username: U, domain: D, secret: SecretString) -> Result<Self>
    where
        U: Into<String>,
        D: Into<String>,
    {
        let username = username.into();
        let domain = domain.into();

        if username.is_empty() {
            return Err(error::Credentials::EmptyUsername.into());
        }
        if username.contains('\0') {
            return Err(error::Credentials::InteriorNul("username").into());
        }
        if domain.contains('\0') {
            return Err(error::Credentials::InteriorNul("domain").into());
        }
        if secret.expose_secret().contains('\0') {
            return Err(error::Credentials::InteriorNul("secret").into());
        }

        Ok(Self {
            username,
            domain,
            secret,
        })
    }

    /// Credentials for an account on the local machine.
    ///
    /// # Errors
    ///
    /// See [`Credentials::new`].
    pub fn local<U: Into<String>>(username: U, secret: SecretString) -> Result<Self> {
        Self::new(username, LOCAL_DOMAIN, secret)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub(crate) const fn secret(&self) -> &SecretString {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("domain", &self.domain)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r"{}\{}", self.domain, self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_owned())
    }

    #[test]
    fn empty_username_is_rejected() {
        assert!(matches!(
            Credentials::new("", "CORP", secret("hunter2")),
            Err(error::Error::Credentials(error::Credentials::EmptyUsername))
        ));
    }

    #[test]
    fn empty_domain_and_secret_are_accepted() -> Result<()> {
        let creds = Credentials::new("guest", "", secret(""))?;
        assert_eq!(creds.username(), "guest");
        assert_eq!(creds.domain(), "");
        assert_eq!(creds.secret().expose_secret(), "");
        Ok(())
    }

    #[test]
    fn nul_is_rejected_without_echoing_the_value() {
        let err = Credentials::new("alice", "CORP", secret("hun\0ter2"));
        match err {
            Err(e @ error::Error::Credentials(error::Credentials::InteriorNul("secret"))) => {
                assert!(!e.to_string().contains("hun"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            Credentials::new("al\0ice", "CORP", secret("x")),
            Err(error::Error::Credentials(error::Credentials::InteriorNul("username")))
        ));
        assert!(matches!(
            Credentials::new("alice", "CO\0RP", secret("x")),
            Err(error::Error::Credentials(error::Credentials::InteriorNul("domain")))
        ));
    }

    #[test]
    fn local_uses_dot_domain() -> Result<()> {
        let creds = Credentials::local("alice", secret("hunter2"))?;
        assert_eq!(creds.domain(), LOCAL_DOMAIN);
        assert_eq!(creds.to_string(), r".\alice");
        Ok(())
    }

    #[test]
    fn debug_redacts_secret() -> Result<()> {
        let creds = Credentials::new("alice", "CORP", secret("hunter2"))?;
        let debug = format!("{creds:?}");
        assert!(debug.contains("alice"));
        assert!(debug.contains("CORP"));
        assert!(!debug.contains("hunter2"));
        Ok(())
    }
}
