// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io, path::PathBuf, result};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("credentials rejected before logon: {0}")]
    Credentials(#[from] Credentials),
    #[error("error classification table error: {0}")]
    Classification(#[from] Classification),
    #[error("data conversion error: {0}")]
    Conversion(#[from] Conversion),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

/// The category of an authentication failure, derived from the OS status
/// code by a [`Classifier`](crate::Classifier).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    InvalidCredentials,
    AccountRestricted,
    PrivilegeDenied,
    TransientSystemFailure,
    Unclassified,
}

impl AuthErrorKind {
    /// Whether asking the user to enter their credentials again can succeed.
    #[must_use]
    pub const fn should_prompt(self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Whether backing off and trying again later can succeed without any
    /// change on the caller's side.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::TransientSystemFailure)
    }

    const fn description(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "credentials rejected by the credential store",
            Self::AccountRestricted => "account is locked, disabled, expired or restricted",
            Self::PrivilegeDenied => "caller lacks the privilege for this logon mode",
            Self::TransientSystemFailure => "logon service is temporarily unavailable",
            Self::Unclassified => "logon failed",
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A failed logon. Carries the raw OS status code whatever the kind, so
/// unclassified failures can still be diagnosed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}: {kind} (OS error {os_code})")]
pub struct AuthError {
    kind: AuthErrorKind,
    os_code: u32,
    message: String,
}

impl AuthError {
    pub(crate) fn new(kind: AuthErrorKind, os_code: u32, message: String) -> Self {
        Self {
            kind,
            os_code,
            message,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    #[must_use]
    pub const fn os_code(&self) -> u32 {
        self.os_code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Credentials {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("{0} must not contain a NUL character")]
    InteriorNul(&'static str),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Classification {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Conversion {
    #[error("{0} is not a known logon type")]
    LogonMode(u32),
}
