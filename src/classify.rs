// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping from OS status codes to [`AuthErrorKind`]s.
//!
//! Which codes mean what is platform knowledge, so the table is data: the
//! built-in Win32 table can be extended or replaced by a JSON file.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{self, AuthErrorKind, Result},
    metadata,
};

const WINDOWS_DEFAULTS: &[(u32, AuthErrorKind)] = &[
    // ERROR_INVALID_PASSWORD
    (86, AuthErrorKind::InvalidCredentials),
    // ERROR_NO_SUCH_USER
    (1317, AuthErrorKind::InvalidCredentials),
    // ERROR_WRONG_PASSWORD
    (1323, AuthErrorKind::InvalidCredentials),
    // ERROR_LOGON_FAILURE
    (1326, AuthErrorKind::InvalidCredentials),
    // ERROR_NO_SUCH_DOMAIN
    (1355, AuthErrorKind::InvalidCredentials),
    // ERROR_ACCOUNT_RESTRICTION
    (1327, AuthErrorKind::AccountRestricted),
    // ERROR_INVALID_LOGON_HOURS
    (1328, AuthErrorKind::AccountRestricted),
    // ERROR_INVALID_WORKSTATION
    (1329, AuthErrorKind::AccountRestricted),
    // ERROR_PASSWORD_EXPIRED
    (1330, AuthErrorKind::AccountRestricted),
    // ERROR_ACCOUNT_DISABLED
    (1331, AuthErrorKind::AccountRestricted),
    // ERROR_LOGON_NOT_GRANTED
    (1380, AuthErrorKind::AccountRestricted),
    // ERROR_LOGON_TYPE_NOT_GRANTED
    (1385, AuthErrorKind::AccountRestricted),
    // ERROR_ACCOUNT_EXPIRED
    (1793, AuthErrorKind::AccountRestricted),
    // ERROR_PASSWORD_MUST_CHANGE
    (1907, AuthErrorKind::AccountRestricted),
    // ERROR_ACCOUNT_LOCKED_OUT
    (1909, AuthErrorKind::AccountRestricted),
    // ERROR_ACCESS_DENIED
    (5, AuthErrorKind::PrivilegeDenied),
    // ERROR_PRIVILEGE_NOT_HELD
    (1314, AuthErrorKind::PrivilegeDenied),
    // ERROR_NOT_ENOUGH_MEMORY
    (8, AuthErrorKind::TransientSystemFailure),
    // ERROR_OUTOFMEMORY
    (14, AuthErrorKind::TransientSystemFailure),
    // ERROR_NO_LOGON_SERVERS
    (1311, AuthErrorKind::TransientSystemFailure),
    // ERROR_NO_SYSTEM_RESOURCES
    (1450, AuthErrorKind::TransientSystemFailure),
    // ERROR_TIMEOUT
    (1460, AuthErrorKind::TransientSystemFailure),
    // RPC_S_SERVER_UNAVAILABLE
    (1722, AuthErrorKind::TransientSystemFailure),
    // RPC_S_CALL_FAILED_DNE
    (1727, AuthErrorKind::TransientSystemFailure),
    // ERROR_TRUSTED_RELATIONSHIP_FAILURE
    (1789, AuthErrorKind::TransientSystemFailure),
    // ERROR_NETLOGON_NOT_STARTED
    (1792, AuthErrorKind::TransientSystemFailure),
    // ERROR_DOMAIN_CONTROLLER_NOT_FOUND
    (1908, AuthErrorKind::TransientSystemFailure),
];

const fn inherit_by_default() -> bool {
    true
}

/// The on-disk form of a classification table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Start from the built-in table instead of an empty one.
    #[serde(default = "inherit_by_default")]
    pub inherit_defaults: bool,
    #[serde(default)]
    pub codes: BTreeMap<u32, AuthErrorKind>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    codes: BTreeMap<u32, AuthErrorKind>,
}

impl Classifier {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// The built-in table of Win32 logon status codes.
    #[must_use]
    pub fn windows_defaults() -> Self {
        Self {
            codes: WINDOWS_DEFAULTS.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let mut classifier = if config.inherit_defaults {
            Self::windows_defaults()
        } else {
            Self::empty()
        };
        classifier.codes.extend(config.codes);
        classifier
    }

    /// Reads a classification table from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| error::Classification::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Reads the table from the per-user config directory, falling back to
    /// the built-in table when no file is present there.
    ///
    /// # Errors
    ///
    /// Fails if a file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        let Some(path) = default_path() else {
            return Ok(Self::windows_defaults());
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&path, &contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "No classification table at {}, using built-in codes",
                    path.display()
                );
                Ok(Self::windows_defaults())
            }
            Err(source) => Err(error::Classification::Read { path, source }.into()),
        }
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(contents).map_err(|source| error::Classification::Parse {
                path: path.to_owned(),
                source,
            })?;
        debug!(
            "Loaded {} classification entries from {}",
            config.codes.len(),
            path.display()
        );
        Ok(Self::from_config(config))
    }

    /// Codes missing from the table are [`AuthErrorKind::Unclassified`].
    #[must_use]
    pub fn classify(&self, os_code: u32) -> AuthErrorKind {
        self.codes
            .get(&os_code)
            .copied()
            .unwrap_or(AuthErrorKind::Unclassified)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, AuthErrorKind)> + '_ {
        self.codes.iter().map(|(code, kind)| (*code, *kind))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::windows_defaults()
    }
}

/// Where [`Classifier::load_default`] looks for its file.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    metadata::PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.config_dir().join(metadata::CLASSIFICATION_FILE))
}
