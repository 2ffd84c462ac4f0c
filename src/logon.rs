// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// How the OS should treat a credential exchange.
///
/// The discriminants are the OS's own `LOGON32_LOGON_*` constants and are
/// passed across the boundary verbatim.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum LogonMode {
    Interactive = 2,
    Network = 3,
    Batch = 4,
    Service = 5,
    Unlock = 7,
    Cleartext = 8,
    NewCredentials = 9,
}

impl LogonMode {
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for LogonMode {
    type Error = error::Error;

    fn try_from(value: u32) -> Result<Self> {
        Ok(match value {
            2 => Self::Interactive,
            3 => Self::Network,
            4 => Self::Batch,
            5 => Self::Service,
            7 => Self::Unlock,
            8 => Self::Cleartext,
            9 => Self::NewCredentials,
            _ => return Err(error::Conversion::LogonMode(value).into()),
        })
    }
}

impl fmt::Display for LogonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().ok_or(fmt::Error)?;
        f.write_str(value.get_name())
    }
}

/// The logon provider passed to the OS alongside a [`LogonMode`].
///
/// There is intentionally no default: the right provider depends on the OS
/// version, so callers always pick one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogonProvider(u32);

impl LogonProvider {
    /// Let the OS choose (`LOGON32_PROVIDER_DEFAULT`).
    pub const DEFAULT: Self = Self(0);
    pub const WINNT35: Self = Self(1);
    pub const WINNT40: Self = Self(2);
    pub const WINNT50: Self = Self(3);
    pub const VIRTUAL: Self = Self(4);

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LogonProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DEFAULT => f.write_str("default"),
            Self::WINNT35 => f.write_str("winnt35"),
            Self::WINNT40 => f.write_str("winnt40"),
            Self::WINNT50 => f.write_str("winnt50"),
            Self::VIRTUAL => f.write_str("virtual"),
            Self(raw) => write!(f, "provider {raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_tokens, Token};

    use super::*;

    #[test]
    fn raw_values_match_os_constants() {
        let expected = [
            (LogonMode::Interactive, 2),
            (LogonMode::Network, 3),
            (LogonMode::Batch, 4),
            (LogonMode::Service, 5),
            (LogonMode::Unlock, 7),
            (LogonMode::Cleartext, 8),
            (LogonMode::NewCredentials, 9),
        ];
        for (mode, raw) in expected {
            assert_eq!(mode.as_raw(), raw);
            assert_eq!(LogonMode::try_from(raw).ok(), Some(mode));
        }
    }

    #[test]
    fn unknown_raw_values_are_rejected() {
        for raw in [0, 1, 6, 10, u32::MAX] {
            assert!(matches!(
                LogonMode::try_from(raw),
                Err(error::Error::Conversion(error::Conversion::LogonMode(v))) if v == raw
            ));
        }
    }

    #[test]
    fn mode_serializes_by_name() {
        assert_tokens(
            &LogonMode::NewCredentials,
            &[Token::UnitVariant {
                name: "LogonMode",
                variant: "new_credentials",
            }],
        );
    }

    #[test]
    fn mode_displays_command_line_name() {
        assert_eq!(LogonMode::NewCredentials.to_string(), "new-credentials");
        assert_eq!(LogonMode::Interactive.to_string(), "interactive");
    }

    #[test]
    fn provider_keeps_arbitrary_values() {
        assert_eq!(LogonProvider::DEFAULT.as_raw(), 0);
        assert_eq!(LogonProvider::WINNT50.as_raw(), 3);
        assert_eq!(LogonProvider::from_raw(42).as_raw(), 42);
        assert_eq!(LogonProvider::from_raw(4), LogonProvider::VIRTUAL);
        assert_eq!(LogonProvider::from_raw(42).to_string(), "provider 42");
    }
}
