// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The boundary to the operating system's logon and handle primitives.

#[cfg(windows)]
mod win32;

use secrecy::SecretString;

use crate::token::{HandleCloser, RawHandle};

#[cfg(windows)]
pub use self::win32::{SystemBackend, SystemCloser};

/// One logon attempt as it is handed to the OS. Mode and provider are
/// already reduced to the integers the OS expects.
pub struct LogonRequest<'a> {
    pub username: &'a str,
    pub domain: &'a str,
    pub secret: &'a SecretString,
    pub logon_type: u32,
    pub logon_provider: u32,
}

/// An OS logon primitive.
///
/// Implementations make exactly one logon attempt per call and report the
/// OS status code on failure. The code must be captured before any other OS
/// call on the same thread can overwrite it.
pub trait Backend: Send + Sync {
    type Closer: HandleCloser;

    /// # Errors
    ///
    /// Returns the OS status code when the logon is refused.
    fn logon_user(&self, request: &LogonRequest<'_>) -> Result<RawHandle, u32>;

    fn closer(&self) -> Self::Closer;
}

impl<T: Backend + ?Sized> Backend for Box<T> {
    type Closer = T::Closer;

    fn logon_user(&self, request: &LogonRequest<'_>) -> Result<RawHandle, u32> {
        (**self).logon_user(request)
    }

    fn closer(&self) -> Self::Closer {
        (**self).closer()
    }
}
