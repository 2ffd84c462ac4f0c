// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, mem};

use log::{trace, warn};

/// A pointer-sized OS handle value as it crosses the boundary.
pub type RawHandle = isize;

const NULL_HANDLE: RawHandle = 0;
const INVALID_HANDLE_VALUE: RawHandle = -1;

/// Zero and minus-one are the OS's "no handle" sentinels.
#[must_use]
pub const fn is_valid_raw(raw: RawHandle) -> bool {
    raw != NULL_HANDLE && raw != INVALID_HANDLE_VALUE
}

/// The OS primitive that closes a handle.
pub trait HandleCloser: Send {
    /// Returns whether the OS reported success.
    fn close_handle(&self, raw: RawHandle) -> bool;
}

/// Exclusive ownership of at most one OS token.
///
/// The handle is closed exactly once: by [`TokenHandle::release`], or when
/// the wrapper is dropped if it was never released. Ownership can only be
/// moved, never copied, so there is at most one party that can close it.
pub struct TokenHandle<C: HandleCloser> {
    raw: RawHandle,
    closer: C,
}

impl<C: HandleCloser> TokenHandle<C> {
    /// Takes ownership of `raw`. A sentinel value produces an already
    /// invalid wrapper whose release never reaches the OS.
    pub(crate) fn from_raw(raw: RawHandle, closer: C) -> Self {
        Self { raw, closer }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_raw(self.raw)
    }

    /// The wrapped value, for handing to an impersonation mechanism. The
    /// wrapper keeps ownership; the value must not be closed by the borrower
    /// or used after the wrapper is released.
    #[must_use]
    pub fn as_raw(&self) -> Option<RawHandle> {
        self.is_valid().then_some(self.raw)
    }

    /// Closes the token if it is still held.
    ///
    /// Returns whether the OS reported success. Releasing an already invalid
    /// handle returns `true` without touching the OS. The wrapper becomes
    /// invalid even when the close fails, so the OS is never asked twice.
    pub fn release(&mut self) -> bool {
        if !self.is_valid() {
            return true;
        }

        let raw = mem::replace(&mut self.raw, NULL_HANDLE);
        trace!("Closing token handle {:#x}", raw);
        self.closer.close_handle(raw)
    }
}

impl<C: HandleCloser> Drop for TokenHandle<C> {
    fn drop(&mut self) {
        let raw = self.raw;
        if !self.release() {
            warn!("The OS failed to close token handle {:#x}", raw);
        }
    }
}

impl<C: HandleCloser> fmt::Debug for TokenHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenHandle")
            .field("raw", &format_args!("{:#x}", self.raw))
            .field("valid", &self.is_valid())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::testing::StubCloser;

    use super::*;

    #[test]
    fn sentinels_are_invalid() {
        assert!(!is_valid_raw(0));
        assert!(!is_valid_raw(-1));
        assert!(is_valid_raw(0x4c));
        assert!(is_valid_raw(-2));
    }

    #[test]
    fn release_twice_closes_once() {
        let closer = StubCloser::new(true);
        let mut token = TokenHandle::from_raw(0x4c, closer.clone());

        assert!(token.is_valid());
        assert!(token.release());
        assert!(!token.is_valid());
        assert!(token.release());
        drop(token);

        assert_eq!(closer.closed(), vec![0x4c]);
    }

    #[test]
    fn drop_closes_once() {
        let closer = StubCloser::new(true);
        {
            let token = TokenHandle::from_raw(0x4c, closer.clone());
            assert_eq!(token.as_raw(), Some(0x4c));
        }
        assert_eq!(closer.closed(), vec![0x4c]);
    }

    #[test]
    fn sentinel_handles_never_reach_the_os() {
        let closer = StubCloser::new(true);
        for raw in [0, -1] {
            let mut token = TokenHandle::from_raw(raw, closer.clone());
            assert!(!token.is_valid());
            assert_eq!(token.as_raw(), None);
            assert!(token.release());
        }
        assert!(closer.closed().is_empty());
    }

    #[test]
    fn failed_close_still_invalidates() {
        let closer = StubCloser::new(false);
        let mut token = TokenHandle::from_raw(0x4c, closer.clone());

        assert!(!token.release());
        assert!(!token.is_valid());
        assert!(token.release());
        drop(token);

        assert_eq!(closer.closed(), vec![0x4c]);
    }

    #[test]
    fn drop_swallows_failed_close() {
        let closer = StubCloser::new(false);
        drop(TokenHandle::from_raw(0x4c, closer.clone()));

        assert_eq!(closer.closed(), vec![0x4c]);
    }

    #[test]
    fn ownership_moves_across_threads() {
        let closer = StubCloser::new(true);
        let token = TokenHandle::from_raw(0x4c, closer.clone());

        let released = thread::spawn(move || {
            let mut token = token;
            token.release()
        })
        .join();

        assert!(matches!(released, Ok(true)));
        assert_eq!(closer.closed(), vec![0x4c]);
    }

    #[test]
    fn debug_shows_validity() {
        let token = TokenHandle::from_raw(0x4c, StubCloser::new(true));
        assert_eq!(
            format!("{token:?}"),
            "TokenHandle { raw: 0x4c, valid: true, .. }"
        );
    }
}
