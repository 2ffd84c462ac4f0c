// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![allow(unsafe_code)]

use std::iter;

use secrecy::{ExposeSecret as _, SecretVec};
use windows::{
    core::{Error as WindowsError, PCWSTR},
    Win32::{
        Foundation::{CloseHandle, HANDLE},
        Security::{LogonUserW, LOGON32_LOGON, LOGON32_PROVIDER},
    },
};

use crate::token::{HandleCloser, RawHandle};

use super::{Backend, LogonRequest};

const FACILITY_WIN32_MASK: u32 = 0xFFFF_0000;
const FACILITY_WIN32_PREFIX: u32 = 0x8007_0000;

/// `LogonUserW` from advapi32.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemBackend;

/// `CloseHandle` from kernel32.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemCloser;

fn wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(iter::once(0)).collect()
}

/// Recovers the Win32 error code that the `windows` crate folded into an
/// HRESULT when it read the thread's last error.
fn win32_code(err: &WindowsError) -> u32 {
    // LINT: HRESULTs are bit patterns; the sign carries no meaning here.
    #[allow(clippy::cast_sign_loss)]
    let hr = err.code().0 as u32;
    if hr & FACILITY_WIN32_MASK == FACILITY_WIN32_PREFIX {
        hr & !FACILITY_WIN32_MASK
    } else {
        hr
    }
}

impl Backend for SystemBackend {
    type Closer = SystemCloser;

    fn logon_user(&self, request: &LogonRequest<'_>) -> Result<RawHandle, u32> {
        let username = wide(request.username);
        // An absent domain means the username is in UPN form.
        let domain = (!request.domain.is_empty()).then(|| wide(request.domain));
        let secret = SecretVec::new(wide(request.secret.expose_secret()));

        let mut token = HANDLE::default();
        // SAFETY: every string is NUL-terminated and outlives the call, and
        // `token` is a valid place for the OS to write the new handle.
        let result = unsafe {
            LogonUserW(
                PCWSTR(username.as_ptr()),
                domain
                    .as_ref()
                    .map_or_else(PCWSTR::null, |d| PCWSTR(d.as_ptr())),
                PCWSTR(secret.expose_secret().as_ptr()),
                LOGON32_LOGON(request.logon_type),
                LOGON32_PROVIDER(request.logon_provider),
                &mut token,
            )
        };

        // The last-error code was captured inside `result` before anything
        // else could run on this thread.
        match result {
            Ok(()) => Ok(token.0),
            Err(err) => Err(win32_code(&err)),
        }
    }

    fn closer(&self) -> SystemCloser {
        SystemCloser
    }
}

impl HandleCloser for SystemCloser {
    fn close_handle(&self, raw: RawHandle) -> bool {
        // SAFETY: callers only pass handles they own and never pass the same
        // handle twice.
        unsafe { CloseHandle(HANDLE(raw)) }.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use windows::core::HRESULT;

    use super::*;

    #[test]
    fn wide_strings_are_nul_terminated() {
        assert_eq!(wide("ab"), vec![0x61, 0x62, 0]);
        assert_eq!(wide(""), vec![0]);
    }

    #[test]
    fn win32_code_unwraps_facility() {
        let err = WindowsError::from(HRESULT::from_win32(1326));
        assert_eq!(win32_code(&err), 1326);
    }
}
