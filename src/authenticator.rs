// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::debug;
use tokio::task;

use crate::{
    backend::{Backend, LogonRequest},
    classify::Classifier,
    credentials::Credentials,
    error::{AuthError, AuthErrorKind, Result},
    logon::{LogonMode, LogonProvider},
    token::{is_valid_raw, TokenHandle},
};

/// ERROR_INVALID_HANDLE, reported when the OS claims success but hands back
/// a sentinel.
const INVALID_HANDLE_CODE: u32 = 6;

/// Exchanges credentials for an owned OS token.
///
/// Holds no state between calls: every [`authenticate`](Self::authenticate)
/// is a fresh logon attempt, so OS-side lockout counters see each one.
pub struct Authenticator<B: Backend> {
    backend: B,
    classifier: Classifier,
}

impl<B: Backend> Authenticator<B> {
    /// Uses the built-in Win32 classification table.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            classifier: Classifier::windows_defaults(),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Performs exactly one logon. Blocks for as long as the OS takes.
    ///
    /// # Errors
    ///
    /// Fails with the classified OS status code when the logon is refused.
    /// No token is produced in that case.
    pub fn authenticate(
        &self,
        credentials: &Credentials,
        mode: LogonMode,
        provider: LogonProvider,
    ) -> Result<TokenHandle<B::Closer>, AuthError> {
        debug!(
            "Logging on {} (mode {}, {})",
            credentials, mode, provider
        );

        let outcome = self.backend.logon_user(&LogonRequest {
            username: credentials.username(),
            domain: credentials.domain(),
            secret: credentials.secret(),
            logon_type: mode.as_raw(),
            logon_provider: provider.as_raw(),
        });

        match outcome {
            Ok(raw) if is_valid_raw(raw) => {
                debug!("Logon of {} succeeded", credentials);
                Ok(TokenHandle::from_raw(raw, self.backend.closer()))
            }
            Ok(_) => Err(AuthError::new(
                AuthErrorKind::Unclassified,
                INVALID_HANDLE_CODE,
                format!("logon of {credentials} returned no usable token"),
            )),
            Err(os_code) => {
                let kind = self.classifier.classify(os_code);
                debug!(
                    "Logon of {} failed with OS error {}: {}",
                    credentials, os_code, kind
                );
                Err(AuthError::new(
                    kind,
                    os_code,
                    format!("logon of {credentials} failed"),
                ))
            }
        }
    }
}

impl<B> Authenticator<B>
where
    B: Backend + 'static,
    B::Closer: 'static,
{
    /// Runs [`authenticate`](Self::authenticate) on the blocking thread pool.
    ///
    /// The credentials move into the task and are dropped there. If this
    /// future is dropped first, the logon still runs to completion and any
    /// token it produces is released when the task discards it.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Auth`](crate::Error::Auth) when the logon is
    /// refused, or with an IO error if the blocking task panics.
    pub async fn spawn_authenticate(
        self: &Arc<Self>,
        credentials: Credentials,
        mode: LogonMode,
        provider: LogonProvider,
    ) -> Result<TokenHandle<B::Closer>> {
        let authenticator = Arc::clone(self);
        let token = task::spawn_blocking(move || {
            authenticator.authenticate(&credentials, mode, provider)
        })
        .await??;
        Ok(token)
    }
}

#[cfg(windows)]
impl Authenticator<crate::backend::SystemBackend> {
    /// An authenticator backed by the OS's own logon primitive.
    #[must_use]
    pub fn system() -> Self {
        Self::new(crate::backend::SystemBackend)
    }
}
