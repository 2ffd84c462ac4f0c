// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory stand-ins for the OS logon and close primitives.

use std::{
    collections::VecDeque,
    sync::{mpsc, Arc, Mutex, PoisonError},
};

use secrecy::ExposeSecret as _;

use crate::{
    backend::{Backend, LogonRequest},
    token::{HandleCloser, RawHandle},
};

#[derive(Clone)]
pub(crate) struct StubCloser {
    closed: Arc<Mutex<Vec<RawHandle>>>,
    succeed: bool,
}

impl StubCloser {
    pub(crate) fn new(succeed: bool) -> Self {
        Self {
            closed: Arc::default(),
            succeed,
        }
    }

    pub(crate) fn closed(&self) -> Vec<RawHandle> {
        self.closed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HandleCloser for StubCloser {
    fn close_handle(&self, raw: RawHandle) -> bool {
        self.closed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw);
        self.succeed
    }
}

/// What the stub saw for one logon call. The secret is recorded so tests can
/// check it reached the boundary untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecordedLogon {
    pub(crate) username: String,
    pub(crate) domain: String,
    pub(crate) secret: String,
    pub(crate) logon_type: u32,
    pub(crate) logon_provider: u32,
}

/// Answers logons from a script of outcomes; once the script runs out every
/// logon succeeds with a fresh handle.
#[derive(Clone)]
pub(crate) struct StubBackend {
    script: Arc<Mutex<VecDeque<Result<RawHandle, u32>>>>,
    calls: Arc<Mutex<Vec<RecordedLogon>>>,
    next_handle: Arc<Mutex<RawHandle>>,
    closer: StubCloser,
    gate: Option<Arc<Mutex<mpsc::Receiver<()>>>>,
}

impl StubBackend {
    pub(crate) fn new() -> Self {
        Self {
            script: Arc::default(),
            calls: Arc::default(),
            next_handle: Arc::new(Mutex::new(0x100)),
            closer: StubCloser::new(true),
            gate: None,
        }
    }

    /// Holds every logon until a value is sent on the returned channel.
    pub(crate) fn gated(mut self) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        self.gate = Some(Arc::new(Mutex::new(rx)));
        (self, tx)
    }

    pub(crate) fn then(self, outcome: Result<RawHandle, u32>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedLogon> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn closed(&self) -> Vec<RawHandle> {
        self.closer.closed()
    }
}

impl Backend for StubBackend {
    type Closer = StubCloser;

    fn logon_user(&self, request: &LogonRequest<'_>) -> Result<RawHandle, u32> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedLogon {
                username: request.username.to_owned(),
                domain: request.domain.to_owned(),
                secret: request.secret.expose_secret().clone(),
                logon_type: request.logon_type,
                logon_provider: request.logon_provider,
            });

        if let Some(gate) = &self.gate {
            _ = gate.lock().unwrap_or_else(PoisonError::into_inner).recv();
        }

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        scripted.unwrap_or_else(|| {
            let mut next = self
                .next_handle
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *next += 4;
            Ok(*next)
        })
    }

    fn closer(&self) -> StubCloser {
        self.closer.clone()
    }
}
