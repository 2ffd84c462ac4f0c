// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Authenticate a user against the operating system's credential store and
//! hold the resulting token in a move-only wrapper that closes it exactly once.
//!
//! The entry point is [`Authenticator`]. Each call to
//! [`Authenticator::authenticate`] performs one independent logon and hands
//! back a [`TokenHandle`] owned solely by the caller; dropping or explicitly
//! releasing the handle closes the underlying OS token.

#![deny(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod authenticator;
pub mod backend;
pub mod classify;
mod credentials;
pub mod error;
mod logon;
pub mod metadata;
mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use authenticator::Authenticator;
pub use classify::Classifier;
pub use credentials::{Credentials, LOCAL_DOMAIN};
pub use error::{AuthError, AuthErrorKind, Error, Result};
pub use logon::{LogonMode, LogonProvider};
pub use token::{is_valid_raw, HandleCloser, RawHandle, TokenHandle};

#[cfg(windows)]
pub use backend::{SystemBackend, SystemCloser};

/// A token produced by the operating system's own logon primitive.
#[cfg(windows)]
pub type SystemTokenHandle = TokenHandle<SystemCloser>;
