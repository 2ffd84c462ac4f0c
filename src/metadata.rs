// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use directories::ProjectDirs;
use inflector::Inflector;
use once_cell::sync::Lazy;

pub(crate) static CRATE_NAME: Lazy<String> =
    Lazy::new(|| option_env!("CARGO_PKG_NAME").unwrap_or("logon-token").to_owned());
pub static DISPLAY_NAME: Lazy<String> = Lazy::new(|| CRATE_NAME.to_title_case());

pub(crate) static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("com", "NoahFontes", &DISPLAY_NAME));

/// File name of the error classification table in the config directory.
pub const CLASSIFICATION_FILE: &str = "classification.json";
