// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use logon_token::Classifier;

use crate::password;

pub(crate) mod codes;
pub(crate) mod error;
pub(crate) mod logon;

pub(crate) struct Context {
    pub(crate) classifier: Classifier,
    pub(crate) prompt: Box<dyn password::Prompt>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: Context) -> error::Result<()>;
}
