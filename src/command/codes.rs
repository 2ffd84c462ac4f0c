// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use logon_token::{classify, AuthErrorKind};
use tabled::{settings::Style, Table, Tabled};

use super::{error::Result, Context};

/// Show how OS status codes are classified.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Print the table as a classification file instead, suitable for editing
    /// and passing back with --classification.
    #[arg(long)]
    json: bool,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Hex")]
    hex: String,
    #[tabled(rename = "Meaning")]
    kind: AuthErrorKind,
    #[tabled(rename = "Caller Action")]
    action: &'static str,
}

const fn action(kind: AuthErrorKind) -> &'static str {
    if kind.should_prompt() {
        "re-enter credentials"
    } else if kind.is_transient() {
        "retry later"
    } else {
        "give up"
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: Context) -> Result<()> {
        if self.json {
            let config = classify::Config {
                inherit_defaults: false,
                codes: ctx.classifier.iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        let rows = ctx.classifier.iter().map(|(code, kind)| Row {
            code,
            hex: format!("{code:#06x}"),
            kind,
            action: action(kind),
        });
        println!("{}", Table::new(rows).with(Style::rounded()));
        Ok(())
    }
}
