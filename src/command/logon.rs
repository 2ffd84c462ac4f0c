// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use logon_token::{
    backend::Backend, Authenticator, Credentials, LogonMode, LogonProvider, LOCAL_DOMAIN,
};

use super::{
    error::{self, Error, Result},
    Context,
};
use crate::password;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Provider {
    Default,
    Winnt35,
    Winnt40,
    Winnt50,
    Virtual,
}

impl From<Provider> for LogonProvider {
    fn from(value: Provider) -> Self {
        match value {
            Provider::Default => Self::DEFAULT,
            Provider::Winnt35 => Self::WINNT35,
            Provider::Winnt40 => Self::WINNT40,
            Provider::Winnt50 => Self::WINNT50,
            Provider::Virtual => Self::VIRTUAL,
        }
    }
}

/// Log on as a user, report whether a token was issued, and close it again.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The domain holding the account. "." is the local machine; an empty
    /// value means the username is in user@domain form.
    #[arg(long, short, default_value = LOCAL_DOMAIN)]
    domain: String,

    /// The kind of logon session to request.
    #[arg(long, short, value_enum)]
    mode: LogonMode,

    /// The logon provider to request. The right choice depends on the OS
    /// version, so there is no default.
    #[arg(long, short, value_enum)]
    provider: Provider,

    /// The account to log on as.
    #[clap()]
    username: String,
}

impl Command {
    // LINT: Only reachable on platforms with a system backend.
    #[cfg_attr(not(windows), allow(dead_code))]
    async fn run<B>(
        self,
        authenticator: Arc<Authenticator<B>>,
        prompt: &dyn password::Prompt,
    ) -> Result<()>
    where
        B: Backend + 'static,
        B::Closer: 'static,
    {
        let account = format!(r"{}\{}", self.domain, self.username);
        let secret = prompt
            .prompt(password::Request::new(&account))
            .await?
            .ok_or(error::Password::NoPrompt)?;
        let credentials = Credentials::new(self.username, self.domain, secret)?;

        match authenticator
            .spawn_authenticate(credentials, self.mode, self.provider.into())
            .await
        {
            Ok(mut token) => {
                info!("The OS issued a token for {}", account);
                println!("Logged on {account} ({})", self.mode);
                if token.release() {
                    Ok(())
                } else {
                    error!("The token for {} could not be closed", account);
                    Err(Error::Command)
                }
            }
            Err(logon_token::Error::Auth(e)) => {
                error!("{}", e);
                if e.kind().should_prompt() {
                    warn!("Check the username, domain and password, then try again");
                } else if e.kind().is_transient() {
                    warn!("The logon service may be unavailable; try again later");
                }
                Err(Error::Command)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl super::Command for Command {
    #[cfg(windows)]
    async fn execute(self, ctx: Context) -> Result<()> {
        let authenticator = Arc::new(Authenticator::system().with_classifier(ctx.classifier));
        self.run(authenticator, ctx.prompt.as_ref()).await
    }

    #[cfg(not(windows))]
    async fn execute(self, ctx: Context) -> Result<()> {
        drop(ctx);
        error!("Cannot log on {}: {}", self.username, Error::Unsupported);
        Err(Error::Unsupported)
    }
}
