use std::io::BufRead;

use anyhow::Context;
use caws_client::ControlPlane;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    user: String,
    session_id: String,
}

pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let secret = match &args.token {
        Some(token) => token.clone(),
        None => read_secret_from_stdin()?,
    };
    if secret.is_empty() {
        anyhow::bail!("login: empty session secret");
    }

    let session = ctx.accounts.login(&secret).await.context("login failed")?;
    let verified = ctx
        .client
        .set_credentials(&session)
        .await
        .context("control plane rejected the new session")?;

    output(
        &LoginResponse {
            authenticated: true,
            user: verified.user,
            session_id: verified.session_id,
        },
        flags.format,
    )
}

fn read_secret_from_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read session secret from stdin")?;
    Ok(line.trim().to_string())
}
