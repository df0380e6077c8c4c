use std::io::{BufRead, Write};

use anyhow::Context as _;
use fintrack_client::Session;
use serde::Serialize;

use super::Context;
use crate::cli::LoginArgs;
use crate::render::cards;

#[derive(Serialize)]
struct WhoamiResponse<'a> {
    authenticated: bool,
    user_id: Option<i64>,
    username: Option<&'a str>,
}

impl<'a> WhoamiResponse<'a> {
    fn from_session(session: Option<&'a Session>) -> Self {
        Self {
            authenticated: session.is_some(),
            user_id: session.map(|s| s.user.id.into_inner()),
            username: session.map(|s| s.user.username.as_str()),
        }
    }
}

pub fn welcome(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.state.session();
    ctx.out.print(&WhoamiResponse::from_session(session), |_, _| {
        cards::welcome(session.map(|s| s.user.username.as_str()))
    })
}

pub async fn login(ctx: &mut Context, args: LoginArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => read_password()?,
    };

    let session = ctx.state.login(&args.username, &password).await?;
    let response = WhoamiResponse::from_session(Some(session));
    ctx.out.print(&response, |_, r| {
        format!("Logged in as {}.", r.username.unwrap_or_default())
    })
}

pub fn logout(ctx: &mut Context) -> anyhow::Result<()> {
    let was_logged_in = ctx.state.is_authenticated();
    ctx.state.logout()?;
    ctx.out.print(&WhoamiResponse::from_session(None), |_, _| {
        if was_logged_in {
            "Logged out.".to_string()
        } else {
            "No session to log out of.".to_string()
        }
    })
}

pub async fn whoami(ctx: &mut Context, check: bool) -> anyhow::Result<()> {
    let session = if check {
        Some(ctx.state.revalidate().await?)
    } else {
        ctx.state.session()
    };

    let response = WhoamiResponse::from_session(session);
    ctx.out.print(&response, |_, r| match (r.username, r.user_id) {
        (Some(username), Some(id)) => format!("{username} (user {id})"),
        _ => "Not logged in.".to_string(),
    })
}

/// Reads one line from stdin, prompting on stderr.
fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
