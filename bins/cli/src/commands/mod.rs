//! Command handlers.

mod auth;
mod maintenance;
mod reports;
mod transactions;

use fintrack_client::{ApiClient, AppState};

use crate::cli::Command;
use crate::render::Renderer;

/// Everything a command needs.
pub struct Context {
    pub state: AppState,
    pub out: Renderer,
}

impl Context {
    pub const fn client(&self) -> &ApiClient {
        self.state.client()
    }
}

/// Runs `command`, refusing data commands without a session.
pub async fn dispatch(command: Command, ctx: &mut Context) -> anyhow::Result<()> {
    if command.requires_session() {
        let session = ctx.state.require_session()?;
        tracing::debug!(user = %session.user.username, "using stored session");
    }

    match command {
        Command::Welcome => auth::welcome(ctx),
        Command::Login(args) => auth::login(ctx, args).await,
        Command::Logout => auth::logout(ctx),
        Command::Whoami { check } => auth::whoami(ctx, check).await,
        Command::Dashboard => reports::dashboard(ctx).await,
        Command::Compare(args) => reports::compare(ctx, args).await,
        Command::Totals => reports::totals(ctx).await,
        Command::Movements(args) => reports::movements(ctx, args).await,
        Command::ExpenseTypes(cmd) => maintenance::expense_types(ctx, cmd).await,
        Command::Funds(cmd) => maintenance::funds(ctx, cmd).await,
        Command::Budgets(cmd) => transactions::budgets(ctx, cmd).await,
        Command::Deposits(cmd) => transactions::deposits(ctx, cmd).await,
        Command::Expenses(cmd) => transactions::expenses(ctx, cmd).await,
    }
}

/// Prints a refreshed list after a write, or says the list is stale.
fn print_refreshed<T, F>(ctx: &Context, items: Option<Vec<T>>, render: F) -> anyhow::Result<()>
where
    T: serde::Serialize,
    F: FnOnce(&Renderer, &Vec<T>) -> String,
{
    match items {
        Some(items) => ctx.out.print(&items, render),
        None => {
            ctx.out
                .warn("saved, but the list could not be reloaded; run the list command again");
            Ok(())
        }
    }
}
