//! Dashboard cards, global totals and the welcome splash.

use colored::Colorize;
use fintrack_core::comparison::{GlobalTotals, VarianceStatus};
use fintrack_core::dashboard::{Dashboard, TransactionKind};
use tabled::Table;
use tabled::builder::Builder;
use tabled::settings::Style;

use super::{MISSING, Renderer, paint};

const BANNER: &str = r"
  _____ _       _____               _
 |  ___(_)_ __ |_   _| __ __ _  ___| | __
 | |_  | | '_ \  | || '__/ _` |/ __| |/ /
 |  _| | | | | | | || | | (_| | (__|   <
 |_|   |_|_| |_| |_||_|  \__,_|\___|_|\_\
";

fn card_grid(cards: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(cards.iter().map(|(label, _)| *label));
    builder.push_record(cards.iter().map(|(_, value)| value.clone()));
    let mut table = Table::from(builder);
    table.with(Style::rounded());
    table.to_string()
}

/// Card row plus the recent-transactions list.
pub fn dashboard(out: &Renderer, dashboard: &Dashboard) -> String {
    let totals = &dashboard.totals;
    let grid = card_grid(&[
        ("Money total", out.optional_money(totals.money_total)),
        ("Income this month", out.optional_money(totals.money_month)),
        ("Expenses this month", out.optional_money(totals.expense_month)),
        ("Budgeted", out.optional_money(totals.budget_total)),
        ("Budget left", out.optional_money(totals.budget_remaining())),
    ]);

    if dashboard.recent.is_empty() {
        return format!("{grid}\n\nNo recent transactions.");
    }

    let mut builder = Builder::default();
    builder.push_record(["Date", "Kind", "Title", "Detail", "Amount"]);
    for tx in &dashboard.recent {
        builder.push_record([
            tx.date.map_or_else(|| MISSING.to_string(), |d| out.date(d)),
            match tx.kind {
                TransactionKind::Expense => "expense",
                TransactionKind::Deposit => "deposit",
            }
            .to_string(),
            tx.title.clone(),
            tx.subtitle.clone().unwrap_or_default(),
            out.signed_money(tx.signed_amount()),
        ]);
    }
    let mut recent = Table::from(builder);
    recent.with(Style::rounded());

    format!("{grid}\n\nRecent transactions\n{recent}")
}

/// Global budget against global deposits. The budget is covered once
/// deposits reach it.
pub fn totals(out: &Renderer, totals: &GlobalTotals) -> String {
    let surplus = totals.surplus();
    let covered = !surplus.is_sign_negative() || surplus.is_zero();
    let status = if covered {
        VarianceStatus::UnderBudget
    } else {
        VarianceStatus::AtOrOverBudget
    };
    let grid = card_grid(&[
        ("Total budget", out.money(totals.global_budget)),
        ("Total deposits", out.money(totals.global_deposit)),
        ("Surplus", out.signed_money(surplus)),
    ]);
    let verdict = if covered {
        "Deposits cover the budget"
    } else {
        "Deposits do not cover the budget"
    };
    format!("{grid}\n{}", paint(verdict, status))
}

/// Banner plus a hint about what to do next.
pub fn welcome(username: Option<&str>) -> String {
    let next = match username {
        Some(user) => format!(
            "Logged in as {}. Try `fintrack dashboard`.",
            user.bold()
        ),
        None => "Run `fintrack login -u <user>` to get started.".to_string(),
    };
    format!(
        "{}\n  Personal finance tracker v{}\n\n  {next}",
        BANNER.cyan(),
        env!("CARGO_PKG_VERSION")
    )
}
