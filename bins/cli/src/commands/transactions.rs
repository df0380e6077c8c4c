//! Budget, deposit and expense record commands.

use std::collections::HashMap;

use chrono::Datelike;
use fintrack_client::{ApiClient, ListView};
use fintrack_core::budget::{BudgetOverrun, find_overruns};
use fintrack_core::transactions::{
    Budget, BudgetDraft, Deposit, DepositDraft, ExpenseDetailDraft, ExpenseRecord,
    ExpenseRecordDraft,
};
use fintrack_shared::format::month_name;
use fintrack_shared::types::{ExpenseTypeId, FundId};

use super::{Context, print_refreshed};
use crate::cli::{BudgetCommand, DepositCommand, ExpenseArgs, ExpenseCommand};
use crate::render::{Renderer, table};

pub async fn budgets(ctx: &Context, cmd: BudgetCommand) -> anyhow::Result<()> {
    let client = ctx.client();
    let view: ListView<Budget> = ListView::new("budgets");

    match cmd {
        BudgetCommand::List => {
            let budgets = client.list_budgets().await?;
            return ctx.out.print(&budgets, |out, b| table::budgets(out, b));
        }
        BudgetCommand::Add {
            month,
            expense_type,
            amount,
        } => {
            let budget = BudgetDraft {
                month,
                expense_type_id: expense_type,
                amount,
            }
            .validate()?;
            view.mutate_then_refetch(client.create_budget(&budget), client.list_budgets())
                .await?;
            ctx.out.note(format!(
                "Budgeted {} for {}.",
                ctx.out.money(budget.amount),
                budget.month.name(ctx.out.locale())
            ));
        }
        BudgetCommand::Delete { id } => {
            view.mutate_then_refetch(client.delete_budget(id), client.list_budgets())
                .await?;
            ctx.out.note(format!("Deleted budget {id}."));
        }
    }

    print_refreshed(ctx, view.items(), |out, b| table::budgets(out, b))
}

pub async fn deposits(ctx: &Context, cmd: DepositCommand) -> anyhow::Result<()> {
    let client = ctx.client();
    let view: ListView<Deposit> = ListView::new("deposits");

    match cmd {
        DepositCommand::List => {
            let deposits = client.list_deposits().await?;
            return ctx.out.print(&deposits, |out, d| table::deposits(out, d));
        }
        DepositCommand::Add { date, fund, amount } => {
            let deposit = DepositDraft {
                date,
                fund_id: fund,
                amount,
            }
            .validate()?;
            view.mutate_then_refetch(client.create_deposit(&deposit), client.list_deposits())
                .await?;
            ctx.out.note(format!(
                "Deposited {} on {}.",
                ctx.out.money(deposit.amount),
                ctx.out.date(deposit.date)
            ));
        }
        DepositCommand::Delete { id } => {
            view.mutate_then_refetch(client.delete_deposit(id), client.list_deposits())
                .await?;
            ctx.out.note(format!("Deleted deposit {id}."));
        }
    }

    print_refreshed(ctx, view.items(), |out, d| table::deposits(out, d))
}

/// Expense type and fund names used to label expense records.
#[derive(Debug, Default)]
struct Names {
    expense_types: HashMap<ExpenseTypeId, String>,
    funds: HashMap<FundId, String>,
}

impl Names {
    /// Fetches both lookups. A failed lookup only costs the labels.
    async fn load(client: &ApiClient) -> Self {
        let (types, funds) = tokio::join!(client.list_expense_types(), client.list_funds());
        let mut names = Self::default();
        match types {
            Ok(types) => names.expense_types = types.into_iter().map(|t| (t.id, t.name)).collect(),
            Err(error) => tracing::warn!(%error, "expense type names unavailable"),
        }
        match funds {
            Ok(funds) => names.funds = funds.into_iter().map(|f| (f.id, f.name)).collect(),
            Err(error) => tracing::warn!(%error, "fund names unavailable"),
        }
        names
    }

    fn render(&self, out: &Renderer, records: &[ExpenseRecord]) -> String {
        table::expense_records(out, records, &self.expense_types, &self.funds)
    }
}

pub async fn expenses(ctx: &Context, cmd: ExpenseCommand) -> anyhow::Result<()> {
    let client = ctx.client();
    let view: ListView<ExpenseRecord> = ListView::new("expense records");

    let names = match cmd {
        ExpenseCommand::List => {
            let (records, names) = tokio::join!(client.list_expense_records(), Names::load(client));
            let records = records?;
            return ctx.out.print(&records, |out, r| names.render(out, r));
        }
        ExpenseCommand::Add(args) => add_expense(ctx, &view, args).await?,
        ExpenseCommand::Delete { id } => {
            view.mutate_then_refetch(
                client.delete_expense_record(id),
                client.list_expense_records(),
            )
            .await?;
            ctx.out.note(format!("Deleted expense record {id}."));
            Names::load(client).await
        }
    };

    print_refreshed(ctx, view.items(), |out, r| names.render(out, r))
}

/// Validates, warns about budget overruns, then saves the record.
async fn add_expense(
    ctx: &Context,
    view: &ListView<ExpenseRecord>,
    args: ExpenseArgs,
) -> anyhow::Result<Names> {
    let client = ctx.client();
    let record = ExpenseRecordDraft {
        date: args.date,
        fund_id: args.fund,
        merchant: args.merchant,
        document_type: args.document,
        notes: args.notes,
        details: args
            .details
            .into_iter()
            .map(|(expense_type_id, amount)| ExpenseDetailDraft {
                expense_type_id: Some(expense_type_id),
                amount: Some(amount),
            })
            .collect(),
    }
    .validate()?;

    let (budgets, names) = tokio::join!(client.list_budgets(), Names::load(client));
    match budgets {
        Ok(budgets) => {
            let month = month_name(record.date.month(), ctx.out.locale()).unwrap_or_default();
            for overrun in find_overruns(&record, &budgets) {
                ctx.out.warn(overrun_message(&ctx.out, &overrun, &names, month));
            }
        }
        Err(error) => tracing::warn!(%error, "budgets unavailable, skipping overrun check"),
    }

    let id = view
        .mutate_then_refetch(
            client.create_expense_record(&record),
            client.list_expense_records(),
        )
        .await?;
    ctx.out.note(format!(
        "Recorded expense {id} for {}.",
        ctx.out.money(record.total())
    ));
    Ok(names)
}

fn overrun_message(out: &Renderer, overrun: &BudgetOverrun, names: &Names, month: &str) -> String {
    let name = overrun
        .expense_type_name
        .clone()
        .or_else(|| names.expense_types.get(&overrun.expense_type_id).cloned())
        .unwrap_or_else(|| format!("expense type {}", overrun.expense_type_id));
    format!(
        "{name} goes over its {month} budget: {} spent against {} ({} over)",
        out.money(overrun.spent),
        out.money(overrun.budgeted),
        out.money(overrun.excess()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::renderer;
    use rust_decimal_macros::dec;

    #[test]
    fn test_overrun_message_falls_back_to_lookup_name() {
        let overrun = BudgetOverrun {
            expense_type_id: ExpenseTypeId::new(3),
            expense_type_name: None,
            spent: dec!(650),
            budgeted: dec!(500),
        };
        let mut names = Names::default();
        names
            .expense_types
            .insert(ExpenseTypeId::new(3), "Comida".to_string());

        let message = overrun_message(&renderer(), &overrun, &names, "Marzo");

        assert_eq!(
            message,
            "Comida goes over its Marzo budget: $650,00 spent against $500,00 ($150,00 over)"
        );
    }

    #[test]
    fn test_overrun_message_without_any_name() {
        let overrun = BudgetOverrun {
            expense_type_id: ExpenseTypeId::new(9),
            expense_type_name: None,
            spent: dec!(10),
            budgeted: dec!(5),
        };

        let message = overrun_message(&renderer(), &overrun, &Names::default(), "Enero");

        assert!(message.starts_with("expense type 9 goes over"));
    }
}
