//! Expense type and fund commands.

use fintrack_client::ListView;
use fintrack_core::maintenance::{ExpenseType, ExpenseTypeDraft, MonetaryFund, MonetaryFundDraft};

use super::{Context, print_refreshed};
use crate::cli::{ExpenseTypeArgs, ExpenseTypeCommand, FundArgs, FundCommand};
use crate::render::table;

fn expense_type_draft(args: ExpenseTypeArgs) -> ExpenseTypeDraft {
    ExpenseTypeDraft {
        code: args.code,
        name: args.name,
        description: args.description,
    }
}

fn fund_draft(args: FundArgs) -> MonetaryFundDraft {
    MonetaryFundDraft {
        name: args.name,
        kind: args.kind,
    }
}

pub async fn expense_types(ctx: &Context, cmd: ExpenseTypeCommand) -> anyhow::Result<()> {
    let client = ctx.client();
    let view: ListView<ExpenseType> = ListView::new("expense types");

    match cmd {
        ExpenseTypeCommand::List => {
            let types = client.list_expense_types().await?;
            return ctx.out.print(&types, |out, t| table::expense_types(out, t));
        }
        ExpenseTypeCommand::Add(args) => {
            let new_type = expense_type_draft(args).validate()?;
            view.mutate_then_refetch(
                client.create_expense_type(&new_type),
                client.list_expense_types(),
            )
            .await?;
            ctx.out.note(format!("Created expense type {}.", new_type.name));
        }
        ExpenseTypeCommand::Edit { id, fields } => {
            let new_type = expense_type_draft(fields).validate()?;
            view.mutate_then_refetch(
                client.update_expense_type(id, &new_type),
                client.list_expense_types(),
            )
            .await?;
            ctx.out.note(format!("Updated expense type {id}."));
        }
        ExpenseTypeCommand::Delete { id } => {
            view.mutate_then_refetch(
                client.delete_expense_type(id),
                client.list_expense_types(),
            )
            .await?;
            ctx.out.note(format!("Deleted expense type {id}."));
        }
    }

    print_refreshed(ctx, view.items(), |out, t| table::expense_types(out, t))
}

pub async fn funds(ctx: &Context, cmd: FundCommand) -> anyhow::Result<()> {
    let client = ctx.client();
    let view: ListView<MonetaryFund> = ListView::new("funds");

    match cmd {
        FundCommand::List => {
            let funds = client.list_funds().await?;
            return ctx.out.print(&funds, |out, f| table::funds(out, f));
        }
        FundCommand::Add(args) => {
            let fund = fund_draft(args).validate()?;
            view.mutate_then_refetch(client.create_fund(&fund), client.list_funds())
                .await?;
            ctx.out.note(format!("Created fund {}.", fund.name));
        }
        FundCommand::Edit { id, fields } => {
            let fund = fund_draft(fields).validate()?;
            view.mutate_then_refetch(client.update_fund(id, &fund), client.list_funds())
                .await?;
            ctx.out.note(format!("Updated fund {id}."));
        }
        FundCommand::Delete { id } => {
            view.mutate_then_refetch(client.delete_fund(id), client.list_funds())
                .await?;
            ctx.out.note(format!("Deleted fund {id}."));
        }
    }

    print_refreshed(ctx, view.items(), |out, f| table::funds(out, f))
}
