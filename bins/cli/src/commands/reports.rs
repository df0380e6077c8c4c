//! Report commands: dashboard, comparison, totals and movements.

use anyhow::anyhow;
use fintrack_core::reports::DateRange;

use super::Context;
use crate::cli::{CompareArgs, RangeArgs};
use crate::render::{cards, chart, table};

const DASHBOARD_CARDS: usize = 5;

pub async fn dashboard(ctx: &Context) -> anyhow::Result<()> {
    let (dashboard, errors) = ctx.client().fetch_dashboard().await.into_dashboard();

    if errors.len() == DASHBOARD_CARDS {
        let first = errors
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("dashboard could not be loaded"))?;
        return Err(first.into());
    }
    for error in &errors {
        ctx.out.warn(format!("a dashboard card could not be loaded: {error}"));
    }

    ctx.out.print(&dashboard, cards::dashboard)
}

fn range_of(ctx: &Context, args: &RangeArgs) -> DateRange {
    let range = DateRange::new(args.start, args.end);
    if range.is_inverted() {
        ctx.out
            .warn("the start date is after the end date, so nothing falls in the range");
    }
    range
}

pub async fn compare(ctx: &Context, args: CompareArgs) -> anyhow::Result<()> {
    let report = if args.all {
        ctx.client().all_comparison_report().await?
    } else {
        let range = range_of(ctx, &args.range);
        ctx.client().comparison_report(&range).await?
    };

    let show_chart = !args.no_chart && !report.rows.is_empty();
    ctx.out.print(&report, |out, report| {
        let mut rendered = table::comparison(out, report);
        if show_chart {
            rendered.push_str("\n\n");
            rendered.push_str(&chart::comparison_chart(out, report, chart::DEFAULT_WIDTH));
        }
        rendered
    })
}

pub async fn totals(ctx: &Context) -> anyhow::Result<()> {
    let totals = ctx.client().fetch_totals().await?;
    ctx.out.print(&totals, cards::totals)
}

pub async fn movements(ctx: &Context, args: RangeArgs) -> anyhow::Result<()> {
    let range = range_of(ctx, &args);
    let report = ctx.client().movement_report(range).await?;
    ctx.out.print(&report, table::movements)
}
