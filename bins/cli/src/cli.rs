//! Command-line definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fintrack_core::maintenance::FundKind;
use fintrack_core::transactions::DocumentType;
use fintrack_shared::format::parse_date_only;
use fintrack_shared::types::{
    BudgetId, DepositId, ExpenseRecordId, ExpenseTypeId, FundId,
};
use rust_decimal::Decimal;

/// Personal finance tracker: budgets, expenses, deposits and reports.
#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Log debug details to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables, cards and charts
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the welcome screen
    Welcome,
    /// Log in and remember the session
    Login(LoginArgs),
    /// Forget the current session
    Logout,
    /// Show the logged-in user
    Whoami {
        /// Check the token with the backend
        #[arg(long)]
        check: bool,
    },
    /// Money, income, expense and budget cards plus recent activity
    Dashboard,
    /// Budget vs actual spending per expense type
    Compare(CompareArgs),
    /// Total budget against total deposits
    Totals,
    /// Deposits and expenses within a date range
    Movements(RangeArgs),
    /// Manage expense types
    #[command(subcommand)]
    ExpenseTypes(ExpenseTypeCommand),
    /// Manage monetary funds
    #[command(subcommand)]
    Funds(FundCommand),
    /// Manage monthly budgets
    #[command(subcommand)]
    Budgets(BudgetCommand),
    /// Manage deposits
    #[command(subcommand)]
    Deposits(DepositCommand),
    /// Manage expense records
    #[command(subcommand)]
    Expenses(ExpenseCommand),
}

impl Command {
    /// Whether the command needs a logged-in session.
    pub const fn requires_session(&self) -> bool {
        !matches!(
            self,
            Self::Welcome | Self::Login(_) | Self::Logout | Self::Whoami { .. }
        )
    }
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// User name
    #[arg(long, short = 'u')]
    pub username: String,
    /// Password; read from stdin when omitted
    #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// First day included (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,
    /// Last day included (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    /// Use the all-time dashboard comparison instead of a date range
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub all: bool,
    /// Skip the bar chart
    #[arg(long)]
    pub no_chart: bool,
}

#[derive(Debug, Subcommand)]
pub enum ExpenseTypeCommand {
    /// List expense types
    List,
    /// Create an expense type
    Add(ExpenseTypeArgs),
    /// Replace an expense type
    Edit {
        /// Expense type ID
        id: ExpenseTypeId,
        #[command(flatten)]
        fields: ExpenseTypeArgs,
    },
    /// Delete an expense type
    Delete {
        /// Expense type ID
        id: ExpenseTypeId,
    },
}

#[derive(Debug, Args)]
pub struct ExpenseTypeArgs {
    /// Name
    #[arg(long)]
    pub name: Option<String>,
    /// Short code
    #[arg(long)]
    pub code: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum FundCommand {
    /// List funds
    List,
    /// Create a fund
    Add(FundArgs),
    /// Replace a fund
    Edit {
        /// Fund ID
        id: FundId,
        #[command(flatten)]
        fields: FundArgs,
    },
    /// Delete a fund
    Delete {
        /// Fund ID
        id: FundId,
    },
}

#[derive(Debug, Args)]
pub struct FundArgs {
    /// Name
    #[arg(long)]
    pub name: Option<String>,
    /// Fund kind: bank_account or petty_cash
    #[arg(long, value_parser = parse_fund_kind)]
    pub kind: Option<FundKind>,
}

#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    /// List budgets
    List,
    /// Create a budget
    Add {
        /// Month, 1 to 12
        #[arg(long)]
        month: Option<u32>,
        /// Expense type ID
        #[arg(long = "expense-type")]
        expense_type: Option<ExpenseTypeId>,
        /// Budgeted amount
        #[arg(long, value_parser = parse_amount)]
        amount: Option<Decimal>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

#[derive(Debug, Subcommand)]
pub enum DepositCommand {
    /// List deposits with their total
    List,
    /// Record a deposit
    Add {
        /// Deposit date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Fund receiving the money
        #[arg(long)]
        fund: Option<FundId>,
        /// Amount
        #[arg(long, value_parser = parse_amount)]
        amount: Option<Decimal>,
    },
    /// Delete a deposit
    Delete {
        /// Deposit ID
        id: DepositId,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExpenseCommand {
    /// List expense records with their details
    List,
    /// Record an expense with one or more detail lines
    Add(ExpenseArgs),
    /// Delete an expense record
    Delete {
        /// Expense record ID
        id: ExpenseRecordId,
    },
}

#[derive(Debug, Args)]
pub struct ExpenseArgs {
    /// Expense date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    /// Fund paying for it
    #[arg(long)]
    pub fund: Option<FundId>,
    /// Store or payee
    #[arg(long)]
    pub merchant: Option<String>,
    /// Document type: receipt, invoice or other
    #[arg(long, value_parser = parse_document_type)]
    pub document: Option<DocumentType>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Detail line as EXPENSE_TYPE_ID=AMOUNT; repeat for several lines
    #[arg(long = "detail", value_name = "TYPE=AMOUNT", value_parser = parse_detail)]
    pub details: Vec<(ExpenseTypeId, Decimal)>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_date_only(raw).map_err(|e| e.to_string())
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| format!("invalid amount `{raw}`"))
}

fn parse_fund_kind(raw: &str) -> Result<FundKind, String> {
    raw.parse()
}

fn parse_document_type(raw: &str) -> Result<DocumentType, String> {
    raw.parse()
}

fn parse_detail(raw: &str) -> Result<(ExpenseTypeId, Decimal), String> {
    let (expense_type, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=AMOUNT, got `{raw}`"))?;
    let expense_type = expense_type
        .parse::<ExpenseTypeId>()
        .map_err(|_| format!("invalid expense type ID `{expense_type}`"))?;
    Ok((expense_type, parse_amount(amount)?))
}
