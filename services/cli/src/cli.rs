use crate::batch::{run_batch, BatchArgs};
use crate::demo::run_demo;
use crate::infra::{build_workflow, parse_amount, parse_budget, ReporterKind};
use clap::{Args, Parser, Subcommand};
use expense_approval::config::AppConfig;
use expense_approval::error::AppError;
use expense_approval::telemetry;
use expense_approval::workflows::expense::{ApprovalWorkflow, ExpenseRequest};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Expense Approval",
    about = "Route expense claims through a chain of approvers",
    version
)]
struct Cli {
    #[command(flatten)]
    options: WorkflowOptions,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the standard scenarios through the approval chain (default command)
    Demo,
    /// Decide a single expense claim
    Process(ProcessArgs),
    /// Decide every claim in a CSV file (requester,amount,purpose,department)
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct WorkflowOptions {
    /// Remaining budget for a department as DEPT=AMOUNT; replaces the stub budget check
    #[arg(long = "budget", value_parser = parse_budget, global = true)]
    pub(crate) budgets: Vec<(String, Decimal)>,
    /// Where approval progress is reported
    #[arg(long, value_enum, default_value_t = ReporterKind::Console, global = true)]
    pub(crate) reporter: ReporterKind,
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Person submitting the claim
    #[arg(long)]
    requester: String,
    /// Claimed amount, e.g. 350.00
    #[arg(long, value_parser = parse_amount)]
    amount: Decimal,
    /// What the money was spent on
    #[arg(long)]
    purpose: String,
    /// Department charged for the expense
    #[arg(long)]
    department: String,
    /// Print the evaluation and audit trail as JSON instead of reporting progress
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.approval, "configuration loaded");

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&config, &cli.options),
        Command::Process(args) => {
            let workflow = build_workflow(&config, &cli.options)?;
            run_process(&workflow, args)
        }
        Command::Batch(args) => {
            let workflow = build_workflow(&config, &cli.options)?;
            run_batch(workflow, args).await
        }
    }
}

fn run_process(workflow: &ApprovalWorkflow, args: ProcessArgs) -> Result<(), AppError> {
    let ProcessArgs {
        requester,
        amount,
        purpose,
        department,
        json,
    } = args;
    let request = ExpenseRequest::new(requester, amount, purpose, department)?;

    if json {
        let evaluation = workflow.evaluate(&request);
        println!("{}", crate::infra::to_json(&evaluation)?);
    } else {
        workflow.process(&request);
    }

    Ok(())
}
