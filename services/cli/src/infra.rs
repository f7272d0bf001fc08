use crate::cli::WorkflowOptions;
use crate::console::ConsoleReporter;
use clap::ValueEnum;
use expense_approval::config::AppConfig;
use expense_approval::error::AppError;
use expense_approval::workflows::expense::{
    ApprovalChain, ApprovalWorkflow, DecisionCheck, DecisionChecks, DecisionReporter,
    DepartmentBudgets, SilentReporter, TracingReporter,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReporterKind {
    /// Human-readable progress on stdout
    #[default]
    Console,
    /// Structured tracing events on stderr
    Log,
    /// No progress output
    Silent,
}

impl ReporterKind {
    pub(crate) fn reporter(self) -> Arc<dyn DecisionReporter> {
        match self {
            ReporterKind::Console => Arc::new(ConsoleReporter),
            ReporterKind::Log => Arc::new(TracingReporter),
            ReporterKind::Silent => Arc::new(SilentReporter),
        }
    }
}

pub(crate) fn build_workflow(
    config: &AppConfig,
    options: &WorkflowOptions,
) -> Result<ApprovalWorkflow, AppError> {
    let chain = config.approval.standard_chain()?;
    Ok(workflow_for(chain, options))
}

pub(crate) fn workflow_for(chain: ApprovalChain, options: &WorkflowOptions) -> ApprovalWorkflow {
    ApprovalWorkflow::new(chain)
        .with_checks(build_checks(&options.budgets))
        .with_reporter(options.reporter.reporter())
}

fn build_checks(budgets: &[(String, Decimal)]) -> DecisionChecks {
    if budgets.is_empty() {
        return DecisionChecks::default();
    }

    let budgets = budgets
        .iter()
        .fold(DepartmentBudgets::new(), |acc, (department, remaining)| {
            acc.with_budget(department.clone(), *remaining)
        });
    DecisionChecks::default().with_check(DecisionCheck::Budget, budgets)
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))?;
    if amount < Decimal::ZERO {
        return Err(format!("amount '{raw}' must not be negative"));
    }
    Ok(amount)
}

pub(crate) fn parse_budget(raw: &str) -> Result<(String, Decimal), String> {
    let (department, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DEPT=AMOUNT, found '{raw}'"))?;
    let department = department.trim();
    if department.is_empty() {
        return Err(format!("budget '{raw}' is missing a department"));
    }
    Ok((department.to_string(), parse_amount(amount)?))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}
