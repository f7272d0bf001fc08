use clap::Args;
use expense_approval::error::AppError;
use expense_approval::workflows::expense::{
    load_requests, ApprovalWorkflow, Evaluation, ExpenseRequest,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with requester,amount,purpose,department columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the batch report as JSON instead of reporting progress
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    total: usize,
    approved: usize,
    rejected: usize,
    evaluations: Vec<Evaluation>,
}

impl BatchReport {
    fn new(evaluations: Vec<Evaluation>) -> Self {
        let approved = evaluations
            .iter()
            .filter(|evaluation| evaluation.decision.is_approved())
            .count();
        Self {
            total: evaluations.len(),
            approved,
            rejected: evaluations.len() - approved,
            evaluations,
        }
    }
}

pub(crate) async fn run_batch(
    workflow: ApprovalWorkflow,
    args: BatchArgs,
) -> Result<(), AppError> {
    let requests = load_requests(&args.csv)?;
    info!(path = %args.csv.display(), requests = requests.len(), "processing expense batch");

    let evaluations = evaluate_concurrently(Arc::new(workflow.clone()), requests).await?;

    if args.json {
        println!("{}", crate::infra::to_json(&BatchReport::new(evaluations))?);
        return Ok(());
    }

    for evaluation in &evaluations {
        println!(
            "\n{} requests {} for {}",
            evaluation.request.requester(),
            evaluation.request.amount(),
            evaluation.request.purpose()
        );
        workflow.announce(evaluation);
    }
    let report = BatchReport::new(evaluations);
    println!(
        "\n{} claims: {} approved, {} rejected",
        report.total, report.approved, report.rejected
    );
    Ok(())
}

/// Decide every request on the blocking pool. The workflow is shared
/// read-only; results come back in input order.
async fn evaluate_concurrently(
    workflow: Arc<ApprovalWorkflow>,
    requests: Vec<ExpenseRequest>,
) -> Result<Vec<Evaluation>, AppError> {
    let mut tasks = JoinSet::new();
    let total = requests.len();
    for (index, request) in requests.into_iter().enumerate() {
        let workflow = workflow.clone();
        tasks.spawn_blocking(move || (index, workflow.evaluate(&request)));
    }

    let mut slots: Vec<Option<Evaluation>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, evaluation) = joined?;
        slots[index] = Some(evaluation);
    }

    Ok(slots.into_iter().flatten().collect())
}
