use crate::cli::WorkflowOptions;
use crate::infra::{build_workflow, workflow_for};
use expense_approval::config::AppConfig;
use expense_approval::error::AppError;
use expense_approval::workflows::expense::{
    ApprovalChain, ApprovalWorkflow, ExpenseRequest, Tier, TierApprover,
};
use rust_decimal::Decimal;

struct Scenario {
    requester: &'static str,
    amount: Decimal,
    purpose: &'static str,
    department: &'static str,
}

fn scenario(
    requester: &'static str,
    cents: i64,
    purpose: &'static str,
    department: &'static str,
) -> Scenario {
    Scenario {
        requester,
        amount: Decimal::new(cents, 2),
        purpose,
        department,
    }
}

fn standard_scenarios() -> [Scenario; 4] {
    [
        scenario("alex.morgan", 5_000, "Office supplies", "Operations"),
        scenario("sam.rivera", 35_000, "Team training course", "Engineering"),
        scenario("kai.chen", 250_000, "Trade show booth", "Marketing"),
        scenario("robin.park", 1_500_000, "Data center hardware", "Infrastructure"),
    ]
}

pub(crate) fn run_demo(config: &AppConfig, options: &WorkflowOptions) -> Result<(), AppError> {
    println!("Expense approval demo");
    let workflow = build_workflow(config, options)?;
    println!("Chain: {}", workflow.chain().names().join(" -> "));
    for scenario in &standard_scenarios() {
        run_scenario(&workflow, scenario)?;
    }

    let short_chain = ApprovalChain::builder()
        .append(
            TierApprover::new(Tier::Supervisor)
                .with_limit(config.approval.limit_for(Tier::Supervisor)),
        )?
        .build()?;
    let workflow = workflow_for(short_chain, options);
    println!("\nChain: {}", workflow.chain().names().join(" -> "));
    run_scenario(
        &workflow,
        &scenario("jo.bauer", 20_000, "Client dinner", "Sales"),
    )?;

    Ok(())
}

fn run_scenario(workflow: &ApprovalWorkflow, scenario: &Scenario) -> Result<(), AppError> {
    let request = ExpenseRequest::new(
        scenario.requester,
        scenario.amount,
        scenario.purpose,
        scenario.department,
    )?;
    println!(
        "\n{} requests {} for {}",
        request.requester(),
        request.amount(),
        request.purpose()
    );
    workflow.process(&request);
    Ok(())
}
