use expense_approval::workflows::expense::{
    ApprovalStep, Decision, DecisionReporter, ExpenseRequest,
};

/// Prints approval progress for people watching the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleReporter;

impl DecisionReporter for ConsoleReporter {
    fn step(&self, request: &ExpenseRequest, step: &ApprovalStep) {
        match step {
            ApprovalStep::Evaluating { approver, limit } => println!(
                "  {approver} ({limit}) reviewing {} from {} for {}",
                request.amount(),
                request.requester(),
                request.purpose()
            ),
            ApprovalStep::CheckPassed { check, .. } => println!("    - {check}: ok"),
            ApprovalStep::CheckFailed { check, .. } => println!("    - {check}: FAILED"),
            ApprovalStep::Delegated { from, to } => {
                println!("    {from} cannot authorize this amount, forwarding to {to}")
            }
            ApprovalStep::Exhausted { approver } => {
                println!("    {approver} cannot authorize this amount and has no successor")
            }
        }
    }

    fn decision(&self, request: &ExpenseRequest, decision: &Decision) {
        println!(
            "  => {} [{} / {}]",
            decision.summary(),
            request.department(),
            request.amount()
        );
    }
}
