use tracing::{info, warn};

use super::approver::{ApprovalStep, Decision};
use super::domain::ExpenseRequest;

/// Sink for human-readable progress and decision events.
pub trait DecisionReporter: Send + Sync {
    fn step(&self, request: &ExpenseRequest, step: &ApprovalStep);
    fn decision(&self, request: &ExpenseRequest, decision: &Decision);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl DecisionReporter for SilentReporter {
    fn step(&self, _request: &ExpenseRequest, _step: &ApprovalStep) {}

    fn decision(&self, _request: &ExpenseRequest, _decision: &Decision) {}
}

/// Emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DecisionReporter for TracingReporter {
    fn step(&self, request: &ExpenseRequest, step: &ApprovalStep) {
        let requester = request.requester();
        let amount = request.amount();
        match step {
            ApprovalStep::Evaluating { approver, limit } => {
                info!(requester, %amount, %approver, %limit, "evaluating expense")
            }
            ApprovalStep::CheckPassed { approver, check } => {
                info!(requester, %approver, %check, "check passed")
            }
            ApprovalStep::CheckFailed { approver, check } => {
                warn!(requester, %approver, %check, "check failed")
            }
            ApprovalStep::Delegated { from, to } => {
                info!(requester, %amount, %from, %to, "delegating expense")
            }
            ApprovalStep::Exhausted { approver } => {
                warn!(requester, %amount, %approver, "approval chain exhausted")
            }
        }
    }

    fn decision(&self, request: &ExpenseRequest, decision: &Decision) {
        let requester = request.requester();
        let department = request.department();
        let amount = request.amount();
        if decision.is_approved() {
            info!(requester, department, %amount, %decision, "expense decided");
        } else {
            warn!(requester, department, %amount, %decision, "expense decided");
        }
    }
}
