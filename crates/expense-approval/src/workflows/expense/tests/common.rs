use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use crate::workflows::expense::{
    ApprovalChain, ApprovalStep, ApprovalWorkflow, CheckPredicate, Decision, DecisionCheck,
    DecisionChecks, DecisionReporter, ExpenseRequest, Tier, TierApprover,
};

pub(super) fn request(amount: Decimal) -> ExpenseRequest {
    ExpenseRequest::new("jordan.lee", amount, "Conference travel", "Engineering")
        .expect("valid request")
}

pub(super) fn standard_chain() -> ApprovalChain {
    ApprovalChain::standard().expect("standard chain builds")
}

pub(super) fn supervisor_only_chain() -> ApprovalChain {
    ApprovalChain::builder()
        .append(TierApprover::new(Tier::Supervisor))
        .expect("append supervisor")
        .build()
        .expect("single approver chain builds")
}

pub(super) fn checks_failing(check: DecisionCheck) -> DecisionChecks {
    DecisionChecks::default().with_check(check, |_request: &ExpenseRequest| false)
}

pub(super) fn recording_workflow(
    chain: ApprovalChain,
    checks: DecisionChecks,
) -> (ApprovalWorkflow, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let workflow = ApprovalWorkflow::new(chain)
        .with_checks(checks)
        .with_reporter(reporter.clone());
    (workflow, reporter)
}

#[derive(Default)]
pub(super) struct RecordingReporter {
    steps: Mutex<Vec<ApprovalStep>>,
    decisions: Mutex<Vec<Decision>>,
}

impl RecordingReporter {
    pub(super) fn steps(&self) -> Vec<ApprovalStep> {
        self.steps.lock().expect("reporter mutex poisoned").clone()
    }

    pub(super) fn decisions(&self) -> Vec<Decision> {
        self.decisions.lock().expect("reporter mutex poisoned").clone()
    }
}

impl DecisionReporter for RecordingReporter {
    fn step(&self, _request: &ExpenseRequest, step: &ApprovalStep) {
        self.steps
            .lock()
            .expect("reporter mutex poisoned")
            .push(step.clone());
    }

    fn decision(&self, _request: &ExpenseRequest, decision: &Decision) {
        self.decisions
            .lock()
            .expect("reporter mutex poisoned")
            .push(decision.clone());
    }
}

/// Passes every request and counts how often it was consulted.
#[derive(Default, Clone)]
pub(super) struct CountingCheck {
    calls: Arc<AtomicUsize>,
}

impl CountingCheck {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CheckPredicate for CountingCheck {
    fn passes(&self, _request: &ExpenseRequest) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}
