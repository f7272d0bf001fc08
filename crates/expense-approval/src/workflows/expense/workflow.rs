use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::approver::{ApprovalStep, Approver, Decision};
use super::chain::ApprovalChain;
use super::checks::DecisionChecks;
use super::domain::ExpenseRequest;
use super::reporting::{DecisionReporter, TracingReporter};

/// Walk the chain from `head` and return the decision with its audit trail.
/// Nothing is reported.
pub fn evaluate(
    head: &dyn Approver,
    request: &ExpenseRequest,
    checks: &DecisionChecks,
) -> (Decision, Vec<ApprovalStep>) {
    let mut trail = Vec::new();
    let decision = head.decide(request, checks, &mut trail);
    (decision, trail)
}

/// Decide `request` starting at `head`, then announce the trail and the
/// decision to `reporter`.
pub fn process(
    head: &dyn Approver,
    request: &ExpenseRequest,
    checks: &DecisionChecks,
    reporter: &dyn DecisionReporter,
) -> Decision {
    let (decision, trail) = evaluate(head, request, checks);
    announce(reporter, request, &trail, &decision);
    decision
}

fn announce(
    reporter: &dyn DecisionReporter,
    request: &ExpenseRequest,
    trail: &[ApprovalStep],
    decision: &Decision,
) {
    for step in trail {
        reporter.step(request, step);
    }
    reporter.decision(request, decision);
}

/// Audit record for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub request: ExpenseRequest,
    pub decision: Decision,
    pub trail: Vec<ApprovalStep>,
    pub evaluated_at: DateTime<Utc>,
}

/// A built chain together with the checks and reporter it runs with.
///
/// The workflow is immutable once constructed and can be shared across
/// threads to process independent requests in parallel.
#[derive(Clone)]
pub struct ApprovalWorkflow {
    chain: ApprovalChain,
    checks: DecisionChecks,
    reporter: Arc<dyn DecisionReporter>,
}

impl ApprovalWorkflow {
    pub fn new(chain: ApprovalChain) -> Self {
        Self {
            chain,
            checks: DecisionChecks::default(),
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_checks(mut self, checks: DecisionChecks) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn DecisionReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn chain(&self) -> &ApprovalChain {
        &self.chain
    }

    /// Decide without reporting.
    pub fn evaluate(&self, request: &ExpenseRequest) -> Evaluation {
        let (decision, trail) = evaluate(self.chain.head().as_ref(), request, &self.checks);
        Evaluation {
            request: request.clone(),
            decision,
            trail,
            evaluated_at: Utc::now(),
        }
    }

    /// Decide, then report the trail and decision.
    pub fn process(&self, request: &ExpenseRequest) -> Decision {
        let evaluation = self.evaluate(request);
        self.announce(&evaluation);
        evaluation.decision
    }

    pub fn announce(&self, evaluation: &Evaluation) {
        announce(
            self.reporter.as_ref(),
            &evaluation.request,
            &evaluation.trail,
            &evaluation.decision,
        );
    }
}

impl fmt::Debug for ApprovalWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApprovalWorkflow")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}
