//! Staged expense approval: requests travel down a chain of approvers until
//! one of them can decide or the chain runs out.

pub mod approver;
pub mod chain;
pub mod checks;
pub mod domain;
pub mod import;
pub mod reporting;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use approver::{
    ApprovalStep, Approver, AuthorizationLimit, Decision, RejectionReason, SuccessorLink, Tier,
    TierApprover,
};
pub use chain::{ApprovalChain, ChainBuilder, ChainError};
pub use checks::{AlwaysPass, CheckPredicate, DecisionCheck, DecisionChecks, DepartmentBudgets};
pub use domain::{ExpenseRequest, RequestError};
pub use import::{load_requests, parse_requests, ImportError};
pub use reporting::{DecisionReporter, SilentReporter, TracingReporter};
pub use workflow::{process, ApprovalWorkflow, Evaluation};
