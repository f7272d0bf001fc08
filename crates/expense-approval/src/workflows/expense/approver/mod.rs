//! Approver contract and the delegation helper every approver composes.
//!
//! An approver either decides a request that falls inside its authorization
//! limit or hands it, unchanged, to its successor. Successor links are
//! non-owning: the [`ApprovalChain`](super::chain::ApprovalChain) owns every
//! approver, approvers only hold a `Weak` pointer to the next one.

mod tier;

pub use tier::{Tier, TierApprover};

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::chain::ChainError;
use super::checks::{DecisionCheck, DecisionChecks};
use super::domain::ExpenseRequest;

/// Maximum amount an approver may decide on its own (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationLimit {
    UpTo(Decimal),
    Unlimited,
}

impl AuthorizationLimit {
    pub fn covers(self, amount: Decimal) -> bool {
        match self {
            AuthorizationLimit::UpTo(limit) => amount <= limit,
            AuthorizationLimit::Unlimited => true,
        }
    }
}

impl fmt::Display for AuthorizationLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizationLimit::UpTo(limit) => write!(f, "up to {limit}"),
            AuthorizationLimit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Terminal outcome of sending one request through a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    Approved { approver: String },
    Rejected { reason: RejectionReason },
}

impl Decision {
    pub fn approved_by(approver: impl Into<String>) -> Self {
        Decision::Approved {
            approver: approver.into(),
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Decision::Rejected { reason }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved { .. })
    }

    /// Name of the approver that rendered the decision, if any did.
    pub fn decided_by(&self) -> Option<&str> {
        match self {
            Decision::Approved { approver } => Some(approver),
            Decision::Rejected {
                reason: RejectionReason::FailedCheck { approver, .. },
            } => Some(approver),
            Decision::Rejected {
                reason: RejectionReason::NoApproverAvailable,
            } => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Decision::Approved { approver } => format!("approved by {approver}"),
            Decision::Rejected { reason } => format!("rejected: {}", reason.summary()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Why a request was rejected. Both variants are ordinary business outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    FailedCheck {
        approver: String,
        check: DecisionCheck,
    },
    NoApproverAvailable,
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::FailedCheck { approver, check } => {
                format!("{approver} found {check} check failed")
            }
            RejectionReason::NoApproverAvailable => "no approver available".to_string(),
        }
    }
}

/// One entry of the audit trail recorded while a request moves down the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ApprovalStep {
    Evaluating {
        approver: String,
        limit: AuthorizationLimit,
    },
    CheckPassed {
        approver: String,
        check: DecisionCheck,
    },
    CheckFailed {
        approver: String,
        check: DecisionCheck,
    },
    Delegated {
        from: String,
        to: String,
    },
    Exhausted {
        approver: String,
    },
}

/// A unit in the chain that can decide or delegate a request.
pub trait Approver: Send + Sync {
    fn name(&self) -> &str;

    fn limit(&self) -> AuthorizationLimit;

    /// Checks run, in order, before this approver may approve.
    fn required_checks(&self) -> &[DecisionCheck];

    fn successor(&self) -> Option<Arc<dyn Approver>>;

    /// True once the approver has been placed in a chain, including as its
    /// tail.
    fn is_linked(&self) -> bool;

    /// Link the next approver, or mark this one as the end of the chain with
    /// `None`. Links are set once; a second call fails.
    fn try_set_successor(&self, successor: Option<&Arc<dyn Approver>>) -> Result<(), ChainError>;

    fn decide(
        &self,
        request: &ExpenseRequest,
        checks: &DecisionChecks,
        trail: &mut Vec<ApprovalStep>,
    ) -> Decision {
        decide_or_delegate(self, request, checks, trail)
    }
}

/// Set-once, non-owning pointer to the next approver.
///
/// A link set to `None` seals the approver as the end of its chain, so a
/// built chain cannot be extended through its tail.
#[derive(Debug, Default)]
pub struct SuccessorLink {
    next: OnceLock<Option<Weak<dyn Approver>>>,
}

impl SuccessorLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<dyn Approver>> {
        self.next.get()?.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_set(&self) -> bool {
        self.next.get().is_some()
    }

    pub fn set(
        &self,
        owner: &str,
        successor: Option<&Arc<dyn Approver>>,
    ) -> Result<(), ChainError> {
        self.next
            .set(successor.map(Arc::downgrade))
            .map_err(|_| ChainError::AlreadyLinked {
                name: owner.to_string(),
            })
    }
}

/// Authorize, check, then approve, reject, or delegate.
///
/// This is the shared behavior behind [`Approver::decide`]; custom approvers
/// can call it directly after doing their own bookkeeping.
pub fn decide_or_delegate<A>(
    approver: &A,
    request: &ExpenseRequest,
    checks: &DecisionChecks,
    trail: &mut Vec<ApprovalStep>,
) -> Decision
where
    A: Approver + ?Sized,
{
    let name = approver.name();
    let limit = approver.limit();
    trail.push(ApprovalStep::Evaluating {
        approver: name.to_string(),
        limit,
    });

    if !limit.covers(request.amount()) {
        return delegate(name, approver.successor(), request, checks, trail);
    }

    match run_required_checks(name, approver.required_checks(), request, checks, trail) {
        Ok(()) => Decision::approved_by(name),
        Err(check) => Decision::rejected(RejectionReason::FailedCheck {
            approver: name.to_string(),
            check,
        }),
    }
}

/// Forward `request` to `successor`, or reject when the chain ends here.
pub fn delegate(
    from: &str,
    successor: Option<Arc<dyn Approver>>,
    request: &ExpenseRequest,
    checks: &DecisionChecks,
    trail: &mut Vec<ApprovalStep>,
) -> Decision {
    match successor {
        Some(next) => {
            trail.push(ApprovalStep::Delegated {
                from: from.to_string(),
                to: next.name().to_string(),
            });
            next.decide(request, checks, trail)
        }
        None => {
            trail.push(ApprovalStep::Exhausted {
                approver: from.to_string(),
            });
            Decision::rejected(RejectionReason::NoApproverAvailable)
        }
    }
}

/// Runs `required` in order and stops at the first failure.
fn run_required_checks(
    approver: &str,
    required: &[DecisionCheck],
    request: &ExpenseRequest,
    checks: &DecisionChecks,
    trail: &mut Vec<ApprovalStep>,
) -> Result<(), DecisionCheck> {
    for &check in required {
        if !checks.run(check, request) {
            trail.push(ApprovalStep::CheckFailed {
                approver: approver.to_string(),
                check,
            });
            return Err(check);
        }
        trail.push(ApprovalStep::CheckPassed {
            approver: approver.to_string(),
            check,
        });
    }
    Ok(())
}
