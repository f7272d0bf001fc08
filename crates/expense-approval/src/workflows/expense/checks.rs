use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::ExpenseRequest;

/// Named predicates an approver may have to satisfy before approving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionCheck {
    Receipt,
    Budget,
    Policy,
    StrategicAlignment,
    BoardApproval,
}

impl DecisionCheck {
    pub const ALL: [DecisionCheck; 5] = [
        DecisionCheck::Receipt,
        DecisionCheck::Budget,
        DecisionCheck::Policy,
        DecisionCheck::StrategicAlignment,
        DecisionCheck::BoardApproval,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DecisionCheck::Receipt => "receipt validity",
            DecisionCheck::Budget => "budget availability",
            DecisionCheck::Policy => "policy compliance",
            DecisionCheck::StrategicAlignment => "strategic alignment",
            DecisionCheck::BoardApproval => "board approval",
        }
    }
}

impl fmt::Display for DecisionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A business rule consulted by approvers. Closures over the request qualify.
pub trait CheckPredicate: Send + Sync {
    fn passes(&self, request: &ExpenseRequest) -> bool;
}

impl<F> CheckPredicate for F
where
    F: Fn(&ExpenseRequest) -> bool + Send + Sync,
{
    fn passes(&self, request: &ExpenseRequest) -> bool {
        self(request)
    }
}

/// Stand-in for rules that have no backing service yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPass;

impl CheckPredicate for AlwaysPass {
    fn passes(&self, _request: &ExpenseRequest) -> bool {
        true
    }
}

/// Remaining budget per department. Unknown departments have no budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentBudgets {
    remaining: BTreeMap<String, Decimal>,
}

impl DepartmentBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, department: impl Into<String>, remaining: Decimal) -> Self {
        self.remaining.insert(department.into(), remaining);
        self
    }

    pub fn remaining(&self, department: &str) -> Option<Decimal> {
        self.remaining.get(department).copied()
    }
}

impl CheckPredicate for DepartmentBudgets {
    fn passes(&self, request: &ExpenseRequest) -> bool {
        self.remaining(request.department())
            .map(|remaining| request.amount() <= remaining)
            .unwrap_or(false)
    }
}

/// The injectable capability set backing every [`DecisionCheck`].
///
/// Each predicate defaults to [`AlwaysPass`] and can be swapped independently,
/// so tests and integrations never have to touch approver logic.
#[derive(Clone)]
pub struct DecisionChecks {
    receipt: Arc<dyn CheckPredicate>,
    budget: Arc<dyn CheckPredicate>,
    policy: Arc<dyn CheckPredicate>,
    strategic_alignment: Arc<dyn CheckPredicate>,
    board_approval: Arc<dyn CheckPredicate>,
}

impl Default for DecisionChecks {
    fn default() -> Self {
        let stub: Arc<dyn CheckPredicate> = Arc::new(AlwaysPass);
        Self {
            receipt: stub.clone(),
            budget: stub.clone(),
            policy: stub.clone(),
            strategic_alignment: stub.clone(),
            board_approval: stub,
        }
    }
}

impl fmt::Debug for DecisionChecks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionChecks").finish_non_exhaustive()
    }
}

impl DecisionChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the predicate behind `check`, leaving the other four untouched.
    pub fn with_check(
        mut self,
        check: DecisionCheck,
        predicate: impl CheckPredicate + 'static,
    ) -> Self {
        *self.slot_mut(check) = Arc::new(predicate);
        self
    }

    pub fn run(&self, check: DecisionCheck, request: &ExpenseRequest) -> bool {
        self.slot(check).passes(request)
    }

    fn slot(&self, check: DecisionCheck) -> &Arc<dyn CheckPredicate> {
        match check {
            DecisionCheck::Receipt => &self.receipt,
            DecisionCheck::Budget => &self.budget,
            DecisionCheck::Policy => &self.policy,
            DecisionCheck::StrategicAlignment => &self.strategic_alignment,
            DecisionCheck::BoardApproval => &self.board_approval,
        }
    }

    fn slot_mut(&mut self, check: DecisionCheck) -> &mut Arc<dyn CheckPredicate> {
        match check {
            DecisionCheck::Receipt => &mut self.receipt,
            DecisionCheck::Budget => &mut self.budget,
            DecisionCheck::Policy => &mut self.policy,
            DecisionCheck::StrategicAlignment => &mut self.strategic_alignment,
            DecisionCheck::BoardApproval => &mut self.board_approval,
        }
    }
}
