use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Approver, AuthorizationLimit, SuccessorLink};
use crate::workflows::expense::chain::ChainError;
use crate::workflows::expense::checks::DecisionCheck;

const SUPERVISOR_CHECKS: &[DecisionCheck] = &[DecisionCheck::Receipt, DecisionCheck::Budget];

const MANAGER_CHECKS: &[DecisionCheck] = &[
    DecisionCheck::Receipt,
    DecisionCheck::Budget,
    DecisionCheck::Policy,
];

const DIRECTOR_CHECKS: &[DecisionCheck] = &[
    DecisionCheck::Receipt,
    DecisionCheck::Budget,
    DecisionCheck::Policy,
    DecisionCheck::StrategicAlignment,
];

const CHIEF_EXECUTIVE_CHECKS: &[DecisionCheck] = &[
    DecisionCheck::Receipt,
    DecisionCheck::Budget,
    DecisionCheck::Policy,
    DecisionCheck::StrategicAlignment,
    DecisionCheck::BoardApproval,
];

/// Authority levels in ascending order. Each level checks everything the
/// level below it checks, plus more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Supervisor,
    Manager,
    Director,
    ChiefExecutive,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::Supervisor,
        Tier::Manager,
        Tier::Director,
        Tier::ChiefExecutive,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Tier::Supervisor => "Supervisor",
            Tier::Manager => "Manager",
            Tier::Director => "Director",
            Tier::ChiefExecutive => "CEO",
        }
    }

    pub fn default_limit(self) -> AuthorizationLimit {
        match self {
            Tier::Supervisor => AuthorizationLimit::UpTo(Decimal::from(100)),
            Tier::Manager => AuthorizationLimit::UpTo(Decimal::from(500)),
            Tier::Director => AuthorizationLimit::UpTo(Decimal::from(5000)),
            Tier::ChiefExecutive => AuthorizationLimit::Unlimited,
        }
    }

    pub const fn required_checks(self) -> &'static [DecisionCheck] {
        match self {
            Tier::Supervisor => SUPERVISOR_CHECKS,
            Tier::Manager => MANAGER_CHECKS,
            Tier::Director => DIRECTOR_CHECKS,
            Tier::ChiefExecutive => CHIEF_EXECUTIVE_CHECKS,
        }
    }
}

/// Approver for one of the standard [`Tier`]s.
#[derive(Debug)]
pub struct TierApprover {
    name: String,
    tier: Tier,
    limit: AuthorizationLimit,
    successor: SuccessorLink,
}

impl TierApprover {
    pub fn new(tier: Tier) -> Self {
        Self::named(tier.title(), tier)
    }

    pub fn named(name: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            tier,
            limit: tier.default_limit(),
            successor: SuccessorLink::new(),
        }
    }

    pub fn with_limit(mut self, limit: AuthorizationLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn shared(self) -> Arc<dyn Approver> {
        Arc::new(self)
    }
}

impl Approver for TierApprover {
    fn name(&self) -> &str {
        &self.name
    }

    fn limit(&self) -> AuthorizationLimit {
        self.limit
    }

    fn required_checks(&self) -> &[DecisionCheck] {
        self.tier.required_checks()
    }

    fn successor(&self) -> Option<Arc<dyn Approver>> {
        self.successor.get()
    }

    fn is_linked(&self) -> bool {
        self.successor.is_set()
    }

    fn try_set_successor(&self, successor: Option<&Arc<dyn Approver>>) -> Result<(), ChainError> {
        self.successor.set(&self.name, successor)
    }
}
