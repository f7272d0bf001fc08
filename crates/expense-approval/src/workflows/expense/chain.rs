use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::approver::Approver;
use crate::config::ApprovalConfig;

/// Construction errors for an approval chain. These are configuration
/// mistakes and surface before any request is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("approval chain has no approvers")]
    Empty,
    #[error("approver name '{name}' is already used in this chain")]
    DuplicateApprover { name: String },
    #[error("approver '{name}' is already linked into a chain")]
    AlreadyLinked { name: String },
    #[error("approval chain loops back to approver '{name}'")]
    Cycle { name: String },
}

/// Append-only builder for an [`ApprovalChain`].
///
/// Approvers are taken by value, so each one belongs to exactly one builder
/// and, once built, to exactly one chain.
#[derive(Default)]
pub struct ChainBuilder {
    approvers: Vec<Arc<dyn Approver>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `approver` to the end of the chain.
    pub fn append<A>(mut self, approver: A) -> Result<Self, ChainError>
    where
        A: Approver + 'static,
    {
        if self
            .approvers
            .iter()
            .any(|existing| existing.name() == approver.name())
        {
            return Err(ChainError::DuplicateApprover {
                name: approver.name().to_string(),
            });
        }

        if approver.is_linked() {
            return Err(ChainError::AlreadyLinked {
                name: approver.name().to_string(),
            });
        }

        self.approvers.push(Arc::new(approver));
        Ok(self)
    }

    /// Link every approver to the next one, seal the tail, and verify the
    /// result is acyclic. No link is set unless every approver is unlinked.
    pub fn build(self) -> Result<ApprovalChain, ChainError> {
        let head = self.approvers.first().cloned().ok_or(ChainError::Empty)?;

        if let Some(linked) = self.approvers.iter().find(|approver| approver.is_linked()) {
            return Err(ChainError::AlreadyLinked {
                name: linked.name().to_string(),
            });
        }

        for (index, approver) in self.approvers.iter().enumerate() {
            approver.try_set_successor(self.approvers.get(index + 1))?;
        }

        verify_acyclic(&head)?;

        debug!(
            approvers = ?self.approvers.iter().map(|a| a.name()).collect::<Vec<_>>(),
            "approval chain built"
        );

        Ok(ApprovalChain {
            head,
            approvers: self.approvers,
        })
    }
}

/// Ordered, acyclic, read-only sequence of approvers. Owns every approver it
/// links; successor links inside the approvers stay valid while it lives.
#[derive(Clone)]
pub struct ApprovalChain {
    head: Arc<dyn Approver>,
    approvers: Vec<Arc<dyn Approver>>,
}

impl ApprovalChain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Supervisor, Manager, Director, CEO with their default limits.
    pub fn standard() -> Result<Self, ChainError> {
        ApprovalConfig::default().standard_chain()
    }

    pub fn head(&self) -> &Arc<dyn Approver> {
        &self.head
    }

    pub fn approvers(&self) -> &[Arc<dyn Approver>] {
        &self.approvers
    }

    pub fn names(&self) -> Vec<&str> {
        self.approvers.iter().map(|approver| approver.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.approvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approvers.is_empty()
    }
}

impl fmt::Debug for ApprovalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApprovalChain")
            .field("approvers", &self.names())
            .finish()
    }
}

/// Walk from `head` and fail on the first approver reached twice.
pub(super) fn verify_acyclic(head: &Arc<dyn Approver>) -> Result<(), ChainError> {
    let mut seen = HashSet::new();
    let mut cursor = Some(head.clone());

    while let Some(approver) = cursor {
        if !seen.insert(Arc::as_ptr(&approver) as *const ()) {
            return Err(ChainError::Cycle {
                name: approver.name().to_string(),
            });
        }
        cursor = approver.successor();
    }

    Ok(())
}
