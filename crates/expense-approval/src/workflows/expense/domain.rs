use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validation errors raised while constructing an [`ExpenseRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("expense amount must not be negative (found {0})")]
    NegativeAmount(Decimal),
    #[error("expense amount '{0}' is not a valid decimal")]
    InvalidAmount(String),
    #[error("expense request is missing required field '{0}'")]
    MissingField(&'static str),
}

/// A single expense claim routed through the approval chain.
///
/// Fields are private so a constructed request cannot be altered while it is
/// travelling between approvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseRequestDraft")]
pub struct ExpenseRequest {
    requester: String,
    amount: Decimal,
    purpose: String,
    department: String,
}

impl ExpenseRequest {
    pub fn new(
        requester: impl Into<String>,
        amount: Decimal,
        purpose: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let requester = required("requester", requester.into())?;
        let purpose = required("purpose", purpose.into())?;
        let department = required("department", department.into())?;

        if amount < Decimal::ZERO {
            return Err(RequestError::NegativeAmount(amount));
        }

        Ok(Self {
            requester,
            amount,
            purpose,
            department,
        })
    }

    pub fn requester(&self) -> &str {
        &self.requester
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn department(&self) -> &str {
        &self.department
    }
}

fn required(field: &'static str, value: String) -> Result<String, RequestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RequestError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Unvalidated wire shape used by deserializers (CSV rows, JSON payloads).
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRequestDraft {
    #[serde(default)]
    pub requester: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub department: String,
}

impl TryFrom<ExpenseRequestDraft> for ExpenseRequest {
    type Error = RequestError;

    fn try_from(draft: ExpenseRequestDraft) -> Result<Self, Self::Error> {
        let raw_amount = draft.amount.trim();
        if raw_amount.is_empty() {
            return Err(RequestError::MissingField("amount"));
        }
        let amount = Decimal::from_str(raw_amount)
            .map_err(|_| RequestError::InvalidAmount(raw_amount.to_string()))?;

        ExpenseRequest::new(draft.requester, amount, draft.purpose, draft.department)
    }
}
