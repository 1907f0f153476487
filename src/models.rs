// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(TransactionKind::Income),
            "EXPENSE" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

/// Field set for a transaction about to be created or edited. The id of
/// the row being replaced (if any) travels separately so the budget
/// projection can exclude it.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub budget: Option<Decimal>,
}

impl Category {
    /// A budget of zero or less counts as "unbudgeted".
    pub fn active_budget(&self) -> Option<Decimal> {
        self.budget.filter(|b| *b > Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency: String,
    pub daily_limit: Decimal,
    pub low_balance_warning: Decimal,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            currency: "INR".to_string(),
            daily_limit: Decimal::from(1000),
            low_balance_warning: Decimal::from(2000),
        }
    }
}

/// All-time balance plus today's and this month's totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub balance: Decimal,
    pub today_income: Decimal,
    pub today_expense: Decimal,
    pub month_income: Decimal,
    pub month_expense: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Critical,
    Warning,
    Fast,
    Healthy,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Critical => "critical",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Fast => "fast",
            BudgetStatus::Healthy => "healthy",
        }
    }
}

/// Current-month spend of one budgeted category measured against its
/// budget.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetHealthEntry {
    pub id: i64,
    pub name: String,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub budget: Decimal,
    pub percent: Decimal,
    pub color: String,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alerts {
    pub is_low_balance: bool,
    pub critical: Vec<BudgetHealthEntry>,
    pub warnings: Vec<BudgetHealthEntry>,
}

/// What-if outlook for a candidate expense against its category budget.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetProjection {
    pub current: Decimal,
    pub projected: Decimal,
    pub budget: Decimal,
    pub percent: Decimal,
    pub is_over: bool,
    pub is_approaching: bool,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unknown transaction type '{0}', expected INCOME or EXPENSE")]
    UnknownKind(String),
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("budget must be greater than zero, got {0}")]
    NonPositiveBudget(Decimal),
    #[error("category '{category}' is {category_kind} but the transaction is {transaction_kind}")]
    KindMismatch {
        category: String,
        category_kind: &'static str,
        transaction_kind: &'static str,
    },
}

pub fn validate_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

pub fn validate_budget(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveBudget(amount));
    }
    Ok(amount)
}

/// The entry-form rule that a transaction's category carries the same
/// kind; the schema does not hard-enforce it.
pub fn validate_kind_match(
    category: &Category,
    kind: TransactionKind,
) -> Result<(), ValidationError> {
    if category.kind != kind {
        return Err(ValidationError::KindMismatch {
            category: category.name.clone(),
            category_kind: category.kind.as_str(),
            transaction_kind: kind.as_str(),
        });
    }
    Ok(())
}
