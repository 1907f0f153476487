// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over transactions and categories. Every function here
//! is a deterministic function of its inputs; "now" is always injected so
//! callers own the clock.

use crate::models::{
    Alerts, BudgetHealthEntry, BudgetProjection, BudgetStatus, Category, PeriodSummary,
    Transaction, TransactionDraft, TransactionKind,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;

const VELOCITY_MARGIN: u32 = 15;
const WARNING_PERCENT: u32 = 85;

fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

fn same_month(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Share of the month elapsed through `now`, as a percentage. The day
/// count is inclusive: the 5th of a 30-day month has 5 days elapsed.
pub fn expected_percent(now: NaiveDateTime) -> Decimal {
    let elapsed = Decimal::from(now.day());
    let total = Decimal::from(month_length(now.year(), now.month()));
    elapsed * Decimal::ONE_HUNDRED / total
}

/// All-time balance plus totals for the calendar day and month of `now`.
/// Only kind and date are consulted; future-dated and uncategorized
/// transactions count like any other.
pub fn period_summary(transactions: &[Transaction], now: NaiveDateTime) -> PeriodSummary {
    let mut summary = PeriodSummary {
        balance: Decimal::ZERO,
        today_income: Decimal::ZERO,
        today_expense: Decimal::ZERO,
        month_income: Decimal::ZERO,
        month_expense: Decimal::ZERO,
    };
    for t in transactions {
        match t.kind {
            TransactionKind::Income => {
                summary.balance += t.amount;
                if same_day(t.date, now) {
                    summary.today_income += t.amount;
                }
                if same_month(t.date, now) {
                    summary.month_income += t.amount;
                }
            }
            TransactionKind::Expense => {
                summary.balance -= t.amount;
                if same_day(t.date, now) {
                    summary.today_expense += t.amount;
                }
                if same_month(t.date, now) {
                    summary.month_expense += t.amount;
                }
            }
        }
    }
    summary
}

/// First match wins: a category already at or past its cap must never be
/// reported as merely pacing fast.
fn classify(percent: Decimal, expected: Decimal) -> BudgetStatus {
    if percent >= Decimal::ONE_HUNDRED {
        BudgetStatus::Critical
    } else if percent >= Decimal::from(WARNING_PERCENT) {
        BudgetStatus::Warning
    } else if percent > expected + Decimal::from(VELOCITY_MARGIN) {
        BudgetStatus::Fast
    } else {
        BudgetStatus::Healthy
    }
}

/// Per-category budget standing for the month of `now`, sorted by percent
/// used descending (stable, so ties keep category order). Categories
/// without a positive budget are absent from the result.
pub fn budget_health(
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDateTime,
) -> Vec<BudgetHealthEntry> {
    let mut spending: HashMap<i64, Decimal> = HashMap::new();
    for t in transactions {
        if t.kind != TransactionKind::Expense || !same_month(t.date, now) {
            continue;
        }
        if let Some(cat_id) = t.category_id {
            *spending.entry(cat_id).or_insert(Decimal::ZERO) += t.amount;
        }
    }

    let expected = expected_percent(now);
    let mut entries: Vec<BudgetHealthEntry> = categories
        .iter()
        .filter_map(|c| {
            let budget = c.active_budget()?;
            let spent = spending.get(&c.id).copied().unwrap_or(Decimal::ZERO);
            let percent = spent * Decimal::ONE_HUNDRED / budget;
            Some(BudgetHealthEntry {
                id: c.id,
                name: c.name.clone(),
                spent,
                remaining: (budget - spent).max(Decimal::ZERO),
                budget,
                percent,
                color: c.color.clone(),
                status: classify(percent, expected),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.percent.cmp(&a.percent));
    entries
}

/// Classification only; banners and notifications belong to the caller.
pub fn derive_alerts(
    summary: &PeriodSummary,
    health: &[BudgetHealthEntry],
    low_balance_warning: Decimal,
) -> Alerts {
    Alerts {
        is_low_balance: summary.balance < low_balance_warning,
        critical: health
            .iter()
            .filter(|h| h.status == BudgetStatus::Critical)
            .cloned()
            .collect(),
        warnings: health
            .iter()
            .filter(|h| matches!(h.status, BudgetStatus::Warning | BudgetStatus::Fast))
            .cloned()
            .collect(),
    }
}

/// What-if outlook for a candidate expense, bucketed by the month of the
/// draft's own date. `editing` names a transaction being replaced so its
/// prior amount is not double-counted. None unless the draft is an
/// expense against a budgeted category.
pub fn project_budget(
    draft: &TransactionDraft,
    editing: Option<i64>,
    transactions: &[Transaction],
    categories: &[Category],
) -> Option<BudgetProjection> {
    if draft.kind != TransactionKind::Expense {
        return None;
    }
    let cat_id = draft.category_id?;
    let category = categories.iter().find(|c| c.id == cat_id)?;
    let budget = category.active_budget()?;

    let mut current = Decimal::ZERO;
    for t in transactions {
        if t.kind == TransactionKind::Expense
            && t.category_id == Some(cat_id)
            && Some(t.id) != editing
            && same_month(t.date, draft.date)
        {
            current += t.amount;
        }
    }

    let projected = current + draft.amount;
    let approach_threshold = budget * Decimal::new(8, 1);
    Some(BudgetProjection {
        current,
        projected,
        budget,
        percent: projected * Decimal::ONE_HUNDRED / budget,
        is_over: projected > budget,
        is_approaching: projected > approach_threshold,
    })
}
