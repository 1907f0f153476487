// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use balancebook::engine;
use balancebook::models::{Category, Transaction, TransactionDraft, TransactionKind};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn spend(id: i64, cat: i64, amount: i64, date: NaiveDateTime) -> Transaction {
    Transaction {
        id,
        kind: TransactionKind::Expense,
        amount: Decimal::from(amount),
        category_id: Some(cat),
        date,
        note: None,
    }
}

fn food(budget: Option<i64>) -> Vec<Category> {
    vec![Category {
        id: 1,
        name: "Food".to_string(),
        color: "#ef4444".to_string(),
        kind: TransactionKind::Expense,
        budget: budget.map(Decimal::from),
    }]
}

fn draft(amount: i64, date: NaiveDateTime) -> TransactionDraft {
    TransactionDraft {
        kind: TransactionKind::Expense,
        amount: Decimal::from(amount),
        category_id: Some(1),
        date,
        note: None,
    }
}

#[test]
fn editing_does_not_double_count_own_amount() {
    let existing = vec![
        spend(7, 1, 500, at(2025, 4, 5)),
        spend(8, 1, 100, at(2025, 4, 6)),
    ];
    let p = engine::project_budget(&draft(500, at(2025, 4, 5)), Some(7), &existing, &food(Some(1000)))
        .unwrap();
    assert_eq!(p.current, Decimal::from(100));
    assert_eq!(p.projected, Decimal::from(600));

    // Same draft as a brand new transaction does count the 500
    let p = engine::project_budget(&draft(500, at(2025, 4, 5)), None, &existing, &food(Some(1000)))
        .unwrap();
    assert_eq!(p.current, Decimal::from(600));
    assert_eq!(p.projected, Decimal::from(1100));
    assert!(p.is_over);
}

#[test]
fn no_projection_for_income_or_unbudgeted() {
    let existing = vec![spend(1, 1, 100, at(2025, 4, 5))];
    let mut income = draft(500, at(2025, 4, 5));
    income.kind = TransactionKind::Income;
    assert!(engine::project_budget(&income, None, &existing, &food(Some(1000))).is_none());
    assert!(engine::project_budget(&draft(500, at(2025, 4, 5)), None, &existing, &food(None)).is_none());
    assert!(engine::project_budget(&draft(500, at(2025, 4, 5)), None, &existing, &food(Some(0))).is_none());
}

#[test]
fn approaching_and_over_are_strict_comparisons() {
    let categories = food(Some(1000));
    let none: Vec<Transaction> = Vec::new();

    // Exactly 80% of budget: not approaching
    let p = engine::project_budget(&draft(800, at(2025, 4, 5)), None, &none, &categories).unwrap();
    assert!(!p.is_approaching);
    assert!(!p.is_over);

    let p = engine::project_budget(&draft(801, at(2025, 4, 5)), None, &none, &categories).unwrap();
    assert!(p.is_approaching);
    assert!(!p.is_over);

    // Exactly at budget: approaching but not over
    let p = engine::project_budget(&draft(1000, at(2025, 4, 5)), None, &none, &categories).unwrap();
    assert!(p.is_approaching);
    assert!(!p.is_over);
    assert_eq!(p.percent, Decimal::from(100));

    let p = engine::project_budget(&draft(1001, at(2025, 4, 5)), None, &none, &categories).unwrap();
    assert!(p.is_over);
}

#[test]
fn projection_buckets_by_the_drafts_month() {
    let existing = vec![spend(1, 1, 900, at(2025, 3, 28))];
    let p = engine::project_budget(&draft(100, at(2025, 4, 2)), None, &existing, &food(Some(1000)))
        .unwrap();
    // March spend is outside the draft's month
    assert_eq!(p.current, Decimal::ZERO);
    assert_eq!(p.projected, Decimal::from(100));
    assert!(!p.is_approaching);
}
