// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use balancebook::engine;
use balancebook::models::{BudgetStatus, Category, Transaction, TransactionKind};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn spend(id: i64, cat: i64, amount: &str, date: NaiveDateTime) -> Transaction {
    Transaction {
        id,
        kind: TransactionKind::Expense,
        amount: amount.parse().unwrap(),
        category_id: Some(cat),
        date,
        note: None,
    }
}

fn cat(id: i64, name: &str, budget: Option<i64>) -> Category {
    Category {
        id,
        name: name.to_string(),
        color: "#ef4444".to_string(),
        kind: TransactionKind::Expense,
        budget: budget.map(Decimal::from),
    }
}

#[test]
fn critical_takes_priority_over_fast() {
    // Day 1 of the month: expected percent is tiny, so the pace heuristic
    // would also fire; the absolute cap must win.
    let now = at(2025, 4, 1, 12, 0, 0);
    let categories = vec![cat(1, "Food", Some(1000))];
    let transactions = vec![spend(1, 1, "1000", at(2025, 4, 1, 9, 0, 0))];
    let health = engine::budget_health(&transactions, &categories, now);
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].status, BudgetStatus::Critical);
    assert_eq!(health[0].percent, Decimal::from(100));
    assert_eq!(health[0].remaining, Decimal::ZERO);
}

#[test]
fn velocity_threshold_is_strict() {
    // April 15th: 15 of 30 days elapsed, expected percent exactly 50.
    let now = at(2025, 4, 15, 12, 0, 0);
    let categories = vec![cat(1, "Food", Some(1000))];

    // percent == expected + 15 exactly: not fast
    let exactly = vec![spend(1, 1, "650", at(2025, 4, 10, 9, 0, 0))];
    let health = engine::budget_health(&exactly, &categories, now);
    assert_eq!(health[0].status, BudgetStatus::Healthy);

    // one rupee past the margin: fast
    let past = vec![spend(1, 1, "650.01", at(2025, 4, 10, 9, 0, 0))];
    let health = engine::budget_health(&past, &categories, now);
    assert_eq!(health[0].status, BudgetStatus::Fast);
}

#[test]
fn warning_at_85_percent_mid_month() {
    // 850 of 1000 spent by the 15th of a 30-day month: expected percent
    // is 50, percent is 85, and warning wins over fast.
    let now = at(2025, 4, 15, 12, 0, 0);
    let categories = vec![cat(1, "food", Some(1000))];
    let transactions = vec![spend(1, 1, "850", at(2025, 4, 3, 9, 0, 0))];
    let health = engine::budget_health(&transactions, &categories, now);
    assert_eq!(health[0].status, BudgetStatus::Warning);
    assert_eq!(health[0].percent, Decimal::from(85));
    assert_eq!(health[0].remaining, Decimal::from(150));
}

#[test]
fn unbudgeted_categories_are_absent() {
    let now = at(2025, 4, 15, 12, 0, 0);
    let categories = vec![
        cat(1, "NoBudget", None),
        Category {
            budget: Some(Decimal::ZERO),
            ..cat(2, "ZeroBudget", None)
        },
        cat(3, "Budgeted", Some(500)),
    ];
    let transactions = vec![
        spend(1, 1, "900", at(2025, 4, 2, 9, 0, 0)),
        spend(2, 2, "900", at(2025, 4, 2, 9, 0, 0)),
    ];
    let health = engine::budget_health(&transactions, &categories, now);
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].name, "Budgeted");
    assert_eq!(health[0].spent, Decimal::ZERO);
}

#[test]
fn only_current_month_expenses_count_as_spend() {
    let now = at(2025, 4, 15, 12, 0, 0);
    let categories = vec![cat(1, "Food", Some(1000))];
    let transactions = vec![
        spend(1, 1, "400", at(2025, 3, 31, 23, 59, 59)),
        spend(2, 1, "200", at(2025, 4, 30, 23, 59, 59)),
        // Income in the same category id must not count as spend
        Transaction {
            id: 3,
            kind: TransactionKind::Income,
            amount: Decimal::from(50),
            category_id: Some(1),
            date: at(2025, 4, 10, 9, 0, 0),
            note: None,
        },
    ];
    let health = engine::budget_health(&transactions, &categories, now);
    assert_eq!(health[0].spent, Decimal::from(200));
}

#[test]
fn sorted_by_percent_descending_stable() {
    let now = at(2025, 4, 15, 12, 0, 0);
    let categories = vec![
        cat(1, "A", Some(1000)), // 10%
        cat(2, "B", Some(1000)), // 30%
        cat(3, "C", Some(2000)), // 30%, same percent as B, later category
    ];
    let transactions = vec![
        spend(1, 1, "100", at(2025, 4, 2, 9, 0, 0)),
        spend(2, 2, "300", at(2025, 4, 2, 9, 0, 0)),
        spend(3, 3, "600", at(2025, 4, 2, 9, 0, 0)),
    ];
    let health = engine::budget_health(&transactions, &categories, now);
    let names: Vec<&str> = health.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);
}

#[test]
fn expected_percent_counts_days_inclusive() {
    // The 15th of a 30-day month is 15 days elapsed, not 14
    assert_eq!(
        engine::expected_percent(at(2025, 4, 15, 0, 0, 0)),
        Decimal::from(50)
    );
    assert_eq!(
        engine::expected_percent(at(2025, 4, 30, 23, 59, 59)),
        Decimal::from(100)
    );
    assert_eq!(engine::month_length(2024, 2), 29);
    assert_eq!(engine::month_length(2025, 2), 28);
}

#[test]
fn spend_without_category_matches_no_budget() {
    let now = at(2025, 4, 15, 12, 0, 0);
    let categories = vec![cat(1, "Food", Some(1000))];
    let transactions = vec![Transaction {
        id: 1,
        kind: TransactionKind::Expense,
        amount: Decimal::from(400),
        category_id: None,
        date: at(2025, 4, 10, 9, 0, 0),
        note: None,
    }];
    let health = engine::budget_health(&transactions, &categories, now);
    assert_eq!(health[0].spent, Decimal::ZERO);
}
