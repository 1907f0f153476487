// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use balancebook::models::{TransactionDraft, TransactionKind};
use balancebook::{cli, commands::transactions, db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    let cat_id = store::insert_category(&conn, "Food", "#ef4444", TransactionKind::Expense, None)
        .unwrap();
    for day in 1..=3u32 {
        let draft = TransactionDraft {
            kind: TransactionKind::Expense,
            amount: Decimal::from(10 * day as i64),
            category_id: Some(cat_id),
            date: NaiveDate::from_ymd_opt(2025, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            note: None,
        };
        store::insert_transaction(&conn, &draft).unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let sub = list_matches(&["balancebook", "tx", "list", "--limit", "2"]);
    let rows = transactions::query_rows(&conn, &sub).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03T09:00:00");
}

#[test]
fn list_filters_by_month_and_type() {
    let conn = setup();
    let draft = TransactionDraft {
        kind: TransactionKind::Income,
        amount: Decimal::from(5000),
        category_id: None,
        date: NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        note: None,
    };
    store::insert_transaction(&conn, &draft).unwrap();

    let sub = list_matches(&["balancebook", "tx", "list", "--month", "2025-01"]);
    assert_eq!(transactions::query_rows(&conn, &sub).unwrap().len(), 3);

    let sub = list_matches(&["balancebook", "tx", "list", "--type", "income"]);
    let rows = transactions::query_rows(&conn, &sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "INCOME");
}

#[test]
fn missing_category_reads_uncategorized() {
    let conn = setup();
    let draft = TransactionDraft {
        kind: TransactionKind::Expense,
        amount: Decimal::from(7),
        category_id: None,
        date: NaiveDate::from_ymd_opt(2025, 1, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        note: None,
    };
    store::insert_transaction(&conn, &draft).unwrap();

    let sub = list_matches(&["balancebook", "tx", "list", "--limit", "1"]);
    let rows = transactions::query_rows(&conn, &sub).unwrap();
    assert_eq!(rows[0].category, "Uncategorized");
}
