// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use balancebook::commands::{exporter, importer};
use balancebook::models::{TransactionDraft, TransactionKind};
use balancebook::{db, store};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn expense(amount: i64, category_id: Option<i64>) -> TransactionDraft {
    TransactionDraft {
        kind: TransactionKind::Expense,
        amount: Decimal::from(amount),
        category_id,
        date: NaiveDate::from_ymd_opt(2025, 8, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        note: Some("snapshot test".to_string()),
    }
}

#[test]
fn snapshot_roundtrip_remaps_category_ids() {
    let source = db::open_in_memory().unwrap();
    // Push the id sequence so "Food" has a different id than it will get
    // in the target database.
    store::insert_category(&source, "Salary", "#10b981", TransactionKind::Income, None).unwrap();
    let food_src = store::insert_category(
        &source,
        "Food",
        "#ef4444",
        TransactionKind::Expense,
        Some(Decimal::from(1000)),
    )
    .unwrap();
    store::insert_transaction(&source, &expense(250, Some(food_src))).unwrap();
    store::set_setting(&source, "low_balance_warning", "3500").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    let path = path.to_str().unwrap();
    exporter::write_snapshot(&source, path).unwrap();

    let mut target = db::open_in_memory().unwrap();
    let food_dst = store::insert_category(
        &target,
        "Food",
        "#ef4444",
        TransactionKind::Expense,
        Some(Decimal::from(1000)),
    )
    .unwrap();
    assert_ne!(food_src, food_dst);

    let (new_categories, imported) = importer::import_snapshot(&mut target, path).unwrap();
    // Food already existed, only Salary is new
    assert_eq!(new_categories, 1);
    assert_eq!(imported, 1);

    let transactions = store::load_transactions(&target).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].category_id, Some(food_dst));
    assert_eq!(transactions[0].amount, Decimal::from(250));
    assert_eq!(transactions[0].note.as_deref(), Some("snapshot test"));

    let settings = store::load_settings(&target).unwrap();
    assert_eq!(settings.low_balance_warning, Decimal::from(3500));
}

#[test]
fn snapshot_import_is_atomic_on_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut target = db::open_in_memory().unwrap();
    store::insert_transaction(&target, &expense(10, None)).unwrap();

    let err = importer::import_snapshot(&mut target, path.to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Parse snapshot"));
    assert_eq!(store::load_transactions(&target).unwrap().len(), 1);
}
