// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw-row integrity scan. Unlike the typed loaders, which fail fast on
//! the first bad value, this walks every row and reports all findings.

use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Unparseable dates and non-positive or malformed amounts
    let mut stmt = conn.prepare("SELECT id, date, amount FROM transactions ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let amount: String = r.get(2)?;
        if store::decode_date(&date).is_err() {
            rows.push(vec![
                "invalid_date".into(),
                format!("transaction {}: '{}'", id, date),
            ]);
        }
        match amount.parse::<Decimal>() {
            Ok(a) if a <= Decimal::ZERO => rows.push(vec![
                "non_positive_amount".into(),
                format!("transaction {}: {}", id, a),
            ]),
            Ok(_) => {}
            Err(_) => rows.push(vec![
                "invalid_amount".into(),
                format!("transaction {}: '{}'", id, amount),
            ]),
        }
    }

    // 2) References to categories that no longer exist
    let mut stmt2 = conn.prepare(
        "SELECT t.id, t.category_id FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let cat: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_category_ref".into(),
            format!("transaction {} -> category {}", id, cat),
        ]);
    }

    // 3) Transaction kind disagreeing with its category's kind
    let mut stmt3 = conn.prepare(
        "SELECT t.id, t.type, c.name, c.type FROM transactions t
         JOIN categories c ON t.category_id=c.id
         WHERE t.type != c.type",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let t_kind: String = r.get(1)?;
        let c_name: String = r.get(2)?;
        let c_kind: String = r.get(3)?;
        rows.push(vec![
            "kind_mismatch".into(),
            format!("transaction {} is {} but '{}' is {}", id, t_kind, c_name, c_kind),
        ]);
    }

    // 4) Budgets that are malformed or not positive
    let mut stmt4 =
        conn.prepare("SELECT name, budget FROM categories WHERE budget IS NOT NULL")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let name: String = r.get(0)?;
        let budget: String = r.get(1)?;
        match budget.parse::<Decimal>() {
            Ok(b) if b <= Decimal::ZERO => rows.push(vec![
                "non_positive_budget".into(),
                format!("category '{}': {}", name, b),
            ]),
            Ok(_) => {}
            Err(_) => rows.push(vec![
                "invalid_budget".into(),
                format!("category '{}': '{}'", name, budget),
            ]),
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
