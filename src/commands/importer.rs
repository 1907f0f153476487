// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AppSettings, Category, Transaction, TransactionDraft};
use crate::store;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Deserialize;
use std::collections::HashMap;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let (categories, transactions) = import_snapshot(conn, path)?;
            println!(
                "Imported {} categories and {} transactions from {}",
                categories, transactions, path
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

#[derive(Deserialize)]
struct Snapshot {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    #[serde(default)]
    settings: Option<AppSettings>,
}

/// Merge a JSON snapshot into the store inside one DB transaction.
/// Categories are matched by name; snapshot ids are remapped, so a
/// snapshot from another install imports cleanly. Transactions whose
/// category is absent from the snapshot land as uncategorized.
pub fn import_snapshot(conn: &mut Connection, path: &str) -> Result<(usize, usize)> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open snapshot {}", path))?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).with_context(|| format!("Parse snapshot {}", path))?;

    let tx = conn.transaction()?;
    let mut id_map: HashMap<i64, i64> = HashMap::new();
    let mut new_categories = 0usize;

    for c in &snapshot.categories {
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM categories WHERE name=?1",
                params![&c.name],
                |r| r.get(0),
            )
            .optional()?;
        let local_id = match existing {
            Some(id) => id,
            None => {
                new_categories += 1;
                store::insert_category(&tx, &c.name, &c.color, c.kind, c.budget)?
            }
        };
        id_map.insert(c.id, local_id);
    }

    for t in &snapshot.transactions {
        let draft = TransactionDraft {
            kind: t.kind,
            amount: t.amount,
            category_id: t.category_id.and_then(|id| id_map.get(&id).copied()),
            date: t.date,
            note: t.note.clone(),
        };
        store::insert_transaction(&tx, &draft)?;
    }

    if let Some(settings) = &snapshot.settings {
        store::save_settings(&tx, settings)?;
    }

    tx.commit()?;
    Ok((new_categories, snapshot.transactions.len()))
}
