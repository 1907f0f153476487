// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::models::{BudgetProjection, TransactionDraft, TransactionKind, validate_amount};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, now_local, parse_datetime, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn print_outlook(projection: &BudgetProjection, currency: &str) {
    if projection.is_over {
        println!(
            "⚠ Over monthly limit: projected {} of {} ({}% used)",
            fmt_money(&projection.projected, currency),
            fmt_money(&projection.budget, currency),
            projection.percent.round_dp(0)
        );
    } else if projection.is_approaching {
        println!(
            "⚠ Approaching limit: projected {} of {} ({}% used)",
            fmt_money(&projection.projected, currency),
            fmt_money(&projection.budget, currency),
            projection.percent.round_dp(0)
        );
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TransactionKind::parse(sub.get_one::<String>("type").unwrap())?;
    let amount = validate_amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let category_name = sub.get_one::<String>("category").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => now_local(),
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let category = store::resolve_category(conn, category_name, kind)?;
    let draft = TransactionDraft {
        kind,
        amount,
        category_id: Some(category.id),
        date,
        note,
    };

    let transactions = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let settings = store::load_settings(conn)?;
    if let Some(projection) = engine::project_budget(&draft, None, &transactions, &categories) {
        print_outlook(&projection, &settings.currency);
    }

    let id = store::insert_transaction(conn, &draft)?;
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        kind.as_str().to_lowercase(),
        fmt_money(&amount, &settings.currency),
        date.date(),
        category.name,
        id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let existing = store::get_transaction(conn, id)?;

    let kind = match sub.get_one::<String>("type") {
        Some(s) => TransactionKind::parse(s)?,
        None => existing.kind,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => validate_amount(parse_decimal(s)?)?,
        None => existing.amount,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => existing.date,
    };
    let note = match sub.get_one::<String>("note") {
        Some(s) => Some(s.to_string()),
        None => existing.note.clone(),
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(store::resolve_category(conn, name, kind)?.id),
        None => existing.category_id,
    };

    let draft = TransactionDraft {
        kind,
        amount,
        category_id,
        date,
        note,
    };

    let transactions = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let settings = store::load_settings(conn)?;
    if let Some(projection) = engine::project_budget(&draft, Some(id), &transactions, &categories) {
        print_outlook(&projection, &settings.currency);
    }

    store::update_transaction(conn, id, &draft)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_transaction(conn, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Type", "Amount", "Category", "Note"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, t.type, t.amount, c.name, t.note
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        sql.push_str(" AND t.type=?");
        params_vec.push(kind.to_uppercase());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let category: Option<String> = r.get(4)?;
        let note: Option<String> = r.get(5)?;
        data.push(TransactionRow {
            id,
            date,
            kind,
            amount,
            category: category.unwrap_or_else(|| "Uncategorized".into()),
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}
