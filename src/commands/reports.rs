// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Transaction, TransactionKind};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        Some(("year", sub)) => year(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn totals(transactions: &[&Transaction]) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => expense += t.amount,
        }
    }
    (income, expense)
}

/// Expense totals keyed by category name, missing references bucketed
/// under "Uncategorized", largest first.
fn category_breakdown(
    transactions: &[&Transaction],
    categories: &[Category],
) -> Vec<(String, Decimal)> {
    let names: HashMap<i64, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();
    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for t in transactions {
        if t.kind != TransactionKind::Expense {
            continue;
        }
        let name = t
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or("Uncategorized")
            .to_string();
        *agg.entry(name).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut items: Vec<(String, Decimal)> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month_arg = sub.get_one::<String>("month").unwrap();
    let (y, mo) = parse_month(month_arg)?;

    let transactions = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let settings = store::load_settings(conn)?;

    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date.year() == y && t.date.month() == mo)
        .collect();
    let (income, expense) = totals(&in_month);
    let savings = income - expense;
    let breakdown = category_breakdown(&in_month, &categories);

    let doc = json!({
        "month": month_arg,
        "income": income,
        "expense": expense,
        "savings": savings,
        "by_category": breakdown
            .iter()
            .map(|(name, spent)| json!({"name": name, "spent": spent}))
            .collect::<Vec<_>>(),
    });
    if maybe_print_json(json_flag, jsonl_flag, &doc)? {
        return Ok(());
    }

    let ccy = &settings.currency;
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Savings"],
            vec![vec![
                month_arg.clone(),
                fmt_money(&income, ccy),
                fmt_money(&expense, ccy),
                fmt_money(&savings, ccy),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = breakdown
        .iter()
        .map(|(name, spent)| vec![name.clone(), fmt_money(spent, ccy)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

fn year(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let y = *sub.get_one::<i32>("year").unwrap();

    let transactions = store::load_transactions(conn)?;
    let settings = store::load_settings(conn)?;

    let mut data = Vec::new();
    for mo in 1..=12u32 {
        let in_month: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.date.year() == y && t.date.month() == mo)
            .collect();
        let (income, expense) = totals(&in_month);
        data.push((format!("{}-{:02}", y, mo), income, expense, income - expense));
    }

    let doc: Vec<_> = data
        .iter()
        .map(|(m, income, expense, savings)| {
            json!({"month": m, "income": income, "expense": expense, "savings": savings})
        })
        .collect();
    if maybe_print_json(json_flag, jsonl_flag, &doc)? {
        return Ok(());
    }

    let ccy = &settings.currency;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|(m, income, expense, savings)| {
            vec![
                m.clone(),
                fmt_money(income, ccy),
                fmt_money(expense, ccy),
                fmt_money(savings, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Savings"], rows)
    );
    Ok(())
}
