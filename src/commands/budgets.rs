// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::models::{TransactionDraft, TransactionKind, validate_amount};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, now_local, parse_datetime, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("health", sub)) => health(conn, sub)?,
        Some(("check", sub)) => check(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn health(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let transactions = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let settings = store::load_settings(conn)?;
    let entries = engine::budget_health(&transactions, &categories, now_local());

    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let ccy = &settings.currency;
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|h| {
                vec![
                    h.name.clone(),
                    fmt_money(&h.spent, ccy),
                    fmt_money(&h.budget, ccy),
                    fmt_money(&h.remaining, ccy),
                    format!("{}%", h.percent.round_dp(1)),
                    h.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Spent", "Budget", "Remaining", "Used", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

/// Dry-run of the entry form's budget outlook: nothing is written.
fn check(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category_name = sub.get_one::<String>("category").unwrap();
    let amount = validate_amount(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => now_local(),
    };
    let exclude = sub.get_one::<i64>("exclude").copied();

    let category = store::category_by_name(conn, category_name)?;
    let draft = TransactionDraft {
        kind: TransactionKind::Expense,
        amount,
        category_id: Some(category.id),
        date,
        note: None,
    };

    let transactions = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let settings = store::load_settings(conn)?;

    match engine::project_budget(&draft, exclude, &transactions, &categories) {
        Some(p) => {
            let ccy = &settings.currency;
            let verdict = if p.is_over {
                "over limit"
            } else if p.is_approaching {
                "approaching limit"
            } else {
                "within budget"
            };
            println!(
                "{}",
                pretty_table(
                    &["Current", "Projected", "Budget", "Used", "Verdict"],
                    vec![vec![
                        fmt_money(&p.current, ccy),
                        fmt_money(&p.projected, ccy),
                        fmt_money(&p.budget, ccy),
                        format!("{}%", p.percent.round_dp(1)),
                        verdict.to_string(),
                    ]],
                )
            );
        }
        None => println!(
            "No projection: '{}' has no budget to check against",
            category.name
        ),
    }
    Ok(())
}
