// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, now_local, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let transactions = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let settings = store::load_settings(conn)?;
    let now = now_local();

    let summary = engine::period_summary(&transactions, now);
    let health = engine::budget_health(&transactions, &categories, now);
    let alerts = engine::derive_alerts(&summary, &health, settings.low_balance_warning);

    let doc = json!({
        "summary": summary,
        "budget_health": health,
        "alerts": alerts,
    });
    if maybe_print_json(json_flag, jsonl_flag, &doc)? {
        return Ok(());
    }

    let ccy = &settings.currency;
    println!(
        "{}",
        pretty_table(
            &["Balance", "Today In", "Today Out", "Month In", "Month Out"],
            vec![vec![
                fmt_money(&summary.balance, ccy),
                fmt_money(&summary.today_income, ccy),
                fmt_money(&summary.today_expense, ccy),
                fmt_money(&summary.month_income, ccy),
                fmt_money(&summary.month_expense, ccy),
            ]],
        )
    );

    if alerts.is_low_balance {
        println!(
            "⚠ Low balance: {} is below your {} threshold",
            fmt_money(&summary.balance, ccy),
            fmt_money(&settings.low_balance_warning, ccy)
        );
    }
    for b in &alerts.critical {
        println!(
            "⚠ Limit exceeded: {} at {}% of budget ({} spent)",
            b.name,
            b.percent.round_dp(0),
            fmt_money(&b.spent, ccy)
        );
    }
    for b in &alerts.warnings {
        println!(
            "⚠ Near budget: {} at {}% ({})",
            b.name,
            b.percent.round_dp(0),
            b.status.as_str()
        );
    }

    if health.is_empty() {
        println!("No active budget limits. Set one with 'category set-budget'.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = health
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
    Ok(())
}
