// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = store::load_settings(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &settings)? {
        println!(
            "{}",
            pretty_table(
                &["Currency", "Daily Limit", "Low Balance Warning"],
                vec![vec![
                    settings.currency.clone(),
                    settings.daily_limit.to_string(),
                    settings.low_balance_warning.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut changed = false;
    if let Some(ccy) = sub.get_one::<String>("currency") {
        store::set_setting(conn, "currency", &ccy.to_uppercase())?;
        changed = true;
    }
    if let Some(s) = sub.get_one::<String>("daily-limit") {
        store::set_setting(conn, "daily_limit", &parse_decimal(s)?.to_string())?;
        changed = true;
    }
    if let Some(s) = sub.get_one::<String>("low-balance-warning") {
        store::set_setting(conn, "low_balance_warning", &parse_decimal(s)?.to_string())?;
        changed = true;
    }
    if !changed {
        return Err(anyhow!(
            "Nothing to set: pass --currency, --daily-limit, or --low-balance-warning"
        ));
    }
    println!("Settings updated");
    Ok(())
}
