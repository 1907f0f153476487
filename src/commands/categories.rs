// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{TransactionKind, validate_budget};
use crate::store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            store::delete_category(conn, name)?;
            println!("Removed category '{}'", name);
        }
        Some(("set-budget", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = validate_budget(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
            store::set_category_budget(conn, name, amount)?;
            println!("Budget for '{}' set to {}", name, amount);
        }
        Some(("clear-budget", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            store::clear_category_budget(conn, name)?;
            println!("Cleared budget for '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = TransactionKind::parse(sub.get_one::<String>("type").unwrap())?;
    let color = sub.get_one::<String>("color").unwrap();
    let budget = match sub.get_one::<String>("budget") {
        Some(s) => Some(validate_budget(parse_decimal(s)?)?),
        None => None,
    };
    store::insert_category(conn, name, color, kind, budget)?;
    println!("Added category '{}'", name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let categories = store::load_categories(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &categories)? {
        let rows: Vec<Vec<String>> = categories
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.kind.as_str().to_string(),
                    c.color.clone(),
                    c.budget.map(|b| b.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Type", "Color", "Budget"], rows)
        );
    }
    Ok(())
}
