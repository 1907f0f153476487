// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed access to the SQLite store. Rows are mapped to the domain model
//! here so nothing above this layer ever sees storage field encodings;
//! malformed stored values fail loudly instead of being skipped.

use crate::models::{AppSettings, Category, Transaction, TransactionDraft, TransactionKind};
use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn encode_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Stored dates are full timestamps; a bare date is accepted as midnight.
pub fn decode_date(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATE_FORMAT) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
        .with_context(|| format!("Invalid stored date '{}'", s))
}

fn decode_kind(s: &str) -> Result<TransactionKind> {
    TransactionKind::parse(s).map_err(|e| anyhow!(e))
}

fn decode_amount(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored amount '{}'", s))
}

pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, amount, category_id, date, note FROM transactions
         ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let category_id: Option<i64> = r.get(3)?;
        let date: String = r.get(4)?;
        let note: Option<String> = r.get(5)?;
        out.push(Transaction {
            id,
            kind: decode_kind(&kind).with_context(|| format!("Transaction {}", id))?,
            amount: decode_amount(&amount).with_context(|| format!("Transaction {}", id))?,
            category_id,
            date: decode_date(&date).with_context(|| format!("Transaction {}", id))?,
            note,
        });
    }
    Ok(out)
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    let row: Option<(String, String, Option<i64>, String, Option<String>)> = conn
        .query_row(
            "SELECT type, amount, category_id, date, note FROM transactions WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .optional()?;
    let (kind, amount, category_id, date, note) =
        row.ok_or_else(|| anyhow!("Transaction {} not found", id))?;
    Ok(Transaction {
        id,
        kind: decode_kind(&kind)?,
        amount: decode_amount(&amount)?,
        category_id,
        date: decode_date(&date)?,
        note,
    })
}

pub fn insert_transaction(conn: &Connection, draft: &TransactionDraft) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(type, amount, category_id, date, note)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            draft.kind.as_str(),
            draft.amount.to_string(),
            draft.category_id,
            encode_date(draft.date),
            draft.note
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_transaction(conn: &Connection, id: i64, draft: &TransactionDraft) -> Result<()> {
    let changed = conn.execute(
        "UPDATE transactions SET type=?1, amount=?2, category_id=?3, date=?4, note=?5 WHERE id=?6",
        params![
            draft.kind.as_str(),
            draft.amount.to_string(),
            draft.category_id,
            encode_date(draft.date),
            draft.note,
            id
        ],
    )?;
    if changed == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    Ok(())
}

/// Insertion order, so stable sorts downstream keep the user's ordering.
pub fn load_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, color, type, budget FROM categories ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let color: String = r.get(2)?;
        let kind: String = r.get(3)?;
        let budget: Option<String> = r.get(4)?;
        out.push(Category {
            id,
            name,
            color,
            kind: decode_kind(&kind).with_context(|| format!("Category {}", id))?,
            budget: budget
                .map(|b| decode_amount(&b).with_context(|| format!("Category {}", id)))
                .transpose()?,
        });
    }
    Ok(out)
}

pub fn category_by_name(conn: &Connection, name: &str) -> Result<Category> {
    let categories = load_categories(conn)?;
    categories
        .into_iter()
        .find(|c| c.name == name)
        .ok_or_else(|| anyhow!("Category '{}' not found", name))
}

pub fn insert_category(
    conn: &Connection,
    name: &str,
    color: &str,
    kind: TransactionKind,
    budget: Option<Decimal>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO categories(name, color, type, budget) VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            color,
            kind.as_str(),
            budget.map(|b| b.to_string())
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Deletion is refused while transactions still reference the category.
pub fn delete_category(conn: &Connection, name: &str) -> Result<()> {
    let category = category_by_name(conn, name)?;
    let referenced: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE category_id=?1",
        params![category.id],
        |r| r.get(0),
    )?;
    if referenced > 0 {
        return Err(anyhow!(
            "Category '{}' is referenced by {} transaction(s); reassign them first",
            name,
            referenced
        ));
    }
    conn.execute("DELETE FROM categories WHERE id=?1", params![category.id])?;
    Ok(())
}

pub fn set_category_budget(conn: &Connection, name: &str, budget: Decimal) -> Result<()> {
    let changed = conn.execute(
        "UPDATE categories SET budget=?1 WHERE name=?2",
        params![budget.to_string(), name],
    )?;
    if changed == 0 {
        return Err(anyhow!("Category '{}' not found", name));
    }
    Ok(())
}

pub fn clear_category_budget(conn: &Connection, name: &str) -> Result<()> {
    let changed = conn.execute(
        "UPDATE categories SET budget=NULL WHERE name=?1",
        params![name],
    )?;
    if changed == 0 {
        return Err(anyhow!("Category '{}' not found", name));
    }
    Ok(())
}

/// First-use seed; no-op once any category exists.
pub fn seed_default_categories(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(());
    }
    let defaults: [(&str, &str, TransactionKind, Option<i64>); 6] = [
        ("Salary", "#10b981", TransactionKind::Income, None),
        ("Food", "#ef4444", TransactionKind::Expense, Some(15000)),
        ("Travel", "#f59e0b", TransactionKind::Expense, Some(5000)),
        ("Rent", "#3b82f6", TransactionKind::Expense, Some(25000)),
        ("Other", "#64748b", TransactionKind::Expense, None),
        ("Freelance", "#8b5cf6", TransactionKind::Income, None),
    ];
    for (name, color, kind, budget) in defaults {
        insert_category(conn, name, color, kind, budget.map(Decimal::from))?;
    }
    Ok(())
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn load_settings(conn: &Connection) -> Result<AppSettings> {
    let defaults = AppSettings::default();
    let currency = get_setting(conn, "currency")?.unwrap_or(defaults.currency);
    let daily_limit = match get_setting(conn, "daily_limit")? {
        Some(s) => decode_amount(&s).context("Setting 'daily_limit'")?,
        None => defaults.daily_limit,
    };
    let low_balance_warning = match get_setting(conn, "low_balance_warning")? {
        Some(s) => decode_amount(&s).context("Setting 'low_balance_warning'")?,
        None => defaults.low_balance_warning,
    };
    Ok(AppSettings {
        currency,
        daily_limit,
        low_balance_warning,
    })
}

pub fn save_settings(conn: &Connection, settings: &AppSettings) -> Result<()> {
    set_setting(conn, "currency", &settings.currency)?;
    set_setting(conn, "daily_limit", &settings.daily_limit.to_string())?;
    set_setting(
        conn,
        "low_balance_warning",
        &settings.low_balance_warning.to_string(),
    )?;
    Ok(())
}

/// Convenience for the entry paths: resolve a category by name and check
/// it against the transaction kind the way the entry form does.
pub fn resolve_category(
    conn: &Connection,
    name: &str,
    kind: TransactionKind,
) -> Result<Category> {
    let category = category_by_name(conn, name)?;
    crate::models::validate_kind_match(&category, kind)?;
    Ok(category)
}
