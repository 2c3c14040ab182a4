// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-document key-value storage. Every value is a JSON blob that is read,
//! mutated in memory and written back in full; there are no partial updates.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_TRANSACTIONS_KEY: &str = "transactions";
pub const REPORTS_KEY: &str = "reports";
pub const ACTIVE_REPORT_KEY: &str = "@active_report_id";
pub const CUSTOM_CATEGORIES_KEY: &str = "custom_categories";
pub const GOALS_KEY: &str = "goals";
pub const STATS_KEY: &str = "@user_stats";

pub fn report_transactions_key(report_id: &str) -> String {
    format!("{}_{}", DEFAULT_TRANSACTIONS_KEY, report_id)
}

pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
        .with_context(|| format!("Read key '{}'", key))?;
    Ok(v)
}

pub fn set_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![key, value],
    )
    .with_context(|| format!("Write key '{}'", key))?;
    tracing::debug!(key, bytes = value.len(), "stored value");
    Ok(())
}

/// Returns true when a value was actually deleted.
pub fn remove(conn: &Connection, key: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM kv_store WHERE key=?1", params![key])
        .with_context(|| format!("Delete key '{}'", key))?;
    Ok(n > 0)
}

pub fn keys_with_prefix(conn: &Connection, prefix: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT key FROM kv_store WHERE substr(key, 1, ?2)=?1 ORDER BY key")?;
    let rows = stmt.query_map(params![prefix, prefix.chars().count() as i64], |r| {
        r.get::<_, String>(0)
    })?;
    let mut keys = Vec::new();
    for row in rows {
        keys.push(row?);
    }
    Ok(keys)
}

pub fn load_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    match get_raw(conn, key)? {
        Some(s) => {
            let v = serde_json::from_str(&s)
                .with_context(|| format!("Malformed value stored at '{}'", key))?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(
    conn: &Connection,
    key: &str,
) -> Result<T> {
    Ok(load_json(conn, key)?.unwrap_or_default())
}

pub fn save_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, v: &T) -> Result<()> {
    let s = serde_json::to_string(v)?;
    set_raw(conn, key, &s)
}
