// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::categories::{self, COLOR_PALETTE};
use crate::error::LedgerError;
use crate::models::Report;
use crate::{store, utils};

pub fn load(conn: &Connection) -> Result<Vec<Report>> {
    store::load_json_or_default(conn, store::REPORTS_KEY)
}

fn save(conn: &Connection, reports: &[Report]) -> Result<()> {
    store::save_json(conn, store::REPORTS_KEY, reports)
}

pub fn active_id(conn: &Connection) -> Result<Option<String>> {
    Ok(store::get_raw(conn, store::ACTIVE_REPORT_KEY)?.filter(|s| !s.is_empty()))
}

pub fn active(conn: &Connection) -> Result<Option<Report>> {
    let Some(id) = active_id(conn)? else {
        return Ok(None);
    };
    Ok(load(conn)?.into_iter().find(|r| r.id == id))
}

pub fn set_active(conn: &Connection, id: &str) -> Result<Report> {
    let report = load(conn)?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| LedgerError::ReportNotFound(id.to_string()))?;
    store::set_raw(conn, store::ACTIVE_REPORT_KEY, &report.id)?;
    tracing::info!(report = %report.id, "active report switched");
    Ok(report)
}

/// Back to the default ledger.
pub fn clear_active(conn: &Connection) -> Result<()> {
    store::remove(conn, store::ACTIVE_REPORT_KEY)?;
    Ok(())
}

/// Creates a report and makes it the active one.
pub fn add(
    conn: &Connection,
    name: &str,
    color: Option<&str>,
    period: &str,
    now: DateTime<Utc>,
) -> Result<Report> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyReportName.into());
    }
    let color = categories::parse_color(color.unwrap_or(COLOR_PALETTE[2]))?;
    let period = utils::parse_month(period)?;
    let mut reports = load(conn)?;
    let id = utils::next_id(reports.iter().map(|r| r.id.as_str()), now.timestamp_millis());
    let report = Report {
        id,
        name: name.to_string(),
        color,
        period,
        created_at: now,
    };
    reports.push(report.clone());
    save(conn, &reports)?;
    store::set_raw(conn, store::ACTIVE_REPORT_KEY, &report.id)?;
    tracing::info!(report = %report.id, name = %report.name, "report created");
    Ok(report)
}

#[derive(Debug, Clone, Default)]
pub struct ReportEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    pub period: Option<String>,
}

pub fn update(conn: &Connection, id: &str, edit: ReportEdit) -> Result<Report> {
    let mut reports = load(conn)?;
    let report = reports
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| LedgerError::ReportNotFound(id.to_string()))?;
    if let Some(name) = edit.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyReportName.into());
        }
        report.name = name.to_string();
    }
    if let Some(color) = edit.color {
        report.color = categories::parse_color(&color)?;
    }
    if let Some(period) = edit.period {
        report.period = utils::parse_month(&period)?;
    }
    let updated = report.clone();
    save(conn, &reports)?;
    Ok(updated)
}

/// Drops the report together with its transaction list and any list left
/// behind by a report that no longer exists.
pub fn remove(conn: &Connection, id: &str) -> Result<Report> {
    let mut reports = load(conn)?;
    let pos = reports
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| LedgerError::ReportNotFound(id.to_string()))?;
    let removed = reports.remove(pos);
    save(conn, &reports)?;

    // Every per-report list without a surviving owner goes, this one included.
    let prefix = store::report_transactions_key("");
    for key in store::keys_with_prefix(conn, &prefix)? {
        let owner = &key[prefix.len()..];
        if !reports.iter().any(|r| r.id == owner) {
            store::remove(conn, &key)?;
            tracing::debug!(key = %key, "dropped transaction list");
        }
    }
    if active_id(conn)?.as_deref() == Some(id) {
        clear_active(conn)?;
    }
    tracing::info!(report = id, "report removed");
    Ok(removed)
}
