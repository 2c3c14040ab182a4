// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::categories::{self, OTHER};
use crate::error::LedgerError;
use crate::models::{Transaction, TxKind};
use crate::{reports, stats, store, utils};

/// Largest amount a single transaction may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Key of the transaction list currently in use: the active report's list, or
/// the default ledger when no report is active.
pub fn storage_key(conn: &Connection) -> Result<String> {
    Ok(match reports::active_id(conn)? {
        Some(id) => store::report_transactions_key(&id),
        None => store::DEFAULT_TRANSACTIONS_KEY.to_string(),
    })
}

pub fn load(conn: &Connection) -> Result<Vec<Transaction>> {
    let key = storage_key(conn)?;
    store::load_json_or_default(conn, &key)
}

pub fn load_report(conn: &Connection, report_id: &str) -> Result<Vec<Transaction>> {
    store::load_json_or_default(conn, &store::report_transactions_key(report_id))
}

pub fn save(conn: &Connection, txs: &[Transaction]) -> Result<()> {
    let key = storage_key(conn)?;
    store::save_json(conn, &key, txs)
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: Option<String>,
    /// Free text naming the category when `other` is selected.
    pub other_text: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Resolves the final category and checks the record invariants.
    pub fn validate(&self) -> Result<Option<String>, LedgerError> {
        let mut category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        if category.as_deref() == Some(OTHER) {
            if let Some(text) = self.other_text.as_deref() {
                let slug = categories::slugify(text);
                if slug.is_empty() {
                    return Err(LedgerError::InvalidTransaction(
                        "the 'other' category needs a name".into(),
                    ));
                }
                category = Some(slug);
            }
        }

        if self.description.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "description is required".into(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidTransaction(format!(
                "amount must be greater than zero, got {}",
                self.amount
            )));
        }
        if self.amount > Decimal::from(MAX_AMOUNT) {
            return Err(LedgerError::InvalidTransaction(format!(
                "amount must not exceed {}, got {}",
                MAX_AMOUNT, self.amount
            )));
        }

        match self.kind {
            TxKind::Expense if category.is_none() => Err(LedgerError::CategoryRequired),
            TxKind::Expense => Ok(category),
            TxKind::Income => Ok(None),
        }
    }
}

/// Validates and prepends a transaction to the list in use, newest first.
pub fn add(conn: &Connection, new: NewTransaction, now: DateTime<Local>) -> Result<Transaction> {
    let category = new.validate()?;
    let mut txs = load(conn)?;
    let id = utils::next_id(txs.iter().map(|t| t.id.as_str()), now.timestamp_millis());
    let tx = Transaction {
        id,
        description: new.description.trim().to_string(),
        amount: new.amount,
        kind: new.kind,
        category,
        date: new.date,
    };
    txs.insert(0, tx.clone());
    save(conn, &txs)?;
    tracing::info!(id = %tx.id, kind = %tx.kind, amount = %tx.amount, "transaction recorded");

    if tx.is_expense() {
        stats::record_expense_logged(conn, now)?;
    }
    Ok(tx)
}

pub fn remove(conn: &Connection, id: &str) -> Result<Transaction> {
    let mut txs = load(conn)?;
    let pos = txs
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))?;
    let removed = txs.remove(pos);
    save(conn, &txs)?;
    tracing::info!(id, "transaction removed");
    Ok(removed)
}

// Totals saturate: stored lists are not guaranteed to respect MAX_AMOUNT.
pub fn total_income(txs: &[Transaction]) -> Decimal {
    utils::saturating_sum(txs.iter().filter(|t| t.is_income()).map(|t| t.amount))
}

pub fn total_expense(txs: &[Transaction]) -> Decimal {
    utils::saturating_sum(txs.iter().filter(|t| t.is_expense()).map(|t| t.amount))
}

pub fn balance(txs: &[Transaction]) -> Decimal {
    total_income(txs).saturating_sub(total_expense(txs))
}

pub fn in_month(txs: &[Transaction], month: &str) -> Vec<Transaction> {
    txs.iter()
        .filter(|t| utils::month_of(&t.date) == month)
        .cloned()
        .collect()
}
