// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals. Goals live in one stored list and are addressed by their
//! position in it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::models::{Goal, Movement};
use crate::{stats, store, utils};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "percent", rename_all = "lowercase")]
pub enum Progress {
    /// No usable target yet.
    Undefined,
    Percent(Decimal),
}

/// Percentage of the target reached, clamped to 0..=100.
pub fn progress(goal: &Goal) -> Progress {
    match goal.target_amount {
        Some(target) if target > Decimal::ZERO => {
            let raw = utils::percent_of(goal.current_amount, target);
            Progress::Percent(raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
        }
        _ => Progress::Undefined,
    }
}

fn is_complete(goal: &Goal) -> bool {
    matches!(goal.target_amount, Some(t) if t > Decimal::ZERO && goal.current_amount >= t)
}

pub fn load(conn: &Connection) -> Result<Vec<Goal>> {
    store::load_json_or_default(conn, store::GOALS_KEY)
}

fn save(conn: &Connection, goals: &[Goal]) -> Result<()> {
    store::save_json(conn, store::GOALS_KEY, goals)
}

pub fn get(conn: &Connection, index: usize) -> Result<Goal> {
    load(conn)?
        .into_iter()
        .nth(index)
        .ok_or_else(|| LedgerError::GoalNotFound(index).into())
}

fn validate_target(target: Option<Decimal>) -> Result<(), LedgerError> {
    match target {
        Some(t) if t <= Decimal::ZERO => Err(LedgerError::InvalidGoalTarget),
        _ => Ok(()),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub deadline: Option<String>,
    pub description: Option<String>,
}

/// Appends a goal and returns its index.
pub fn create(conn: &Connection, new: NewGoal) -> Result<usize> {
    let title = new.title.trim();
    if title.is_empty() {
        return Err(LedgerError::EmptyGoalTitle.into());
    }
    validate_target(new.target_amount)?;
    let current = new.current_amount.unwrap_or(Decimal::ZERO);
    if current < Decimal::ZERO {
        return Err(LedgerError::NegativeGoalAmount.into());
    }

    let mut goal = Goal {
        title: title.to_string(),
        target_amount: new.target_amount,
        current_amount: current,
        deadline: non_blank(new.deadline),
        description: non_blank(new.description),
        completed: false,
        history: Vec::new(),
    };
    goal.completed = is_complete(&goal);

    let mut goals = load(conn)?;
    goals.push(goal);
    save(conn, &goals)?;
    let index = goals.len() - 1;
    tracing::info!(index, title, "goal created");
    Ok(index)
}

#[derive(Debug, Clone, Default)]
pub struct GoalEdit {
    pub title: Option<String>,
    /// `Some(None)` clears the target.
    pub target_amount: Option<Option<Decimal>>,
    pub deadline: Option<String>,
    pub description: Option<String>,
}

pub fn edit(conn: &Connection, index: usize, changes: GoalEdit) -> Result<Goal> {
    let mut goals = load(conn)?;
    let goal = goals
        .get_mut(index)
        .ok_or(LedgerError::GoalNotFound(index))?;

    if let Some(title) = changes.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(LedgerError::EmptyGoalTitle.into());
        }
        goal.title = title.to_string();
    }
    if let Some(target) = changes.target_amount {
        validate_target(target)?;
        goal.target_amount = target;
    }
    if let Some(deadline) = changes.deadline {
        goal.deadline = non_blank(Some(deadline));
    }
    if let Some(description) = changes.description {
        goal.description = non_blank(Some(description));
    }
    goal.completed = is_complete(goal);

    let updated = goal.clone();
    save(conn, &goals)?;
    Ok(updated)
}

/// Records a contribution (negative for a withdrawal) and re-evaluates
/// completion. Reaching the target bumps the `goals_met` stat once.
pub fn contribute(
    conn: &Connection,
    index: usize,
    amount: Decimal,
    at: DateTime<Utc>,
) -> Result<Goal> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroContribution.into());
    }
    let mut goals = load(conn)?;
    let goal = goals
        .get_mut(index)
        .ok_or(LedgerError::GoalNotFound(index))?;

    let was_complete = goal.completed;
    goal.current_amount = goal
        .current_amount
        .checked_add(amount)
        .ok_or(LedgerError::GoalAmountOverflow)?;
    goal.history.push(Movement {
        amount,
        timestamp: at,
    });
    goal.completed = is_complete(goal);

    let updated = goal.clone();
    save(conn, &goals)?;

    if !was_complete && updated.completed {
        tracing::info!(index, title = %updated.title, "goal reached");
        stats::record_goal_met(conn)?;
    }
    Ok(updated)
}

pub fn remove(conn: &Connection, index: usize) -> Result<Goal> {
    let mut goals = load(conn)?;
    if index >= goals.len() {
        return Err(LedgerError::GoalNotFound(index).into());
    }
    let removed = goals.remove(index);
    save(conn, &goals)?;
    tracing::info!(index, title = %removed.title, "goal removed");
    Ok(removed)
}
