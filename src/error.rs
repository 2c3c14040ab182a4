// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Domain failures surfaced to the user. Storage and parse plumbing stays in
/// `anyhow` with context; these are the cases callers may want to match on.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Category is required for expense transactions")]
    CategoryRequired,

    #[error("Category name is required")]
    EmptyCategoryName,

    #[error("A category named '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Built-in category '{0}' cannot be removed")]
    BuiltinCategory(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("Invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("Goal title cannot be empty")]
    EmptyGoalTitle,

    #[error("Goal target must be greater than zero")]
    InvalidGoalTarget,

    #[error("Goal amount must not be negative")]
    NegativeGoalAmount,

    #[error("Contribution must be non-zero")]
    ZeroContribution,

    #[error("Goal amount is out of range")]
    GoalAmountOverflow,

    #[error("Goal #{0} not found")]
    GoalNotFound(usize),

    #[error("Report '{0}' not found")]
    ReportNotFound(String),

    #[error("Report name cannot be empty")]
    EmptyReportName,

    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),
}
