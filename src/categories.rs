// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::models::{Category, Transaction};
use crate::store;

pub const OTHER: &str = "other";

pub const COLOR_PALETTE: [&str; 15] = [
    "#e74c3c", "#2ecc71", "#3498db", "#f1c40f", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
    "#8e44ad", "#16a085", "#d35400", "#c0392b", "#27ae60", "#2980b9", "#f39c12",
];

const BUILTINS: [(&str, &str, &str); 9] = [
    ("health", "Health", "#e74c3c"),
    ("leisure", "Leisure", "#2ecc71"),
    ("food", "Food", "#3498db"),
    ("transport", "Transport", "#f1c40f"),
    ("housing", "Housing", "#9b59b6"),
    ("education", "Education", "#1abc9c"),
    ("clothing", "Clothing", "#e67e22"),
    ("technology", "Technology", "#34495e"),
    (OTHER, "Other", "#95a5a5"),
];

static WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

pub fn builtin_categories() -> Vec<Category> {
    BUILTINS
        .iter()
        .map(|(value, label, color)| Category {
            value: value.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            is_custom: false,
        })
        .collect()
}

pub fn slugify(name: &str) -> String {
    WS.replace_all(&name.trim().to_lowercase(), "-").into_owned()
}

pub fn load_custom(conn: &Connection) -> Result<Vec<Category>> {
    store::load_json_or_default(conn, store::CUSTOM_CATEGORIES_KEY)
}

/// Built-ins, then custom categories, with `other` kept last.
pub fn active_set(conn: &Connection) -> Result<Vec<Category>> {
    let custom = load_custom(conn)?;
    let mut all: Vec<Category> = builtin_categories()
        .into_iter()
        .filter(|c| c.value != OTHER)
        .collect();
    all.extend(custom);
    all.extend(builtin_categories().into_iter().filter(|c| c.value == OTHER));
    Ok(all)
}

/// Normalises a `#rrggbb` colour to lowercase.
pub fn parse_color(color: &str) -> Result<String, LedgerError> {
    let color = color.trim();
    if !HEX_COLOR.is_match(color) {
        return Err(LedgerError::InvalidColor(color.to_string()));
    }
    Ok(color.to_lowercase())
}

pub fn add_custom(conn: &Connection, name: &str, color: Option<&str>) -> Result<Category> {
    let label = name.trim();
    if label.is_empty() {
        return Err(LedgerError::EmptyCategoryName.into());
    }
    let color = parse_color(color.unwrap_or(COLOR_PALETTE[0]))?;
    let value = slugify(label);
    if active_set(conn)?.iter().any(|c| c.value == value) {
        return Err(LedgerError::DuplicateCategory(label.to_string()).into());
    }
    let cat = Category {
        value,
        label: label.to_string(),
        color,
        is_custom: true,
    };
    let mut custom = load_custom(conn)?;
    custom.push(cat.clone());
    store::save_json(conn, store::CUSTOM_CATEGORIES_KEY, &custom)?;
    tracing::info!(category = %cat.value, "custom category added");
    Ok(cat)
}

pub fn remove_custom(conn: &Connection, value: &str) -> Result<Category> {
    let value = value.trim();
    if builtin_categories().iter().any(|c| c.value == value) {
        return Err(LedgerError::BuiltinCategory(value.to_string()).into());
    }
    let mut custom = load_custom(conn)?;
    let pos = custom
        .iter()
        .position(|c| c.value == value)
        .ok_or_else(|| LedgerError::CategoryNotFound(value.to_string()))?;
    let removed = custom.remove(pos);
    store::save_json(conn, store::CUSTOM_CATEGORIES_KEY, &custom)?;
    tracing::info!(category = %removed.value, "custom category removed");
    Ok(removed)
}

pub fn find<'a>(value: &str, set: &'a [Category]) -> Option<&'a Category> {
    set.iter().find(|c| c.value == value)
}

/// Label when known, otherwise the slug with each word capitalised.
pub fn display_name(value: &str, set: &[Category]) -> String {
    if let Some(c) = find(value, set) {
        return c.label.clone();
    }
    value
        .split('-')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn color_of(value: &str, set: &[Category]) -> String {
    match find(value, set) {
        Some(c) => c.color.clone(),
        None => BUILTINS[BUILTINS.len() - 1].2.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub name: String,
    pub color: String,
    pub total: Decimal,
}

/// Per-category expense totals for charting, largest first.
pub fn category_totals(txs: &[Transaction], set: &[Category]) -> Vec<CategoryTotal> {
    let mut sums: Vec<(String, Decimal)> = Vec::new();
    for t in txs.iter().filter(|t| t.is_expense()) {
        let cat = t.category.clone().unwrap_or_else(|| OTHER.to_string());
        match sums.iter_mut().find(|(c, _)| *c == cat) {
            Some((_, v)) => *v = v.saturating_add(t.amount),
            None => sums.push((cat, t.amount)),
        }
    }
    let mut out: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(cat, total)| CategoryTotal {
            name: display_name(&cat, set),
            color: color_of(&cat, set),
            category: cat,
            total: total.round_dp(2),
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}
