// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod achievements;
pub mod analysis;
pub mod categories;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod goals;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod stats;
pub mod store;
pub mod utils;
