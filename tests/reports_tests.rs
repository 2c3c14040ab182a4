// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::error::LedgerError;
use tallybook::ledger::{self, NewTransaction};
use tallybook::models::TxKind;
use tallybook::reports::{self, ReportEdit};
use tallybook::{db, stats, store};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn add_makes_report_active() {
    let conn = setup();
    let now = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let a = reports::add(&conn, "August", None, "2025-08", now).unwrap();
    let b = reports::add(&conn, "September", Some("#e67e22"), "2025-09", now).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(reports::active(&conn).unwrap().unwrap().id, b.id);

    reports::set_active(&conn, &a.id).unwrap();
    assert_eq!(reports::active_id(&conn).unwrap().as_deref(), Some(a.id.as_str()));
    assert!(reports::set_active(&conn, "missing").is_err());
}

#[test]
fn validation() {
    let conn = setup();
    assert!(reports::add(&conn, "  ", None, "2025-08", Utc::now()).is_err());
    assert!(reports::add(&conn, "Bad", None, "2025-13", Utc::now()).is_err());
    assert!(reports::load(&conn).unwrap().is_empty());
}

#[test]
fn update_changes_fields() {
    let conn = setup();
    let r = reports::add(&conn, "Aug", None, "2025-08", Utc::now()).unwrap();
    let updated = reports::update(
        &conn,
        &r.id,
        ReportEdit {
            name: Some("August budget".into()),
            period: Some("2025-07".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.name, "August budget");
    assert_eq!(updated.period, "2025-07");
    assert_eq!(updated.color, r.color);
    assert_eq!(reports::load(&conn).unwrap()[0], updated);
}

#[test]
fn remove_drops_transactions_and_pointer() {
    let conn = setup();
    let r = reports::add(&conn, "Aug", None, "2025-08", Utc::now()).unwrap();
    ledger::add(
        &conn,
        NewTransaction {
            description: "Salary".into(),
            amount: Decimal::from(100),
            kind: TxKind::Income,
            category: None,
            other_text: None,
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        },
        Local.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap(),
    )
    .unwrap();
    let key = store::report_transactions_key(&r.id);
    assert!(store::get_raw(&conn, &key).unwrap().is_some());

    reports::remove(&conn, &r.id).unwrap();
    assert!(store::get_raw(&conn, &key).unwrap().is_none());
    assert!(reports::active_id(&conn).unwrap().is_none());
    assert_eq!(ledger::storage_key(&conn).unwrap(), store::DEFAULT_TRANSACTIONS_KEY);
}

#[test]
fn report_counts_by_distinct_period() {
    let conn = setup();
    let now = Utc::now();
    for m in 1..=12 {
        reports::add(&conn, "r", None, &format!("2025-{:02}", m), now).unwrap();
    }
    reports::add(&conn, "dup", None, "2025-01", now).unwrap();
    let all = reports::load(&conn).unwrap();
    let counts = stats::report_counts(&all);
    assert_eq!(counts.total_reports, 13);
    assert_eq!(counts.monthly_reports_completed, 12);
    assert_eq!(counts.yearly_reports_completed, 1);

    let s = stats::sync_report_counts(&conn, &all[..3]).unwrap();
    assert_eq!(s.monthly_reports_completed, 3);
    assert_eq!(s.yearly_reports_completed, 0);
}

#[test]
fn colours_must_be_hex() {
    let conn = setup();
    let err = reports::add(&conn, "Aug", Some("red"), "2025-08", Utc::now()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::InvalidColor("red".into()))
    );
    assert!(reports::load(&conn).unwrap().is_empty());

    let r = reports::add(&conn, "Aug", Some(" #E67E22 "), "2025-08", Utc::now()).unwrap();
    assert_eq!(r.color, "#e67e22");

    let err = reports::update(
        &conn,
        &r.id,
        ReportEdit {
            color: Some("#12345".into()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidColor(_))
    ));
    assert_eq!(reports::load(&conn).unwrap()[0].color, "#e67e22");
}

#[test]
fn remove_sweeps_orphaned_lists() {
    let conn = setup();
    let keep = reports::add(&conn, "Keep", None, "2025-08", Utc::now()).unwrap();
    let gone = reports::add(&conn, "Gone", None, "2025-09", Utc::now()).unwrap();
    store::set_raw(&conn, &store::report_transactions_key(&keep.id), "[]").unwrap();
    store::set_raw(&conn, &store::report_transactions_key("stale"), "[]").unwrap();
    store::set_raw(&conn, store::DEFAULT_TRANSACTIONS_KEY, "[]").unwrap();

    reports::remove(&conn, &gone.id).unwrap();

    let prefix = store::report_transactions_key("");
    let left = store::keys_with_prefix(&conn, &prefix).unwrap();
    assert_eq!(left, vec![store::report_transactions_key(&keep.id)]);
    assert!(store::get_raw(&conn, store::DEFAULT_TRANSACTIONS_KEY).unwrap().is_some());
}
