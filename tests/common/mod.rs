#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::{assert::Assert, Command};
use bookly_config::{Config, ConfigManager};
use bookly_domain::{Booking, Expense, Payment, PaymentType, VendorSnapshot};
use bookly_storage_json::JsonSnapshotStore;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use uuid::Uuid;

/// Isolated `BOOKLY_HOME` holding a config and one saved snapshot named `vendor`.
pub struct Fixture {
    pub home: TempDir,
    pub rivera: Uuid,
    pub chen: Uuid,
    pub studio_entity: Uuid,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Two live bookings (one past, one far future), one cancelled, March 2020 cash flow.
pub fn vendor_snapshot(studio_entity: Uuid) -> VendorSnapshot {
    let rivera = Booking::new(dec!(10000), Some(date(2020, 3, 14))).with_client("Rivera");
    let chen = Booking::new(dec!(6000), Some(date(2099, 6, 1)))
        .with_client("Chen")
        .with_entity(studio_entity);
    let mut lopez = Booking::new(dec!(3000), Some(date(2020, 5, 1))).with_client("Lopez");
    lopez.cancel();

    let payments = vec![
        Payment::new(rivera.id, dec!(4000), date(2020, 3, 1), PaymentType::Advance)
            .with_notes("Advance from Rivera"),
        Payment::new(chen.id, dec!(1000), date(2020, 3, 5), PaymentType::Partial),
        Payment::new(rivera.id, dec!(2000), date(2020, 3, 14), PaymentType::Partial),
        Payment::refund(rivera.id, dec!(500), None, date(2020, 3, 20)),
    ];
    let expenses = vec![
        Expense::new(date(2020, 3, 5), dec!(1500), "Venue").with_description("Venue deposit"),
        Expense::new(date(2020, 3, 14), dec!(300), "Fuel"),
    ];
    VendorSnapshot::new(vec![rivera, chen, lopez], payments, expenses)
}

impl Fixture {
    pub fn new() -> Self {
        let home = TempDir::new().expect("create temp home");
        let studio_entity = Uuid::new_v4();
        let snapshot = vendor_snapshot(studio_entity);

        let fixture = Self {
            home,
            rivera: snapshot.bookings[0].id,
            chen: snapshot.bookings[1].id,
            studio_entity,
        };

        let mut config = Config::default();
        config.snapshot_root = Some(fixture.snapshot_root());
        fixture
            .config_manager()
            .save(&config)
            .expect("write test config");

        JsonSnapshotStore::new(fixture.snapshot_root())
            .and_then(|store| store.save_snapshot("vendor", &snapshot))
            .expect("write test snapshot");
        fixture
    }

    pub fn snapshot_root(&self) -> PathBuf {
        self.home.path().join("snapshots")
    }

    pub fn config_manager(&self) -> ConfigManager {
        ConfigManager::with_base_dir(self.home.path().to_path_buf()).expect("config manager")
    }

    /// Script-mode invocation of the shell binary against this home.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("bookly_cli").expect("bookly_cli binary");
        cmd.env("BOOKLY_HOME", self.home.path())
            .env("BOOKLY_CLI_SCRIPT", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Feeds `script` on stdin and asserts a clean exit.
    pub fn run(&self, script: &str) -> Assert {
        self.command().write_stdin(script.to_string()).assert().success()
    }
}
