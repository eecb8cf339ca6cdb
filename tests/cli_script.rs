mod common;

use bookly_domain::short_id;
use bookly_storage_json::save_snapshot_to_path;
use common::{vendor_snapshot, Fixture};
use predicates::prelude::*;
use predicates::str::contains;
use uuid::Uuid;

#[test]
fn help_lists_registered_commands() {
    let fixture = Fixture::new();
    fixture
        .run("help\nexit\n")
        .stdout(contains("Available commands"))
        .stdout(contains("ledger"))
        .stdout(contains("pnl"))
        .stdout(contains("pagesize"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let fixture = Fixture::new();
    fixture
        .run("ledgr\n")
        .stdout(contains("Unknown command `ledgr`"))
        .stdout(contains("Suggestion: `ledger`?"));
}

#[test]
fn commands_need_a_loaded_snapshot() {
    let fixture = Fixture::new();
    fixture
        .run("bookings\nload\n")
        .stdout(contains("No snapshot loaded."))
        .stdout(contains("vendor"));
}

#[test]
fn dashboard_counts_and_totals() {
    let fixture = Fixture::new();
    fixture
        .run("load vendor\ndashboard\n")
        .stdout(contains("Loaded snapshot `vendor` (3 bookings, 4 payments, 2 expenses)."))
        .stdout(contains("Upcoming       : 1"))
        .stdout(contains("Completed      : 1"))
        .stdout(contains("Cancelled      : 1"))
        .stdout(contains("Total booked   : 16000.00 USD"))
        .stdout(contains("Total received : 6500.00 USD"))
        .stdout(contains("Total pending  : 9500.00 USD"));
}

#[test]
fn ledger_shows_running_balance_and_totals() {
    let fixture = Fixture::new();
    fixture
        .run("load vendor\nledger\n")
        .stdout(contains("Ledger: all time (page 1 of 1)"))
        .stdout(contains("Advance from Rivera"))
        .stdout(contains("Venue deposit"))
        .stdout(contains("Payment received (partial)"))
        .stdout(contains("Totals"))
        .stdout(contains("5200.00"))
        .stdout(contains("7000.00"));
}

#[test]
fn ledger_month_pages_after_page_size_change() {
    let fixture = Fixture::new();
    fixture
        .run("load vendor\npagesize 2\nledger 2020-03 2\n")
        .stdout(contains("Ledger: Mar 2020 (page 2 of 3)"))
        .stdout(contains("3500.00"))
        .stdout(contains("5500.00"));
}

#[test]
fn ledger_rejects_invalid_month() {
    let fixture = Fixture::new();
    fixture
        .run("load vendor\nledger 2020-13\n")
        .stdout(contains("invalid month 2020-13"));
}

#[test]
fn booking_detail_reconciles_refunds() {
    let fixture = Fixture::new();
    let script = format!("load vendor\nbooking {}\n", short_id(fixture.rivera));
    fixture
        .run(&script)
        .stdout(contains("=== Rivera ==="))
        .stdout(contains("Status     : completed"))
        .stdout(contains("Refunded   : 500.00 USD"))
        .stdout(contains("Net paid   : 5500.00 USD"))
        .stdout(contains("Pending    : 4500.00 USD"))
        .stdout(contains("Progress   : 55.0% (partial)"));
}

#[test]
fn future_booking_is_confirmed_and_cancelled_wins() {
    let fixture = Fixture::new();
    fixture
        .run("load vendor\nbookings\n")
        .stdout(contains("confirmed"))
        .stdout(contains("cancelled"))
        .stdout(contains(short_id(fixture.chen)));
}

#[test]
fn monthly_pnl_with_totals() {
    let fixture = Fixture::new();
    fixture
        .run("load vendor\npnl 2020\n")
        .stdout(contains("Profit & loss 2020"))
        .stdout(contains("Mar 2020"))
        .stdout(contains("1800.00"))
        .stdout(contains("5200.00"))
        .stdout(contains("74.3%"));
}

#[test]
fn pnl_entity_filter_drops_unattributed_records() {
    let fixture = Fixture::new();
    let script = format!("load vendor\npnl 2020 yearly {}\n", fixture.studio_entity);
    fixture
        .run(&script)
        .stdout(contains("(1 entities)"))
        .stdout(contains("1000.00"))
        .stdout(contains("100.0%"))
        .stdout(contains("7000.00").not());
}

#[test]
fn config_set_persists_and_reformats_amounts() {
    let fixture = Fixture::new();
    fixture
        .run("config set currency eur\nconfig set currency_precision 0\nload vendor\ndashboard\n")
        .stdout(contains("Set `currency` to `EUR`."))
        .stdout(contains("Total booked   : 16000 EUR"));

    let config = fixture.config_manager().load().expect("reload config");
    assert_eq!(config.currency, "EUR");
    assert_eq!(config.currency_precision, Some(0));
    assert_eq!(config.last_opened_snapshot.as_deref(), Some("vendor"));
}

#[test]
fn config_rejects_unknown_keys() {
    let fixture = Fixture::new();
    fixture
        .run("config set theme dark\n")
        .stdout(contains("unknown configuration key `theme`"));
}

#[test]
fn load_accepts_a_file_path() {
    let fixture = Fixture::new();
    let path = fixture.home.path().join("exports").join("march.json");
    save_snapshot_to_path(&vendor_snapshot(Uuid::new_v4()), &path).expect("write export");

    let script = format!("load {}\nbookings\n", path.display());
    fixture
        .run(&script)
        .stdout(contains("Loaded snapshot `march`"))
        .stdout(contains("Bookings (page 1 of 1)"));
}

#[test]
fn version_prints_build_metadata() {
    let fixture = Fixture::new();
    fixture
        .run("version\n")
        .stdout(contains(format!("Bookly {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("Build hash"));
}
