use chrono::{Local, Months};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{TestDb, init_team};

#[test]
fn init_creates_database() {
    let db = TestDb::new();
    db.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));
    assert!(std::path::Path::new(&db.path).exists());
}

#[test]
fn first_user_is_admin_and_others_need_one() {
    let db = init_team();

    db.as_user("sarah")
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(contains("sarah").and(contains("admin")).and(contains("Bob")));

    db.as_user("bob")
        .args(["user", "add", "eve"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    db.as_user("sarah")
        .args(["user", "add", "bob"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn add_and_show_personal_entry() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office", "--notes", "standup"])
        .assert()
        .success()
        .stdout(contains("Entry #1 saved: 2025-06-02 Office"));

    db.as_user("bob")
        .args(["show", "--period", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("Office").and(contains("standup")).and(contains("one_time #1")));
}

#[test]
fn adding_twice_updates_in_place() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();
    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "h"])
        .assert()
        .success()
        .stdout(contains("Entry #1 saved: 2025-06-02 Home"));
}

#[test]
fn malformed_date_is_rejected() {
    let db = init_team();
    db.as_user("bob")
        .args(["add", "2025-6-2", "--loc", "office"])
        .assert()
        .failure()
        .stderr(contains("expected YYYY-MM-DD"));
}

#[test]
fn unknown_location_is_rejected() {
    let db = init_team();
    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "beach"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn commands_need_a_user() {
    let db = init_team();
    db.cmd()
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .failure()
        .stderr(contains("no user selected"));
}

#[test]
fn holiday_wins_over_office_write() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-12-25", "--loc", "office"])
        .assert()
        .success()
        .stdout(contains("is a public holiday (Christmas Day)"));

    db.as_user("bob")
        .args(["show", "--period", "2025-12-25"])
        .assert()
        .success()
        .stdout(contains("Public holiday").and(contains("Office").not()));
}

#[test]
fn range_add_skips_holidays() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-12-24", "--to", "2025-12-26", "--loc", "office"])
        .assert()
        .success()
        .stdout(contains("1 day(s) saved, 2 skipped"));
}

#[test]
fn inverted_range_is_rejected() {
    let db = init_team();
    db.as_user("bob")
        .args(["add", "2025-06-06", "--to", "2025-06-02", "--loc", "office"])
        .assert()
        .failure()
        .stderr(contains("before start"));
}

#[test]
fn only_owner_or_admin_may_write() {
    let db = init_team();

    db.as_user("sarah")
        .args(["add", "2025-06-03", "--loc", "home", "--for", "bob"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["add", "2025-06-03", "--loc", "home", "--for", "sarah"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));
}

#[test]
fn foreign_delete_leaves_entry_intact() {
    let db = init_team();

    db.as_user("sarah")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    // no confirmation is asked for an entry the caller may not delete
    db.as_user("bob")
        .args(["del", "1"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stdout(contains("irreversible").not())
        .stderr(contains("Not authorized"));

    db.as_user("sarah")
        .args(["show", "--period", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("one_time #1"));
}

#[test]
fn delete_asks_for_confirmation() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    db.as_user("bob")
        .args(["del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Entry #1 has been deleted."));

    db.as_user("bob")
        .args(["del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn edit_changes_location() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["edit", "1", "--loc", "annual_leave", "--notes", "beach"])
        .assert()
        .success()
        .stdout(contains("Entry #1 saved: 2025-06-02 Annual leave"));

    db.as_user("bob")
        .args(["edit", "1"])
        .assert()
        .failure()
        .stderr(contains("nothing to change"));
}

#[test]
fn recurring_rule_covers_its_weekdays_only() {
    let db = init_team();

    db.as_user("bob")
        .args(["rule", "add", "--loc", "office", "--days", "mon,wed"])
        .assert()
        .success()
        .stdout(contains("Rule #1 saved: Office on mon,wed"));

    // 2025-06-02 is a Monday
    db.as_user("bob")
        .args(["show", "--period", "2025-06-02:2025-06-04"])
        .assert()
        .success()
        .stdout(
            contains("2025-06-02")
                .and(contains("2025-06-04"))
                .and(contains("2025-06-03").not())
                .and(contains("recurring #1")),
        );

    db.as_user("bob")
        .args(["rule", "list"])
        .assert()
        .success()
        .stdout(contains("mon,wed"));
}

#[test]
fn rule_edit_and_delete() {
    let db = init_team();

    db.as_user("bob")
        .args(["rule", "add", "--loc", "home", "--days", "fri"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["rule", "edit", "1", "--days", "mon-wed"])
        .assert()
        .success()
        .stdout(contains("Rule #1 updated: Home on mon,tue,wed"));

    db.as_user("sarah")
        .args(["rule", "del", "1"])
        .assert()
        .success()
        .stdout(contains("Rule #1 has been deleted."));

    db.as_user("bob")
        .args(["rule", "list"])
        .assert()
        .success()
        .stdout(contains("No recurring rules."));
}

#[test]
fn empty_day_set_is_rejected() {
    let db = init_team();
    db.as_user("bob")
        .args(["rule", "add", "--loc", "home", "--days", ""])
        .assert()
        .failure();
}

#[test]
fn team_view_shows_one_holiday_row_per_day() {
    let db = init_team();

    db.as_user("bob")
        .args(["rule", "add", "--loc", "office", "--days", "mon-fri"])
        .assert()
        .success();

    let out = db
        .as_user("bob")
        .args(["show", "--team", "--period", "2025-12-25"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.matches("everyone").count(), 1);
    assert!(stdout.contains("Christmas Day"));
    assert!(!stdout.contains("recurring #1"));
}

#[test]
fn location_filter_keeps_matching_days() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();
    db.as_user("bob")
        .args(["add", "2025-06-03", "--loc", "home"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["show", "--period", "2025-06", "--loc", "home"])
        .assert()
        .success()
        .stdout(contains("2025-06-03").and(contains("2025-06-02").not()));
}

#[test]
fn holidays_lists_table_entries() {
    let db = TestDb::new();
    db.cmd()
        .args(["holidays", "--period", "2026-12"])
        .assert()
        .success()
        .stdout(
            contains("Christmas Day")
                .and(contains("Boxing Day (additional day)"))
                .and(contains("Queensland")),
        );
}

#[test]
fn refresh_holidays_stores_entries() {
    let db = init_team();

    db.as_user("bob")
        .args(["refresh-holidays", "--period", "2025-12"])
        .assert()
        .success()
        .stdout(contains("2 public holiday(s) stored"));

    db.as_user("bob")
        .args(["show", "--period", "2025-12-26"])
        .assert()
        .success()
        .stdout(contains("Boxing Day").and(contains("one_time #")));
}

#[test]
fn export_team_csv() {
    let db = init_team();
    let file = db.out_file("team.csv");

    db.as_user("bob")
        .args(["add", "2025-12-24", "--loc", "home", "--notes", "wrapping"])
        .assert()
        .success();

    db.as_user("bob")
        .args([
            "export", "--format", "csv", "--file", &file, "--period", "2025-12-24:2025-12-25",
            "--team",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed (2 rows)"));

    let content = fs::read_to_string(&file).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("date,owner_id,owner,location,notes,source_kind,source_id")
    );
    assert_eq!(lines.next(), Some("2025-12-24,2,bob,home,wrapping,one_time,1"));
    assert_eq!(
        lines.next(),
        Some("2025-12-25,0,team,public_holiday,Christmas Day,holiday,")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn export_personal_json() {
    let db = init_team();
    let file = db.out_file("bob.json");

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();

    db.as_user("bob")
        .args(["export", "--format", "json", "--file", &file, "--period", "2025-06-02"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["location"], "office");
    assert_eq!(rows[0]["owner"], "bob");
    assert_eq!(rows[0]["source_kind"], "one_time");
}

#[test]
fn export_refuses_to_overwrite_without_force() {
    let db = init_team();
    let file = db.out_file("out.csv");
    fs::write(&file, "keep me").unwrap();

    db.as_user("bob")
        .args(["export", "--format", "csv", "--file", &file, "--period", "2025-06"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("--force"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");

    db.as_user("bob")
        .args([
            "export", "--format", "csv", "--file", &file, "--period", "2025-06", "--force",
        ])
        .assert()
        .success();
}

#[test]
fn audit_log_records_mutations() {
    let db = init_team();

    db.as_user("bob")
        .args(["add", "2025-06-02", "--loc", "office"])
        .assert()
        .success();

    db.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("(entry:1)"))
                .and(contains("(user:2)")),
        );
}

#[test]
fn db_info_and_check() {
    let db = init_team();

    db.cmd()
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Team members").and(contains("Integrity check passed")));
}

#[test]
fn user_edits_own_display_name() {
    let db = init_team();

    db.as_user("bob")
        .args(["user", "edit", "bob", "--name", "Robert"])
        .assert()
        .success()
        .stdout(contains("User #2 'bob' is now shown as 'Robert'"));

    db.as_user("bob")
        .args(["user", "edit", "sarah", "--name", "Boss"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    db.as_user("sarah")
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(contains("Robert").and(contains("Boss").not()));

    db.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("user_edit"));
}

#[test]
fn refresh_holidays_defaults_to_next_twelve_months() {
    let db = init_team();
    let today = Local::now().date_naive();
    let end = today.checked_add_months(Months::new(12)).unwrap();

    db.as_user("bob")
        .arg("refresh-holidays")
        .assert()
        .success()
        .stdout(contains(format!("between {today} and {end}")));
}

#[test]
fn list_shows_stored_entries_in_period() {
    let db = init_team();

    for day in ["2025-06-02", "2025-06-03", "2025-07-01"] {
        db.as_user("bob")
            .args(["add", day, "--loc", "office"])
            .assert()
            .success();
    }

    db.as_user("bob")
        .args(["list", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(
            contains("2025-06-02")
                .and(contains("2025-06-03"))
                .and(contains("2025-07-01").not()),
        );

    db.as_user("sarah")
        .args(["list", "--for", "bob"])
        .assert()
        .success()
        .stdout(contains("2025-07-01"));

    db.as_user("bob")
        .args(["list", "--for", "sarah"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));
}
