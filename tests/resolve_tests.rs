use std::collections::HashSet;

use teamcal::config::HolidayPolicy;
use teamcal::core::one_time::OneTimeLogic;
use teamcal::core::recurring::RecurringLogic;
use teamcal::core::resolve::{ResolveLogic, ViewMode, coverage_summary};
use teamcal::core::users::UserLogic;
use teamcal::db::initialize::open_db_in_memory;
use teamcal::db::pool::DbPool;
use teamcal::holidays::HolidayCalendar;
use teamcal::models::{
    Actor, DaySet, EntrySource, LocationKind, OneTimeDraft, RecurringDraft, Role, SYSTEM_OWNER,
};

mod common;
use common::d;

struct Fixture {
    pool: DbPool,
    cal: HolidayCalendar,
    sarah: Actor,
    bob: Actor,
}

fn fixture() -> Fixture {
    let mut pool = open_db_in_memory().unwrap();
    let sarah = UserLogic::add(&mut pool, None, "sarah", "Sarah", Role::Admin).unwrap();
    let bob = UserLogic::add(&mut pool, Some(&sarah.actor()), "bob", "Bob", Role::User).unwrap();
    Fixture {
        pool,
        cal: HolidayCalendar::builtin().unwrap(),
        sarah: sarah.actor(),
        bob: bob.actor(),
    }
}

impl Fixture {
    fn store(&mut self, actor: Actor, date: &str, loc: LocationKind) {
        // written with an empty table so holidays do not block the write
        let empty = HolidayCalendar::default();
        OneTimeLogic::new(&empty, HolidayPolicy::Discard)
            .upsert(&mut self.pool, &actor, &OneTimeDraft::new(actor.user_id, d(date), loc))
            .unwrap();
    }

    fn rule(&mut self, actor: Actor, loc: LocationKind, days: &str) -> i64 {
        let draft = RecurringDraft::new(actor.user_id, loc, DaySet::parse(days).unwrap());
        RecurringLogic::upsert(&mut self.pool, &actor, &draft).unwrap().id
    }

    fn team(&self) -> ViewMode {
        ViewMode::Team {
            owner_ids: vec![self.sarah.user_id, self.bob.user_id],
        }
    }
}

#[test]
fn holiday_beats_stored_office_entry() {
    let mut f = fixture();
    f.store(f.bob, "2025-12-25", LocationKind::Office);

    let day = ResolveLogic::resolve_day(&f.pool.conn, &f.cal, f.bob.user_id, d("2025-12-25"))
        .unwrap()
        .unwrap();
    assert_eq!(day.location, LocationKind::PublicHoliday);
    assert_eq!(day.source, EntrySource::Holiday);
    assert_eq!(day.owner_id, f.bob.user_id);
}

#[test]
fn mon_wed_rule_covers_monday_not_tuesday() {
    let mut f = fixture();
    let id = f.rule(f.bob, LocationKind::Office, "mon,wed");

    let view = ViewMode::Personal {
        owner_id: f.bob.user_id,
    };
    let out =
        ResolveLogic::resolve(&f.pool.conn, &f.cal, &view, d("2025-06-02"), d("2025-06-04"), None)
            .unwrap();

    let dates: Vec<_> = out.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d("2025-06-02"), d("2025-06-04")]);
    assert!(out.iter().all(|e| e.source == EntrySource::Recurring(id)));
}

#[test]
fn at_most_one_entry_per_owner_and_day() {
    let mut f = fixture();
    f.rule(f.bob, LocationKind::Office, "mon-fri");
    f.rule(f.bob, LocationKind::Home, "mon,fri");
    f.rule(f.sarah, LocationKind::Home, "mon-sun");
    f.store(f.bob, "2025-12-24", LocationKind::AnnualLeave);
    f.store(f.sarah, "2025-12-25", LocationKind::Office);

    let out = ResolveLogic::resolve(
        &f.pool.conn,
        &f.cal,
        &f.team(),
        d("2025-12-01"),
        d("2026-01-31"),
        None,
    )
    .unwrap();

    let mut seen = HashSet::new();
    for e in &out {
        assert!(seen.insert((e.owner_id, e.date)), "duplicate for {:?}", (e.owner_id, e.date));
    }
}

#[test]
fn team_holiday_is_a_single_system_row() {
    let mut f = fixture();
    f.rule(f.bob, LocationKind::Office, "mon-fri");
    f.store(f.sarah, "2025-12-25", LocationKind::Home);

    let out = ResolveLogic::resolve(
        &f.pool.conn,
        &f.cal,
        &f.team(),
        d("2025-12-25"),
        d("2025-12-26"),
        None,
    )
    .unwrap();

    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|e| e.owner_id == SYSTEM_OWNER));
    assert_eq!(out[0].notes.as_deref(), Some("Christmas Day"));
    assert_eq!(out[1].notes.as_deref(), Some("Boxing Day"));
}

#[test]
fn team_view_keeps_explicit_holiday_entries() {
    let mut f = fixture();
    f.store(f.bob, "2025-12-25", LocationKind::PublicHoliday);

    let out = ResolveLogic::resolve(
        &f.pool.conn,
        &f.cal,
        &f.team(),
        d("2025-12-25"),
        d("2025-12-25"),
        None,
    )
    .unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].owner_id, SYSTEM_OWNER);
    assert_eq!(out[1].owner_id, f.bob.user_id);
    assert!(matches!(out[1].source, EntrySource::OneTime(_)));
}

#[test]
fn filter_applies_after_precedence() {
    let mut f = fixture();
    f.store(f.bob, "2025-12-25", LocationKind::Office);
    f.store(f.bob, "2025-12-23", LocationKind::Office);

    let view = ViewMode::Personal {
        owner_id: f.bob.user_id,
    };
    let out = ResolveLogic::resolve(
        &f.pool.conn,
        &f.cal,
        &view,
        d("2025-12-22"),
        d("2025-12-26"),
        Some(LocationKind::Office),
    )
    .unwrap();

    let dates: Vec<_> = out.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d("2025-12-23")]);
}

#[test]
fn output_is_ordered_by_date_then_owner() {
    let mut f = fixture();
    f.rule(f.bob, LocationKind::Office, "mon-sun");
    f.rule(f.sarah, LocationKind::Home, "mon-sun");

    let out = ResolveLogic::resolve(
        &f.pool.conn,
        &f.cal,
        &f.team(),
        d("2025-06-02"),
        d("2025-06-03"),
        None,
    )
    .unwrap();

    let keys: Vec<_> = out.iter().map(|e| (e.date, e.owner_id)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys.len(), 4);

    let summary = coverage_summary(&out);
    assert_eq!(summary[&d("2025-06-02")][&LocationKind::Office], 1);
    assert_eq!(summary[&d("2025-06-02")][&LocationKind::Home], 1);
}

#[test]
fn inverted_range_resolves_to_nothing() {
    let f = fixture();
    let out = ResolveLogic::resolve(
        &f.pool.conn,
        &f.cal,
        &f.team(),
        d("2025-06-05"),
        d("2025-06-01"),
        None,
    )
    .unwrap();
    assert!(out.is_empty());
}

#[test]
fn holiday_lookup_crosses_year_boundary() {
    let cal = HolidayCalendar::builtin().unwrap();
    let names: Vec<_> = cal
        .holidays_in_range(d("2025-12-24"), d("2026-01-02"))
        .iter()
        .map(|h| h.name.clone())
        .collect();
    assert_eq!(names, vec!["Christmas Day", "Boxing Day", "New Year's Day"]);
    assert!(!cal.is_holiday(d("2027-01-01")));
}
