//! Integration tests against the bundled reference tables in `data/`.
//!
//! Golden values are published Korean almanac dates (설날, 윤달, 입춘).

use std::path::PathBuf;

use saju_calendar::{
    CalendarError, ErrorKind, LunarDate, LunarTable, SolarTerm, SolarTermTable, civil_date,
};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

fn lunar_table() -> LunarTable {
    LunarTable::load(&data_path("lunar_table.csv")).expect("bundled lunar table")
}

fn term_table() -> SolarTermTable {
    SolarTermTable::load(&data_path("24solar_terms.json")).expect("bundled term table")
}

#[test]
fn lunar_table_covers_1980_through_2030() {
    let t = lunar_table();
    let (first, last) = t.coverage().unwrap();
    assert_eq!(first, civil_date(1980, 1, 1).unwrap());
    assert_eq!(last, civil_date(2030, 12, 31).unwrap());
    assert_eq!(t.len(), 18_628);
}

#[test]
fn seollal_dates() {
    let t = lunar_table();
    for (y, m, d) in [(1985, 2, 20), (1990, 1, 27), (2000, 2, 5), (2024, 2, 10)] {
        let lunar = t.solar_to_lunar(civil_date(y, m, d).unwrap()).unwrap();
        assert_eq!(lunar, LunarDate::new(y, 1, 1, false), "설날 {y}");
    }
}

#[test]
fn scenario_birthdate_converts() {
    let t = lunar_table();
    let lunar = t.solar_to_lunar(civil_date(1990, 5, 10).unwrap()).unwrap();
    assert_eq!(lunar, LunarDate::new(1990, 4, 16, false));
}

#[test]
fn conversion_is_stable() {
    let t = lunar_table();
    let date = civil_date(2004, 3, 21).unwrap();
    let a = t.solar_to_lunar(date).unwrap();
    let b = t.solar_to_lunar(date).unwrap();
    assert_eq!(a, b);
    assert_eq!(t.lunar_to_solar(a).unwrap(), date);
}

#[test]
fn leap_fifth_month_1990() {
    let t = lunar_table();
    let lunar = t.solar_to_lunar(civil_date(1990, 6, 23).unwrap()).unwrap();
    assert_eq!(lunar, LunarDate::new(1990, 5, 1, true));
}

#[test]
fn leap_fourth_month_2020() {
    let t = lunar_table();
    let lunar = t.solar_to_lunar(civil_date(2020, 5, 23).unwrap()).unwrap();
    assert_eq!(lunar, LunarDate::new(2020, 4, 1, true));
}

#[test]
fn out_of_range_is_hard_miss() {
    let t = lunar_table();
    let err = t.solar_to_lunar(civil_date(1979, 12, 31).unwrap()).unwrap_err();
    assert!(matches!(err, CalendarError::SolarDateNotInTable(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn term_table_years() {
    let t = term_table();
    let years: Vec<i32> = t.years().collect();
    assert_eq!(years.first(), Some(&1980));
    assert_eq!(years.last(), Some(&2030));
    assert_eq!(years.len(), 51);
}

#[test]
fn ipchun_1990_governs_its_own_date() {
    let t = term_table();
    let e = t.term_for(civil_date(1990, 2, 4).unwrap()).unwrap();
    assert_eq!(e.term, SolarTerm::Ipchun);
    assert_eq!(e.term.month_branch_index(), 2);
}

#[test]
fn may_1990_governed_by_ipha() {
    let t = term_table();
    let e = t.term_for(civil_date(1990, 5, 10).unwrap()).unwrap();
    assert_eq!(e.term, SolarTerm::Ipha);
    assert_eq!(e.date, civil_date(1990, 5, 6).unwrap());
}

#[test]
fn day_before_first_term_defaults_to_ipchun() {
    let t = term_table();
    // 소한 1990 falls on Jan 5.
    let e = t.term_for(civil_date(1990, 1, 4).unwrap()).unwrap();
    assert_eq!(e.term, SolarTerm::Ipchun);
    assert_eq!(e.date, civil_date(1990, 2, 4).unwrap());
}

#[test]
fn year_outside_term_table() {
    let t = term_table();
    assert_eq!(
        t.term_for(civil_date(1975, 6, 1).unwrap()),
        Err(CalendarError::YearNotInTable(1975))
    );
}

#[test]
fn sectional_neighbours_of_scenario_date() {
    let t = term_table();
    let date = civil_date(1990, 5, 10).unwrap();
    let next = t.next_sectional_after(date).unwrap();
    assert_eq!(next.term, SolarTerm::Mangjong);
    assert_eq!(next.date, civil_date(1990, 6, 6).unwrap());
    let prev = t.last_sectional_on_or_before(date).unwrap();
    assert_eq!(prev.term, SolarTerm::Ipha);
}
