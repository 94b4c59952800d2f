//! Periodicity and closure properties of the sexagenary arithmetic.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use saju_base::{
    DAY_PILLAR_EPOCH_YMD, Sex, branch_at, day_pillar, generate, sexagenary_at, stem_at, tally,
    year_pillar,
};

#[test]
fn stems_and_branches_close_their_cycles() {
    for i in -500..500 {
        assert_eq!(stem_at(i), stem_at(i + 10));
        assert_eq!(branch_at(i), branch_at(i + 12));
    }
}

#[test]
fn sixty_distinct_pairs() {
    let pairs: HashSet<_> = (0..60).map(sexagenary_at).collect();
    assert_eq!(pairs.len(), 60);
    for i in 0..60 {
        assert_eq!(sexagenary_at(i).sexagenary().map(|s| s.index() as i64), Some(i));
    }
}

#[test]
fn epoch_is_gapja() {
    let (y, m, d) = DAY_PILLAR_EPOCH_YMD;
    let epoch = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let p = day_pillar(epoch);
    assert_eq!((p.stem.index(), p.branch.index()), (0, 0));
}

#[test]
fn day_pillar_repeats_every_sixty_days() {
    let start = NaiveDate::from_ymd_opt(1850, 3, 1).unwrap();
    for n in (0..80_000).step_by(97) {
        let date = start + Duration::days(n);
        assert_eq!(day_pillar(date), day_pillar(date + Duration::days(60)));
        assert_ne!(day_pillar(date), day_pillar(date + Duration::days(1)));
    }
}

#[test]
fn year_pillar_repeats_every_sixty_years() {
    for y in 1700..2300 {
        assert_eq!(year_pillar(y), year_pillar(y + 60));
    }
    assert_eq!(year_pillar(1984).to_string(), "갑자");
}

#[test]
fn tally_always_counts_eight_symbols() {
    for a in (0..60).step_by(7) {
        for b in (0..60).step_by(11) {
            let pillars = [
                sexagenary_at(a),
                sexagenary_at(b),
                sexagenary_at(a + b),
                sexagenary_at(a * b),
            ];
            assert_eq!(tally(&pillars).total(), 8);
        }
    }
}

#[test]
fn flat_luck_cycle_is_consecutive() {
    for year in 1900..2100 {
        for sex in [Sex::Male, Sex::Female] {
            let entries: Vec<_> = generate(year, sex).iter().collect();
            assert_eq!(entries.len(), 8);
            let first = ((year as i64 - 4).rem_euclid(10) + 1) % 10;
            assert_eq!(entries[0].sexagenary.index() as i64, first);
            for pair in entries.windows(2) {
                assert_eq!(
                    (pair[0].sexagenary.index() + 1) % 60,
                    pair[1].sexagenary.index()
                );
                assert!(pair[1].pillar.sexagenary().is_some());
            }
        }
    }
}
