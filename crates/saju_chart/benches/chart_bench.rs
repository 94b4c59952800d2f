use std::path::PathBuf;

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_chart::{BirthTime, ChartConfig, ChartEngine, LuckCycleRule, RuleSet, Sex};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn load(config: ChartConfig) -> Option<ChartEngine> {
    match ChartEngine::new(config) {
        Ok(engine) => Some(engine),
        Err(e) => {
            eprintln!("Skipping chart benchmarks: {e}");
            None
        }
    }
}

fn chart_bench(c: &mut Criterion) {
    let Some(flat) = load(ChartConfig::from_data_dir(data_dir())) else {
        return;
    };
    let Some(polarity) = load(
        ChartConfig::from_data_dir(data_dir()).with_luck_cycle_rule(LuckCycleRule::Polarity),
    ) else {
        return;
    };
    let (Some(date), Ok(time)) = (NaiveDate::from_ymd_opt(1990, 5, 10), BirthTime::new(14, 0))
    else {
        return;
    };

    let mut group = c.benchmark_group("chart");
    group.bench_function("compute_chart_flat", |b| {
        b.iter(|| flat.compute_chart(black_box(date), time, Sex::Male))
    });
    group.bench_function("compute_chart_polarity", |b| {
        b.iter(|| polarity.compute_chart(black_box(date), time, Sex::Female))
    });
    group.bench_function("compute_chart_from_strs", |b| {
        b.iter(|| flat.compute_chart_from_strs(black_box("1990-05-10"), "14:00", "남"))
    });
    group.finish();
}

fn table_bench(c: &mut Criterion) {
    let config = ChartConfig::from_data_dir(data_dir());
    let Some(engine) = load(config.clone()) else {
        return;
    };
    let Some(date) = NaiveDate::from_ymd_opt(2012, 8, 17) else {
        return;
    };

    let mut group = c.benchmark_group("tables");
    group.sample_size(10);
    group.bench_function("load_tables", |b| {
        b.iter(|| ChartEngine::new(black_box(config.clone())))
    });
    group.bench_function("solar_to_lunar", |b| {
        b.iter(|| engine.solar_to_lunar(black_box(date)))
    });
    group.bench_function("term_for", |b| b.iter(|| engine.term_for(black_box(date))));
    group.finish();
}

fn rules_bench(c: &mut Criterion) {
    let Some(engine) = load(ChartConfig::from_data_dir(data_dir())) else {
        return;
    };
    let Ok(rules) = RuleSet::load(&data_dir().join("sample_rules.json")) else {
        return;
    };
    let Ok(chart) = engine.compute_chart_from_strs("1990-05-10", "14:00", "남") else {
        return;
    };

    c.bench_function("rules_matching", |b| {
        b.iter(|| rules.matching(black_box(&chart)).count())
    });
}

criterion_group!(benches, chart_bench, table_bench, rules_bench);
criterion_main!(benches);
