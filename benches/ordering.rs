//! Benchmarks for the ordering chains.
//!
//! Sorting happens on every export and on every list-view render, so the
//! chains should stay comfortably below a millisecond for realistic
//! dataset sizes (a few thousand entities).

// Criterion macros generate items without docs - this is expected for benchmarks
// Benchmarks use expect/unwrap for simplicity - panics are acceptable in benchmarks
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use labarchive::models::{TeachingActivity, TeachingLevel};
use labarchive::ordering::chains;

fn activities(count: u64) -> Vec<TeachingActivity> {
    let base = NaiveDate::from_ymd_opt(2015, 9, 1).unwrap();
    (0..count)
        .map(|id| TeachingActivity {
            id,
            code: format!("C{:03}", id % 40),
            title: format!("Course {id}"),
            level: match id % 4 {
                0 => TeachingLevel::DoctoralDegree,
                1 => TeachingLevel::MasterDegree,
                2 => TeachingLevel::BachelorDegree,
                _ => TeachingLevel::HighSchoolDegree,
            },
            person_id: id % 17,
            university: None,
            start_date: base.checked_add_days(Days::new(id % 365)),
            end_date: (id % 5 != 0).then(|| base.checked_add_days(Days::new(300 + id % 365))).flatten(),
            hours_per_year: 12 + id % 48,
        })
        .collect()
}

fn bench_sort(c: &mut Criterion) {
    let chain = chains::teaching_activities();
    let mut group = c.benchmark_group("teaching_activity_sort");

    for size in [100_u64, 1_000, 10_000] {
        let items = activities(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| {
                let mut working = items.clone();
                chain.sort(&mut working);
                working
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
