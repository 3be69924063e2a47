use bucketmap::{
    ClassificationTable, EntityMap, EntityRecord, NormalizationPlan, Normalizer, ParallelConfig,
    RawValue,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn generate_entities(count: usize) -> EntityMap {
    (0..count)
        .map(|i| {
            let record: EntityRecord = [
                ("gdp", RawValue::from((i * 7919 % 100_000) as i64)),
                ("population", RawValue::from(((i * 104_729) % 5_000) as f64 / 3.0)),
                ("access_rank", RawValue::from((i % 90) as i64)),
                ("needs_rank", RawValue::from(((i * 13) % 80).to_string())),
                (
                    "density",
                    if i % 11 == 0 {
                        RawValue::Null
                    } else {
                        RawValue::from(i as f64 * 0.25)
                    },
                ),
            ]
            .into_iter()
            .collect();
            (format!("E{i:05}"), record)
        })
        .collect()
}

const FIELDS: [&str; 5] = ["gdp", "population", "access_rank", "needs_rank", "density"];

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [100, 1_000, 10_000] {
        let entities = generate_entities(size);

        let sequential = Normalizer::new(
            NormalizationPlan::rank_groups().with_parallel(ParallelConfig::sequential()),
        );
        group.bench_with_input(BenchmarkId::new("sequential", size), &entities, |b, e| {
            b.iter(|| sequential.normalize(black_box(e), &FIELDS))
        });

        let parallel = Normalizer::new(NormalizationPlan::rank_groups().with_parallel(
            ParallelConfig {
                enabled: true,
                min_entities: 1,
            },
        ));
        group.bench_with_input(BenchmarkId::new("parallel", size), &entities, |b, e| {
            b.iter(|| parallel.normalize(black_box(e), &FIELDS))
        });
    }

    group.finish();
}

fn benchmark_classify(c: &mut Criterion) {
    let table = bucketmap::shortage_groups();
    let wide = ClassificationTable::new(
        "wide",
        (0..500_i32)
            .map(|i| bucketmap::ClassRange::new(f64::from(i * 10 + 1), f64::from(i * 10 + 10), i.into()))
            .collect(),
    )
    .expect("contiguous table");

    c.bench_function("classify_shortage", |b| {
        b.iter(|| (1..=80).filter_map(|r| table.classify(black_box(f64::from(r)))).count())
    });
    c.bench_function("classify_wide_table", |b| {
        b.iter(|| (1..=5000).filter_map(|r| wide.classify(black_box(f64::from(r)))).count())
    });
}

criterion_group!(benches, benchmark_normalize, benchmark_classify);
criterion_main!(benches);
