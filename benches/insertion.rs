//! Insert and scan benchmarks over the library API.
//!
//! The store holds at most one leaf of rows, so the interesting numbers are
//! the fixed-cost paths: filling a fresh table to capacity (pager + leaf
//! insert) and scanning a full one (cursor walk + row decode).
//!
//! ```bash
//! cargo bench --bench insertion
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use minidb::{Database, ExecuteResult, Row, Statement};
use tempfile::TempDir;

fn fill_to_capacity(db: &mut Database) {
    for id in 1..=13 {
        let row = Row::new(id, "benchuser", "benchuser@example.com");
        let result = db.execute(Statement::Insert(row)).unwrap();
        assert_eq!(result, ExecuteResult::Insert);
    }
}

fn bench_fill(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut counter = 0u64;

    c.bench_function("fill a fresh table to capacity", |b| {
        b.iter_batched(
            || {
                counter += 1;
                Database::open(dir.path().join(format!("fill-{counter}.db"))).unwrap()
            },
            |mut db| fill_to_capacity(&mut db),
            BatchSize::SmallInput,
        )
    });
}

fn bench_scan(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut db = Database::open(dir.path().join("scan.db")).unwrap();
    fill_to_capacity(&mut db);

    c.bench_function("scan a full table", |b| {
        b.iter(|| {
            let ExecuteResult::Select { rows } = db.execute(Statement::Select).unwrap() else {
                panic!("expected a select result");
            };
            assert_eq!(rows.len(), 13);
        })
    });
}

criterion_group!(benches, bench_fill, bench_scan);
criterion_main!(benches);
