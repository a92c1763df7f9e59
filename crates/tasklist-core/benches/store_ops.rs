#![allow(missing_docs)]

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tasklist_core::persistence::encode;
use tasklist_core::{MemoryStore, Task, TaskList, TaskListStore};

fn seeded_blob(len: usize) -> String {
    let tasks: TaskList = (0..len).map(|idx| Task::new(format!("task {idx}"))).collect();
    match encode(&tasks) {
        Ok(raw) => raw,
        Err(err) => panic!("failed to encode seed list: {err}"),
    }
}

fn mutation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_list_mutation");
    for &len in &[16usize, 256, 4096] {
        let raw = seeded_blob(len);
        group.bench_with_input(BenchmarkId::new("toggle", len), &len, |b, &len| {
            b.iter_batched(
                || TaskListStore::open(MemoryStore::with_raw(raw.clone())),
                |mut store| {
                    black_box(store.toggle_completed(len / 2).map(|list| list.len()).ok());
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("delete", len), &len, |b, _| {
            b.iter_batched(
                || TaskListStore::open(MemoryStore::with_raw(raw.clone())),
                |mut store| {
                    black_box(store.delete(0).map(|list| list.len()).ok());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, mutation_benchmark);
criterion_main!(benches);
