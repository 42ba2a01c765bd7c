use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use songsnaps::{MemoryRecordStore, OrderFilter, OrderService};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

fn seeded_service(rt: &Runtime, orders: usize) -> OrderService {
  let service = OrderService::new(Arc::new(MemoryRecordStore::new()));
  rt.block_on(async {
    for i in 0..orders {
      let plan = match i % 3 {
        0 => "snap",
        1 => "snappack",
        _ => "creator",
      };
      let receipt = service.create_order(plan).await.expect("seed order");
      if i % 4 == 0 {
        service.fulfill_order(&receipt.order_id).await.expect("seed fulfill");
      }
    }
  });
  service
}

fn bench_create_order(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let service = OrderService::new(Arc::new(MemoryRecordStore::new()));

  let mut group = c.benchmark_group("create_order");
  group.throughput(Throughput::Elements(1));
  group.bench_function("memory_store", |b| {
    b.to_async(&rt).iter(|| async { service.create_order("snap").await.unwrap() });
  });
  group.finish();
}

fn bench_list_orders(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut group = c.benchmark_group("list_orders");

  for size in [100usize, 1_000, 10_000] {
    let service = seeded_service(&rt, size);
    let filter = OrderFilter::all().with_fulfilled(false).with_plan("snap");
    group.throughput(Throughput::Elements(size as u64));
    group.bench_with_input(BenchmarkId::new("filtered_default_limit", size), &size, |b, _| {
      b.to_async(&rt).iter(|| async { service.list_orders(None, &filter).await.unwrap() });
    });
  }
  group.finish();
}

fn bench_stats(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut group = c.benchmark_group("stats");

  for size in [100usize, 10_000] {
    let service = seeded_service(&rt, size);
    group.bench_with_input(BenchmarkId::new("memory_store", size), &size, |b, _| {
      b.to_async(&rt).iter(|| async { service.stats().await.unwrap() });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_create_order, bench_list_orders, bench_stats);
criterion_main!(benches);
