use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pharaoh::manage::{filter_orders, summarize, OrderFilter};
use pharaoh::model::{Order, OrderDraft, OrderStatus, SourcePage};
use pharaoh::error::DeliveryFailure;
use pharaoh::{MemoryStore, NotificationPolicy, OrderNotification, OrderNotifier, SubmissionService};
use std::sync::Arc;
use tokio::runtime::Runtime;
use uuid::Uuid;

fn make_orders(count: usize) -> Vec<Order> {
  let pages = [SourcePage::Package, SourcePage::Experience, SourcePage::Trip];
  let statuses = [OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Cancelled, OrderStatus::Approved];
  let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
  (0..count)
    .map(|i| Order {
      id: Uuid::new_v4(),
      details: OrderDraft {
        name: format!("Guest {}", i),
        email: format!("guest{}@example.com", i),
        phone: "0100".to_string(),
        address: None,
        notes: None,
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days((i % 300) as i64),
        people: (i % 6 + 1) as u32,
        source_page: pages[i % pages.len()].clone(),
        source_id: format!("item-{}", i % 40),
        source_name: format!("Item {}", i % 40),
        price: if i % 5 == 0 { None } else { Some((i % 50) as f64 * 25.0) },
      },
      status: statuses[i % statuses.len()],
      created_at: base + Duration::minutes(i as i64),
    })
    .collect()
}

fn bench_order_filter(c: &mut Criterion) {
  let mut group = c.benchmark_group("OrderFilter");

  for size in [100usize, 1_000, 10_000].iter() {
    let orders = make_orders(*size);
    let filters = [
      ("all", OrderFilter::default()),
      (
        "search",
        OrderFilter {
          search: "GUEST 12".to_string(),
          ..Default::default()
        },
      ),
      (
        "price_status_type",
        OrderFilter {
          search: "250".to_string(),
          status: Some(OrderStatus::Confirmed),
          source_page: Some(SourcePage::Trip),
        },
      ),
    ];
    group.throughput(Throughput::Elements(*size as u64));
    for (label, filter) in filters.iter() {
      group.bench_with_input(BenchmarkId::new(*label, size), &orders, |b, orders| {
        b.iter(|| filter_orders(orders, filter).len())
      });
    }
  }
  group.finish();
}

fn bench_summary(c: &mut Criterion) {
  let mut group = c.benchmark_group("DashboardSummary");
  for size in [1_000usize, 10_000].iter() {
    let orders = make_orders(*size);
    group.throughput(Throughput::Elements(*size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
      b.iter(|| summarize(orders).total_orders)
    });
  }
  group.finish();
}

struct NullNotifier;

#[async_trait::async_trait]
impl OrderNotifier for NullNotifier {
  async fn notify(&self, _notification: &OrderNotification) -> Result<(), DeliveryFailure> {
    Ok(())
  }
}

fn bench_submission(c: &mut Criterion) {
  let mut group = c.benchmark_group("Submission");
  let rt = Runtime::new().unwrap();
  let service = SubmissionService::new(Arc::new(MemoryStore::new()), Arc::new(NullNotifier), NotificationPolicy::Required);
  let template = make_orders(1).remove(0).details;
  let service = &service;

  group.bench_function("unique_key_in_memory", |b| {
    b.to_async(&rt).iter_batched(
      || OrderDraft {
        email: format!("{}@example.com", Uuid::new_v4()),
        ..template.clone()
      },
      |draft| async move { service.submit(draft).await.is_ok() },
      criterion::BatchSize::SmallInput,
    )
  });
  group.finish();
}

criterion_group!(benches, bench_order_filter, bench_summary, bench_submission);
criterion_main!(benches);
