// core/src/manage/analytics.rs

//! Dashboard figures computed from the order list.

use crate::model::{Order, OrderStatus, SourcePage};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const TOP_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledCount {
  pub label: String,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyFigure {
  /// `YYYY-MM`
  pub month: String,
  pub orders: usize,
  pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
  pub total_orders: usize,
  /// Sum of prices over `approved` orders.
  pub total_revenue: f64,
  pub by_source: Vec<LabeledCount>,
  pub by_status: Vec<LabeledCount>,
  pub per_month: Vec<MonthlyFigure>,
  pub top_items: Vec<LabeledCount>,
}

/// Builds the dashboard summary. Revenue and the status breakdown follow the
/// review-era statuses (`pending`, `approved`, `rejected`) the reports were
/// defined against.
pub fn summarize(orders: &[Order]) -> DashboardSummary {
  let revenue_of = |o: &Order| {
    if o.status == OrderStatus::Approved {
      o.details.price.unwrap_or(0.0)
    } else {
      0.0
    }
  };

  let by_source = [SourcePage::Package, SourcePage::Experience, SourcePage::Trip]
    .into_iter()
    .map(|page| LabeledCount {
      count: orders.iter().filter(|o| o.details.source_page == page).count(),
      label: page.to_string(),
    })
    .collect();

  let by_status = [OrderStatus::Pending, OrderStatus::Approved, OrderStatus::Rejected]
    .into_iter()
    .map(|status| LabeledCount {
      label: status.to_string(),
      count: orders.iter().filter(|o| o.status == status).count(),
    })
    .collect();

  let mut months: BTreeMap<String, MonthlyFigure> = BTreeMap::new();
  for order in orders {
    let month = order.created_at.format("%Y-%m").to_string();
    let figure = months.entry(month.clone()).or_insert(MonthlyFigure {
      month,
      orders: 0,
      revenue: 0.0,
    });
    figure.orders += 1;
    figure.revenue += revenue_of(order);
  }

  let mut item_counts: HashMap<&str, usize> = HashMap::new();
  for order in orders {
    *item_counts.entry(order.details.source_name.as_str()).or_default() += 1;
  }
  let mut top_items: Vec<LabeledCount> = item_counts
    .into_iter()
    .map(|(label, count)| LabeledCount {
      label: label.to_string(),
      count,
    })
    .collect();
  top_items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
  top_items.truncate(TOP_ITEMS);

  DashboardSummary {
    total_orders: orders.len(),
    total_revenue: orders.iter().map(revenue_of).sum(),
    by_source,
    by_status,
    per_month: months.into_values().collect(),
    top_items,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::OrderDraft;
  use chrono::{NaiveDate, TimeZone, Utc};
  use uuid::Uuid;

  fn order(page: SourcePage, item: &str, price: Option<f64>, status: OrderStatus, month: u32) -> Order {
    Order {
      id: Uuid::new_v4(),
      details: OrderDraft {
        name: "Guest".to_string(),
        email: "guest@x.com".to_string(),
        phone: "1".to_string(),
        address: None,
        notes: None,
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        people: 1,
        source_page: page,
        source_id: item.to_lowercase(),
        source_name: item.to_string(),
        price,
      },
      status,
      created_at: Utc.with_ymd_and_hms(2025, month, 3, 12, 0, 0).unwrap(),
    }
  }

  #[test]
  fn revenue_counts_only_approved_orders() {
    let orders = vec![
      order(SourcePage::Package, "Nile Cruise", Some(1200.0), OrderStatus::Approved, 1),
      order(SourcePage::Package, "Nile Cruise", Some(800.0), OrderStatus::Pending, 1),
      order(SourcePage::Experience, "Felucca", Some(90.0), OrderStatus::Confirmed, 2),
      order(SourcePage::Trip, "Siwa", None, OrderStatus::Approved, 2),
    ];
    let summary = summarize(&orders);
    assert_eq!(summary.total_orders, 4);
    assert_eq!(summary.total_revenue, 1200.0);
    assert_eq!(summary.per_month.len(), 2);
    assert_eq!(summary.per_month[0].month, "2025-01");
    assert_eq!(summary.per_month[0].orders, 2);
    assert_eq!(summary.per_month[0].revenue, 1200.0);
  }

  #[test]
  fn breakdowns_cover_fixed_labels() {
    let orders = vec![
      order(SourcePage::Package, "A", None, OrderStatus::Pending, 3),
      order(SourcePage::Other("blog".to_string()), "B", None, OrderStatus::Cancelled, 3),
    ];
    let summary = summarize(&orders);
    let labels: Vec<&str> = summary.by_source.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["package", "experience", "trip"]);
    assert_eq!(summary.by_source[0].count, 1);
    let statuses: Vec<(&str, usize)> = summary.by_status.iter().map(|c| (c.label.as_str(), c.count)).collect();
    assert_eq!(statuses, [("pending", 1), ("approved", 0), ("rejected", 0)]);
  }

  #[test]
  fn top_items_ranked_by_order_count() {
    let mut orders = Vec::new();
    for (item, n) in [("Luxor", 3), ("Aswan", 1), ("Giza", 2), ("Dahab", 1), ("Siwa", 1), ("Abu Simbel", 1)] {
      for _ in 0..n {
        orders.push(order(SourcePage::Trip, item, None, OrderStatus::Pending, 5));
      }
    }
    let top = summarize(&orders).top_items;
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].label, "Luxor");
    assert_eq!(top[1].label, "Giza");
    assert_eq!(top[2].label, "Abu Simbel");
  }
}
