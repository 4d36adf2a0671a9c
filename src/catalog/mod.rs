//! Catalog and order types shared between the server API and the CSR
//! storefront. Ids and timestamps are strings here; the persistence layer
//! owns the typed forms and converts at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::site::config::PaymentMethod;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub slug: String,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price_cents: i64,
  #[serde(default = "default_currency")]
  pub currency: String,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub brand: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default)]
  pub stock: i64,
  #[serde(default = "default_true")]
  pub active: bool,
}

fn default_currency() -> String {
  "USD".into()
}
fn default_true() -> bool {
  true
}

impl Product {
  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub id: String,
  pub slug: String,
  pub name: String,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
  pub id: String,
  pub slug: String,
  pub name: String,
}

/// One cart line, client-held until checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  pub product_id: String,
  pub quantity: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
  #[default]
  Pending,
  Paid,
  Shipped,
  Delivered,
  Cancelled,
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Paid => "paid",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for OrderStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(OrderStatus::Pending),
      "paid" => Ok(OrderStatus::Paid),
      "shipped" => Ok(OrderStatus::Shipped),
      "delivered" => Ok(OrderStatus::Delivered),
      "cancelled" => Ok(OrderStatus::Cancelled),
      other => Err(format!("unknown order status: {}", other)),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
  pub product_id: String,
  pub product_name: String,
  pub unit_price_cents: i64,
  pub quantity: u32,
}

impl OrderLine {
  pub fn line_total_cents(&self) -> i64 {
    self.unit_price_cents * self.quantity as i64
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<String>,
  pub email: String,
  pub lines: Vec<OrderLine>,
  pub total_cents: i64,
  #[serde(default = "default_currency")]
  pub currency: String,
  #[serde(default)]
  pub status: OrderStatus,
  #[serde(default)]
  pub payment_method: PaymentMethod,
  #[serde(default)]
  pub shipping_address: String,
  pub created_at: String,
}

/// Sum of line totals. Recomputed server-side from stored prices at
/// checkout; a client-supplied total is never trusted.
pub fn order_total_cents(lines: &[OrderLine]) -> i64 {
  lines.iter().map(OrderLine::line_total_cents).sum()
}

/// `1234` cents → `"12.34"`.
pub fn format_price(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let cents = cents.abs();
  format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn line(price: i64, qty: u32) -> OrderLine {
    OrderLine {
      product_id: "p1".into(),
      product_name: "Basket".into(),
      unit_price_cents: price,
      quantity: qty,
    }
  }

  #[test]
  fn totals_sum_line_items() {
    assert_eq!(order_total_cents(&[]), 0);
    assert_eq!(order_total_cents(&[line(1999, 2), line(500, 1)]), 4498);
  }

  #[test]
  fn price_formatting() {
    assert_eq!(format_price(0), "0.00");
    assert_eq!(format_price(5), "0.05");
    assert_eq!(format_price(1234), "12.34");
    assert_eq!(format_price(-250), "-2.50");
  }

  #[test]
  fn order_status_round_trips() {
    for status in [
      OrderStatus::Pending,
      OrderStatus::Paid,
      OrderStatus::Shipped,
      OrderStatus::Delivered,
      OrderStatus::Cancelled,
    ] {
      assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
    }
  }

  #[test]
  fn product_defaults() {
    let product: Product =
      serde_json::from_str(r#"{"id":"1","slug":"basket","name":"Basket","price_cents":1999}"#)
        .unwrap();
    assert!(product.active);
    assert_eq!(product.currency, "USD");
    assert!(!product.in_stock());
  }
}
