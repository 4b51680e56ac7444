//! Order wire models.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Error for an unrecognized status word.
#[derive(Debug, Error, PartialEq)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Order as served by the backend. Clients hold a read-only copy that is
/// stale the moment a push signal arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub for_name: String,
    pub for_email: String,
    pub order_date: String,
    pub status: OrderStatus,
    pub total: Decimal,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Line item on a placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub item_name: String,
    pub item_description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub notes: String,
}

/// Order draft submitted at checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub for_name: String,
    pub for_email: String,
    pub order_date: String,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// Draft line mapped from a cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub notes: String,
}
