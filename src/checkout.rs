//! Checkout flow: turns the cart into a submitted order.

use std::sync::Arc;

use jiff::Zoned;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::CartStore,
    error::ApiError,
    money::to_cents,
    orders::{
        client::OrdersApi,
        models::{NewOrder, NewOrderItem, OrderStatus},
    },
};

/// Tax rate shown on the checkout summary. Presentation only; the
/// submitted order total stays the pre-tax subtotal.
const TAX_RATE: Decimal = dec!(0.08);

/// Errors that can occur while submitting an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart to submit.
    #[error("the cart is empty")]
    EmptyCart,

    /// The contact email was missing.
    #[error("email is required")]
    EmailRequired,

    /// The order client failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Who the order is for. The name may stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutContact {
    pub name: String,
    pub email: String,
}

/// Result of a successful submission. The confirmation view is built
/// from the submitted draft, not from a server re-fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order: NewOrder,
    pub order_id: i64,
}

/// Display aggregate for the checkout view.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CheckoutSummary {
    #[must_use]
    pub fn of(cart: &CartStore) -> Self {
        let subtotal = cart.total_price();

        Self {
            subtotal: to_cents(subtotal),
            tax: to_cents(subtotal * TAX_RATE),
            total: to_cents(subtotal * (Decimal::ONE + TAX_RATE)),
        }
    }
}

/// Submits carts as orders.
pub struct CheckoutFlow {
    orders: Arc<dyn OrdersApi>,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersApi>) -> Self {
        Self { orders }
    }

    /// Builds the order draft from the cart, submits it, and clears the
    /// cart. On any failure the cart is left exactly as it was, so the
    /// submission can be retried.
    ///
    /// Retrying after a lost response issues a fresh create call; there
    /// is no idempotency token, so the server may see the order twice.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing to submit.
    /// - [`CheckoutError::EmailRequired`]: missing contact email; no
    ///   network call is made.
    /// - [`CheckoutError::Api`]: the backend rejected or never received
    ///   the order.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        contact: &CheckoutContact,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if contact.email.is_empty() {
            return Err(CheckoutError::EmailRequired);
        }

        let draft = NewOrder {
            for_name: contact.name.clone(),
            for_email: contact.email.clone(),
            order_date: Zoned::now().strftime("%Y-%m-%d %H:%M:%S").to_string(),
            status: OrderStatus::Pending,
            total: to_cents(cart.total_price()),
            notes: None,
            items: cart
                .lines()
                .iter()
                .map(|line| NewOrderItem {
                    item_id: line.item_id.clone(),
                    item_name: line.name.clone(),
                    quantity: line.quantity,
                    price: line.unit_cost,
                    notes: line.special_instructions.clone().unwrap_or_default(),
                })
                .collect(),
        };

        let created = self.orders.create_order(&draft).await?;

        cart.clear();
        info!(order_id = created.id, "order placed");

        Ok(OrderConfirmation {
            order: draft,
            order_id: created.id,
        })
    }
}
