//! Cortado prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{HttpSessionClient, SessionApi, SessionUser, UserProfile},
    cart::{CartLine, CartStore, CartView, CartWatcherId},
    checkout::{CheckoutContact, CheckoutError, CheckoutFlow, CheckoutSummary, OrderConfirmation},
    config::BackendConfig,
    context::{AppContext, AppInitError},
    error::ApiError,
    live::{ConnectionState, LiveChannel, LiveConfig, ReconnectPolicy, Subscription},
    menu::{HttpMenuClient, MenuApi, MenuItem, NewMenuItem, UpdateMenuItem},
    money::{AmountError, format_amount, parse_amount, to_cents},
    orders::{
        BoardState, HttpOrdersClient, NewOrder, NewOrderItem, Order, OrderBoard, OrderItem,
        OrderStatus, OrdersApi,
    },
};
