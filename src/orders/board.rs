//! Order board: an always-current view of the order collection.
//!
//! The board owns the push channel and a driver task. Every push signal
//! (or manual refresh) asks the driver to re-fetch the full collection;
//! re-fetches are serialized, and signals arriving while one is in
//! flight coalesce into a single follow-up fetch.

use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::warn;

use crate::{
    error::ApiError,
    live::{LiveChannel, Subscription},
    orders::{
        client::OrdersApi,
        models::{Order, OrderStatus},
    },
};

/// What the board currently knows about the order collection.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardState {
    Loading,
    Ready(Vec<Order>),
    Errored(String),
}

/// Live order list controller.
pub struct OrderBoard {
    api: Arc<dyn OrdersApi>,
    refresh_tx: mpsc::Sender<()>,
    state_rx: watch::Receiver<BoardState>,
    driver: JoinHandle<()>,
    live: LiveChannel,
    subscription: Subscription,
}

impl OrderBoard {
    /// Opens the board over an order client and a push channel, taking
    /// ownership of the channel for the board's lifetime. The first fetch
    /// starts immediately.
    #[must_use]
    pub fn open(api: Arc<dyn OrdersApi>, live: LiveChannel) -> Self {
        // One slot is the coalescing buffer: a signal during an in-flight
        // fetch queues exactly one follow-up, further signals drop.
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (state_tx, state_rx) = watch::channel(BoardState::Loading);

        let driver = tokio::spawn(run_driver(Arc::clone(&api), refresh_rx, state_tx));

        let signal = refresh_tx.clone();
        let subscription = live.subscribe(move || {
            let _ = signal.try_send(());
        });

        Self {
            api,
            refresh_tx,
            state_rx,
            driver,
            live,
            subscription,
        }
    }

    /// Current and future board state.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<BoardState> {
        self.state_rx.clone()
    }

    /// Requests a re-fetch; a no-op if one is already queued.
    pub fn refresh(&self) {
        let _ = self.refresh_tx.try_send(());
    }

    /// Moves an order to a new status, then re-fetches so the view
    /// reflects the authoritative post-update state. No optimistic local
    /// mutation happens on failure or success.
    ///
    /// # Errors
    ///
    /// Returns the order client's error untouched.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, ApiError> {
        let order = self.api.update_order_status(id, status).await?;

        self.refresh();

        Ok(order)
    }

    /// Tears the board down: the driver stops first, so an in-flight
    /// fetch can never publish after this returns, then the push channel
    /// closes.
    pub async fn close(self) {
        self.driver.abort();
        let _ = self.driver.await;

        self.subscription.cancel();
        self.live.close().await;
    }
}

async fn run_driver(
    api: Arc<dyn OrdersApi>,
    mut refresh_rx: mpsc::Receiver<()>,
    state: watch::Sender<BoardState>,
) {
    loop {
        let _ = state.send(BoardState::Loading);

        let next = match api.list_orders().await {
            Ok(orders) => BoardState::Ready(orders),
            Err(error) => {
                warn!(%error, "order fetch failed");
                BoardState::Errored(error.to_string())
            }
        };

        let _ = state.send(next);

        if refresh_rx.recv().await.is_none() {
            return;
        }
    }
}
