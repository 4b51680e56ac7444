//! Live update channel.
//!
//! A persistent socket connection to the backend's push endpoint. Frames
//! are signals, not data: a `refresh_orders` message means the order
//! collection changed server-side and should be re-fetched. The channel
//! holds one replaceable subscriber; delivery always goes to whoever
//! currently occupies the slot.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use futures_util::StreamExt;
use serde::Deserialize;
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
    time,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};

const REFRESH_ORDERS: &str = "refresh_orders";

/// Transport status of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Bounded-retry reconnection, doubling the delay between attempts. A
/// successful connection resets the budget.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
        }
    }
}

/// Where and how to keep the push connection.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    pub url: String,
    pub reconnect: ReconnectPolicy,
}

impl LiveConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

struct ActiveSubscriber {
    id: u64,
    callback: Box<dyn FnMut() + Send>,
}

type SubscriberSlot = Arc<Mutex<Option<ActiveSubscriber>>>;

/// Handle to the channel's subscriber slot.
///
/// Canceling clears the slot only while this handle still owns it; a
/// handle left over from before a replacement does nothing.
pub struct Subscription {
    id: u64,
    slot: SubscriberSlot,
}

impl Subscription {
    pub fn cancel(self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if slot.as_ref().is_some_and(|active| active.id == self.id) {
            *slot = None;
        }
    }
}

/// Push channel for order change signals.
///
/// Opening spawns a reader task that owns the socket for the channel's
/// whole life; `close` shuts the task down and waits for it, after which
/// no subscriber can be invoked again.
pub struct LiveChannel {
    subscriber: SubscriberSlot,
    state_rx: watch::Receiver<ConnectionState>,
    shutdown: oneshot::Sender<()>,
    reader: JoinHandle<()>,
    next_subscriber: AtomicU64,
}

impl LiveChannel {
    /// Opens the channel. Connecting happens on the reader task, so this
    /// never fails; watch [`LiveChannel::connection_state`] for progress.
    #[must_use]
    pub fn open(config: LiveConfig) -> Self {
        let subscriber: SubscriberSlot = Arc::new(Mutex::new(None));
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let reader = tokio::spawn(run_reader(
            config,
            Arc::clone(&subscriber),
            state_tx,
            shutdown_rx,
        ));

        Self {
            subscriber,
            state_rx,
            shutdown: shutdown_tx,
            reader,
            next_subscriber: AtomicU64::new(0),
        }
    }

    /// Installs `callback` as the channel's subscriber, replacing any
    /// previous one.
    pub fn subscribe(&self, callback: impl FnMut() + Send + 'static) -> Subscription {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed);

        let mut slot = self.subscriber.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(ActiveSubscriber {
            id,
            callback: Box::new(callback),
        });

        Subscription {
            id,
            slot: Arc::clone(&self.subscriber),
        }
    }

    /// Current and future transport status.
    #[must_use]
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Closes the connection and waits for the reader task to finish.
    pub async fn close(self) {
        let _ = self.shutdown.send(());
        let _ = self.reader.await;
    }
}

async fn run_reader(
    config: LiveConfig,
    subscriber: SubscriberSlot,
    state: watch::Sender<ConnectionState>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut attempts = 0;
    let mut delay = config.reconnect.initial_delay;

    loop {
        match connect_async(config.url.as_str()).await {
            Ok((mut ws, _)) => {
                attempts = 0;
                delay = config.reconnect.initial_delay;
                let _ = state.send(ConnectionState::Connected);
                debug!(url = %config.url, "order feed connected");

                loop {
                    tokio::select! {
                        biased;

                        _ = &mut shutdown => {
                            let _ = ws.close(None).await;
                            return;
                        }
                        frame = ws.next() => match frame {
                            Some(Ok(Message::Text(text))) => deliver(text.as_str(), &subscriber),
                            Some(Ok(_)) => {}
                            Some(Err(error)) => {
                                warn!(%error, "order feed transport error");
                                break;
                            }
                            None => break,
                        },
                    }
                }

                let _ = state.send(ConnectionState::Disconnected);
                debug!("order feed disconnected");
            }
            Err(error) => {
                warn!(%error, "order feed connect failed");
            }
        }

        attempts += 1;
        if attempts > config.reconnect.max_attempts {
            warn!(attempts, "order feed retry budget spent, giving up");
            return;
        }

        tokio::select! {
            _ = &mut shutdown => return,
            () = time::sleep(delay) => {}
        }

        delay *= 2;
    }
}

fn deliver(text: &str, subscriber: &SubscriberSlot) {
    match serde_json::from_str::<PushMessage>(text) {
        Ok(push) if push.kind == REFRESH_ORDERS => {
            let mut slot = subscriber.lock().unwrap_or_else(PoisonError::into_inner);

            if let Some(active) = slot.as_mut() {
                (active.callback)();
            }
        }
        Ok(push) => debug!(kind = %push.kind, note = ?push.message, "ignoring push message"),
        Err(error) => warn!(%error, "malformed push message"),
    }
}

#[derive(Debug, Deserialize)]
struct PushMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: Option<String>,
}
