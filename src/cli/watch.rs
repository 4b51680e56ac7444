use std::sync::Arc;

use clap::Args;
use cortado::{
    config::BackendConfig,
    context::AppContext,
    live::{ConnectionState, LiveChannel, LiveConfig},
    orders::{BoardState, OrderBoard},
};
use tokio::signal;

#[derive(Debug, Args)]
pub(crate) struct WatchArgs {
    #[command(flatten)]
    backend: BackendConfig,
}

pub(crate) async fn run(args: WatchArgs) -> Result<(), String> {
    let context = AppContext::from_config(&args.backend)
        .map_err(|error| format!("failed to initialize services: {error}"))?;

    let live = LiveChannel::open(LiveConfig::new(args.backend.ws_url.clone()));
    let mut connection = live.connection_state();

    let board = OrderBoard::open(Arc::clone(&context.orders), live);
    let mut state = board.state();

    println!("watching orders; press Ctrl-C to stop");
    render(&state.borrow_and_update().clone());

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            result = &mut ctrl_c => {
                break result.map_err(|error| format!("failed to listen for Ctrl-C: {error}"));
            }
            changed = state.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                render(&state.borrow_and_update().clone());
            }
            changed = connection.changed() => {
                if changed.is_err() {
                    println!("live feed ended");
                    break Ok(());
                }
                match *connection.borrow_and_update() {
                    ConnectionState::Connected => println!("live feed connected"),
                    ConnectionState::Disconnected => println!("live feed disconnected"),
                }
            }
        }
    };

    board.close().await;

    outcome
}

fn render(state: &BoardState) {
    match state {
        BoardState::Loading => println!("loading orders..."),
        BoardState::Ready(orders) => println!("{}", super::orders::render_orders(orders)),
        BoardState::Errored(message) => println!("failed to fetch orders: {message}"),
    }
}
