//! Orders: wire models, backend client, and the live board.

pub mod board;
pub mod client;
pub mod models;

pub use board::{BoardState, OrderBoard};
pub use client::*;
pub use models::*;
