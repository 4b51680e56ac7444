//! Cortado
//!
//! Cortado is the client-side core of a café ordering system: menu catalog,
//! shopping cart, checkout submission, and a live order board fed by server
//! push.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod error;
pub mod live;
pub mod menu;
pub mod money;
pub mod orders;
pub mod prelude;
