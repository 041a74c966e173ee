//! Lookup client: the submission lifecycle and its display-state machine.

pub mod async_client;

pub use async_client::{Client, ClientBuilder, Outcome};
