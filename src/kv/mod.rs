//! REST client for the hosted Redis-compatible key-value store.

pub mod client;

pub use client::{Arg, Command, KvClient, UpstashConfig};
