//! Inbound adapters translating browser requests into domain port calls.
//!
//! Framework details stay at this edge; handlers live under [`http`].

pub mod http;
