//! rodio-backed implementation of the player's transport seam.
//!
//! Decoding and output run inside rodio's own mixer thread; this module
//! only builds sinks and keeps elapsed-time bookkeeping.

mod sink;
mod transport;

pub use transport::RodioTransport;
