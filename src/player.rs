//! Playback controller: the single source of truth for which track is
//! selected, whether the transport is playing, volume and progress.
//!
//! The controller drives a [`Transport`] (the audio decode/output facility)
//! and pushes notifications into a [`UiListener`]. Both are traits so the
//! core logic stays independent of any concrete audio backend or front-end.

mod controller;
mod state;
mod time;
mod transport;

pub use controller::*;
pub use state::*;
pub use time::*;
pub use transport::*;

#[cfg(test)]
mod tests;
