//! Playlist module: the fixed, ordered set of tracks the player cycles over.
//!
//! The playlist is built once at startup from configuration and never
//! changes for the lifetime of the session.

mod model;

pub use model::*;
