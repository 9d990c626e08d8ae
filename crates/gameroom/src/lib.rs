//! Async runtime for live Coup games.
//!
//! This crate wraps the pure rules engine in a per-room actor. Every room is
//! one tokio task that exclusively owns its [`coup_gameplay::Game`] and
//! serializes all player traffic through a single inbox, so no two intents
//! ever race on the shared document and the reaction countdown lives with
//! the state it times out.
//!
//! ## Architecture
//!
//! - [`Room`] — The per-room actor: inbox, game, broadcast table, countdown
//! - [`Lodge`] — Room registry: open, join, post, close, idle sweep
//! - [`Table`] — Per-player outbound senders (unicast/broadcast)
//! - [`Countdown`] — One-second deadline driving window timeouts
//!
//! ## Wire Types
//!
//! - [`Intent`] — Client→room commands, JSON-tagged
//! - [`Bulletin`] — Room→client traffic: snapshots and rejections
//! - [`Post`] — In-process envelope into the room task
//! - [`Protocol`] — JSON decode with its own error type
mod handle;
mod intent;
mod lodge;
mod message;
mod post;
mod protocol;
mod room;
mod table;
mod timer;

pub use handle::*;
pub use intent::*;
pub use lodge::*;
pub use message::*;
pub use post::*;
pub use protocol::*;
pub use room::*;
pub use table::*;
pub use timer::*;
