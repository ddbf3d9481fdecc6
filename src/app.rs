//! Application module: the playback controller and the state it owns.
//!
//! The `Controller` lives in `app::controller` and is the only writer of
//! `PlaybackState`; views read snapshots and send back `Intent`s.

mod controller;
mod format;
mod intent;
mod state;

pub use controller::Controller;
pub use format::format_time;
pub use intent::Intent;
pub use state::PlaybackState;
