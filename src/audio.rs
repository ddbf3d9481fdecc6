//! Audio playback: the `PlaybackHandle` capability and its rodio-backed
//! implementation running on a dedicated thread.

mod handle;
mod player;
mod probe;
mod sink;
mod thread;
mod transport;
mod types;

pub use handle::{PlaybackError, PlaybackHandle};
pub use player::AudioPlayer;
pub use types::AudioEvent;

#[cfg(test)]
mod tests;
