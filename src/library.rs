//! Playlist store: tracks, locators, the built-in seed playlist and
//! user uploads.

mod locator;
mod model;
mod playlist;
mod seed;
mod upload;

pub use locator::{Locator, LocatorRegistry};
pub use model::{Track, UploadedFile};
pub use playlist::{EmptyPlaylist, Playlist};
pub use seed::seed_playlist;
pub use upload::collect_uploads;

#[cfg(test)]
mod tests;
