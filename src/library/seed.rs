use crate::config::LibrarySettings;

use super::locator::Locator;
use super::model::Track;
use super::playlist::{EmptyPlaylist, Playlist};

/// Build the startup playlist from the configured seed tracks.
///
/// Paths are not checked here; a missing file only surfaces when the
/// track is loaded, the same as any other decode failure.
pub fn seed_playlist(settings: &LibrarySettings) -> Result<Playlist, EmptyPlaylist> {
    let tracks = settings
        .seed_tracks
        .iter()
        .map(|s| {
            Track::new(
                s.title.clone(),
                Locator::Static(settings.seed_dir.join(&s.file)),
            )
        })
        .collect();
    Playlist::new(tracks)
}
