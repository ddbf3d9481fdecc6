use super::model::Track;

/// Returned when a playlist would start out empty.
#[derive(Debug, thiserror::Error)]
#[error("a playlist needs at least one track")]
pub struct EmptyPlaylist;

/// Ordered, non-empty, append-only list of tracks.
#[derive(Clone, Debug)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, EmptyPlaylist> {
        if tracks.is_empty() {
            return Err(EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Index one step away from `current`, wrapping at both ends.
    pub fn step_from(&self, current: usize, forward: bool) -> usize {
        let n = self.tracks.len();
        if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        }
    }
}
