use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use tracing::debug;

/// Read the track length from the container's own properties.
///
/// Used when the decoder cannot tell (most MP3s without a Xing header).
pub(super) fn tagged_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let d = tagged.properties().duration();
            (!d.is_zero()).then_some(d)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no duration from tags");
            None
        }
    }
}
