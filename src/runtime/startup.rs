use std::ffi::OsString;
use std::path::Path;

use tracing::warn;

use crate::app::Controller;
use crate::audio::PlaybackHandle;
use crate::config;
use crate::library::{EmptyPlaylist, collect_uploads, seed_playlist};

/// Seed the playlist, append anything passed on the command line and wrap
/// it all in a controller around `handle`.
pub fn build_controller<H: PlaybackHandle>(
    settings: &config::Settings,
    handle: H,
    upload_args: &[OsString],
) -> Result<Controller<H>, EmptyPlaylist> {
    let playlist = seed_playlist(&settings.library)?;
    let mut controller = Controller::new(playlist, handle, settings.audio.initial_volume);

    for arg in upload_args {
        let files = collect_uploads(arg, &settings.library);
        if files.is_empty() {
            warn!(path = %Path::new(arg).display(), "nothing playable at path");
        }
        controller.append_tracks(files);
    }

    Ok(controller)
}
