use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn names(files: &[UploadedFile]) -> Vec<String> {
    files.iter().map(|f| f.name.clone()).collect()
}

#[test]
fn seed_playlist_resolves_four_tracks_against_seed_dir() {
    let settings = LibrarySettings {
        seed_dir: PathBuf::from("/srv/songs"),
        ..LibrarySettings::default()
    };
    let playlist = seed_playlist(&settings).unwrap();

    assert_eq!(playlist.len(), 4);
    let first = &playlist.tracks()[0];
    assert_eq!(first.title, "Blinding Lights");
    assert_eq!(
        first.source,
        Locator::Static(PathBuf::from("/srv/songs/Blinding Lights.mp3"))
    );
    assert_eq!(playlist.tracks()[3].title, "Seven Nation Army");
}

#[test]
fn seed_playlist_rejects_empty_seed_list() {
    let settings = LibrarySettings {
        seed_tracks: Vec::new(),
        ..LibrarySettings::default()
    };
    assert!(seed_playlist(&settings).is_err());
}

#[test]
fn step_from_wraps_in_both_directions() {
    let playlist = seed_playlist(&LibrarySettings::default()).unwrap();
    assert_eq!(playlist.step_from(3, true), 0);
    assert_eq!(playlist.step_from(0, false), 3);
    assert_eq!(playlist.step_from(1, true), 2);
    assert_eq!(playlist.step_from(2, false), 1);
}

#[test]
fn step_from_on_single_track_stays_put() {
    let playlist = Playlist::new(vec![Track::new(
        "only",
        Locator::Static(PathBuf::from("only.mp3")),
    )])
    .unwrap();
    assert_eq!(playlist.step_from(0, true), 0);
    assert_eq!(playlist.step_from(0, false), 0);
}

#[test]
fn registry_resolves_until_revoked() {
    let mut registry = LocatorRegistry::new();
    let a = registry.create(PathBuf::from("/tmp/a.mp3"));
    let b = registry.create(PathBuf::from("/tmp/b.mp3"));
    assert_ne!(a, b);
    assert_eq!(registry.resolve(&a), Some(PathBuf::from("/tmp/a.mp3")));

    let Locator::Transient(url) = a.clone() else {
        panic!("uploads must get transient locators");
    };
    assert!(url.to_string().starts_with("blob:playcard/"));
    assert!(registry.revoke(url));
    assert!(!registry.revoke(url));
    assert_eq!(registry.resolve(&a), None);
    assert_eq!(registry.live_count(), 1);

    assert_eq!(registry.revoke_all(), 1);
    assert_eq!(registry.resolve(&b), None);
}

#[test]
fn static_locators_always_resolve() {
    let mut registry = LocatorRegistry::new();
    registry.revoke_all();
    let loc = Locator::Static(PathBuf::from("songs/x.mp3"));
    assert_eq!(registry.resolve(&loc), Some(PathBuf::from("songs/x.mp3")));
}

#[test]
fn collect_uploads_accepts_single_audio_file_by_name() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("Track One.MP3");
    fs::write(&file, b"not a real mp3").unwrap();

    let files = collect_uploads(file.to_str().unwrap(), &LibrarySettings::default());
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "Track One.MP3");
    assert_eq!(files[0].path, file);
}

#[test]
fn collect_uploads_rejects_non_audio_and_missing_paths() {
    let dir = tempdir().unwrap();
    let txt = dir.path().join("notes.txt");
    fs::write(&txt, b"ignore me").unwrap();
    let settings = LibrarySettings::default();

    assert!(collect_uploads(txt.to_str().unwrap(), &settings).is_empty());
    assert!(collect_uploads("/definitely/not/here.mp3", &settings).is_empty());
    assert!(collect_uploads("   ", &settings).is_empty());
}

#[test]
fn collect_uploads_walks_folder_filtered_and_sorted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.ogg"), b"x").unwrap();
    fs::write(dir.path().join("A.mp3"), b"x").unwrap();
    fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
    fs::write(dir.path().join(".secret.mp3"), b"x").unwrap();
    let sub = dir.path().join("disc2");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("c.flac"), b"x").unwrap();

    let files = collect_uploads(dir.path().to_str().unwrap(), &LibrarySettings::default());
    assert_eq!(names(&files), vec!["A.mp3", "b.ogg", "c.flac"]);
}

#[test]
fn collect_uploads_respects_recursive_false_and_hidden() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        include_hidden: true,
        ..LibrarySettings::default()
    };
    let files = collect_uploads(dir.path().to_str().unwrap(), &settings);
    assert_eq!(names(&files), vec![".hidden.mp3", "root.mp3"]);
}

#[test]
fn collect_uploads_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    fs::write(d1.join("one.mp3"), b"x").unwrap();
    fs::write(d2.join("two.mp3"), b"x").unwrap();

    // Root is depth 0, so max_depth=2 reaches d1/* but not d1/d2/*.
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let files = collect_uploads(dir.path().to_str().unwrap(), &settings);
    assert_eq!(names(&files), vec!["one.mp3", "root.mp3"]);
}

#[cfg(unix)]
#[test]
fn collect_uploads_keeps_files_with_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let latin1 = dir.path().join(OsStr::from_bytes(b"caf\xe9.mp3"));
    fs::write(&latin1, b"").unwrap();
    fs::write(dir.path().join("ok.mp3"), b"").unwrap();

    let files = collect_uploads(dir.path(), &LibrarySettings::default());
    assert_eq!(names(&files), vec!["caf\u{FFFD}.mp3", "ok.mp3"]);
    assert_eq!(files[0].path, latin1);

    // The same file picked on its own, as a raw OS path.
    let single = collect_uploads(latin1.as_os_str(), &LibrarySettings::default());
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].path, latin1);
}
