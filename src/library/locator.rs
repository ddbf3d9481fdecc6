//! Locators point a track at its audio.
//!
//! Seed tracks use a static path. User uploads get a transient
//! `ObjectUrl` instead: an opaque id that the `LocatorRegistry` resolves
//! to a file path until it is revoked.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    Static(PathBuf),
    Transient(ObjectUrl),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Static(p) => write!(f, "{}", p.display()),
            Locator::Transient(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectUrl(u64);

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:playcard/{}", self.0)
    }
}

/// Process-local table of transient locators.
#[derive(Debug, Default)]
pub struct LocatorRegistry {
    next_id: u64,
    live: HashMap<ObjectUrl, PathBuf>,
}

impl LocatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and hand back a fresh transient locator for it.
    pub fn create(&mut self, path: PathBuf) -> Locator {
        let url = ObjectUrl(self.next_id);
        self.next_id += 1;
        self.live.insert(url, path);
        Locator::Transient(url)
    }

    /// Resolve a locator to a playable path. `None` once revoked.
    pub fn resolve(&self, locator: &Locator) -> Option<PathBuf> {
        match locator {
            Locator::Static(p) => Some(p.clone()),
            Locator::Transient(url) => self.live.get(url).cloned(),
        }
    }

    pub fn revoke(&mut self, url: ObjectUrl) -> bool {
        self.live.remove(&url).is_some()
    }

    /// Revoke every outstanding locator, returning how many were live.
    pub fn revoke_all(&mut self) -> usize {
        let urls: Vec<ObjectUrl> = self.live.keys().copied().collect();
        urls.into_iter().filter(|url| self.revoke(*url)).count()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
