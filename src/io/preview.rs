// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview references for selected media.
//!
//! A `PreviewHandle` is a renderable reference to a selected file that the
//! UI can show without touching the disk again. Handles are issued by a
//! `PreviewStore` and released when dropped, so replacing or clearing the
//! owning slot frees the previous preview.

use super::media::MediaCandidate;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Issues and tracks live preview handles.
#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    live: Arc<Mutex<HashSet<u64>>>,
    next_id: Arc<AtomicU64>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a preview for `candidate`.
    pub fn acquire(&self, candidate: &MediaCandidate) -> PreviewHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        if let Ok(mut live) = self.live.lock() {
            live.insert(id);
        }
        log::debug!("Acquired preview {} for {}", id, candidate.name);

        PreviewHandle {
            id,
            uri: format!("preview://{}/{}", id, candidate.name),
            name: candidate.name.clone(),
            mime: candidate.mime.clone(),
            size_bytes: candidate.size_bytes,
            store: self.clone(),
        }
    }

    /// Number of previews not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    #[cfg(test)]
    pub fn is_live(&self, id: u64) -> bool {
        self.live
            .lock()
            .map(|live| live.contains(&id))
            .unwrap_or(false)
    }

    fn release(&self, id: u64) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&id);
        }
        log::debug!("Released preview {}", id);
    }
}

/// A live preview of a selected file. Released on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    uri: String,
    name: String,
    mime: String,
    size_bytes: Option<u64>,
    store: PreviewStore,
}

impl PreviewHandle {
    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::MediaSource;
    use std::path::PathBuf;

    fn candidate(name: &str) -> MediaCandidate {
        MediaCandidate {
            name: name.to_string(),
            mime: "video/mp4".to_string(),
            size_bytes: Some(10),
            source: MediaSource::Path(PathBuf::from(name)),
        }
    }

    #[test]
    fn test_handles_release_on_drop() {
        let store = PreviewStore::new();
        let first = store.acquire(&candidate("a.mp4"));
        let second = store.acquire(&candidate("b.mp4"));
        assert_ne!(first.id(), second.id());
        assert_eq!(store.live_count(), 2);

        let first_id = first.id();
        drop(first);
        assert!(!store.is_live(first_id));
        assert!(store.is_live(second.id()));
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_handle_describes_candidate() {
        let store = PreviewStore::new();
        let handle = store.acquire(&candidate("dolly.mp4"));
        assert_eq!(handle.name(), "dolly.mp4");
        assert_eq!(handle.mime(), "video/mp4");
        assert_eq!(handle.size_bytes(), Some(10));
        assert!(handle.uri().starts_with("preview://"));
    }
}
