// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file capture.
//!
//! This module turns picker selections and drag-and-drop events into
//! `MediaCandidate`s and decides whether a candidate is a video.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extensions offered by the native file picker.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "qt", "mkv", "webm", "avi", "mpeg", "mpg", "ogv", "wmv", "flv", "f4v",
    "3gp", "ts", "mts", "m2ts",
];

/// Where the bytes of a candidate live.
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// A file on disk, read when uploaded.
    Path(PathBuf),
    /// Bytes already in memory (drops on platforms without paths).
    Bytes(Arc<[u8]>),
}

/// A file offered by the user, not yet validated.
#[derive(Debug, Clone)]
pub struct MediaCandidate {
    pub name: String,
    pub mime: String,
    pub size_bytes: Option<u64>,
    pub source: MediaSource,
}

impl MediaCandidate {
    /// Build a candidate from a file chosen in the native picker.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        // A missing size is not fatal here; the upload reports unreadable files
        let size_bytes = std::fs::metadata(path).ok().map(|m| m.len());

        Self {
            mime: mime_for_name(&name),
            name,
            size_bytes,
            source: MediaSource::Path(path.to_path_buf()),
        }
    }

    /// Build a candidate from a file dropped onto the window.
    ///
    /// Returns `None` if the drop carried neither a path nor bytes.
    pub fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        let name = if !file.name.is_empty() {
            file.name.clone()
        } else {
            file.path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        };

        let mime = if file.mime.is_empty() {
            mime_for_name(&name)
        } else {
            file.mime.clone()
        };

        let (source, size_bytes) = if let Some(path) = &file.path {
            let size = std::fs::metadata(path).ok().map(|m| m.len());
            (MediaSource::Path(path.clone()), size)
        } else if let Some(bytes) = &file.bytes {
            (MediaSource::Bytes(bytes.clone()), Some(bytes.len() as u64))
        } else {
            return None;
        };

        Some(Self {
            name,
            mime,
            size_bytes,
            source,
        })
    }

    /// Check whether this candidate may be selected for analysis.
    pub fn is_video(&self) -> bool {
        is_video_mime(&self.mime)
    }
}

/// A MIME type is accepted when it names the `video` top-level type.
pub fn is_video_mime(mime: &str) -> bool {
    mime.starts_with("video")
}

/// Guess a MIME type from a file name's extension.
pub fn mime_for_name(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
