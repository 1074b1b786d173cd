// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tutorial video thumbnails.
//!
//! Tutorials link to YouTube embeds. Native windows cannot host the embed,
//! so each entry shows the video's thumbnail and a link that opens the
//! video in the browser.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver};
use url::Url;

/// Decoded RGBA thumbnail.
pub struct ThumbnailImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Hosts that serve YouTube embeds.
const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "youtube-nocookie.com"];

fn is_youtube_host(host: &str) -> bool {
    YOUTUBE_HOSTS.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .map(|sub| sub.ends_with('.'))
                .unwrap_or(false)
    })
}

/// Parse a YouTube embed URL into the URL and its video id.
fn parse_embed(url: &str) -> Option<(Url, String)> {
    let parsed = Url::parse(url).ok()?;
    if !parsed.host_str().map(is_youtube_host).unwrap_or(false) {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    let id = match (segments.next(), segments.next()) {
        (Some("embed"), Some(id)) if !id.is_empty() => id.to_string(),
        _ => return None,
    };

    Some((parsed, id))
}

/// Extract the video id from a YouTube embed URL.
pub fn youtube_video_id(url: &str) -> Option<String> {
    parse_embed(url).map(|(_, id)| id)
}

/// Convert an embed URL into a browser watch URL, keeping the start offset.
pub fn watch_url(url: &str) -> String {
    let Some((embed, id)) = parse_embed(url) else {
        return url.to_string();
    };
    let Ok(mut watch) = Url::parse("https://www.youtube.com/watch") else {
        return url.to_string();
    };

    let start = embed
        .query_pairs()
        .find(|(key, _)| key == "start")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty());

    {
        let mut query = watch.query_pairs_mut();
        query.append_pair("v", &id);
        if let Some(seconds) = start {
            query.append_pair("t", &format!("{}s", seconds));
        }
    }

    watch.into()
}

/// Download and decode the high-quality default thumbnail for a video.
pub fn fetch_thumbnail(video_id: &str) -> Result<ThumbnailImage> {
    let url = format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id);
    let bytes = reqwest::blocking::get(&url)
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Failed to fetch {}", url))?
        .bytes()
        .context("Failed to read thumbnail body")?;

    let img = image::load_from_memory(&bytes)
        .context("Failed to decode thumbnail")?
        .to_rgba8();

    Ok(ThumbnailImage {
        width: img.width(),
        height: img.height(),
        pixels: img.into_raw(),
    })
}

enum Slot {
    Pending(Receiver<Result<ThumbnailImage>>),
    Ready(egui::TextureHandle),
    Failed,
}

/// Lazily fetched thumbnails keyed by video id.
#[derive(Default)]
pub struct ThumbnailCache {
    slots: HashMap<String, Slot>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `video_id` unless one exists already.
    pub fn request(&mut self, video_id: &str) {
        if self.slots.contains_key(video_id) {
            return;
        }

        let (sender, receiver) = channel();
        let id = video_id.to_string();
        std::thread::spawn(move || {
            let _ = sender.send(fetch_thumbnail(&id));
        });

        self.slots.insert(video_id.to_string(), Slot::Pending(receiver));
    }

    /// Turn finished downloads into textures. Returns true while any fetch
    /// is still pending.
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        let mut pending = false;

        for (id, slot) in self.slots.iter_mut() {
            let Slot::Pending(receiver) = slot else {
                continue;
            };

            match receiver.try_recv() {
                Ok(Ok(image)) => {
                    let size = [image.width as usize, image.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                    let texture = ctx.load_texture(
                        format!("thumbnail-{}", id),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    log::debug!("Loaded thumbnail for {}", id);
                    *slot = Slot::Ready(texture);
                }
                Ok(Err(e)) => {
                    log::warn!("Thumbnail for {} unavailable: {:#}", id, e);
                    *slot = Slot::Failed;
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => pending = true,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => *slot = Slot::Failed,
            }
        }

        pending
    }

    pub fn texture(&self, video_id: &str) -> Option<&egui::TextureHandle> {
        match self.slots.get(video_id) {
            Some(Slot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    pub fn is_pending(&self, video_id: &str) -> bool {
        matches!(self.slots.get(video_id), Some(Slot::Pending(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_from_embed() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/avdpM1cvWcI"),
            Some("avdpM1cvWcI".to_string())
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/2T42o9LsNm0?start=45"),
            Some("2T42o9LsNm0".to_string())
        );
        assert_eq!(
            youtube_video_id("https://www.youtube-nocookie.com/embed/-NKdUh7mLrI"),
            Some("-NKdUh7mLrI".to_string())
        );
        assert_eq!(youtube_video_id("https://example.com/video.mp4"), None);
        assert_eq!(youtube_video_id("https://www.youtube.com/embed/"), None);
        assert_eq!(youtube_video_id("not a url"), None);
    }

    #[test]
    fn test_embed_path_on_other_hosts_is_ignored() {
        assert_eq!(youtube_video_id("https://example.com/embed/x"), None);
        assert_eq!(youtube_video_id("https://notyoutube.com/embed/x"), None);
        assert_eq!(youtube_video_id("https://youtube.com.evil.net/embed/x"), None);
        assert_eq!(
            watch_url("https://example.com/embed/x?start=5"),
            "https://example.com/embed/x?start=5"
        );
    }

    #[test]
    fn test_watch_url_keeps_start() {
        assert_eq!(
            watch_url("https://www.youtube.com/embed/2T42o9LsNm0?start=105"),
            "https://www.youtube.com/watch?v=2T42o9LsNm0&t=105s"
        );
        assert_eq!(
            watch_url("https://www.youtube.com/embed/-NKdUh7mLrI"),
            "https://www.youtube.com/watch?v=-NKdUh7mLrI"
        );
        assert_eq!(watch_url("https://example.com/a"), "https://example.com/a");
    }
}
