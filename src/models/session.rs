// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analyze page state.
//!
//! The session moves through `Idle → MediaSelected → Submitting → Finished`
//! and `reset` returns it to `Idle` from anywhere. Every request is issued
//! under a generation number; a reply is applied only if its generation is
//! still current, so a reset or a newer request invalidates anything in
//! flight.

use super::analysis::{AnalysisOutcome, AnalysisResponse};
use crate::io::client::{AnalysisError, Upload};
use crate::io::media::{MediaCandidate, MediaSource};
use crate::io::preview::{PreviewHandle, PreviewStore};
use crate::io::worker::AnalysisTicket;

/// An accepted video and its preview.
#[derive(Debug)]
pub struct SelectedMedia {
    pub name: String,
    pub mime: String,
    pub source: MediaSource,
    pub preview: PreviewHandle,
}

/// Result pane selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Script,
    Analysis,
}

/// Lifecycle of the analyze page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    MediaSelected,
    Submitting,
    Finished(AnalysisOutcome),
}

/// Coarse display mode derived from the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Idle,
    HasMedia,
    Loading,
    ResultShown,
}

/// State of the analyze page.
#[derive(Debug)]
pub struct AnalyzeSession {
    media: Option<SelectedMedia>,
    phase: Phase,
    active_tab: ResultTab,
    generation: u64,
    previews: PreviewStore,
}

impl Default for AnalyzeSession {
    fn default() -> Self {
        Self::new(PreviewStore::new())
    }
}

impl AnalyzeSession {
    pub fn new(previews: PreviewStore) -> Self {
        Self {
            media: None,
            phase: Phase::Idle,
            active_tab: ResultTab::Script,
            generation: 0,
            previews,
        }
    }

    /// Offer a file. Non-video files are ignored and leave the session
    /// untouched; returns whether the file was accepted.
    pub fn select(&mut self, candidate: MediaCandidate) -> bool {
        if !candidate.is_video() {
            log::debug!("Ignoring {} ({})", candidate.name, candidate.mime);
            return false;
        }

        // Release the old preview before the new one exists
        self.media = None;
        self.invalidate();

        let preview = self.previews.acquire(&candidate);
        log::info!("Selected {} ({})", candidate.name, candidate.mime);

        self.media = Some(SelectedMedia {
            name: candidate.name,
            mime: candidate.mime,
            source: candidate.source,
            preview,
        });
        self.phase = Phase::MediaSelected;
        self.active_tab = ResultTab::Script;
        true
    }

    /// Start an analysis of the selected media. Returns `None` if nothing is
    /// selected or a request is already running.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if self.phase == Phase::Submitting {
            return None;
        }
        let media = self.media.as_ref()?;

        self.generation += 1;
        let ticket = AnalysisTicket {
            generation: self.generation,
            upload: Upload {
                name: media.name.clone(),
                mime: media.mime.clone(),
                source: media.source.clone(),
            },
        };

        self.phase = Phase::Submitting;
        self.active_tab = ResultTab::Script;
        log::info!("Submitting {} (generation {})", media.name, self.generation);
        Some(ticket)
    }

    /// Apply a reply. Stale or unexpected replies are discarded; returns
    /// whether the reply was applied.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<AnalysisResponse, AnalysisError>,
    ) -> bool {
        if self.phase != Phase::Submitting || generation != self.generation {
            log::debug!(
                "Discarding stale reply (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }

        let outcome = AnalysisOutcome::from_result(result);
        log::info!(
            "Analysis finished: {}",
            if outcome.is_success() { "success" } else { "failure" }
        );
        self.phase = Phase::Finished(outcome);
        self.active_tab = ResultTab::Script;
        true
    }

    /// Drop the selection and any result, and invalidate requests in flight.
    pub fn reset(&mut self) {
        self.invalidate();
        self.media = None;
        self.phase = Phase::Idle;
        self.active_tab = ResultTab::Script;
    }

    pub fn set_tab(&mut self, tab: ResultTab) {
        self.active_tab = tab;
    }

    pub fn media(&self) -> Option<&SelectedMedia> {
        self.media.as_ref()
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        match &self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn active_tab(&self) -> ResultTab {
        self.active_tab
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn can_analyze(&self) -> bool {
        self.media.is_some() && !self.is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    pub fn display_mode(&self) -> DisplayMode {
        match self.phase {
            Phase::Idle => DisplayMode::Idle,
            Phase::MediaSelected => DisplayMode::HasMedia,
            Phase::Submitting => DisplayMode::Loading,
            Phase::Finished(_) => DisplayMode::ResultShown,
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }
}
