// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the pages, routes user actions to the analyze session,
//! and polls background work (analysis requests and tutorial thumbnails).

use crate::config::AppConfig;
use crate::io::client::{AnalysisBackend, AnalysisError};
use crate::io::media::{MediaCandidate, VIDEO_EXTENSIONS};
use crate::io::serialization::{export_report, AnalysisReport};
use crate::io::thumbnail::{youtube_video_id, ThumbnailCache};
use crate::io::worker::{spawn_analysis, AnalysisReply};
use crate::models::session::AnalyzeSession;
use crate::models::tutorial::TutorialsState;
use crate::ui::{analyze, landing, nav, tutorials};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// How often to poll background work while something is pending.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Analyze,
    Tutorials,
}

/// A request in flight.
struct PendingAnalysis {
    generation: u64,
    receiver: Receiver<AnalysisReply>,
}

/// Main application state.
pub struct CineScopeApp {
    /// Page currently shown
    page: Page,

    config: AppConfig,

    /// Analysis backend shared with worker threads
    backend: Arc<dyn AnalysisBackend>,

    /// Analyze page state
    session: AnalyzeSession,

    /// Receiver for the current analysis request
    pending: Option<PendingAnalysis>,

    /// Tutorials page state
    tutorials: TutorialsState,

    thumbnails: ThumbnailCache,
}

impl CineScopeApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig, backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            page: Page::Landing,
            config,
            backend,
            session: AnalyzeSession::default(),
            pending: None,
            tutorials: TutorialsState::default(),
            thumbnails: ThumbnailCache::new(),
        }
    }

    /// Offer a candidate file to the session.
    fn select_media(&mut self, candidate: MediaCandidate) {
        if self.session.select(candidate) {
            // Any request for the previous file is now stale
            self.pending = None;
        }
    }

    /// Open the native picker and select the chosen video.
    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Video", VIDEO_EXTENSIONS)
            .pick_file()
        {
            self.select_media(MediaCandidate::from_path(&path));
        }
    }

    /// Submit the selected video to the backend.
    fn start_analysis(&mut self) {
        if let Some(ticket) = self.session.begin_analysis() {
            let generation = ticket.generation;
            let receiver = spawn_analysis(self.backend.clone(), ticket);
            self.pending = Some(PendingAnalysis { generation, receiver });
        }
    }

    fn reset(&mut self) {
        self.session.reset();
        self.pending = None;
        log::info!(
            "Analyze page reset ({} previews live)",
            self.session.previews().live_count()
        );
    }

    /// Apply a finished analysis reply, if one has arrived.
    fn poll_analysis(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };

        match pending.receiver.try_recv() {
            Ok(reply) => {
                log::debug!(
                    "Reply for request {} (current {})",
                    reply.generation,
                    self.session.generation()
                );
                self.pending = None;
                self.session.complete(reply.generation, reply.result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                let generation = pending.generation;
                self.pending = None;
                self.session.complete(generation, Err(AnalysisError::Interrupted));
            }
        }
    }

    /// Drops land on the drop zone, which is only shown on the analyze
    /// page while nothing is selected.
    fn accepts_drops(&self) -> bool {
        self.page == Page::Analyze && self.session.media().is_none()
    }

    /// Accept the first of `dropped`, if the drop zone is showing.
    fn accept_dropped(&mut self, dropped: &[egui::DroppedFile]) {
        if dropped.is_empty() || !self.accepts_drops() {
            return;
        }

        match dropped.first().and_then(MediaCandidate::from_dropped) {
            Some(candidate) => self.select_media(candidate),
            None => log::debug!("Dropped file had no readable content"),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        self.accept_dropped(&dropped);
    }

    /// Export the finished result to a file.
    fn export_result(&self, default_name: &str, filter_name: &str, extensions: &[&str]) {
        let (Some(media), Some(response)) = (
            self.session.media(),
            self.session.outcome().and_then(|o| o.response()),
        ) else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter(filter_name, extensions)
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        let report = AnalysisReport::new(media.name.clone(), response);
        match export_report(&report, &path) {
            Ok(_) => log::info!("Exported analysis to {}", path.display()),
            Err(e) => log::error!("Failed to export analysis: {}", e),
        }
    }

    /// Start thumbnail downloads for the visible tutorials.
    fn request_thumbnails(&mut self) {
        if !self.config.load_thumbnails {
            return;
        }
        for tutorial in self.tutorials.visible_entries() {
            if let Some(id) = youtube_video_id(tutorial.url) {
                self.thumbnails.request(&id);
            }
        }
    }
}

impl eframe::App for CineScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_analysis();
        let thumbnails_pending = self.thumbnails.poll(ctx);

        // Keep polling while background work is outstanding
        if self.pending.is_some() || thumbnails_pending {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        self.handle_dropped_files(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Video...").clicked() {
                        self.page = Page::Analyze;
                        self.pick_file();
                        ui.close_menu();
                    }
                    ui.separator();

                    let can_export = self
                        .session
                        .outcome()
                        .map(|o| o.is_success())
                        .unwrap_or(false);
                    ui.add_enabled_ui(can_export, |ui| {
                        ui.menu_button("Export Result", |ui| {
                            if ui.button("Export as JSON...").clicked() {
                                self.export_result("analysis.json", "JSON", &["json"]);
                                ui.close_menu();
                            }
                            if ui.button("Export as YAML...").clicked() {
                                self.export_result("analysis.yaml", "YAML", &["yaml", "yml"]);
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Navigation
        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.add_space(4.0);
            nav::show(ui, &mut self.page);
            ui.add_space(4.0);
        });

        // Keyboard shortcuts (analyze page only, and not while typing)
        if self.page == Page::Analyze && !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::O)) {
                self.pick_file();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.session.media().is_some() {
                self.reset();
            }
        }

        match self.page {
            Page::Landing => {
                let target = egui::CentralPanel::default().show(ctx, landing::show).inner;
                if let Some(page) = target {
                    self.page = page;
                }
            }
            Page::Analyze => {
                let files_hovered = ctx.input(|i| !i.raw.hovered_files.is_empty());
                let action = egui::CentralPanel::default()
                    .show(ctx, |ui| analyze::show(ui, &self.session, files_hovered))
                    .inner;

                match action {
                    analyze::AnalyzeAction::PickFile => self.pick_file(),
                    analyze::AnalyzeAction::Reset => self.reset(),
                    analyze::AnalyzeAction::Analyze => self.start_analysis(),
                    analyze::AnalyzeAction::SelectTab(tab) => self.session.set_tab(tab),
                    analyze::AnalyzeAction::None => {}
                }
            }
            Page::Tutorials => {
                let chosen = egui::SidePanel::left("tutorial_categories")
                    .resizable(false)
                    .exact_width(220.0)
                    .show(ctx, |ui| tutorials::show_sidebar(ui, &self.tutorials))
                    .inner;
                if let Some(category) = chosen {
                    self.tutorials.select(category);
                }

                self.request_thumbnails();
                egui::CentralPanel::default().show(ctx, |ui| {
                    tutorials::show_entries(ui, &self.tutorials, &self.thumbnails);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::client::Upload;
    use crate::io::media::MediaSource;
    use crate::models::analysis::{AnalysisResponse, ShotAnalysis};
    use crate::models::session::DisplayMode;
    use std::path::PathBuf;
    use std::sync::mpsc::{channel, Sender};
    use std::sync::Mutex;

    /// Backend that blocks until the test releases it.
    struct GatedBackend {
        gate: Mutex<std::sync::mpsc::Receiver<Result<AnalysisResponse, AnalysisError>>>,
    }

    impl AnalysisBackend for GatedBackend {
        fn analyze(&self, _upload: &Upload) -> Result<AnalysisResponse, AnalysisError> {
            let gate = self.gate.lock().unwrap();
            gate.recv().unwrap_or(Err(AnalysisError::Interrupted))
        }
    }

    fn app() -> (CineScopeApp, Sender<Result<AnalysisResponse, AnalysisError>>) {
        let (sender, receiver) = channel();
        let backend = GatedBackend {
            gate: Mutex::new(receiver),
        };
        (CineScopeApp::new(AppConfig::default(), Arc::new(backend)), sender)
    }

    fn video(name: &str) -> MediaCandidate {
        MediaCandidate {
            name: name.to_string(),
            mime: "video/mp4".to_string(),
            size_bytes: None,
            source: MediaSource::Path(PathBuf::from(name)),
        }
    }

    fn response() -> AnalysisResponse {
        AnalysisResponse {
            screenplay: "INT. ROOM\n...".to_string(),
            analysis: ShotAnalysis {
                shot_type: "close-up".to_string(),
                color_grade: "warm".to_string(),
            },
        }
    }

    fn wait_for_reply(app: &mut CineScopeApp) {
        for _ in 0..200 {
            app.poll_analysis();
            if app.pending.is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("analysis reply never arrived");
    }

    #[test]
    fn test_analysis_round_trip_through_worker() {
        let (mut app, gate) = app();
        app.select_media(video("scene.mp4"));
        app.start_analysis();
        assert_eq!(app.session.display_mode(), DisplayMode::Loading);

        gate.send(Ok(response())).unwrap();
        wait_for_reply(&mut app);

        assert_eq!(app.session.display_mode(), DisplayMode::ResultShown);
        assert_eq!(app.session.outcome().unwrap().transcript(), "INT. ROOM\n...");
    }

    #[test]
    fn test_reset_discards_in_flight_reply() {
        let (mut app, gate) = app();
        app.select_media(video("scene.mp4"));
        app.start_analysis();
        app.reset();
        assert!(app.pending.is_none());

        // The worker still finishes, but nothing listens any more
        gate.send(Ok(response())).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        app.poll_analysis();

        assert_eq!(app.session.display_mode(), DisplayMode::Idle);
        assert!(app.session.outcome().is_none());
    }

    #[test]
    fn test_start_without_media_spawns_nothing() {
        let (mut app, _gate) = app();
        app.start_analysis();
        assert!(app.pending.is_none());
        assert_eq!(app.session.display_mode(), DisplayMode::Idle);
    }

    fn dropped(name: &str) -> egui::DroppedFile {
        egui::DroppedFile {
            path: Some(PathBuf::from(name)),
            ..Default::default()
        }
    }

    #[test]
    fn test_drops_only_accepted_on_empty_analyze_page() {
        let (mut app, _gate) = app();

        app.accept_dropped(&[dropped("landing.mp4")]);
        assert!(app.session.media().is_none());

        app.page = Page::Tutorials;
        app.accept_dropped(&[dropped("tutorials.mp4")]);
        assert!(app.session.media().is_none());

        app.page = Page::Analyze;
        app.accept_dropped(&[dropped("first.mp4"), dropped("second.mp4")]);
        assert_eq!(app.session.media().unwrap().name, "first.mp4");
        assert!(!app.accepts_drops());

        // A selection hides the drop zone, so later drops are ignored
        app.accept_dropped(&[dropped("later.mp4")]);
        assert_eq!(app.session.media().unwrap().name, "first.mp4");
    }

    #[test]
    fn test_dropped_non_video_is_ignored() {
        let (mut app, _gate) = app();
        app.page = Page::Analyze;
        app.accept_dropped(&[dropped("poster.png")]);
        assert!(app.session.media().is_none());
        assert!(app.accepts_drops());
    }

    #[test]
    fn test_dropping_app_releases_preview_and_reply() {
        let (mut app, gate) = app();
        let previews = app.session.previews().clone();

        app.select_media(video("scene.mp4"));
        app.start_analysis();
        assert_eq!(previews.live_count(), 1);

        drop(app);
        assert_eq!(previews.live_count(), 0);

        // The worker finishes into a closed channel without panicking
        assert!(gate.send(Ok(response())).is_ok());
    }

    #[test]
    fn test_thumbnails_respect_config() {
        let (mut app, _gate) = app();
        app.config.load_thumbnails = false;
        app.request_thumbnails();
        assert!(!app.thumbnails.is_pending("avdpM1cvWcI"));
    }
}
