// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analyze page.
//!
//! Drop zone and preview for the selected video, the Reset/Analyze
//! controls, and the script/analysis result tabs.

use crate::io::media::format_size;
use crate::models::analysis::AnalysisOutcome;
use crate::models::session::{AnalyzeSession, DisplayMode, ResultTab, SelectedMedia};

const CONTENT_WIDTH: f32 = 640.0;
const DROP_ZONE_HEIGHT: f32 = 220.0;
const SCRIPT_MAX_HEIGHT: f32 = 400.0;

/// Result of interaction with the analyze page.
pub enum AnalyzeAction {
    None,
    PickFile,
    Reset,
    Analyze,
    SelectTab(ResultTab),
}

/// Display the analyze page.
pub fn show(ui: &mut egui::Ui, session: &AnalyzeSession, files_hovered: bool) -> AnalyzeAction {
    let mut action = AnalyzeAction::None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.set_max_width(CONTENT_WIDTH);
            ui.add_space(24.0);
            ui.heading(egui::RichText::new("CineScope").size(40.0).strong());
            ui.add_space(24.0);

            match session.media() {
                None => {
                    if drop_zone(ui, files_hovered).clicked() {
                        action = AnalyzeAction::PickFile;
                    }
                    ui.add_space(12.0);
                    ui.add_enabled(false, egui::Button::new("Analyze").min_size(egui::vec2(120.0, 32.0)));
                }
                Some(media) => {
                    preview_card(ui, media);
                    ui.add_space(12.0);
                    if let Some(a) = controls(ui, session) {
                        action = a;
                    }
                }
            }

            if let Some(outcome) = session.outcome() {
                ui.add_space(20.0);
                if let Some(tab) = tab_bar(ui, session.active_tab()) {
                    action = AnalyzeAction::SelectTab(tab);
                }
                ui.add_space(8.0);
                match session.active_tab() {
                    ResultTab::Script => script_pane(ui, outcome),
                    ResultTab::Analysis => analysis_pane(ui, outcome),
                }
            }
        });
    });

    action
}

/// Dashed click target for choosing or dropping a video.
fn drop_zone(ui: &mut egui::Ui, files_hovered: bool) -> egui::Response {
    let size = egui::vec2(ui.available_width(), DROP_ZONE_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

    let highlighted = files_hovered || response.hovered();
    let border = if highlighted {
        egui::Color32::from_rgb(96, 165, 250)
    } else {
        egui::Color32::from_gray(120)
    };

    let painter = ui.painter();
    painter.rect_filled(rect, 12.0, ui.visuals().extreme_bg_color);

    let r = rect.shrink(1.0);
    let outline = [
        r.left_top(),
        r.right_top(),
        r.right_bottom(),
        r.left_bottom(),
        r.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &outline,
        egui::Stroke::new(2.0, border),
        8.0,
        6.0,
    ));

    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drag & drop your video here or click to choose a file",
        egui::FontId::proportional(14.0),
        egui::Color32::from_gray(170),
    );

    response
}

fn preview_card(ui: &mut egui::Ui, media: &SelectedMedia) {
    let preview = &media.preview;

    egui::Frame::group(ui.style())
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("🎬").size(48.0));
                ui.label(egui::RichText::new(preview.mime()).weak());
                if let Some(size) = preview.size_bytes() {
                    ui.label(egui::RichText::new(format_size(size)).weak());
                }
            });
        })
        .response
        .on_hover_text(preview.uri());

    ui.add_space(4.0);
    ui.label(egui::RichText::new(preview.name()).italics().color(egui::Color32::from_gray(160)));
}

fn controls(ui: &mut egui::Ui, session: &AnalyzeSession) -> Option<AnalyzeAction> {
    let mut action = None;
    let button_size = egui::vec2(120.0, 32.0);
    let loading = session.display_mode() == DisplayMode::Loading;

    ui.allocate_ui_with_layout(
        egui::vec2(button_size.x * 2.0 + 24.0, button_size.y),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.spacing_mut().item_spacing.x = 24.0;

            if ui.add(egui::Button::new("Reset").min_size(button_size)).clicked() {
                action = Some(AnalyzeAction::Reset);
            }

            let label = if loading { "Analyzing..." } else { "Analyze" };
            let analyze = egui::Button::new(egui::RichText::new(label).strong()).min_size(button_size);
            if ui.add_enabled(session.can_analyze(), analyze).clicked() {
                action = Some(AnalyzeAction::Analyze);
            }
        },
    );

    if loading {
        ui.add_space(8.0);
        ui.spinner();
    }

    action
}

fn tab_bar(ui: &mut egui::Ui, active: ResultTab) -> Option<ResultTab> {
    let mut selected = None;

    ui.allocate_ui_with_layout(
        egui::vec2(200.0, 28.0),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            for (tab, label) in [(ResultTab::Analysis, "Analysis"), (ResultTab::Script, "Script")] {
                if ui.selectable_label(active == tab, label).clicked() {
                    selected = Some(tab);
                }
            }
        },
    );
    ui.separator();

    selected
}

fn script_pane(ui: &mut egui::Ui, outcome: &AnalysisOutcome) {
    egui::Frame::group(ui.style())
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            match outcome {
                AnalysisOutcome::Success(_) => {
                    egui::ScrollArea::vertical()
                        .max_height(SCRIPT_MAX_HEIGHT)
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(outcome.transcript()).monospace().size(15.0));
                        });
                }
                AnalysisOutcome::Failure(failure) => {
                    ui.label(
                        egui::RichText::new(outcome.transcript())
                            .color(ui.visuals().error_fg_color)
                            .strong(),
                    );
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(&failure.detail).small().weak());
                }
            }
        });
}

fn analysis_pane(ui: &mut egui::Ui, outcome: &AnalysisOutcome) {
    egui::Frame::group(ui.style())
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            let rows = outcome.analysis_rows();
            if rows.is_empty() {
                ui.label(egui::RichText::new("No analysis data").italics().weak());
                return;
            }

            egui::Grid::new("analysis_rows")
                .num_columns(2)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    for (label, value) in rows {
                        ui.label(egui::RichText::new(format!("{}:", label)).strong());
                        ui.label(value);
                        ui.end_row();
                    }
                });
        });
}
