// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tutorials page: category sidebar and the selected category's entries.

use crate::io::thumbnail::{watch_url, youtube_video_id, ThumbnailCache};
use crate::models::tutorial::{categories, TutorialsState};

const THUMBNAIL_WIDTH: f32 = 480.0;

/// Display the category list. Returns a newly chosen category.
pub fn show_sidebar(ui: &mut egui::Ui, state: &TutorialsState) -> Option<&'static str> {
    let mut chosen = None;

    ui.add_space(8.0);
    ui.heading(egui::RichText::new("Tutorials").strong());
    ui.add_space(12.0);

    for category in categories() {
        let selected = state.active() == category.name;
        let button = egui::Button::new(category.name)
            .selected(selected)
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add(button).clicked() {
            chosen = Some(category.name);
        }
    }

    chosen
}

/// Display the entries of the active category.
pub fn show_entries(ui: &mut egui::Ui, state: &TutorialsState, thumbnails: &ThumbnailCache) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        if let Some(message) = state.empty_message() {
            ui.label(egui::RichText::new(message).italics().weak());
            return;
        }

        for tutorial in state.visible_entries() {
            ui.add_space(12.0);
            ui.label(egui::RichText::new(tutorial.title).size(20.0).strong());
            ui.label(egui::RichText::new(tutorial.description).color(egui::Color32::from_gray(170)));
            ui.add_space(6.0);

            if let Some(id) = youtube_video_id(tutorial.url) {
                if let Some(texture) = thumbnails.texture(&id) {
                    let image = egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                        .max_width(THUMBNAIL_WIDTH)
                        .rounding(4.0);
                    ui.add(image);
                } else if thumbnails.is_pending(&id) {
                    ui.spinner();
                }
            }

            ui.hyperlink_to("▶ Watch video", watch_url(tutorial.url));
            ui.add_space(12.0);
            ui.separator();
        }
    });
}
