// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Landing page.

use crate::app::Page;

/// Display the landing page. Returns the page the user asked to open.
pub fn show(ui: &mut egui::Ui) -> Option<Page> {
    let mut target = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading(
            egui::RichText::new("CineScope")
                .size(48.0)
                .strong()
                .color(egui::Color32::from_rgb(30, 64, 175)),
        );
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new("A movie analysis system using computer vision and YOLO.")
                .size(16.0)
                .color(egui::Color32::from_gray(180)),
        );
        ui.add_space(32.0);

        // Center the two buttons as a group
        let button_size = egui::vec2(150.0, 40.0);
        let spacing = ui.spacing().item_spacing.x;
        let row_width = button_size.x * 2.0 + spacing;
        ui.allocate_ui_with_layout(
            egui::vec2(row_width, button_size.y),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                let analyze = egui::Button::new(egui::RichText::new("Analyze Scene").strong())
                    .fill(egui::Color32::from_rgb(37, 99, 235))
                    .min_size(button_size);
                if ui.add(analyze).clicked() {
                    target = Some(Page::Analyze);
                }
                if ui.add(egui::Button::new("Tutorials").min_size(button_size)).clicked() {
                    target = Some(Page::Tutorials);
                }
            },
        );
    });

    target
}
