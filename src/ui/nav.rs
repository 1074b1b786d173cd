// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Navigation bar.
//!
//! Shows the product name and switches between the landing, analyze and
//! tutorials pages.

use crate::app::Page;

/// Display the navigation bar.
pub fn show(ui: &mut egui::Ui, current_page: &mut Page) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 12.0;

        let title = egui::RichText::new("CineScope").size(20.0).strong();
        if ui.add(egui::Label::new(title).sense(egui::Sense::click())).clicked() {
            *current_page = Page::Landing;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left, so the last link is added first
            if ui.selectable_label(*current_page == Page::Tutorials, "Tutorials").clicked() {
                *current_page = Page::Tutorials;
            }
            if ui.selectable_label(*current_page == Page::Analyze, "Analyze").clicked() {
                *current_page = Page::Analyze;
            }
        });
    });
}
