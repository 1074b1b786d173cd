// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! CineScope - movie scene analysis client
//!
//! A cross-platform desktop application that uploads a video to the
//! analysis backend and shows the generated screenplay alongside the shot
//! and color grading analysis. Also ships a small catalog of camera
//! movement, cut and transition tutorials.

mod app;
mod config;
mod io;
mod models;
mod ui;

use anyhow::{Context, Result};
use app::CineScopeApp;
use config::AppConfig;
use io::client::HttpBackend;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {}", e);
        AppConfig::default()
    });
    let backend = HttpBackend::from_config(&config).context("Failed to create HTTP client")?;
    log::info!("Analysis endpoint: {}", backend.url());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 540.0])
            .with_drag_and_drop(true)
            .with_title("CineScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CineScope",
        options,
        Box::new(move |_cc| Ok(Box::new(CineScopeApp::new(config, Arc::new(backend))))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
