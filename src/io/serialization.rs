// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analysis report serialization.
//!
//! This module handles exporting finished analysis results in YAML and
//! JSON formats.

use crate::models::analysis::{AnalysisResponse, ShotAnalysis};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A finished analysis, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source_file: String,
    pub screenplay: String,
    pub analysis: ShotAnalysis,
}

impl AnalysisReport {
    pub fn new(source_file: impl Into<String>, response: &AnalysisResponse) -> Self {
        Self {
            source_file: source_file.into(),
            screenplay: response.screenplay.clone(),
            analysis: response.analysis.clone(),
        }
    }
}

/// Export a report to YAML format.
pub fn export_yaml(report: &AnalysisReport, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(report)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a report to JSON format.
pub fn export_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export by file extension (`.json`, `.yaml`, `.yml`).
pub fn export_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(report, path),
        Some("json") => export_json(report, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}
