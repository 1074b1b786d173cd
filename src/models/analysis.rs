// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analysis result data structures.
//!
//! This module defines the payload returned by the analysis backend and
//! the outcome shown once a request resolves.

use crate::io::client::AnalysisError;
use serde::{Deserialize, Serialize};

/// Message shown in place of the transcript when analysis fails.
pub const ANALYSIS_ERROR_MESSAGE: &str = "An error occurred while analyzing the video.";

/// Shot and color metadata for the analyzed clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotAnalysis {
    pub shot_type: String,
    pub color_grade: String,
}

/// Body of a successful `/analyze` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub screenplay: String,
    pub analysis: ShotAnalysis,
}

/// Why an analysis did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    /// Fixed, user-facing message.
    pub message: String,
    /// Underlying cause, for the detail line and logs.
    pub detail: String,
}

impl AnalysisFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            message: ANALYSIS_ERROR_MESSAGE.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result of a finished analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Success(AnalysisResponse),
    Failure(AnalysisFailure),
}

impl AnalysisOutcome {
    pub fn from_result(result: Result<AnalysisResponse, AnalysisError>) -> Self {
        match result {
            Ok(response) => Self::Success(response),
            Err(e) => Self::Failure(AnalysisFailure::new(e.to_string())),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Text for the script pane.
    pub fn transcript(&self) -> &str {
        match self {
            Self::Success(response) => &response.screenplay,
            Self::Failure(failure) => &failure.message,
        }
    }

    /// Label/value rows for the analysis pane. Empty on failure.
    pub fn analysis_rows(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Success(response) => vec![
                ("Shot Type", response.analysis.shot_type.as_str()),
                ("Color Grading", response.analysis.color_grade.as_str()),
            ],
            Self::Failure(_) => Vec::new(),
        }
    }

    pub fn response(&self) -> Option<&AnalysisResponse> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failure(_) => None,
        }
    }
}
