// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the CineScope application.

pub mod analyze;
pub mod landing;
pub mod nav;
pub mod tutorials;
