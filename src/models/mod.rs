// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: analysis results, the analyze session and the tutorials
//! catalog.

pub mod analysis;
pub mod session;
pub mod tutorial;
