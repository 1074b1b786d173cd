// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: media capture, the analysis backend, thumbnails and
//! report files.

pub mod client;
pub mod media;
pub mod preview;
pub mod serialization;
pub mod thumbnail;
pub mod worker;
