// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background execution of analysis requests.
//!
//! Each request runs on its own thread and reports back over a channel,
//! tagged with the generation it was issued under so the session can drop
//! replies that arrive after a reset or a newer request.

use super::client::{AnalysisBackend, AnalysisError, Upload};
use crate::models::analysis::AnalysisResponse;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Everything needed to run one analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub upload: Upload,
}

/// Reply from a finished request.
#[derive(Debug)]
pub struct AnalysisReply {
    pub generation: u64,
    pub result: Result<AnalysisResponse, AnalysisError>,
}

/// Run `ticket` against `backend` on a background thread.
pub fn spawn_analysis(
    backend: Arc<dyn AnalysisBackend>,
    ticket: AnalysisTicket,
) -> Receiver<AnalysisReply> {
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        let result = backend.analyze(&ticket.upload);
        if let Err(ref e) = result {
            log::error!("Analysis of {} failed: {}", ticket.upload.name, e);
        }

        // The receiver is gone if the request was superseded
        if sender
            .send(AnalysisReply {
                generation: ticket.generation,
                result,
            })
            .is_err()
        {
            log::debug!("Dropped reply for generation {}", ticket.generation);
        }
    });

    receiver
}
