// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Agent error types

use thiserror::Error;

/// Errors raised by the inference client and session orchestration.
#[derive(Error, Debug)]
pub enum AgentError {
    /// HTTP transport to the inference service failed
    #[error("Inference transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A prediction request is already outstanding for this session
    #[error("Prediction request {sequence} is still in flight")]
    RequestInFlight { sequence: u64 },

    /// The response belongs to a request that was superseded or cleared
    #[error("Stale response discarded: arrived for request {arrived}, session is at {current}")]
    StaleResponse { arrived: u64, current: u64 },

    /// The canvas holds no ink, so there is nothing to predict or report
    #[error("Canvas holds no ink above the detection threshold")]
    NothingDrawn,

    /// NeuroView data structure error
    #[error("NeuroView data structure error: {0}")]
    Data(#[from] neuroview_structures::NeuroviewError),
}

/// Agent result type
pub type Result<T> = std::result::Result<T, AgentError>;
