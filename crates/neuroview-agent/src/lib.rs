// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Inference client and session orchestration for NeuroView.
//!
//! [`InferenceClient`] owns the HTTP boundary to the classifier service.
//! [`Session`] owns one user's interactive state: the drawing canvas, the
//! layout cache, the current scene frame, and the request sequencing that
//! keeps late responses from overwriting newer ones.

mod client;
mod error;
mod session;

pub use client::{InferenceClient, ServiceConfig};
pub use error::{AgentError, Result};
pub use session::{PredictionRequest, Session, SessionSettings};
