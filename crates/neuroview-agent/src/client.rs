// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! HTTP boundary to the classifier service

use crate::error::{AgentError, Result};
use neuroview_ink::NormalizedInput;
use neuroview_structures::activations::ActivationSnapshot;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Connection settings for the classifier service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the service (e.g. "http://localhost:8000")
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: f64,
    /// Path of the prediction endpoint
    pub predict_path: String,
    /// Path of the corrective feedback endpoint
    pub feedback_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 10.0,
            predict_path: "/predict".into(),
            feedback_path: "/feedback".into(),
        }
    }
}

impl ServiceConfig {
    /// Validates field ranges.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AgentError::InvalidConfiguration(
                "Service base URL cannot be empty".into(),
            ));
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(AgentError::InvalidConfiguration(
                "Service timeout must be a positive number of seconds".into(),
            ));
        }
        if !self.predict_path.starts_with('/') || !self.feedback_path.starts_with('/') {
            return Err(AgentError::InvalidConfiguration(
                "Endpoint paths must start with '/'".into(),
            ));
        }
        Ok(())
    }

    /// Full URL of the prediction endpoint.
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.predict_path)
    }

    /// Full URL of the feedback endpoint.
    pub fn feedback_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.feedback_path)
    }
}

/// HTTP client for the two classifier service contracts.
///
/// Strictly request/response: one POST per prediction and one per feedback
/// submission, no streaming. Cheap to clone; clones share the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http_client: reqwest::Client,
    predict_url: String,
    feedback_url: String,
}

impl InferenceClient {
    /// Creates a client with its own HTTP connection pool.
    ///
    /// # Examples
    /// ```
    /// use neuroview_agent::{InferenceClient, ServiceConfig};
    ///
    /// let client = InferenceClient::new(&ServiceConfig::default());
    /// assert!(client.is_ok());
    /// ```
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(config.timeout_secs))
            .build()?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a client over a pre-configured `reqwest::Client`.
    ///
    /// Useful when one pool (with consistent timeout, headers, proxy
    /// settings) is shared across components.
    pub fn with_http_client(config: &ServiceConfig, http_client: reqwest::Client) -> Self {
        InferenceClient {
            http_client,
            predict_url: config.predict_url(),
            feedback_url: config.feedback_url(),
        }
    }

    /// Sends one normalized input for classification and decodes the
    /// activation snapshot the service answers with.
    ///
    /// Transport failures and non-success statuses surface as
    /// [`AgentError::Transport`]; a response that decodes to no usable
    /// snapshot surfaces as [`AgentError::Data`]. Neither leaves a partial
    /// snapshot behind.
    pub async fn predict(&self, pixels: &NormalizedInput) -> Result<ActivationSnapshot> {
        debug!(
            "[AGENT] POST {} ({} pixels)",
            self.predict_url,
            pixels.len()
        );
        let response = self
            .http_client
            .post(&self.predict_url)
            .json(&serde_json::json!({ "pixels": pixels.pixels() }))
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        let snapshot = ActivationSnapshot::new_from_response_json(&payload)?;
        debug!(
            "[AGENT] Prediction {} at {:.3} confidence across {} layers",
            snapshot.prediction(),
            snapshot.confidence(),
            snapshot.layer_count()
        );
        Ok(snapshot)
    }

    /// Reports a mislabel so the service can learn from the correction.
    ///
    /// Only success or failure is consumed; any response body is ignored.
    pub async fn submit_feedback(
        &self,
        pixels: &NormalizedInput,
        correct_label: u8,
    ) -> Result<()> {
        debug!(
            "[AGENT] POST {} (correct label {})",
            self.feedback_url, correct_label
        );
        let result = self
            .http_client
            .post(&self.feedback_url)
            .json(&serde_json::json!({
                "pixels": pixels.pixels(),
                "correct_label": correct_label,
            }))
            .send()
            .await
            .and_then(|response| response.error_for_status());
        if let Err(ref transport_error) = result {
            error!("[AGENT] Feedback submission failed: {}", transport_error);
        }
        result?;
        Ok(())
    }
}
