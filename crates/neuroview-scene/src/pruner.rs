// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use neuroview_structures::geometry::Edge;
use neuroview_structures::NeuroviewError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Selection policy for which inter-layer connections get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Activation a source neuron must exceed to emit any connection.
    /// Materially higher than the render threshold so only strongly firing
    /// neurons fan out.
    pub source_threshold: f32,
    /// Connections kept per surviving source neuron
    pub top_k: u32,
    /// Multiplier from source activation to edge opacity
    pub opacity_scale: f32,
}

impl Default for PruneConfig {
    fn default() -> Self {
        PruneConfig {
            source_threshold: 0.4,
            top_k: 5,
            opacity_scale: 0.15,
        }
    }
}

impl PruneConfig {
    /// Validates field ranges.
    pub fn validate(&self) -> Result<(), NeuroviewError> {
        if !(0.0..=1.0).contains(&self.source_threshold) {
            return Err(NeuroviewError::BadParameters(
                "Source threshold must be within [0, 1]".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(NeuroviewError::BadParameters(
                "Top-K must be >= 1".into(),
            ));
        }
        if !self.opacity_scale.is_finite() || self.opacity_scale <= 0.0 {
            return Err(NeuroviewError::BadParameters(
                "Opacity scale must be a positive finite number".into(),
            ));
        }
        Ok(())
    }
}

/// Selects the bounded edge set to draw between two adjacent layers.
///
/// All-pairs rendering costs `O(M * N)` line primitives and collapses once
/// layers reach a few hundred neurons. Instead:
/// 1. Sources must exceed `source_threshold` to emit anything.
/// 2. Each surviving source connects to the `top_k` highest-activation
///    targets (ties broken toward the lower index, so output order is
///    deterministic).
/// 3. Edge opacity is `source_activation * opacity_scale`, fading edges as
///    their source weakens.
///
/// The result never exceeds `active_source_count * top_k` edges no matter
/// how wide the target layer grows. The target ranking does not depend on
/// the source, so it is computed once per layer pair.
pub fn prune_connections(
    source_activations: &[f32],
    target_activations: &[f32],
    config: &PruneConfig,
) -> Vec<Edge> {
    if source_activations.is_empty() || target_activations.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<usize> = (0..target_activations.len()).collect();
    ranked.sort_unstable_by(|&left, &right| {
        target_activations[right]
            .partial_cmp(&target_activations[left])
            .unwrap_or(Ordering::Equal)
            .then(left.cmp(&right))
    });
    ranked.truncate(config.top_k as usize);

    let mut edges: Vec<Edge> = Vec::new();
    let mut active_sources = 0usize;
    for (source_index, &source_activation) in source_activations.iter().enumerate() {
        if source_activation <= config.source_threshold {
            continue;
        }
        active_sources += 1;
        let opacity = source_activation * config.opacity_scale;
        for &target_index in &ranked {
            edges.push(Edge::new(source_index, target_index, opacity));
        }
    }

    debug!(
        "[PRUNE] {} of {} sources active -> {} edges (top {} of {} targets)",
        active_sources,
        source_activations.len(),
        edges.len(),
        ranked.len(),
        target_activations.len()
    );
    edges
}
