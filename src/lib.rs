//! # NeuroView - Interactive Neural Activation Visualization
//!
//! NeuroView turns a hand-drawn digit into a live 3D view of a feed-forward
//! classifier: the stroke is normalized into the network's input tensor, sent
//! to an inference service, and the returned per-layer activations are laid
//! out, lit, and wired up for rendering. This crate provides the full
//! pipeline; the actual GPU surface is the embedding application's concern.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neuroview = "0.1"  # Default: full pipeline including agent + config
//! ```
//!
//! ## Feature Flags
//!
//! - **`agent`** (default): Inference client + session orchestration (pulls tokio/reqwest)
//! - **`config`** (default): TOML + environment-variable configuration loading
//!
//! Disable both for a pure-computation build (normalization, layout,
//! rendering, pruning) with no network or filesystem dependencies.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use neuroview::prelude::*;
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(None)?;
//!     let client = InferenceClient::new(&config.service)?;
//!     let mut session = Session::new(&config.session_settings(), client)?;
//!
//!     // Pointer events from the embedding UI
//!     session.draw_segment(CanvasPoint::new(130.0, 60.0), CanvasPoint::new(125.0, 220.0));
//!
//!     // Stroke finished: one round-trip, then a ready-to-render frame
//!     let frame = session.predict_stroke().await?;
//!     println!(
//!         "Predicted {} ({} neurons, {} connections drawn)",
//!         frame.prediction(),
//!         frame.drawn_neuron_count(),
//!         frame.drawn_edge_count()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neuroview-structures                       │
//! │  (ActivationSnapshot, scene geometry, error type)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Data Processing: neuroview-ink, neuroview-scene        │
//! │  (stroke capture, normalization, layout, pruning)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  I/O: neuroview-agent, neuroview-config                 │
//! │  (inference round-trips, session state, TOML config)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//!
//! The pipeline is single-threaded and event-driven. The only suspension
//! point is the inference round-trip; responses are sequence-numbered so a
//! reply that arrives after a newer dispatch or a canvas clear is discarded
//! instead of overwriting fresher state.
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use neuroview_structures as structures;

// Re-export data processing
pub use neuroview_ink as ink;
pub use neuroview_scene as scene;

// Re-export I/O layer
#[cfg(feature = "agent")]
pub use neuroview_agent as agent;

#[cfg(feature = "config")]
pub use neuroview_config as config;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::structures::activations::{
        ActivationSnapshot, LayerActivations, LayerKind, PredictionLabel,
    };
    pub use crate::structures::geometry::{Edge, NeuronPositions, Rgb, SceneVector};
    pub use crate::structures::NeuroviewError;

    pub use crate::ink::{
        normalize, CanvasConfig, CanvasPoint, InkCanvas, NormalizedInput, NormalizerConfig,
    };
    pub use crate::scene::{
        compose_frame, LayoutCache, LayoutConfig, PruneConfig, RenderConfig, SceneFrame,
    };

    #[cfg(feature = "agent")]
    pub use crate::agent::{AgentError, InferenceClient, ServiceConfig, Session, SessionSettings};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, NeuroviewConfig};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        // Just test that re-exports work
        use crate::prelude::*;
        let _vector = SceneVector::ZERO;
        let _canvas = InkCanvas::new(28);
    }
}
