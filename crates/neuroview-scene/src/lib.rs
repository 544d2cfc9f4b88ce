//! Scene construction for the NeuroView network visualization.
//!
//! Three stages, all pure over their inputs:
//! - [`layout_layer`] packs each layer's neurons into deterministic
//!   scene-space grids, one depth lane per layer ([`LayoutCache`] memoizes
//!   per layer shape).
//! - [`render_layer`] maps activations onto emissive visual descriptors.
//! - [`prune_connections`] keeps the edge count bounded with threshold
//!   filtering and per-source top-K target selection.
//!
//! [`compose_frame`] runs all three over one activation snapshot.

mod frame;
mod layout;
mod pruner;
mod renderer;

pub use frame::{compose_frame, SceneFrame};
pub use layout::{layout_layer, LayoutCache, LayoutConfig};
pub use pruner::{prune_connections, PruneConfig};
pub use renderer::{render_layer, render_neuron, NeuronVisual, RenderConfig};
