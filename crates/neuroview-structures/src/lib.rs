//! The core crate for NeuroView. Defines the most common data structures used throughout:
//! activation snapshots received from the inference service, scene-space geometry for
//! the 3D network view, and the shared error type.

pub mod activations;
mod error;
pub mod geometry;

pub use error::NeuroviewError;
