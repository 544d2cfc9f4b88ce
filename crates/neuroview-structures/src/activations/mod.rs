mod layer;
mod prediction;
mod snapshot;

pub use layer::{LayerActivations, LayerKind};
pub use prediction::PredictionLabel;
pub use snapshot::ActivationSnapshot;
