mod color;
mod edge;
mod positions;
mod vector;

pub use color::Rgb;
pub use edge::Edge;
pub use positions::NeuronPositions;
pub use vector::SceneVector;
