use serde::{Deserialize, Serialize};

/// A linear RGB color with components in `[0.0, 1.0]`.
///
/// Components are not clamped on construction; render policies own the
/// ranges they feed to the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Creates a new color from linear components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// The stock active-neuron color.
    pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);

    /// The stock dimmed color for inactive neurons (near-black neutral).
    pub const CHARCOAL: Rgb = Rgb::new(0.067, 0.067, 0.067);
}
