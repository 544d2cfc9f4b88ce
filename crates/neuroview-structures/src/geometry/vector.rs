use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A point in scene space. Remember, NeuroView scene space is cartesian:
/// X right, Y up, Z toward the camera; layers sit at fixed Z lanes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SceneVector {
    /// Creates a new scene-space point.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        SceneVector { x, y, z }
    }

    /// The scene origin.
    pub const ZERO: SceneVector = SceneVector::new(0.0, 0.0, 0.0);
}

impl Display for SceneVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
