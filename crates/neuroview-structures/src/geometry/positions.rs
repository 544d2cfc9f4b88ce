// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::geometry::SceneVector;
use crate::NeuroviewError;

/// Structure-of-arrays storage for one layer's neuron positions.
///
/// Stores the coordinates in separate parallel arrays so a render pass can
/// hand each axis to the scene graph as one contiguous slice. Positions are
/// written once per layer-shape configuration and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct NeuronPositions {
    /// X coordinates of neurons (using Cartesian coordinate system)
    x: Vec<f32>,
    /// Y coordinates of neurons
    y: Vec<f32>,
    /// Depth-lane coordinates of neurons
    z: Vec<f32>,
}

impl NeuronPositions {
    /// Creates a new empty NeuronPositions instance.
    ///
    /// # Returns
    /// * `Self` - A new empty instance with no allocated capacity
    ///
    /// # Examples
    /// ```
    /// use neuroview_structures::geometry::NeuronPositions;
    ///
    /// let positions = NeuronPositions::new();
    /// assert_eq!(positions.len(), 0);
    /// assert!(positions.is_empty());
    /// ```
    pub fn new() -> Self {
        NeuronPositions {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        }
    }

    /// Creates a new instance with capacity for the specified number of neurons.
    ///
    /// # Arguments
    /// * `number_of_neurons` - The number of neurons to allocate space for
    pub fn with_capacity(number_of_neurons: usize) -> Self {
        NeuronPositions {
            x: Vec::with_capacity(number_of_neurons),
            y: Vec::with_capacity(number_of_neurons),
            z: Vec::with_capacity(number_of_neurons),
        }
    }

    /// Creates a new NeuronPositions instance from three separate vectors of equal length.
    ///
    /// # Arguments
    /// * `x` - Vector of X coordinates
    /// * `y` - Vector of Y coordinates
    /// * `z` - Vector of depth-lane coordinates
    ///
    /// # Returns
    /// * `Result<Self, NeuroviewError>` - A new instance or an error if the vectors have different lengths
    ///
    /// # Examples
    /// ```
    /// use neuroview_structures::geometry::NeuronPositions;
    ///
    /// let positions = NeuronPositions::new_from_vectors(
    ///     vec![0.0, 1.0],
    ///     vec![0.0, 0.0],
    ///     vec![-8.0, -8.0],
    /// ).unwrap();
    /// assert_eq!(positions.len(), 2);
    /// ```
    pub fn new_from_vectors(
        x: Vec<f32>,
        y: Vec<f32>,
        z: Vec<f32>,
    ) -> Result<Self, NeuroviewError> {
        let len = x.len();
        if len != y.len() || len != z.len() {
            return Err(NeuroviewError::GeometryError(
                "Coordinate vectors must be the same length to form neuron positions!".into(),
            ));
        }
        Ok(NeuronPositions { x, y, z })
    }

    /// Appends one neuron position from raw coordinates.
    pub fn push_raw(&mut self, x: f32, y: f32, z: f32) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    /// Number of stored neuron positions.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when no positions are stored.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Position at `index`, if present.
    pub fn get(&self, index: usize) -> Option<SceneVector> {
        if index >= self.len() {
            return None;
        }
        Some(SceneVector::new(self.x[index], self.y[index], self.z[index]))
    }

    /// Iterates over positions in neuron order.
    pub fn iter(&self) -> impl Iterator<Item = SceneVector> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.z.iter())
            .map(|((&x, &y), &z)| SceneVector::new(x, y, z))
    }

    /// Borrows the X coordinate array.
    pub fn x(&self) -> &[f32] {
        &self.x
    }

    /// Borrows the Y coordinate array.
    pub fn y(&self) -> &[f32] {
        &self.y
    }

    /// Borrows the depth-lane coordinate array.
    pub fn z(&self) -> &[f32] {
        &self.z
    }
}

impl Default for NeuronPositions {
    fn default() -> Self {
        Self::new()
    }
}
