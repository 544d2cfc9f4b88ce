/// One rendered connection between adjacent layers.
///
/// Indices address neurons within the source and target layers of the pair
/// the edge was pruned from. Edges are recomputed every render cycle from
/// the current snapshot and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source_index: usize,
    pub target_index: usize,
    pub opacity: f32,
}

impl Edge {
    /// Creates a new edge descriptor.
    pub const fn new(source_index: usize, target_index: usize, opacity: f32) -> Self {
        Edge {
            source_index,
            target_index,
            opacity,
        }
    }
}
