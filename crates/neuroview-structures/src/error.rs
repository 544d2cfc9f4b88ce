use std::error::Error;
use std::fmt::{Display, Formatter};

/// Common error type for NeuroView data operations.
///
/// Provides structured error handling for response decoding, parameter
/// validation, geometry construction, and internal errors across the
/// visualization pipeline.
///
/// # Examples
/// ```
/// use neuroview_structures::NeuroviewError;
///
/// fn validate_side(side: usize) -> Result<(), NeuroviewError> {
///     if side == 0 {
///         return Err(NeuroviewError::BadParameters("Side must be > 0".into()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_side(0).is_err());
/// assert!(validate_side(28).is_ok());
/// ```
#[derive(Debug)]
pub enum NeuroviewError {
    /// Failed to decode an inference response into data structures
    DeserializationError(String),
    /// Invalid parameters provided to a function
    BadParameters(String),
    /// Error related to scene geometry construction
    GeometryError(String),
    /// No pixel on the canvas exceeded the ink detection threshold
    NoInk,
    /// Internal error indicating a bug (please report)
    InternalError(String),
}

impl Display for NeuroviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NeuroviewError::DeserializationError(msg) => {
                write!(f, "Failed to Deserialize Response: {}", msg)
            }
            NeuroviewError::BadParameters(msg) => write!(f, "Bad Parameters: {}", msg),
            NeuroviewError::GeometryError(msg) => write!(f, "Geometry Error: {}", msg),
            NeuroviewError::NoInk => write!(
                f,
                "No ink pixels above the detection threshold were found on the canvas!"
            ),
            NeuroviewError::InternalError(msg) => write!(
                f,
                "Internal Error, please raise an issue on Github: {}",
                msg
            ),
        }
    }
}
impl Error for NeuroviewError {}
