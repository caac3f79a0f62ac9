//! Configuration errors
//!
//! The solver has no runtime error states: every step is a pure transformation
//! over pre-validated arrays. Errors only arise when a grid or parameter set
//! is rejected at configuration time.

/// Errors raised while configuring a fluid solver
#[derive(Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Grid must have at least one interior cell on each axis
    InvalidDimensions {
        /// Requested interior cells along x
        nx: usize,
        /// Requested interior cells along y
        ny: usize,
    },
    /// A scalar parameter is non-finite or outside its valid range
    InvalidParameter {
        /// Parameter name as it appears in `FluidParams`
        name: &'static str,
        /// Offending value
        value: f32,
    },
    /// Output buffer cannot hold the exported field
    BufferTooSmall {
        /// Bytes needed
        required: usize,
        /// Bytes provided
        provided: usize,
    },
}

impl std::fmt::Display for FluidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FluidError::InvalidDimensions { nx, ny } => {
                write!(f, "Invalid grid dimensions {nx}x{ny}: both axes need at least one cell")
            }
            FluidError::InvalidParameter { name, value } => {
                write!(f, "Invalid value for {name}: {value}")
            }
            FluidError::BufferTooSmall { required, provided } => {
                write!(f, "Buffer too small: need {required} bytes, got {provided}")
            }
        }
    }
}

impl std::error::Error for FluidError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FluidError::InvalidDimensions { nx: 0, ny: 12 };
        assert_eq!(
            err.to_string(),
            "Invalid grid dimensions 0x12: both axes need at least one cell"
        );

        let err = FluidError::InvalidParameter {
            name: "fade_speed",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "Invalid value for fade_speed: 1.5");
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(FluidError::BufferTooSmall {
            required: 16,
            provided: 4,
        });
        assert!(err.to_string().contains("need 16 bytes"));
    }
}
