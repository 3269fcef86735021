use std::fmt;

/// Result type for Minerva operations
pub type Result<T> = std::result::Result<T, MinervaError>;

/// Main error type for the Minerva library
#[derive(Debug, Clone)]
pub enum MinervaError {
    /// Sampling requested more transitions than the buffer holds.
    /// Callers are expected to gate on a warmup threshold, so hitting
    /// this in normal operation is a programming error.
    InsufficientData {
        requested: usize,
        available: usize,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Mismatched shapes between parameter sets or batches
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// IO errors (file operations)
    Io(String),

    /// Serialization/deserialization errors
    Serialization(String),
}

impl fmt::Display for MinervaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinervaError::InsufficientData { requested, available } => {
                write!(f, "Insufficient data: requested {} transitions, buffer holds {}", requested, available)
            }
            MinervaError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            MinervaError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            MinervaError::Io(msg) => write!(f, "IO error: {}", msg),
            MinervaError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for MinervaError {}

// Conversion from std::io::Error
impl From<std::io::Error> for MinervaError {
    fn from(err: std::io::Error) -> Self {
        MinervaError::Io(err.to_string())
    }
}

// Conversion from bincode::Error
impl From<bincode::Error> for MinervaError {
    fn from(err: bincode::Error) -> Self {
        MinervaError::Serialization(err.to_string())
    }
}

impl MinervaError {
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        MinervaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        MinervaError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
