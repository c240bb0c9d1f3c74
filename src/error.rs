//! Error types for the micropack encoder

/// Errors that can occur while packing values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Remaining capacity too small for the encoding
    ShortBuffer,
    /// String length or container count does not fit a 32-bit length field
    LengthOverflow,
    /// Explicit string length exceeds the bytes supplied
    InvalidLength,
    /// Storage for a new buffer could not be allocated
    AllocFailed,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::ShortBuffer => "buffer too small for encoding",
            Error::LengthOverflow => "length exceeds 32-bit format limit",
            Error::InvalidLength => "explicit length exceeds supplied bytes",
            Error::AllocFailed => "buffer allocation failed",
        }
    }

    /// True for capacity exhaustion, the one error a caller is expected to
    /// recover from by flushing or recreating the buffer.
    #[inline]
    pub const fn is_capacity(&self) -> bool {
        matches!(self, Error::ShortBuffer)
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for micropack operations
pub type Result<T> = core::result::Result<T, Error>;
