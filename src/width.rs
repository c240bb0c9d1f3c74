//! Fixed-width integer capabilities
//!
//! [`FixedWidth`] is implemented only for the integer widths the current
//! target profile enables. Packing a `u64` on a build without the `int64`
//! feature is a compile error rather than a runtime failure.
//!
//! Fixed-width calls never compact: the selector always names the width of
//! the Rust type, which keeps header-style fields a constant size on the
//! wire even when a shorter encoding would be legal.

use crate::endian::BigEndian;
use crate::format::{marker, Head};

mod sealed {
    pub trait Sealed {}
}

/// Integer type with a fixed-width MessagePack format on this build
pub trait FixedWidth: BigEndian + sealed::Sealed {
    /// Format selector for this width and signedness
    const MARKER: u8;

    /// Encoded size including the selector byte
    const ENCODED_SIZE: usize = 1 + <Self as BigEndian>::WIDTH;

    /// Selector plus big-endian payload
    #[inline]
    fn head(self) -> Head {
        Head::payload(Self::MARKER, self)
    }
}

macro_rules! impl_fixed_width {
    ($($(#[$attr:meta])* $ty:ty => $marker:expr),* $(,)?) => {
        $(
            $(#[$attr])*
            impl sealed::Sealed for $ty {}

            $(#[$attr])*
            impl FixedWidth for $ty {
                const MARKER: u8 = $marker;
            }
        )*
    };
}

impl_fixed_width! {
    u16 => marker::UINT_16,
    i16 => marker::INT_16,
    #[cfg(feature = "int32")]
    u32 => marker::UINT_32,
    #[cfg(feature = "int32")]
    i32 => marker::INT_32,
    #[cfg(feature = "int64")]
    u64 => marker::UINT_64,
    #[cfg(feature = "int64")]
    i64 => marker::INT_64,
}
