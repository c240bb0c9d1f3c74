//! Target profiles
//!
//! A [`TargetProfile`] describes which optional widths and precisions a
//! target supports. The profile of the running build is derived from the
//! enabled Cargo features, so `TargetProfile::CURRENT` always agrees with the
//! operations that actually exist on [`Packer`](crate::Packer).

/// L1 data cache line size on the Cortex-M7 parts this crate targets
pub const CACHE_LINE_SIZE: usize = 32;

/// Capability set of an encoding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile {
    /// 32-bit integer formats available
    pub int32: bool,
    /// 64-bit integer formats available
    pub int64: bool,
    /// Double precision floats available
    pub double_precision: bool,
    /// Host stores integers little-endian (payloads are byte-swapped)
    pub little_endian: bool,
}

impl TargetProfile {
    /// Profile of this build
    pub const CURRENT: Self = Self {
        int32: cfg!(feature = "int32"),
        int64: cfg!(feature = "int64"),
        double_precision: cfg!(feature = "f64"),
        little_endian: cfg!(target_endian = "little"),
    };

    /// Cortex-M7 with FPv5-D16: every width and double precision.
    ///
    /// Build with the default features.
    pub const CORTEX_M7: Self = Self {
        int32: true,
        int64: true,
        double_precision: true,
        little_endian: true,
    };

    /// Cortex-M4 with FPv4-SP: 32-bit integers, single precision only.
    ///
    /// Build with `default-features = false, features = ["int32"]`.
    pub const CORTEX_M4: Self = Self {
        int32: true,
        int64: false,
        double_precision: false,
        little_endian: true,
    };

    /// Widest integer width in bits
    #[inline]
    pub const fn max_int_bits(&self) -> u32 {
        if self.int64 {
            64
        } else if self.int32 {
            32
        } else {
            16
        }
    }

    /// True if this profile offers every encoding capability `other` needs.
    ///
    /// Host byte order does not affect the wire format and is not compared.
    #[inline]
    pub const fn satisfies(&self, other: &Self) -> bool {
        (self.int32 || !other.int32)
            && (self.int64 || !other.int64)
            && (self.double_precision || !other.double_precision)
    }
}
