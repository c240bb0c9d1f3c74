//! Statically sized packer storage
//!
//! [`StaticBuf`] is a plain byte array aligned to the target cache line. It
//! lives wherever the caller declares it: on the stack, in a `static`, or in
//! a tightly coupled memory section via `#[link_section]`.

use crate::profile::CACHE_LINE_SIZE;

/// Cache-line aligned byte array usable as [`Packer`](crate::Packer) storage
#[repr(C, align(32))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticBuf<const N: usize>([u8; N]);

// align() takes a literal; keep it tied to the profile constant
const _: () = assert!(core::mem::align_of::<StaticBuf<1>>() == CACHE_LINE_SIZE);

impl<const N: usize> StaticBuf<N> {
    /// Zeroed buffer
    #[inline]
    pub const fn new() -> Self {
        Self([0u8; N])
    }

    /// Size in bytes
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for StaticBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> AsRef<[u8]> for StaticBuf<N> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for StaticBuf<N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}
