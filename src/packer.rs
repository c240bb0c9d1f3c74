//! Fixed-capacity MessagePack packer
//!
//! The packer writes directly into storage supplied at construction and never
//! grows it. Every operation goes through one bounds-checked append, so a call
//! either writes its whole encoding or writes nothing and leaves the position
//! where it was.

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};

use crate::error::{Error, Result};
use crate::format::{self, Head, IMax, UMax};
use crate::width::FixedWidth;

/// Packer writing into a fixed-size byte region
///
/// `B` is any byte storage: a borrowed slice or array, a
/// [`StaticBuf`](crate::StaticBuf), or an owned `Box<[u8]>` from
/// [`PackBuf::create`].
#[derive(Debug)]
pub struct Packer<B> {
    buf: B,
    cap: usize,
    pos: usize,
}

/// Packer that owns heap storage allocated by [`PackBuf::create`]
#[cfg(feature = "alloc")]
pub type PackBuf = Packer<Box<[u8]>>;

impl<B: AsRef<[u8]> + AsMut<[u8]>> Packer<B> {
    /// Create a packer using the whole of `buf` as capacity
    #[inline]
    pub fn new(buf: B) -> Self {
        let cap = buf.as_ref().len();
        Self::with_capacity(buf, cap)
    }

    /// Create a packer limited to the first `capacity` bytes of `buf`
    ///
    /// `capacity` is clamped to the storage length.
    #[inline]
    pub fn with_capacity(buf: B, capacity: usize) -> Self {
        let mut packer = Self { buf, cap: 0, pos: 0 };
        packer.init(capacity);
        packer
    }

    /// Rebuild a packer around storage that already holds `pos` bytes
    ///
    /// Caller guarantees `pos <= cap <= buf.len()`.
    #[cfg(feature = "ffi")]
    #[inline]
    pub(crate) fn resume(buf: B, cap: usize, pos: usize) -> Self {
        Self { buf, cap, pos }
    }

    /// Set the capacity and rewind to the start of the storage
    ///
    /// Storage contents are left as they are.
    #[inline]
    pub fn init(&mut self, capacity: usize) {
        let storage = self.buf.as_ref().len();
        debug_assert!(capacity > 0, "packer capacity must be non-zero");
        debug_assert!(
            capacity <= storage,
            "capacity {capacity} exceeds storage of {storage} bytes"
        );
        self.cap = capacity.min(storage);
        self.pos = 0;
    }

    /// Rewind to the start, keeping the current capacity
    #[inline]
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    /// True if nothing has been written since the last reset
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Total capacity in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Bytes still available
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cap - self.pos
    }

    /// Encoded bytes written so far
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf.as_ref()[..self.pos]
    }

    /// Release the underlying storage
    #[inline]
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Append `head` then `body` if both fit, otherwise write nothing
    #[inline]
    fn append(&mut self, head: &[u8], body: &[u8]) -> Result<usize> {
        let needed = head
            .len()
            .checked_add(body.len())
            .ok_or(Error::ShortBuffer)?;

        if needed > self.remaining() {
            #[cfg(feature = "log")]
            log::trace!(
                "pack refused: need {} bytes, {} of {} available",
                needed,
                self.remaining(),
                self.cap
            );
            return Err(Error::ShortBuffer);
        }

        let start = self.pos;
        let dst = &mut self.buf.as_mut()[start..start + needed];
        let (dst_head, dst_body) = dst.split_at_mut(head.len());
        dst_head.copy_from_slice(head);
        dst_body.copy_from_slice(body);
        self.pos += needed;

        Ok(needed)
    }

    #[inline]
    fn put(&mut self, head: Head) -> Result<usize> {
        self.append(head.as_bytes(), &[])
    }

    /// Write nil
    #[inline]
    pub fn pack_nil(&mut self) -> Result<usize> {
        self.put(format::nil())
    }

    /// Write a boolean
    #[inline]
    pub fn pack_bool(&mut self, value: bool) -> Result<usize> {
        self.put(format::boolean(value))
    }

    /// Write an unsigned integer in its most compact format
    #[inline]
    pub fn pack_uint(&mut self, value: UMax) -> Result<usize> {
        self.put(format::uint(value))
    }

    /// Write a signed integer in its most compact format
    #[inline]
    pub fn pack_int(&mut self, value: IMax) -> Result<usize> {
        self.put(format::int(value))
    }

    /// Write an integer using the fixed format of its own width
    #[inline]
    pub fn pack_fixed<T: FixedWidth>(&mut self, value: T) -> Result<usize> {
        self.put(value.head())
    }

    /// Write a `uint 16` (always 3 bytes)
    #[inline]
    pub fn pack_uint16(&mut self, value: u16) -> Result<usize> {
        self.pack_fixed(value)
    }

    /// Write an `int 16` (always 3 bytes)
    #[inline]
    pub fn pack_int16(&mut self, value: i16) -> Result<usize> {
        self.pack_fixed(value)
    }

    /// Write a `uint 32` (always 5 bytes)
    #[cfg(feature = "int32")]
    #[inline]
    pub fn pack_uint32(&mut self, value: u32) -> Result<usize> {
        self.pack_fixed(value)
    }

    /// Write an `int 32` (always 5 bytes)
    #[cfg(feature = "int32")]
    #[inline]
    pub fn pack_int32(&mut self, value: i32) -> Result<usize> {
        self.pack_fixed(value)
    }

    /// Write a `uint 64` (always 9 bytes)
    #[cfg(feature = "int64")]
    #[inline]
    pub fn pack_uint64(&mut self, value: u64) -> Result<usize> {
        self.pack_fixed(value)
    }

    /// Write an `int 64` (always 9 bytes)
    #[cfg(feature = "int64")]
    #[inline]
    pub fn pack_int64(&mut self, value: i64) -> Result<usize> {
        self.pack_fixed(value)
    }

    /// Write a single precision float
    #[inline]
    pub fn pack_float(&mut self, value: f32) -> Result<usize> {
        self.put(format::float32(value))
    }

    /// Write a double precision float
    #[cfg(feature = "f64")]
    #[inline]
    pub fn pack_double(&mut self, value: f64) -> Result<usize> {
        self.put(format::float64(value))
    }

    /// Write a string
    ///
    /// The bytes are copied as-is; no terminator is written and none is
    /// searched for, so embedded NULs are preserved.
    #[inline]
    pub fn pack_str<S: AsRef<[u8]> + ?Sized>(&mut self, value: &S) -> Result<usize> {
        let bytes = value.as_ref();
        let head = format::str_head(bytes.len())?;
        self.append(head.as_bytes(), bytes)
    }

    /// Write the first `len` bytes of `bytes` as a string
    #[inline]
    pub fn pack_str_len(&mut self, bytes: &[u8], len: usize) -> Result<usize> {
        let body = bytes.get(..len).ok_or(Error::InvalidLength)?;
        self.pack_str(body)
    }

    /// Write an array header for `count` elements
    ///
    /// Exactly `count` values must follow; this is not checked.
    #[inline]
    pub fn pack_array(&mut self, count: usize) -> Result<usize> {
        self.put(format::array_head(count)?)
    }

    /// Write a map header for `count` key/value pairs
    ///
    /// Exactly `2 * count` values must follow, alternating key and value.
    #[inline]
    pub fn pack_map(&mut self, count: usize) -> Result<usize> {
        self.put(format::map_head(count)?)
    }
}

#[cfg(feature = "alloc")]
impl Packer<Box<[u8]>> {
    /// Allocate a packer with exactly `capacity` bytes of zeroed storage
    ///
    /// Fails with [`Error::AllocFailed`] when the allocator cannot reserve
    /// the storage.
    pub fn create(capacity: usize) -> Result<Self> {
        let mut storage = Vec::<u8>::new();
        if storage.try_reserve_exact(capacity).is_err() {
            #[cfg(feature = "log")]
            log::warn!("pack buffer allocation of {} bytes failed", capacity);
            return Err(Error::AllocFailed);
        }
        storage.resize(capacity, 0);
        Ok(Self::new(storage.into_boxed_slice()))
    }

    /// Release storage obtained from [`create`](Self::create)
    #[inline]
    pub fn destroy(self) {
        drop(self.buf);
    }
}
