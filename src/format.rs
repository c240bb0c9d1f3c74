//! MessagePack format selection
//!
//! Pure functions that pick the format selector for a value and lay out the
//! selector plus any inline payload (integers, floats, length fields) as a
//! [`Head`]. Nothing here touches a buffer; the packer appends the head and,
//! for strings, the raw body.

use crate::endian::BigEndian;
use crate::error::{Error, Result};

/// Format selector bytes
pub mod marker {
    /// nil
    pub const NIL: u8 = 0xc0;
    /// false
    pub const FALSE: u8 = 0xc2;
    /// true
    pub const TRUE: u8 = 0xc3;
    /// float 32
    pub const FLOAT_32: u8 = 0xca;
    /// float 64
    pub const FLOAT_64: u8 = 0xcb;
    /// uint 8
    pub const UINT_8: u8 = 0xcc;
    /// uint 16
    pub const UINT_16: u8 = 0xcd;
    /// uint 32
    pub const UINT_32: u8 = 0xce;
    /// uint 64
    pub const UINT_64: u8 = 0xcf;
    /// int 8
    pub const INT_8: u8 = 0xd0;
    /// int 16
    pub const INT_16: u8 = 0xd1;
    /// int 32
    pub const INT_32: u8 = 0xd2;
    /// int 64
    pub const INT_64: u8 = 0xd3;
    /// str 8
    pub const STR_8: u8 = 0xd9;
    /// str 16
    pub const STR_16: u8 = 0xda;
    /// str 32
    pub const STR_32: u8 = 0xdb;
    /// array 16
    pub const ARRAY_16: u8 = 0xdc;
    /// array 32
    pub const ARRAY_32: u8 = 0xdd;
    /// map 16
    pub const MAP_16: u8 = 0xde;
    /// map 32
    pub const MAP_32: u8 = 0xdf;
    /// fixmap prefix (1000xxxx)
    pub const FIXMAP: u8 = 0x80;
    /// fixarray prefix (1001xxxx)
    pub const FIXARRAY: u8 = 0x90;
    /// fixstr prefix (101xxxxx)
    pub const FIXSTR: u8 = 0xa0;
}

/// Largest value carried by a positive fixint
pub const POSITIVE_FIXINT_MAX: i64 = 0x7f;

/// Smallest value carried by a negative fixint
pub const NEGATIVE_FIXINT_MIN: i64 = -32;

/// Longest string encoded as fixstr
pub const FIXSTR_MAX_LEN: usize = 0b1_1111;

/// Largest element count encoded as fixarray
pub const FIXARRAY_MAX_LEN: usize = 0b1111;

/// Largest pair count encoded as fixmap
pub const FIXMAP_MAX_LEN: usize = 0b1111;

/// Selector byte plus the widest inline payload (8 bytes)
pub const MAX_HEAD_SIZE: usize = 9;

/// Widest unsigned integer the generic encoder accepts on this build
#[cfg(feature = "int64")]
pub type UMax = u64;
/// Widest unsigned integer the generic encoder accepts on this build
#[cfg(all(feature = "int32", not(feature = "int64")))]
pub type UMax = u32;
/// Widest unsigned integer the generic encoder accepts on this build
#[cfg(not(feature = "int32"))]
pub type UMax = u16;

/// Widest signed integer the generic encoder accepts on this build
#[cfg(feature = "int64")]
pub type IMax = i64;
/// Widest signed integer the generic encoder accepts on this build
#[cfg(all(feature = "int32", not(feature = "int64")))]
pub type IMax = i32;
/// Widest signed integer the generic encoder accepts on this build
#[cfg(not(feature = "int32"))]
pub type IMax = i16;

/// Format selector followed by its inline payload, ready to append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    bytes: [u8; MAX_HEAD_SIZE],
    len: u8,
}

impl Head {
    /// Selector byte with no payload
    #[inline]
    pub(crate) const fn marker(marker: u8) -> Self {
        let mut bytes = [0u8; MAX_HEAD_SIZE];
        bytes[0] = marker;
        Self { bytes, len: 1 }
    }

    /// Selector byte followed by `payload` in network order
    #[inline]
    pub(crate) fn payload<P: BigEndian>(marker: u8, payload: P) -> Self {
        let mut head = Self::marker(marker);
        head.bytes[1..1 + P::WIDTH].copy_from_slice(payload.to_big_endian().as_ref());
        head.len += P::WIDTH as u8;
        head
    }

    /// Encoded bytes (selector first)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Selector byte
    #[inline]
    pub const fn selector(&self) -> u8 {
        self.bytes[0]
    }
}

/// nil
#[inline]
pub const fn nil() -> Head {
    Head::marker(marker::NIL)
}

/// Boolean, folded into the selector
#[inline]
pub const fn boolean(value: bool) -> Head {
    Head::marker(if value { marker::TRUE } else { marker::FALSE })
}

/// Most compact unsigned encoding for `value`
// Widening is a no-op on 64-bit builds
#[allow(clippy::useless_conversion)]
#[inline]
pub fn uint(value: UMax) -> Head {
    let v = u64::from(value);

    if v <= POSITIVE_FIXINT_MAX as u64 {
        Head::marker(v as u8)
    } else if v <= u64::from(u8::MAX) {
        Head::payload(marker::UINT_8, v as u8)
    } else if v <= u64::from(u16::MAX) {
        Head::payload(marker::UINT_16, v as u16)
    } else if v <= u64::from(u32::MAX) {
        Head::payload(marker::UINT_32, v as u32)
    } else {
        Head::payload(marker::UINT_64, v)
    }
}

/// Most compact signed encoding for `value`
///
/// Values in `[-32, 127]` become a single fixint byte; everything else takes
/// the narrowest signed format that holds it.
// Widening is a no-op on 64-bit builds
#[allow(clippy::useless_conversion)]
#[inline]
pub fn int(value: IMax) -> Head {
    let v = i64::from(value);

    if (NEGATIVE_FIXINT_MIN..=POSITIVE_FIXINT_MAX).contains(&v) {
        // Negative fixint is the low byte of the two's complement value
        Head::marker(v as u8)
    } else if i8::try_from(v).is_ok() {
        Head::payload(marker::INT_8, v as i8)
    } else if i16::try_from(v).is_ok() {
        Head::payload(marker::INT_16, v as i16)
    } else if i32::try_from(v).is_ok() {
        Head::payload(marker::INT_32, v as i32)
    } else {
        Head::payload(marker::INT_64, v)
    }
}

/// Single precision float
#[inline]
pub fn float32(value: f32) -> Head {
    Head::payload(marker::FLOAT_32, value)
}

/// Double precision float
#[cfg(feature = "f64")]
#[inline]
pub fn float64(value: f64) -> Head {
    Head::payload(marker::FLOAT_64, value)
}

/// String header for a body of `len` bytes
#[inline]
pub fn str_head(len: usize) -> Result<Head> {
    if len <= FIXSTR_MAX_LEN {
        Ok(Head::marker(marker::FIXSTR | len as u8))
    } else if let Ok(len) = u8::try_from(len) {
        Ok(Head::payload(marker::STR_8, len))
    } else {
        sized_head(len, marker::STR_16, marker::STR_32)
    }
}

/// Array header for `count` elements
#[inline]
pub fn array_head(count: usize) -> Result<Head> {
    if count <= FIXARRAY_MAX_LEN {
        Ok(Head::marker(marker::FIXARRAY | count as u8))
    } else {
        sized_head(count, marker::ARRAY_16, marker::ARRAY_32)
    }
}

/// Map header for `count` key/value pairs
#[inline]
pub fn map_head(count: usize) -> Result<Head> {
    if count <= FIXMAP_MAX_LEN {
        Ok(Head::marker(marker::FIXMAP | count as u8))
    } else {
        sized_head(count, marker::MAP_16, marker::MAP_32)
    }
}

/// 16-bit or 32-bit length field, whichever fits first
#[inline]
fn sized_head(len: usize, marker16: u8, marker32: u8) -> Result<Head> {
    if let Ok(len) = u16::try_from(len) {
        return Ok(Head::payload(marker16, len));
    }
    let len = u32::try_from(len).map_err(|_| Error::LengthOverflow)?;
    Ok(Head::payload(marker32, len))
}
