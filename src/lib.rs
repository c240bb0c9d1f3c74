//! micropack: allocation-free MessagePack encoder for embedded targets
//!
//! This crate encodes primitive values into the MessagePack wire format,
//! writing directly into a fixed-size buffer supplied by the caller. Each
//! call either writes a complete encoding or fails with nothing written, so
//! [`Packer::len`] always counts fully encoded bytes.
//!
//! # Supported values
//!
//! ```text
//! nil, bool                  -> 1 byte
//! uint / int (compacted)     -> fixint, 8, 16, 32 or 64-bit formats
//! uint16..64 / int16..64     -> fixed-width formats, never compacted
//! f32 (f64 with "f64")       -> float 32 / float 64
//! str                        -> fixstr, str 8, str 16, str 32
//! array / map headers        -> fix, 16 or 32-bit counts
//! ```
//!
//! # Features
//!
//! - `int32`, `int64`: fixed-width 32 and 64-bit integer operations, and the
//!   width range of the compacting `pack_uint`/`pack_int`
//! - `f64`: double precision floats
//! - `alloc`: heap-backed [`PackBuf`] with `create`/`destroy`
//! - `std`: `std::error::Error` for [`Error`] (implies `alloc`)
//! - `log`: trace refused writes through the `log` facade
//! - `ffi`: `extern "C"` functions (`umsgpack_pack_uint`, ...) for C callers
//!
//! # Example
//!
//! ```rust
//! use micropack::*;
//!
//! let mut buf = [0u8; 64];
//! let mut packer = Packer::new(&mut buf);
//!
//! packer.pack_map(2)?;
//! packer.pack_str("id")?;
//! packer.pack_uint(42)?;
//! packer.pack_str("ok")?;
//! packer.pack_bool(true)?;
//!
//! assert_eq!(
//!     packer.as_slice(),
//!     &[0x82, 0xa2, b'i', b'd', 0x2a, 0xa2, b'o', b'k', 0xc3]
//! );
//! # Ok::<(), micropack::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod endian;
pub mod error;
#[cfg(feature = "ffi")]
#[allow(unsafe_code)]
pub mod ffi;
pub mod format;
pub mod packer;
pub mod profile;
pub mod storage;
pub mod width;

// Re-export main types
pub use error::{Error, Result};
pub use format::{IMax, UMax};
pub use packer::Packer;
#[cfg(feature = "alloc")]
pub use packer::PackBuf;
pub use profile::{TargetProfile, CACHE_LINE_SIZE};
pub use storage::StaticBuf;
pub use width::FixedWidth;
