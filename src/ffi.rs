//! C-callable packing surface
//!
//! Thin `extern "C"` wrappers around [`Packer`] for firmware written in C.
//! The caller owns a [`PackerBuf`] describing the storage; every call rebuilds
//! a borrowed [`Packer`] over it, runs one operation and stores the new
//! position back.
//!
//! Pack calls return the number of bytes written, or one of the negative
//! `UMSGPACK_ERR_*` codes. Nothing is written on failure.

use core::ffi::{c_char, c_int};
use core::{ptr, slice};

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use crate::error::{Error, Result};
use crate::format::{IMax, UMax};
use crate::packer::Packer;
#[cfg(feature = "alloc")]
use crate::packer::PackBuf;

/// Not enough space left for the encoding
pub const UMSGPACK_ERR_SHORT_BUFFER: c_int = -1;
/// Length or count too large for the format
pub const UMSGPACK_ERR_LENGTH_OVERFLOW: c_int = -2;
/// Negative count or length beyond the supplied bytes
pub const UMSGPACK_ERR_INVALID_LENGTH: c_int = -3;
/// Storage could not be allocated
pub const UMSGPACK_ERR_ALLOC_FAILED: c_int = -4;
/// Null or uninitialised buffer
pub const UMSGPACK_ERR_NULL: c_int = -5;

/// Buffer state shared with C
///
/// Initialise with [`umsgpack_packer_init`] or obtain from [`umsgpack_alloc`].
#[repr(C)]
#[derive(Debug)]
pub struct PackerBuf {
    data: *mut u8,
    length: usize,
    pos: usize,
    owned: bool,
}

impl PackerBuf {
    /// Empty descriptor; every pack call fails until it is initialised
    pub const fn empty() -> Self {
        Self {
            data: ptr::null_mut(),
            length: 0,
            pos: 0,
            owned: false,
        }
    }
}

impl Default for PackerBuf {
    fn default() -> Self {
        Self::empty()
    }
}

/// Status code reported to C for `err`
pub const fn status(err: Error) -> c_int {
    match err {
        Error::ShortBuffer => UMSGPACK_ERR_SHORT_BUFFER,
        Error::LengthOverflow => UMSGPACK_ERR_LENGTH_OVERFLOW,
        Error::InvalidLength => UMSGPACK_ERR_INVALID_LENGTH,
        Error::AllocFailed => UMSGPACK_ERR_ALLOC_FAILED,
    }
}

fn report(result: Result<usize>) -> c_int {
    match result {
        // Single encodings are far below c_int::MAX except for huge strings
        Ok(written) => c_int::try_from(written).unwrap_or(c_int::MAX),
        Err(err) => status(err),
    }
}

/// Run `pack` against the storage described by `buf`
///
/// # Safety
/// `buf` is null or points to a valid `PackerBuf` whose `data` is valid for
/// `length` bytes of writes.
unsafe fn with_packer<F>(buf: *mut PackerBuf, pack: F) -> c_int
where
    F: FnOnce(&mut Packer<&mut [u8]>) -> Result<usize>,
{
    // SAFETY: caller guarantees `buf` is null or valid and unaliased.
    let Some(raw) = (unsafe { buf.as_mut() }) else {
        return UMSGPACK_ERR_NULL;
    };
    if raw.data.is_null() || raw.pos > raw.length {
        return UMSGPACK_ERR_NULL;
    }

    // SAFETY: `data` is valid for `length` bytes per the init/alloc contract.
    let storage = unsafe { slice::from_raw_parts_mut(raw.data, raw.length) };
    let mut packer = Packer::resume(storage, raw.length, raw.pos);
    let result = pack(&mut packer);
    raw.pos = packer.len();

    report(result)
}

/// Attach `length` bytes at `data` to `buf` and rewind it
///
/// # Safety
/// `buf` must be null or valid for writes. `data` must stay valid for
/// `length` bytes of writes for as long as `buf` is used.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_packer_init(buf: *mut PackerBuf, data: *mut u8, length: usize) {
    debug_assert!(!buf.is_null(), "packer buffer must not be null");
    // SAFETY: caller guarantees `buf` is null or valid.
    if let Some(raw) = unsafe { buf.as_mut() } {
        *raw = PackerBuf {
            data,
            length,
            pos: 0,
            owned: false,
        };
    }
}

/// Allocate a buffer with `length` bytes of zeroed storage
///
/// Returns null when `length` is zero or the allocation fails.
#[cfg(feature = "alloc")]
#[no_mangle]
pub extern "C" fn umsgpack_alloc(length: usize) -> *mut PackerBuf {
    if length == 0 {
        return ptr::null_mut();
    }
    let storage = match PackBuf::create(length) {
        Ok(packer) => packer.into_inner(),
        Err(_) => return ptr::null_mut(),
    };

    let data = Box::into_raw(storage).cast::<u8>();
    Box::into_raw(Box::new(PackerBuf {
        data,
        length,
        pos: 0,
        owned: true,
    }))
}

/// Release a buffer obtained from [`umsgpack_alloc`]
///
/// Returns 0, or [`UMSGPACK_ERR_NULL`] for a null buffer or one set up with
/// [`umsgpack_packer_init`], which is left untouched.
///
/// # Safety
/// `buf` must be null or a pointer returned by `umsgpack_alloc` that has not
/// been freed yet.
#[cfg(feature = "alloc")]
#[no_mangle]
pub unsafe extern "C" fn umsgpack_free(buf: *mut PackerBuf) -> c_int {
    // SAFETY: caller guarantees `buf` is null or valid.
    match unsafe { buf.as_ref() } {
        Some(raw) if raw.owned => {}
        _ => return UMSGPACK_ERR_NULL,
    }

    // SAFETY: `owned` is only set by `umsgpack_alloc`, which leaked both boxes.
    let raw = unsafe { Box::from_raw(buf) };
    let storage = ptr::slice_from_raw_parts_mut(raw.data, raw.length);
    drop(unsafe { Box::from_raw(storage) });
    0
}

/// Bytes written so far, 0 for a null buffer
///
/// # Safety
/// `buf` must be null or point to a valid `PackerBuf`.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_get_length(buf: *const PackerBuf) -> usize {
    // SAFETY: caller guarantees `buf` is null or valid.
    unsafe { buf.as_ref() }.map_or(0, |raw| raw.pos)
}

macro_rules! export_pack {
    ($(#[$attr:meta])* $name:ident, $method:ident, $ty:ty) => {
        $(#[$attr])*
        ///
        /// # Safety
        /// `buf` must be null or initialised by `umsgpack_packer_init` or
        /// `umsgpack_alloc`.
        #[no_mangle]
        pub unsafe extern "C" fn $name(buf: *mut PackerBuf, value: $ty) -> c_int {
            // SAFETY: forwarded from the caller.
            unsafe { with_packer(buf, |packer| packer.$method(value)) }
        }
    };
}

export_pack!(
    /// Compact unsigned integer
    umsgpack_pack_uint, pack_uint, UMax
);
export_pack!(
    /// Compact signed integer
    umsgpack_pack_int, pack_int, IMax
);
export_pack!(
    /// `uint 16`
    umsgpack_pack_uint16, pack_uint16, u16
);
export_pack!(
    /// `int 16`
    umsgpack_pack_int16, pack_int16, i16
);
export_pack!(
    /// `uint 32`
    #[cfg(feature = "int32")]
    umsgpack_pack_uint32, pack_uint32, u32
);
export_pack!(
    /// `int 32`
    #[cfg(feature = "int32")]
    umsgpack_pack_int32, pack_int32, i32
);
export_pack!(
    /// `uint 64`
    #[cfg(feature = "int64")]
    umsgpack_pack_uint64, pack_uint64, u64
);
export_pack!(
    /// `int 64`
    #[cfg(feature = "int64")]
    umsgpack_pack_int64, pack_int64, i64
);
export_pack!(
    /// Single precision float
    umsgpack_pack_float, pack_float, f32
);
export_pack!(
    /// Double precision float
    #[cfg(feature = "f64")]
    umsgpack_pack_double, pack_double, f64
);

/// nil
///
/// # Safety
/// `buf` must be null or initialised by `umsgpack_packer_init` or
/// `umsgpack_alloc`.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_pack_nil(buf: *mut PackerBuf) -> c_int {
    // SAFETY: forwarded from the caller.
    unsafe { with_packer(buf, |packer| packer.pack_nil()) }
}

/// Boolean; any non-zero `value` is true
///
/// # Safety
/// `buf` must be null or initialised by `umsgpack_packer_init` or
/// `umsgpack_alloc`.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_pack_bool(buf: *mut PackerBuf, value: c_int) -> c_int {
    // SAFETY: forwarded from the caller.
    unsafe { with_packer(buf, |packer| packer.pack_bool(value != 0)) }
}

/// String of exactly `len` bytes at `data`; NUL bytes are not special
///
/// # Safety
/// `buf` as for the other pack calls. `data` must be valid for `len` bytes
/// of reads, or may be null when `len` is 0.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_pack_str(
    buf: *mut PackerBuf,
    data: *const c_char,
    len: u32,
) -> c_int {
    let bytes: &[u8] = if len == 0 {
        &[]
    } else if data.is_null() {
        return UMSGPACK_ERR_INVALID_LENGTH;
    } else {
        // SAFETY: caller guarantees `data` is valid for `len` bytes.
        unsafe { slice::from_raw_parts(data.cast::<u8>(), len as usize) }
    };
    // SAFETY: forwarded from the caller.
    unsafe { with_packer(buf, |packer| packer.pack_str(bytes)) }
}

/// Array header; a negative `count` is rejected
///
/// # Safety
/// `buf` must be null or initialised by `umsgpack_packer_init` or
/// `umsgpack_alloc`.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_pack_array(buf: *mut PackerBuf, count: c_int) -> c_int {
    let Ok(count) = usize::try_from(count) else {
        return UMSGPACK_ERR_INVALID_LENGTH;
    };
    // SAFETY: forwarded from the caller.
    unsafe { with_packer(buf, |packer| packer.pack_array(count)) }
}

/// Map header for `count` key/value pairs
///
/// # Safety
/// `buf` must be null or initialised by `umsgpack_packer_init` or
/// `umsgpack_alloc`.
#[no_mangle]
pub unsafe extern "C" fn umsgpack_pack_map(buf: *mut PackerBuf, count: u32) -> c_int {
    // SAFETY: forwarded from the caller.
    unsafe { with_packer(buf, |packer| packer.pack_map(count as usize)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(storage: &mut [u8]) -> PackerBuf {
        let mut buf = PackerBuf::empty();
        unsafe { umsgpack_packer_init(&mut buf, storage.as_mut_ptr(), storage.len()) };
        buf
    }

    #[test]
    fn test_record_through_c_calls() {
        let mut storage = [0u8; 64];
        let mut buf = attached(&mut storage);

        unsafe {
            assert_eq!(umsgpack_pack_map(&mut buf, 2), 1);
            assert_eq!(umsgpack_pack_str(&mut buf, b"id".as_ptr().cast(), 2), 3);
            assert_eq!(umsgpack_pack_uint(&mut buf, 42), 1);
            assert_eq!(umsgpack_pack_str(&mut buf, b"ok".as_ptr().cast(), 2), 3);
            assert_eq!(umsgpack_pack_bool(&mut buf, 1), 1);
            assert_eq!(umsgpack_get_length(&buf), 9);
        }
        assert_eq!(
            &storage[..9],
            &[0x82, 0xa2, b'i', b'd', 0x2a, 0xa2, b'o', b'k', 0xc3]
        );
    }

    #[test]
    fn test_scalars_through_c_calls() {
        let mut storage = [0u8; 32];
        let mut buf = attached(&mut storage);

        unsafe {
            assert_eq!(umsgpack_pack_nil(&mut buf), 1);
            assert_eq!(umsgpack_pack_bool(&mut buf, 0), 1);
            assert_eq!(umsgpack_pack_int(&mut buf, -33), 2);
            assert_eq!(umsgpack_pack_uint16(&mut buf, 5), 3);
            assert_eq!(umsgpack_pack_int16(&mut buf, -5), 3);
            assert_eq!(umsgpack_pack_float(&mut buf, -0.5), 5);
            assert_eq!(umsgpack_pack_array(&mut buf, 16), 3);
            assert_eq!(umsgpack_get_length(&buf), 18);
        }
        assert_eq!(
            &storage[..18],
            &[
                0xc0, 0xc2, 0xd0, 0xdf, 0xcd, 0x00, 0x05, 0xd1, 0xff, 0xfb, 0xca, 0xbf, 0x00,
                0x00, 0x00, 0xdc, 0x00, 0x10
            ]
        );
    }

    #[cfg(all(feature = "int64", feature = "f64"))]
    #[test]
    fn test_wide_widths_through_c_calls() {
        let mut storage = [0u8; 40];
        let mut buf = attached(&mut storage);

        unsafe {
            assert_eq!(umsgpack_pack_uint32(&mut buf, 1), 5);
            assert_eq!(umsgpack_pack_int32(&mut buf, -1), 5);
            assert_eq!(umsgpack_pack_uint64(&mut buf, 1), 9);
            assert_eq!(umsgpack_pack_int64(&mut buf, -1), 9);
            assert_eq!(umsgpack_pack_double(&mut buf, 1.0), 9);
            assert_eq!(umsgpack_get_length(&buf), 37);
        }
        assert_eq!(storage[0], 0xce);
        assert_eq!(storage[19], 0xd3);
        assert_eq!(&storage[28..30], &[0xcb, 0x3f]);
    }

    #[test]
    fn test_short_buffer_status() {
        let mut storage = [0xAAu8; 3];
        let mut buf = attached(&mut storage);

        unsafe {
            assert_eq!(umsgpack_pack_uint(&mut buf, 300), 3);
            assert_eq!(umsgpack_pack_nil(&mut buf), UMSGPACK_ERR_SHORT_BUFFER);
            assert_eq!(
                umsgpack_pack_str(&mut buf, b"x".as_ptr().cast(), 1),
                UMSGPACK_ERR_SHORT_BUFFER
            );
            assert_eq!(umsgpack_get_length(&buf), 3);
        }
        assert_eq!(storage, [0xcd, 0x01, 0x2c]);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut storage = [0u8; 8];
        let mut buf = attached(&mut storage);

        unsafe {
            assert_eq!(umsgpack_pack_array(&mut buf, -1), UMSGPACK_ERR_INVALID_LENGTH);
            assert_eq!(
                umsgpack_pack_str(&mut buf, ptr::null(), 4),
                UMSGPACK_ERR_INVALID_LENGTH
            );
            assert_eq!(umsgpack_pack_str(&mut buf, ptr::null(), 0), 1);
            assert_eq!(umsgpack_pack_nil(ptr::null_mut()), UMSGPACK_ERR_NULL);
            assert_eq!(umsgpack_get_length(ptr::null()), 0);
            assert_eq!(umsgpack_get_length(&buf), 1);
        }

        let mut detached = PackerBuf::empty();
        assert_eq!(unsafe { umsgpack_pack_nil(&mut detached) }, UMSGPACK_ERR_NULL);
    }

    #[test]
    fn test_init_rewinds() {
        let mut storage = [0u8; 4];
        let mut buf = attached(&mut storage);

        unsafe {
            umsgpack_pack_uint16(&mut buf, 0x0102);
            umsgpack_packer_init(&mut buf, storage.as_mut_ptr(), 2);
            assert_eq!(umsgpack_get_length(&buf), 0);
            assert_eq!(umsgpack_pack_uint16(&mut buf, 1), UMSGPACK_ERR_SHORT_BUFFER);
            assert_eq!(umsgpack_pack_uint(&mut buf, 200), 2);
        }
        assert_eq!(storage, [0xcc, 200, 0x01, 0x02]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_alloc_and_free() {
        let buf = umsgpack_alloc(5);
        assert!(!buf.is_null());

        unsafe {
            assert_eq!(umsgpack_pack_float(buf, 2.0), 5);
            assert_eq!(umsgpack_pack_nil(buf), UMSGPACK_ERR_SHORT_BUFFER);
            assert_eq!(umsgpack_get_length(buf), 5);
            assert_eq!(umsgpack_free(buf), 0);
        }

        assert!(umsgpack_alloc(0).is_null());
        assert!(umsgpack_alloc(usize::MAX).is_null());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_free_rejects_caller_storage() {
        let mut storage = [0u8; 4];
        let mut buf = attached(&mut storage);

        assert_eq!(unsafe { umsgpack_free(&mut buf) }, UMSGPACK_ERR_NULL);
        assert_eq!(unsafe { umsgpack_free(ptr::null_mut()) }, UMSGPACK_ERR_NULL);
        assert_eq!(unsafe { umsgpack_pack_nil(&mut buf) }, 1);
    }

    #[test]
    fn test_status_codes_distinct() {
        let codes = [
            status(Error::ShortBuffer),
            status(Error::LengthOverflow),
            status(Error::InvalidLength),
            status(Error::AllocFailed),
            UMSGPACK_ERR_NULL,
        ];
        for (i, code) in codes.iter().enumerate() {
            assert!(*code < 0);
            assert!(!codes[i + 1..].contains(code));
        }
    }
}
