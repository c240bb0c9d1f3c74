//! Network byte order conversion for multi-byte payloads
//!
//! Every payload the packer writes goes through [`BigEndian`]. On
//! little-endian hosts the conversion swaps (lowered to `rev`/`bswap` where
//! the target has one); on big-endian hosts it is a plain copy.

/// A fixed-width payload that can be laid out in big-endian order
pub trait BigEndian: Copy {
    /// Payload width in bytes
    const WIDTH: usize;

    /// Byte array holding exactly `WIDTH` bytes
    type Bytes: AsRef<[u8]>;

    /// Convert to network (big-endian) byte order
    fn to_big_endian(self) -> Self::Bytes;
}

macro_rules! impl_big_endian {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BigEndian for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                type Bytes = [u8; core::mem::size_of::<$ty>()];

                #[inline]
                fn to_big_endian(self) -> Self::Bytes {
                    self.to_be_bytes()
                }
            }
        )*
    };
}

impl_big_endian!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
