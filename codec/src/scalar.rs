//! Primitive element types a layout can move through the cursors.
//!
//! Conversion always goes through the host's native byte representation; the
//! cursors apply whatever reversal the field's configured [`ByteOrder`]
//! requires. This keeps the per-type code a plain memcpy in both directions.
//!
//! [`ByteOrder`]: crate::order::ByteOrder

use crate::error::Error;

/// Widest scalar the cursors move (`u128`/`i128`).
pub const MAX_WIDTH: usize = 16;

/// A numeric primitive with a fixed encoded width.
pub trait Scalar: Copy + Default + Send + Sync + 'static {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Writes the native-order bytes of `self` into `dest`.
    ///
    /// `dest` must hold at least [`Self::WIDTH`] bytes.
    fn put(&self, dest: &mut [u8]);

    /// Reads a value back from native-order bytes.
    ///
    /// `src` must hold at least [`Self::WIDTH`] bytes.
    fn get(src: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($type:ty) => {
        impl Scalar for $type {
            const WIDTH: usize = std::mem::size_of::<$type>();

            #[inline]
            fn put(&self, dest: &mut [u8]) {
                dest[..Self::WIDTH].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn get(src: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$type>()];
                raw.copy_from_slice(&src[..Self::WIDTH]);
                Self::from_ne_bytes(raw)
            }
        }
    };
}

impl_scalar!(u8);
impl_scalar!(u16);
impl_scalar!(u32);
impl_scalar!(u64);
impl_scalar!(u128);
impl_scalar!(i8);
impl_scalar!(i16);
impl_scalar!(i32);
impl_scalar!(i64);
impl_scalar!(i128);
impl_scalar!(f32);
impl_scalar!(f64);

// Bool is a single byte on the wire; any nonzero byte reads back as true.
impl Scalar for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn put(&self, dest: &mut [u8]) {
        dest[0] = *self as u8;
    }

    #[inline]
    fn get(src: &[u8]) -> Self {
        src[0] != 0
    }
}

/// Integral field types usable as the count for a sibling-sized list.
///
/// The count is read from an already-decoded field of the same record, so the
/// conversion to an element count is checked: negative or oversized values
/// fail instead of wrapping.
pub trait Count: Scalar {
    /// Converts the stored count into an element count.
    fn to_len(&self) -> Result<usize, Error>;
}

macro_rules! impl_count {
    ($type:ty) => {
        impl Count for $type {
            #[inline]
            fn to_len(&self) -> Result<usize, Error> {
                usize::try_from(*self).map_err(|_| Error::InvalidCount(*self as i128))
            }
        }
    };
}

impl_count!(u8);
impl_count!(u16);
impl_count!(u32);
impl_count!(u64);
impl_count!(i8);
impl_count!(i16);
impl_count!(i32);
impl_count!(i64);
