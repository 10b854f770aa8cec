//! Range-checked block copy and fill over slices.
//!
//! These are thin wrappers around `copy_from_slice`, `copy_within` and
//! `fill`, which lower to `memcpy`/`memmove`/`memset`. The wrappers exist so
//! that callers passing `(slice, index, len)` triples get a typed [`Error`]
//! instead of a panic, and so that no memory is touched unless the whole
//! request is in bounds.

use crate::error::{Error, Result};

/// Returns `index..index + len` if it lies inside a slice of `bound` elements.
#[inline]
pub(crate) fn checked_range(
    name: &'static str,
    index: usize,
    len: usize,
    bound: usize,
) -> Result<core::ops::Range<usize>> {
    let end = index.checked_add(len).ok_or_else(|| Error::overflow(name))?;
    if end > bound {
        return Err(Error::out_of_range(name, end, bound));
    }
    Ok(index..end)
}

/// Copies `len` elements from `src[src_index..]` into `dst[dst_index..]`.
///
/// # Errors
///
/// - [`Error::OutOfRange`] if either range runs past the end of its slice.
/// - [`Error::InvalidArgument`] if an index plus `len` overflows.
pub fn copy<T: Copy>(
    src: &[T],
    src_index: usize,
    dst: &mut [T],
    dst_index: usize,
    len: usize,
) -> Result<()> {
    let from = checked_range("src_index", src_index, len, src.len())?;
    let to = checked_range("dst_index", dst_index, len, dst.len())?;
    dst[to].copy_from_slice(&src[from]);
    Ok(())
}

/// Moves `len` elements inside `buf` from `src_index` to `dst_index`.
///
/// The ranges may overlap.
///
/// # Errors
///
/// Same conditions as [`copy`].
pub fn move_within<T: Copy>(
    buf: &mut [T],
    src_index: usize,
    dst_index: usize,
    len: usize,
) -> Result<()> {
    let from = checked_range("src_index", src_index, len, buf.len())?;
    checked_range("dst_index", dst_index, len, buf.len())?;
    if src_index != dst_index && len != 0 {
        buf.copy_within(from, dst_index);
    }
    Ok(())
}

/// Sets `len` elements of `dst`, starting at `index`, to `value`.
///
/// # Errors
///
/// Same conditions as [`copy`].
pub fn fill<T: Copy>(dst: &mut [T], index: usize, len: usize, value: T) -> Result<()> {
    let range = checked_range("index", index, len, dst.len())?;
    dst[range].fill(value);
    Ok(())
}
