//! Growable, offset-based sequential buffer.
//!
//! A [`GrowableBuffer`] owns a contiguous backing store and tracks the valid
//! region as `offset..offset + count`. Elements are appended at the end and
//! removed from the front; removal only moves `offset`, so draining is O(1).
//!
//! Room for new elements is made by [`GrowableBuffer::reserve_for_write`],
//! which tries three things in order:
//!
//! 1. nothing, if the tail already has room;
//! 2. shifting the valid region down to offset 0, if the leading gap plus the
//!    tail has room and the buffer is not pinned;
//! 3. reallocating to `max(capacity * 2, count + n)`.
//!
//! Pinning exists for callers that keep a raw address obtained from
//! [`GrowableBuffer::as_ptr`] across calls (FFI, in-flight I/O). While
//! pinned, step 2 is skipped so live data is never shifted in place; a
//! reallocation abandons the old storage instead, and clears the pin since
//! the new storage has never been exposed.
//!
//! # Examples
//!
//! ```rust
//! use bufcodec::GrowableBuffer;
//!
//! let mut buf = GrowableBuffer::with_capacity(4);
//! buf.append_slice(&[1, 2, 3]).unwrap();
//! buf.append_slice(&[4, 5, 6]).unwrap();
//! assert_eq!(buf.len(), 6);
//! assert_eq!(buf.remove_front().unwrap(), 1);
//! assert_eq!(buf.as_slice(), &[2, 3, 4, 5, 6]);
//! ```

use alloc::{boxed::Box, vec, vec::Vec};
use core::{
    fmt,
    ops::{Index, IndexMut},
};

use bstr::BStr;
use log::trace;

use crate::{
    error::{Error, Result},
    mem,
};

/// Capacity used when `0` (or nothing) is requested.
pub const DEFAULT_CAPACITY: usize = 32;

/// A resizable buffer with an explicit offset and length over owned storage.
#[derive(Clone)]
pub struct GrowableBuffer<T> {
    storage: Box<[T]>,
    offset: usize,
    count: usize,
    pinned: bool,
}

/// Byte specialization used by the base64 codec.
pub type ByteBuffer = GrowableBuffer<u8>;

#[inline]
const fn max_capacity<T>() -> usize {
    let size = core::mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

fn allocate<T: Copy + Default>(capacity: usize) -> Box<[T]> {
    vec![T::default(); capacity].into_boxed_slice()
}

impl<T: Copy + Default> GrowableBuffer<T> {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer holding `capacity` elements; `0` selects
    /// [`DEFAULT_CAPACITY`].
    ///
    /// # Panics
    ///
    /// Panics if the allocation size exceeds `isize::MAX` bytes, like
    /// `Vec::with_capacity`. Use [`Self::try_with_capacity`] to get an error
    /// instead.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self {
            storage: allocate(capacity),
            offset: 0,
            count: 0,
            pinned: false,
        }
    }

    /// Fallible form of [`Self::with_capacity`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `capacity` elements cannot be allocated
    /// as one block.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity > max_capacity::<T>() {
            return Err(Error::InvalidArgument {
                name: "capacity",
                reason: "exceeds the maximum allocation size",
            });
        }
        Ok(Self::with_capacity(capacity))
    }

    /// Makes room for `n` more elements after the valid region and returns
    /// that region for writing.
    ///
    /// The returned slice starts at [`Self::end`]. Nothing written to it
    /// becomes part of the buffer until [`Self::commit_write`] is called, so
    /// a producer can write directly into the buffer and then commit only
    /// what it actually produced.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `count + n` exceeds the maximum
    /// allocation size.
    pub fn reserve_for_write(&mut self, n: usize) -> Result<&mut [T]> {
        let space = self.space_at_end();
        if n > space {
            if !self.pinned && n <= space + self.offset {
                self.shift_to_front();
            } else {
                let needed = self
                    .count
                    .checked_add(n)
                    .filter(|needed| *needed <= max_capacity::<T>())
                    .ok_or_else(|| Error::overflow("n"))?;
                let doubled = self.capacity().saturating_mul(2).min(max_capacity::<T>());
                self.reallocate(doubled.max(needed));
            }
        }
        let end = self.end();
        Ok(&mut self.storage[end..end + n])
    }

    /// Marks `n` elements written through [`Self::reserve_for_write`] as
    /// valid.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `end + n` exceeds the capacity.
    pub fn commit_write(&mut self, n: usize) -> Result<()> {
        let end = self.end();
        let new_end = end.checked_add(n).ok_or_else(|| Error::overflow("n"))?;
        if new_end > self.capacity() {
            return Err(Error::out_of_range("n", new_end, self.capacity()));
        }
        self.count += n;
        Ok(())
    }

    /// Appends one element.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer cannot grow; see [`Self::reserve_for_write`].
    pub fn append(&mut self, item: T) -> Result<()> {
        self.reserve_for_write(1)?[0] = item;
        self.count += 1;
        Ok(())
    }

    /// Appends `items[start..start + len]`.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if the range is not inside `items`.
    /// - [`Error::InvalidArgument`] if `start + len` overflows.
    pub fn append_range(&mut self, items: &[T], start: usize, len: usize) -> Result<()> {
        let range = mem::checked_range("start", start, len, items.len())?;
        self.append_slice(&items[range])
    }

    /// Appends every element of `items`.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer cannot grow; see [`Self::reserve_for_write`].
    pub fn append_slice(&mut self, items: &[T]) -> Result<()> {
        self.reserve_for_write(items.len())?
            .copy_from_slice(items);
        self.count += items.len();
        Ok(())
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the buffer is empty.
    pub fn remove_front(&mut self) -> Result<T> {
        if self.count == 0 {
            return Err(Error::InvalidState("cannot remove from an empty buffer"));
        }
        let item = self.storage[self.offset];
        self.consume(1);
        Ok(item)
    }

    /// Copies the first `n` elements into `dest[dest_index..]` and removes
    /// them.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `n` exceeds [`Self::len`] or the destination
    /// range does not fit in `dest`. Nothing is copied or removed on error.
    pub fn remove_front_into(&mut self, n: usize, dest: &mut [T], dest_index: usize) -> Result<()> {
        if n > self.count {
            return Err(Error::out_of_range("n", n, self.count));
        }
        mem::copy(&self.storage[..], self.offset, dest, dest_index, n)?;
        self.consume(n);
        Ok(())
    }

    /// Removes the first `n` elements without copying them anywhere.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `n` exceeds [`Self::len`].
    pub fn discard_front(&mut self, n: usize) -> Result<()> {
        if n > self.count {
            return Err(Error::out_of_range("n", n, self.count));
        }
        self.consume(n);
        Ok(())
    }

    /// Moves the valid region to the start of storage, unless pinned.
    pub fn compact_to_front(&mut self) {
        if !self.pinned && self.offset != 0 {
            self.shift_to_front();
        }
    }

    /// Resizes the backing store to exactly `capacity` elements; `0` selects
    /// [`DEFAULT_CAPACITY`]. The valid region moves to offset 0 and the pin
    /// is cleared whenever storage is replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] naming `count` if [`Self::len`] exceeds
    ///   `capacity`.
    /// - [`Error::InvalidArgument`] if `capacity` exceeds the maximum
    ///   allocation size.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.count {
            return Err(Error::out_of_range("count", self.count, capacity));
        }
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        if capacity > max_capacity::<T>() {
            return Err(Error::InvalidArgument {
                name: "capacity",
                reason: "exceeds the maximum allocation size",
            });
        }
        if capacity != self.capacity() {
            self.reallocate(capacity);
        }
        Ok(())
    }

    /// Returns a mutable reference to the element at logical index `index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.count {
            return Err(Error::out_of_range("index", index, self.count));
        }
        Ok(&mut self.storage[self.offset + index])
    }

    /// Copies the valid region into a new `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    fn consume(&mut self, n: usize) {
        self.offset += n;
        self.count -= n;
        if self.count == 0 {
            self.offset = 0;
        }
    }

    fn shift_to_front(&mut self) {
        trace!(
            "compacting buffer: moving {} elements from offset {}",
            self.count,
            self.offset
        );
        let end = self.end();
        self.storage.copy_within(self.offset..end, 0);
        self.offset = 0;
    }

    fn reallocate(&mut self, capacity: usize) {
        trace!(
            "reallocating buffer: capacity {} -> {}, {} live elements{}",
            self.capacity(),
            capacity,
            self.count,
            if self.pinned { ", releasing pin" } else { "" }
        );
        let mut storage = allocate(capacity);
        storage[..self.count].copy_from_slice(self.as_slice());
        self.storage = storage;
        self.offset = 0;
        self.pinned = false;
    }
}

impl<T> GrowableBuffer<T> {
    /// Number of valid elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if there are no valid elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Size of the backing store.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Storage index of the first valid element.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Storage index one past the last valid element; the next write
    /// position.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.count
    }

    /// Free elements after [`Self::end`].
    #[inline]
    #[must_use]
    pub fn space_at_end(&self) -> usize {
        self.storage.len() - self.end()
    }

    /// Whether in-place compaction is currently disabled.
    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Enables or disables in-place compaction. The pin is released
    /// automatically by the next reallocation.
    #[inline]
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// The valid region.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.storage[self.offset..self.offset + self.count]
    }

    /// The valid region, mutably.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let end = self.end();
        &mut self.storage[self.offset..end]
    }

    /// Address of the first valid element (or of the write position when
    /// empty).
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    /// Returns a reference to the element at logical index `index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| Error::out_of_range("index", index, self.count))
    }

    /// Iterates over the valid region.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Drops all elements and resets the offset. Capacity is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.offset = 0;
        self.count = 0;
    }
}

impl ByteBuffer {
    /// Views the valid bytes as a byte string, for display and debugging.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_slice())
    }
}

impl<T: Copy + Default> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> From<Vec<T>> for GrowableBuffer<T> {
    /// Adopts the vector's elements as the valid region; an empty vector
    /// yields an empty buffer with [`DEFAULT_CAPACITY`].
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            return Self::new();
        }
        let count = items.len();
        Self {
            storage: items.into_boxed_slice(),
            offset: 0,
            count,
            pinned: false,
        }
    }
}

impl<T> Index<usize> for GrowableBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for GrowableBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for GrowableBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableBuffer<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowableBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("items", &self.as_slice())
            .field("offset", &self.offset)
            .field("capacity", &self.capacity())
            .field("pinned", &self.pinned)
            .finish()
    }
}

#[cfg(feature = "std")]
impl std::io::Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.append_slice(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::io::Read for ByteBuffer {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.len());
        self.remove_front_into(n, buf, 0)?;
        Ok(n)
    }
}
