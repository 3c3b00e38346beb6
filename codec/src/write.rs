//! Write-side cursor over an owned, growable buffer.
//!
//! The cursor owns its allocation and grows it on demand: overflowing writes
//! reserve `2 * (position + request) + 1` bytes so repeated appends stay
//! amortized, while [`WriteCursor::reserve`] itself is exact. The head can be
//! rewound with [`WriteCursor::skip_back_to`] for patch-style re-writes;
//! bytes beyond the head remain until overwritten.

use bytes::Bytes;
use tracing::debug;

use crate::{
    order::ByteOrder,
    scalar::{Scalar, MAX_WIDTH},
};

/// Growable byte buffer with a write head.
#[derive(Debug, Default)]
pub struct WriteCursor {
    buf: Vec<u8>,
    head: usize,
}

impl WriteCursor {
    /// An empty cursor with no allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cursor with `cap` bytes pre-allocated.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            head: 0,
        }
    }

    /// Current head position.
    pub fn position(&self) -> usize {
        self.head
    }

    /// Total bytes written so far (the high-water mark, which the head may
    /// sit behind after a rewind).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current allocation size.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// All bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the cursor, handing its buffer off without copying.
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.buf)
    }

    /// Grows the allocation to hold at least `target` bytes.
    ///
    /// Growth is exact; callers wanting amortized growth pre-multiply the
    /// target. Growing invalidates previously obtained slices.
    pub fn reserve(&mut self, target: usize) {
        if target > self.buf.capacity() {
            self.buf.reserve_exact(target - self.buf.len());
        }
    }

    fn grow_for(&mut self, extra: usize) {
        let needed = self.head + extra;
        if needed > self.buf.capacity() {
            self.reserve(2 * needed + 1);
        }
    }

    /// Writes `data` at the head, reversed when `reverse` is set, and
    /// advances the head. A zero-length request writes nothing. Returns the
    /// number of bytes written.
    pub fn write_raw(&mut self, data: &[u8], reverse: bool) -> usize {
        if data.is_empty() {
            debug!("zero-length write requested");
            return 0;
        }
        self.grow_for(data.len());
        let end = self.head + data.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        let dest = &mut self.buf[self.head..end];
        if reverse {
            for (d, s) in dest.iter_mut().zip(data.iter().rev()) {
                *d = *s;
            }
        } else {
            dest.copy_from_slice(data);
        }
        self.head = end;
        data.len()
    }

    /// Writes `count` copies of `value` at the head. Returns the number of
    /// bytes written.
    pub fn write_fill(&mut self, value: u8, count: usize) -> usize {
        if count == 0 {
            debug!("zero-length fill requested");
            return 0;
        }
        self.grow_for(count);
        let end = self.head + count;
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.head..end].fill(value);
        self.head = end;
        count
    }

    /// Writes one scalar honoring `order`.
    pub fn write_value<T: Scalar>(&mut self, value: T, order: ByteOrder) {
        let mut raw = [0u8; MAX_WIDTH];
        value.put(&mut raw[..T::WIDTH]);
        self.write_raw(&raw[..T::WIDTH], order.swaps());
    }

    /// Writes a string shaped by `block`.
    ///
    /// The varying form (`None`) appends the content then exactly one zero
    /// terminator. The fixed form appends `min(len, block)` content bytes and
    /// zero-fills the remainder; content longer than the block is truncated,
    /// never an error. Returns the number of bytes written.
    pub fn write_string(&mut self, value: &str, block: Option<usize>, order: ByteOrder) -> usize {
        let content = value.as_bytes();
        match block {
            None => {
                let mut written = 0;
                if !content.is_empty() {
                    written += self.write_raw(content, order.reverses_strings());
                }
                written + self.write_fill(0, 1)
            }
            Some(block) => {
                let take = content.len().min(block);
                if take < content.len() {
                    debug!(
                        len = content.len(),
                        block, "truncating string to fixed block"
                    );
                }
                let mut written = 0;
                if take > 0 {
                    written += self.write_raw(&content[..take], order.reverses_strings());
                }
                if block > take {
                    written += self.write_fill(0, block - take);
                }
                written
            }
        }
    }

    /// Rewinds the head to `pos` for a patch-style re-write. Refuses unless
    /// `pos` is strictly before the current head.
    pub fn skip_back_to(&mut self, pos: usize) -> bool {
        if pos >= self.head {
            return false;
        }
        self.head = pos;
        true
    }
}
