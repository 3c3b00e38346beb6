//! Read-side cursor over a borrowed byte range.
//!
//! A [`ReadCursor`] never owns memory: the caller keeps the underlying bytes
//! alive and unmodified for the cursor's lifetime. Raw reads are non-failing
//! and report by returned count; the typed reads convert a short read into a
//! hard [`Error::EndOfData`].

use std::io::SeekFrom;

use tracing::trace;

use crate::{
    error::Error,
    order::ByteOrder,
    scalar::{Scalar, MAX_WIDTH},
};

/// Cursor over `[0, data.len())` with a read head and end-of-data flag.
#[derive(Debug)]
pub struct ReadCursor<'a> {
    data: &'a [u8],
    head: usize,
    at_end: bool,
}

impl<'a> ReadCursor<'a> {
    /// Wraps a borrowed byte range, head at the start.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            head: 0,
            at_end: false,
        }
    }

    /// Current head position.
    pub fn position(&self) -> usize {
        self.head
    }

    /// Total length of the wrapped range.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the wrapped range is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the head and the end of the range.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.head
    }

    /// Whether a read has run off the end of the range.
    pub fn at_end(&self) -> bool {
        self.at_end
    }

    /// A cursor is usable while it wraps bytes and has not run off their end.
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty() && !self.at_end
    }

    /// Copies up to `dest.len()` bytes into `dest`, advancing the head.
    ///
    /// The request is clamped to the bytes remaining and the end-of-data flag
    /// is set when it could not be fully satisfied. Set `reverse` to receive
    /// the span in reverse byte order (how a non-native field order is
    /// materialized). Returns the number of bytes copied.
    pub fn read_raw(&mut self, dest: &mut [u8], reverse: bool) -> usize {
        if self.at_end {
            trace!("read past end of data");
            return 0;
        }
        let want = dest.len();
        let take = want.min(self.remaining());
        if take == 0 {
            if self.head >= self.data.len() {
                self.at_end = true;
            }
            return 0;
        }
        let span = &self.data[self.head..self.head + take];
        if reverse {
            for (d, s) in dest[..take].iter_mut().zip(span.iter().rev()) {
                *d = *s;
            }
        } else {
            dest[..take].copy_from_slice(span);
        }
        self.head += take;
        if take < want {
            self.at_end = true;
        }
        take
    }

    /// Moves the head, clamping it into the wrapped range, and recomputes the
    /// end-of-data flag: seeking back into range clears it. Returns the new
    /// head position.
    pub fn seek(&mut self, pos: SeekFrom) -> usize {
        let len = self.data.len() as i128;
        let target = match pos {
            SeekFrom::Start(n) => n as i128,
            SeekFrom::Current(n) => self.head as i128 + n as i128,
            SeekFrom::End(n) => len + n as i128,
        };
        self.head = target.clamp(0, len) as usize;
        self.at_end = self.head >= self.data.len();
        self.head
    }

    /// Reads one scalar honoring `order`, failing hard on a short read.
    pub fn read_value<T: Scalar>(&mut self, order: ByteOrder) -> Result<T, Error> {
        if !self.is_valid() {
            return Err(Error::EndOfData);
        }
        let mut raw = [0u8; MAX_WIDTH];
        if self.read_raw(&mut raw[..T::WIDTH], order.swaps()) < T::WIDTH {
            return Err(Error::EndOfData);
        }
        Ok(T::get(&raw[..T::WIDTH]))
    }

    /// Reads a null-terminated string.
    ///
    /// Scans forward to the first zero byte, `max` bytes, or the end of the
    /// range, whichever comes first, and returns the scanned span as a
    /// string. The head skips the terminator when one was found.
    pub fn read_string_varying(
        &mut self,
        max: Option<usize>,
        order: ByteOrder,
    ) -> Result<String, Error> {
        if !self.is_valid() {
            return Err(Error::EndOfData);
        }
        let start = self.head;
        let limit = match max {
            Some(max) => start.saturating_add(max).min(self.data.len()),
            None => self.data.len(),
        };
        let mut stop = start;
        while stop < limit && self.data[stop] != 0 {
            stop += 1;
        }
        let terminated = stop < limit;
        let mut content = self.data[start..stop].to_vec();
        if order.reverses_strings() {
            content.reverse();
        }
        let value = String::from_utf8(content).map_err(|_| Error::InvalidString)?;
        self.head = if terminated { stop + 1 } else { stop };
        Ok(value)
    }

    /// Reads a fixed block of `block` bytes with no terminator scan.
    ///
    /// The string value is the block's content up to its zero padding; a
    /// block with no zero byte is all content.
    pub fn read_string_fixed(&mut self, block: usize, order: ByteOrder) -> Result<String, Error> {
        if !self.is_valid() {
            return Err(Error::EndOfData);
        }
        let mut raw = vec![0u8; block];
        if self.read_raw(&mut raw, false) < block {
            return Err(Error::EndOfData);
        }
        let content_len = raw.iter().position(|b| *b == 0).unwrap_or(block);
        raw.truncate(content_len);
        if order.reverses_strings() {
            raw.reverse();
        }
        String::from_utf8(raw).map_err(|_| Error::InvalidString)
    }
}

impl<'a> From<&'a [u8]> for ReadCursor<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}
