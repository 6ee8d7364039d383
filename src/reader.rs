#[cfg(feature = "bstr")]
use bstr::{BString, ByteSlice};
use zerocopy::{FromBytes, FromZeros, IntoBytes};

use crate::endian::{self, Endianness, WireInt};

/// Binary read cursor over a caller-supplied read-only byte buffer.
///
/// Truncated or corrupted input is a normal runtime condition on the read
/// side, so running out of bytes is recoverable: the first read that would
/// pass the end of the buffer sets a sticky failure flag, and every read
/// after that returns a zero/default/empty value without advancing the
/// cursor. This lets a caller issue a whole sequence of reads mirroring the
/// writer's order and check [`failed`](Self::failed) exactly once at the end,
/// instead of wrapping every field in a conditional. No read ever touches
/// memory past the end of the buffer, flag or not.
///
/// The flag stays set until [`reset`](Self::reset),
/// [`rewind_to_start`](Self::rewind_to_start), a successful
/// [`rewind`](Self::rewind), or an explicit
/// [`clear_failed`](Self::clear_failed).
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    order: Endianness,
    failed: bool,
}

impl<'a> BinaryReader<'a> {
    /// Creates a reader over `data` using network byte order (big-endian)
    /// for unsuffixed integer reads.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_order(data, Endianness::Big)
    }

    /// Creates a reader over `data` with an explicit stream-wide byte order.
    pub fn with_order(data: &'a [u8], order: Endianness) -> Self {
        Self {
            data,
            pos: 0,
            order,
            failed: false,
        }
    }

    /// Rebinds the stream to a new buffer, resetting the cursor to the
    /// beginning and clearing the failure flag.
    pub fn reset(&mut self, data: &'a [u8]) {
        self.data = data;
        self.pos = 0;
        self.failed = false;
    }

    /// Changes the stream-wide byte order used by the unsuffixed integer
    /// reads.
    pub fn set_order(&mut self, order: Endianness) {
        self.order = order;
    }

    //-- atomic elements ---------------------------------------------------

    /// Reads a single byte, or `0` if insufficient data.
    pub fn get_u8(&mut self) -> u8 {
        if self.check_read(1) {
            let b = self.data[self.pos];
            self.pos += 1;
            b
        } else {
            0
        }
    }

    /// Reads a single signed byte, or `0` if insufficient data.
    pub fn get_i8(&mut self) -> i8 {
        self.get_u8() as i8
    }

    /// Reads the bytes of a value as they are in memory, without any byte
    /// order conversion. Returns the zero-valued `T` if insufficient data.
    pub fn read_raw<T: FromBytes>(&mut self) -> T {
        let size = core::mem::size_of::<T>();
        if self.check_read(size) {
            match T::read_from_bytes(&self.data[self.pos..self.pos + size]) {
                Ok(value) => {
                    self.pos += size;
                    value
                }
                Err(_) => T::new_zeroed(),
            }
        } else {
            T::new_zeroed()
        }
    }

    /// Reads the bytes of a value as they are in memory into a caller-placed
    /// destination. Returns whether the read succeeded; on failure the
    /// destination is left untouched.
    pub fn read_raw_into<T: FromBytes + IntoBytes>(&mut self, value: &mut T) -> bool {
        let size = core::mem::size_of::<T>();
        if self.check_read(size) {
            value
                .as_mut_bytes()
                .copy_from_slice(&self.data[self.pos..self.pos + size]);
            self.pos += size;
        }
        !self.failed
    }

    //-- integers ----------------------------------------------------------

    /// Reads an integer in the stream-wide byte order, or `0` if
    /// insufficient data.
    pub fn read_int<T: WireInt>(&mut self) -> T {
        self.read_int_ordered(self.order)
    }

    /// Reads a little-endian integer, or `0` if insufficient data.
    pub fn read_int_le<T: WireInt>(&mut self) -> T {
        self.read_int_ordered(Endianness::Little)
    }

    /// Reads a big-endian integer, or `0` if insufficient data.
    pub fn read_int_be<T: WireInt>(&mut self) -> T {
        self.read_int_ordered(Endianness::Big)
    }

    /// Reads an integer in the stream-wide byte order, or `None` if
    /// insufficient data. Use this when a legitimately read zero must be
    /// distinguishable from a failed read.
    pub fn try_read_int<T: WireInt>(&mut self) -> Option<T> {
        self.try_read_int_ordered(self.order)
    }

    /// Reads a little-endian integer, or `None` if insufficient data.
    pub fn try_read_int_le<T: WireInt>(&mut self) -> Option<T> {
        self.try_read_int_ordered(Endianness::Little)
    }

    /// Reads a big-endian integer, or `None` if insufficient data.
    pub fn try_read_int_be<T: WireInt>(&mut self) -> Option<T> {
        self.try_read_int_ordered(Endianness::Big)
    }

    fn read_int_ordered<T: WireInt>(&mut self, order: Endianness) -> T {
        self.try_read_int_ordered(order).unwrap_or_default()
    }

    fn try_read_int_ordered<T: WireInt>(&mut self, order: Endianness) -> Option<T> {
        if self.check_read(T::WIRE_SIZE) {
            let value = endian::get(&self.data[self.pos..], order);
            self.pos += T::WIRE_SIZE;
            Some(value)
        } else {
            None
        }
    }

    //-- byte ranges and strings -------------------------------------------

    /// Fills a pre-sized destination with the next `dest.len()` bytes.
    /// Returns whether the read succeeded; on failure the destination is
    /// left untouched rather than partially filled.
    pub fn read_bytes(&mut self, dest: &mut [u8]) -> bool {
        let len = dest.len();
        if self.check_read(len) {
            dest.copy_from_slice(&self.data[self.pos..self.pos + len]);
            self.pos += len;
        }
        !self.failed
    }

    /// Borrows the next `len` bytes directly out of the buffer without
    /// copying, or an empty slice if insufficient data.
    pub fn read_slice(&mut self, len: usize) -> &'a [u8] {
        if self.check_read(len) {
            let bytes = &self.data[self.pos..self.pos + len];
            self.pos += len;
            bytes
        } else {
            &[]
        }
    }

    /// Reads `len` bytes into a resizable destination, growing it to fit.
    /// Returns whether the read succeeded; on failure the destination is
    /// left untouched.
    #[cfg(feature = "std")]
    pub fn read_vec(&mut self, dest: &mut Vec<u8>, len: usize) -> bool {
        if self.check_read(len) {
            dest.clear();
            dest.extend_from_slice(&self.data[self.pos..self.pos + len]);
            self.pos += len;
        }
        !self.failed
    }

    /// Reads everything from the cursor to the end of the buffer into a
    /// resizable destination, growing it to fit.
    #[cfg(feature = "std")]
    pub fn read_remaining(&mut self, dest: &mut Vec<u8>) -> bool {
        if !self.failed {
            dest.clear();
            dest.extend_from_slice(&self.data[self.pos..]);
            self.pos = self.data.len();
        }
        !self.failed
    }

    /// Reads a byte string of exactly `len` bytes, or an empty string if
    /// insufficient data.
    #[cfg(feature = "bstr")]
    pub fn read_string(&mut self, len: usize) -> BString {
        if self.check_read(len) {
            let s = BString::from(&self.data[self.pos..self.pos + len]);
            self.pos += len;
            s
        } else {
            BString::default()
        }
    }

    /// Reads a zero-terminated byte string: scans forward for a zero byte,
    /// returns everything before it and consumes the terminator.
    ///
    /// The scan never passes the end of the buffer. If no terminator exists
    /// before the end, the failure flag is set, the cursor stays where it
    /// was, and an empty string is returned.
    #[cfg(feature = "bstr")]
    pub fn read_string0(&mut self) -> BString {
        if self.failed {
            return BString::default();
        }
        match self.data[self.pos..].find_byte(0) {
            Some(len) => {
                let s = BString::from(&self.data[self.pos..self.pos + len]);
                self.pos += len + 1;
                s
            }
            None => {
                self.failed = true;
                BString::default()
            }
        }
    }

    //-- position ----------------------------------------------------------

    /// Advances the cursor over `count` bytes without exposing them, subject
    /// to the same bounds check as any read.
    pub fn skip(&mut self, count: usize) -> bool {
        if self.check_read(count) {
            self.pos += count;
        }
        !self.failed
    }

    /// Moves the cursor backward by `count` bytes. Fails without moving if
    /// that would pass the beginning of the buffer; a successful rewind
    /// clears the failure flag.
    pub fn rewind(&mut self, count: usize) -> bool {
        self.failed = count > self.pos;
        if !self.failed {
            self.pos -= count;
        }
        !self.failed
    }

    /// Moves the cursor back to the beginning of the buffer and clears the
    /// failure flag, unconditionally.
    pub fn rewind_to_start(&mut self) {
        self.pos = 0;
        self.failed = false;
    }

    /// How many bytes have been read so far.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// How many bytes are left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor has reached the end of the buffer.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    //-- error handling ----------------------------------------------------

    /// Whether any read so far has run out of data.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Forces the stream into the failed state, e.g. after the caller
    /// detects a semantic validation error unrelated to bounds.
    pub fn set_failed(&mut self) {
        self.failed = true;
    }

    /// Clears the failure flag without moving the cursor.
    pub fn clear_failed(&mut self) {
        self.failed = false;
    }

    // Once failed, stays failed; a successful check reserves exactly the
    // requested bytes.
    fn check_read(&mut self, len: usize) -> bool {
        self.failed = self.failed || len > self.data.len() - self.pos;
        !self.failed
    }
}
