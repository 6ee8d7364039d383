use zerocopy::{Immutable, IntoBytes};

use crate::endian::{self, Endianness, WireInt};

/// Binary write cursor over a caller-supplied mutable byte buffer.
///
/// The buffer is borrowed, never grown: the caller computes or agrees on the
/// required size in advance and every write must fit. A write that would run
/// past the end of the buffer is a programming defect, not a data-dependent
/// condition, so it is reported through the stream's [`OverflowHandler`]
/// before any byte is touched and does not return.
///
/// Unsuffixed integer writes use the stream-wide byte order (network order
/// unless configured otherwise); the `_le`/`_be` variants pick the order per
/// call.
pub struct BinaryWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    order: Endianness,
    overflow: OverflowHandler,
}

impl<'a> BinaryWriter<'a> {
    /// Creates a writer over `buf` using network byte order (big-endian) for
    /// unsuffixed integer writes.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_order(buf, Endianness::Big)
    }

    /// Creates a writer over `buf` with an explicit stream-wide byte order.
    pub fn with_order(buf: &'a mut [u8], order: Endianness) -> Self {
        Self {
            buf,
            pos: 0,
            order,
            overflow: panic_on_overflow,
        }
    }

    /// Rebinds the stream to a new buffer, resetting the cursor to the
    /// beginning. Lets one writer be reused across many buffers.
    pub fn reset(&mut self, buf: &'a mut [u8]) {
        self.buf = buf;
        self.pos = 0;
    }

    /// Changes the stream-wide byte order used by the unsuffixed integer
    /// writes.
    pub fn set_order(&mut self, order: Endianness) {
        self.order = order;
    }

    /// Replaces the overflow policy. The handler receives a description of
    /// the offending write and must not return; the default panics with the
    /// formatted message.
    pub fn set_overflow_handler(&mut self, handler: OverflowHandler) {
        self.overflow = handler;
    }

    //-- atomic elements ---------------------------------------------------

    /// Writes a single byte.
    pub fn put_u8(&mut self, b: u8) {
        self.check_write("u8", 1);
        self.buf[self.pos] = b;
        self.pos += 1;
    }

    /// Writes a single signed byte.
    pub fn put_i8(&mut self, b: i8) {
        self.check_write("i8", 1);
        self.buf[self.pos] = b as u8;
        self.pos += 1;
    }

    /// Writes the bytes of a value as they are in memory, without any byte
    /// order conversion.
    ///
    /// Intended for types whose in-memory layout already is the wire format
    /// (packed structures, byte arrays); portability across hosts with a
    /// different native order is the caller's responsibility.
    pub fn write_raw<T: IntoBytes + Immutable + ?Sized>(&mut self, value: &T) {
        let bytes = value.as_bytes();
        self.check_write(core::any::type_name::<T>(), bytes.len());
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    //-- integers ----------------------------------------------------------

    /// Writes an integer in the stream-wide byte order.
    pub fn write_int<T: WireInt>(&mut self, value: T) {
        self.write_int_ordered(value, self.order);
    }

    /// Writes an integer in little-endian order, regardless of the
    /// stream-wide default.
    pub fn write_int_le<T: WireInt>(&mut self, value: T) {
        self.write_int_ordered(value, Endianness::Little);
    }

    /// Writes an integer in big-endian order, regardless of the stream-wide
    /// default.
    pub fn write_int_be<T: WireInt>(&mut self, value: T) {
        self.write_int_ordered(value, Endianness::Big);
    }

    fn write_int_ordered<T: WireInt>(&mut self, value: T, order: Endianness) {
        self.check_write(core::any::type_name::<T>(), T::WIRE_SIZE);
        endian::put(&mut self.buf[self.pos..], value, order);
        self.pos += T::WIRE_SIZE;
    }

    //-- byte ranges and strings -------------------------------------------

    /// Copies a byte range verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.check_write("byte slice", bytes.len());
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Writes the bytes of a string WITHOUT a terminator.
    pub fn write_str(&mut self, s: &str) {
        self.check_write("string", s.len());
        self.buf[self.pos..self.pos + s.len()].copy_from_slice(s.as_bytes());
        self.pos += s.len();
    }

    /// Writes the bytes of a string WITH a single trailing zero byte.
    pub fn write_str0(&mut self, s: &str) {
        self.check_write("string", s.len() + 1);
        self.buf[self.pos..self.pos + s.len()].copy_from_slice(s.as_bytes());
        self.buf[self.pos + s.len()] = 0;
        self.pos += s.len() + 1;
    }

    /// Writes `count` zero bytes without requiring a source buffer.
    pub fn write_zeros(&mut self, count: usize) {
        self.check_write("zero bytes", count);
        self.buf[self.pos..self.pos + count].fill(0);
        self.pos += count;
    }

    //-- position ----------------------------------------------------------

    /// How many bytes have been written so far.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// How many bytes of buffer capacity are left.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether the cursor has reached the end of the buffer.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    //-- bounds checking ---------------------------------------------------

    fn check_write(&self, type_desc: &'static str, requested: usize) {
        let remaining = self.remaining();
        if requested > remaining {
            (self.overflow)(OverflowError {
                type_desc,
                requested,
                remaining,
            })
        }
    }
}

/// Description of a write that would have run past the end of the buffer.
///
/// Handed to the writer's [`OverflowHandler`]; carries enough context to
/// produce a useful fatal message.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct OverflowError {
    /// Description of the type or operation that was being written.
    pub type_desc: &'static str,
    /// Size of the attempted write in bytes.
    pub requested: usize,
    /// Buffer capacity that was left at the time of the attempt.
    pub remaining: usize,
}

impl core::error::Error for OverflowError {}

impl core::fmt::Display for OverflowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "attempted to write {} of size {} past the buffer end, remaining size: {}",
            self.type_desc, self.requested, self.remaining
        )
    }
}

/// Fatal-error policy invoked by [`BinaryWriter`] on a buffer overflow.
///
/// The handler must not return. The default panics; whether that unwinds or
/// aborts the process then follows the binary's panic strategy.
pub type OverflowHandler = fn(OverflowError) -> !;

fn panic_on_overflow(err: OverflowError) -> ! {
    panic!("{err}")
}
