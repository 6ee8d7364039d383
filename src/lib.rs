//! Cursor-based binary streams over caller-owned buffers.
//!
//! [`BinaryWriter`] packs typed values into a pre-sized mutable byte buffer and
//! treats overflow as a fatal caller defect. [`BinaryReader`] unpacks values
//! from a read-only byte buffer and treats truncation as a recoverable, sticky
//! failure that can be checked once after a whole deserialization pass.
//! Multi-byte integers go through the [`endian`] conversion primitives with an
//! explicit or stream-wide byte order; everything else is copied verbatim.
//!
//! Neither stream owns memory. The buffers (and, for the resizable-container
//! reads, the destination containers) belong to the caller.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

pub mod endian;
mod reader;
mod writer;


pub use endian::{Endianness, WireInt};
pub use reader::BinaryReader;
pub use writer::{BinaryWriter, OverflowError, OverflowHandler};
