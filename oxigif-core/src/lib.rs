//! # OxiGIF Core
//!
//! Core components for the OxiGIF streaming GIF decoder.
//!
//! This crate provides the building blocks shared by every decoding layer:
//!
//! - [`buffer`]: Bounded byte buffers with read/write cursors and a closed flag
//! - [`traits`]: The streaming decode status and decoder trait
//!
//! ## Architecture
//!
//! OxiGIF is designed as a layered protocol stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Container                                           │
//! │     GIF signature, screen/image descriptors, sub-blocks │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     GIF-variant LZW (LSB-first, 2-12 bit codes)         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Buffer (this crate)                                 │
//! │     Buffer, DecodeStatus, StreamDecode                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every layer consumes bytes from a source [`Buffer`] and appends bytes to
//! a destination [`Buffer`], returning a [`DecodeStatus`] that tells the
//! caller whether the stream finished or which buffer needs attention.
//!
//! ## Example
//!
//! ```rust
//! use oxigif_core::Buffer;
//!
//! let mut buf = Buffer::with_capacity(8);
//! assert_eq!(buf.push(b"gif"), 3);
//! assert_eq!(buf.read_byte(), Some(b'g'));
//! assert_eq!(buf.readable(), b"if");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod traits;

// Re-exports for convenience
pub use buffer::Buffer;
pub use traits::{DecodeStatus, StreamDecode};
