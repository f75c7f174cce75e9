//! # OxiGIF: Pure Rust streaming GIF decoding
//!
//! This crate is the container layer of OxiGIF. It recognises the GIF
//! file structure — signature, logical screen descriptor, colour
//! tables, extensions, image descriptors, and the length-prefixed
//! sub-blocks carrying compressed pixel data — and streams every
//! frame's LZW-decoded **palette indices** to the caller.
//!
//! ## What it does not do
//!
//! No file I/O, no allocation on the caller's behalf beyond its own
//! fixed state, no RGBA conversion: palette application, deinterlacing,
//! and compositing belong to the image pipeline above this crate.
//!
//! ## Push/pull streaming
//!
//! [`GifDecoder::decode`] works against bounded
//! [`Buffer`](oxigif_core::Buffer)s and suspends when the source runs
//! dry or the destination fills up, so a whole animation can be decoded
//! with a few hundred bytes of caller-owned buffer space. For in-memory
//! data, [`StreamDecode::decode_all`] drives the loop.
//!
//! ## Example
//!
//! ```rust
//! use oxigif_gif::{GifDecoder, StreamDecode};
//!
//! // A 2x2 one-frame GIF with no colour tables: pixels 0,1,1,0.
//! let file: Vec<u8> = [
//!     b"GIF89a".as_slice(),
//!     &[2, 0, 2, 0, 0x00, 0, 0],                   // logical screen
//!     &[0x2C, 0, 0, 0, 0, 2, 0, 2, 0, 0x00],       // image descriptor
//!     &[2],                                        // LZW code size
//!     &[3, 0x44, 0x02, 0x05, 0],                   // sub-blocks
//!     &[0x3B],                                     // trailer
//! ]
//! .concat();
//!
//! let mut decoder = GifDecoder::new();
//! let indices = decoder.decode_all(&file).unwrap();
//! assert_eq!(indices, [0, 1, 1, 0]);
//! assert_eq!(decoder.frames_decoded(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod error;
pub mod header;

pub use decoder::GifDecoder;
pub use error::{GifError, Result};
pub use header::{ImageDescriptor, ScreenDescriptor, Version};

// Re-exported so callers need only this crate for the common path.
pub use oxigif_core::{Buffer, DecodeStatus, StreamDecode};
pub use oxigif_lzw::{LzwDecoder, LzwError};
