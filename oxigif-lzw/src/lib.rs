//! # OxiGIF-LZW: Pure Rust GIF-variant LZW
//!
//! This crate provides the LZW entropy coding layer of OxiGIF: a
//! streaming, resumable decoder and a one-shot encoder for the GIF
//! flavour of LZW.
//!
//! ## GIF LZW specification
//!
//! GIF uses a specific variant of LZW compression:
//!
//! - **LSB-first bit order**: the low bit of the first byte is the first
//!   bit of the first code
//! - **Variable-width codes**: starting at `literal_width + 1` bits and
//!   growing up to 12 bits as the table fills
//! - **Literal widths 2-8**: the source alphabet has
//!   `1 << literal_width` symbols
//! - **Clear code** `1 << literal_width`: resets the table and width
//!   mid-stream
//! - **End code** `clear + 1`: terminates the stream
//! - **4096-entry code table**, including the self-referential "KwKwK"
//!   case where a code is used in the very step that defines it
//!
//! ## Streaming
//!
//! [`LzwDecoder`] works against bounded [`Buffer`](oxigif_core::Buffer)s
//! and suspends (without losing state) when the source runs dry or the
//! destination fills up, so callers can decode with fixed memory no
//! matter how large the stream is.
//!
//! ## Example
//!
//! ```rust
//! use oxigif_lzw::{compress, decompress};
//!
//! let original = [3u8, 1, 4, 1, 5, 1, 4, 1];
//! let compressed = compress(&original, 3).unwrap();
//! let decompressed = decompress(&compressed, 3).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bitstream_lsb;
mod decoder;
mod encoder;
mod error;

pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

// Re-exported so container crates can drive the decoder generically.
pub use oxigif_core::{Buffer, DecodeStatus, StreamDecode};

/// Number of entries in the LZW code table.
pub const TABLE_SIZE: usize = 4096;

/// Maximum code width in bits.
pub const MAX_WIDTH: u8 = 12;

/// Compress data with GIF LZW (convenience function).
///
/// # Parameters
///
/// - `data`: uncompressed input; every byte must be below
///   `1 << literal_width`
/// - `literal_width`: bit width of the source alphabet, `2..=8`
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::compress;
///
/// let compressed = compress(b"to be or not to be", 8).unwrap();
/// assert!(!compressed.is_empty());
/// ```
pub fn compress(data: &[u8], literal_width: u8) -> Result<Vec<u8>> {
    LzwEncoder::with_literal_width(literal_width)?.encode(data)
}

/// Decompress a GIF LZW code stream (convenience function).
///
/// # Parameters
///
/// - `data`: complete LZW code stream, ending in the end code
/// - `literal_width`: bit width used when the stream was encoded
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::{compress, decompress};
///
/// let original = b"to be or not to be";
/// let compressed = compress(original, 8).unwrap();
/// let decompressed = decompress(&compressed, 8).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(data: &[u8], literal_width: u8) -> Result<Vec<u8>> {
    LzwDecoder::with_literal_width(literal_width)?.decode_all(data)
}
