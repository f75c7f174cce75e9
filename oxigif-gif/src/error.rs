//! GIF container error types.

use oxigif_lzw::LzwError;
use thiserror::Error;

/// Terminal GIF decoding errors.
///
/// Any of these poisons the [`GifDecoder`](crate::GifDecoder) that
/// produced it; every later call replays the stored error. Running out
/// of input or output space is not an error but a
/// [`DecodeStatus`](oxigif_core::DecodeStatus) suspension.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GifError {
    /// The first six bytes are not `GIF87a` or `GIF89a`.
    #[error("Bad GIF signature: {found:02x?}")]
    BadSignature {
        /// The bytes actually found.
        found: [u8; 6],
    },

    /// A block label that is not an extension, image separator, or
    /// trailer.
    #[error("Unknown GIF block label {label:#04x}")]
    UnknownBlock {
        /// The offending label byte.
        label: u8,
    },

    /// The source buffer is closed mid-structure.
    #[error("Unexpected end of GIF stream")]
    UnexpectedEof,

    /// The embedded LZW decoder failed.
    #[error(transparent)]
    Lzw(#[from] LzwError),
}

/// Result type for GIF operations.
pub type Result<T> = std::result::Result<T, GifError>;
