//! LZW-specific error types.

use thiserror::Error;

/// Terminal LZW errors.
///
/// Any of these poisons the [`LzwDecoder`](crate::LzwDecoder) that
/// produced it: every later call on the same instance replays the stored
/// error. The transient "out of input" / "out of output space"
/// conditions are not errors; they are reported as
/// [`DecodeStatus`](oxigif_core::DecodeStatus) suspensions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LzwError {
    /// Literal width outside the GIF range.
    #[error("Invalid literal width: {0} (must be 2-8)")]
    InvalidLiteralWidth(u8),

    /// A code referenced a table slot that has not been assigned yet.
    #[error("LZW code {code} is out of range (next unassigned slot: {limit})")]
    CodeOutOfRange {
        /// The offending code.
        code: u16,
        /// Highest code currently addressable.
        limit: u16,
    },

    /// Walking a prefix chain consumed the whole expansion stack, which
    /// only a cyclical (corrupt) code table can cause.
    #[error("LZW prefix chain is cyclical")]
    CyclicalPrefixChain,

    /// The source buffer is closed but the stream has no end code.
    #[error("Unexpected end of LZW stream")]
    UnexpectedEof,

    /// The destination buffer is closed while output remains.
    #[error("Destination is closed for writes")]
    ClosedForWrites,

    /// An input byte to the encoder does not fit the literal width.
    #[error("Literal {byte:#04x} does not fit literal width {literal_width}")]
    LiteralOutOfRange {
        /// The offending input byte.
        byte: u8,
        /// Configured literal width.
        literal_width: u8,
    },
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
