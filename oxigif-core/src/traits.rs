//! The streaming decode protocol.
//!
//! Decoders in OxiGIF are caller-driven: the caller hands a source and a
//! destination [`Buffer`] to [`StreamDecode::decode`], the decoder makes
//! as much progress as it can, and the returned [`DecodeStatus`] says why
//! it stopped. Suspensions ([`DecodeStatus::NeedsInput`] /
//! [`DecodeStatus::NeedsOutput`]) are not errors: the instance stays
//! valid and a later call with refreshed buffers resumes exactly where
//! the previous one stopped.
//!
//! Terminal errors are each decoder's own error type and poison the
//! instance: every subsequent call replays the stored error.

use crate::buffer::Buffer;

/// Why a streaming decode call stopped, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The stream reached its natural terminator.
    Done,
    /// The source buffer ran dry and is not closed; refill and call again.
    NeedsInput,
    /// The destination buffer is full; drain and call again.
    NeedsOutput,
}

/// A resumable streaming decoder.
pub trait StreamDecode {
    /// The terminal error type of this decoder.
    type Error;

    /// Consume bytes from `src` and append decoded bytes to `dst`.
    ///
    /// On return, the caller observes the advanced read cursor on `src`
    /// and write cursor on `dst`. A suspension leaves the instance ready
    /// to resume; a terminal error poisons it.
    fn decode(&mut self, dst: &mut Buffer, src: &mut Buffer) -> Result<DecodeStatus, Self::Error>;

    /// Decode an in-memory stream to completion (convenience method).
    ///
    /// Drives [`Self::decode`] against a closed source until the stream
    /// terminator, collecting all output.
    fn decode_all(&mut self, src: &[u8]) -> Result<Vec<u8>, Self::Error> {
        let mut src = Buffer::from_bytes(src.to_vec());
        let mut dst = Buffer::with_capacity(32768);
        let mut out = Vec::new();

        loop {
            let status = self.decode(&mut dst, &mut src)?;
            out.extend_from_slice(dst.readable());
            dst.clear();

            match status {
                DecodeStatus::Done => return Ok(out),
                DecodeStatus::NeedsOutput => continue,
                // The source is closed, so a well-behaved decoder reports
                // truncation as an error rather than suspending.
                DecodeStatus::NeedsInput => continue,
            }
        }
    }
}
