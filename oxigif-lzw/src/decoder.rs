//! Streaming GIF-variant LZW decoder.
//!
//! The decoder consumes LSB-first packed codes from a source
//! [`Buffer`] and appends the decoded byte expansion to a destination
//! [`Buffer`]. All loop state, including the bit accumulator and any
//! partially flushed expansion, lives in the struct, so a call that
//! suspends on an empty source or full destination resumes exactly where
//! it stopped.

use oxigif_core::{Buffer, DecodeStatus, StreamDecode};

use crate::error::{LzwError, Result};
use crate::{MAX_WIDTH, TABLE_SIZE};

/// Highest addressable code table slot.
const MAX_CODE: u16 = (TABLE_SIZE - 1) as u16;

/// Streaming LZW decoder (GIF variant).
///
/// The code table is held inline as three fixed 4096-entry arrays:
/// `suffixes[k]` is the final symbol of the string assigned to code `k`,
/// `prefixes[k]` is the code of that string minus its final symbol, and
/// `stack` collects an expansion in reverse while walking a prefix chain.
///
/// A single instance decodes one LZW stream at a time; reaching the end
/// code resets it for the next stream. Instances are not shareable
/// across threads mid-decode, but independent instances are.
#[derive(Debug)]
pub struct LzwDecoder {
    literal_width: u8,
    /// Current code width in bits, `literal_width + 1 ..= 12`.
    width: u8,
    clear_code: u16,
    end_code: u16,
    /// Next table slot awaiting assignment.
    save_code: u16,
    prev_code: u16,
    use_save_code: bool,
    /// LSB-first bit accumulator; survives suspensions.
    bits: u32,
    n_bits: u8,
    /// Pending expansion span `stack[stack_lo..stack_hi]` not yet flushed.
    stack_lo: usize,
    stack_hi: usize,
    poisoned: Option<LzwError>,
    suffixes: [u8; TABLE_SIZE],
    prefixes: [u16; TABLE_SIZE],
    stack: [u8; TABLE_SIZE],
}

impl LzwDecoder {
    /// Create a decoder with the default literal width of 8.
    pub fn new() -> Self {
        let mut decoder = Self {
            literal_width: 8,
            width: 0,
            clear_code: 0,
            end_code: 0,
            save_code: 0,
            prev_code: 0,
            use_save_code: false,
            bits: 0,
            n_bits: 0,
            stack_lo: 0,
            stack_hi: 0,
            poisoned: None,
            suffixes: [0; TABLE_SIZE],
            prefixes: [0; TABLE_SIZE],
            stack: [0; TABLE_SIZE],
        };
        decoder.reset_stream();
        decoder
    }

    /// Create a decoder for the given literal width.
    pub fn with_literal_width(literal_width: u8) -> Result<Self> {
        let mut decoder = Self::new();
        decoder.set_literal_width(literal_width)?;
        Ok(decoder)
    }

    /// The configured literal width.
    pub fn literal_width(&self) -> u8 {
        self.literal_width
    }

    /// Set the literal width for the next stream and reset stream state.
    ///
    /// GIF constrains the width to `2..=8`; anything else is
    /// [`LzwError::InvalidLiteralWidth`] and poisons the instance.
    pub fn set_literal_width(&mut self, literal_width: u8) -> Result<()> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        if !(2..=8).contains(&literal_width) {
            let err = LzwError::InvalidLiteralWidth(literal_width);
            self.poisoned = Some(err.clone());
            return Err(err);
        }
        self.literal_width = literal_width;
        self.reset_stream();
        Ok(())
    }

    /// Consume codes from `src` and append decoded bytes to `dst`.
    ///
    /// Returns [`DecodeStatus::Done`] on the end code,
    /// [`DecodeStatus::NeedsInput`] when `src` runs dry while open, and
    /// [`DecodeStatus::NeedsOutput`] when `dst` fills up. Terminal errors
    /// poison the instance and are replayed by every later call.
    pub fn decode(&mut self, dst: &mut Buffer, src: &mut Buffer) -> Result<DecodeStatus> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        match self.decode_step(dst, src) {
            Ok(status) => Ok(status),
            Err(err) => {
                self.poisoned = Some(err.clone());
                Err(err)
            }
        }
    }

    fn decode_step(&mut self, dst: &mut Buffer, src: &mut Buffer) -> Result<DecodeStatus> {
        loop {
            // Flush whatever expansion is still pending before touching
            // the bit stream again. This is where a NeedsOutput
            // suspension resumes.
            if self.stack_lo < self.stack_hi {
                if dst.is_closed() {
                    return Err(LzwError::ClosedForWrites);
                }
                let n = dst.push(&self.stack[self.stack_lo..self.stack_hi]);
                self.stack_lo += n;
                if self.stack_lo < self.stack_hi {
                    return Ok(DecodeStatus::NeedsOutput);
                }
            }

            while self.n_bits < self.width {
                let Some(byte) = src.read_byte() else {
                    return if src.is_closed() {
                        Err(LzwError::UnexpectedEof)
                    } else {
                        Ok(DecodeStatus::NeedsInput)
                    };
                };
                self.bits |= u32::from(byte) << self.n_bits;
                self.n_bits += 8;
            }
            let code = (self.bits & ((1u32 << self.width) - 1)) as u16;
            self.bits >>= self.width;
            self.n_bits -= self.width;

            if code < self.clear_code {
                if self.use_save_code {
                    self.suffixes[usize::from(self.save_code)] = code as u8;
                    self.prefixes[usize::from(self.save_code)] = self.prev_code;
                }
                self.advance_table(code);
                // Stage the literal; the flush at the top of the loop
                // emits it and handles a full destination.
                self.stack[TABLE_SIZE - 1] = code as u8;
                self.stack_lo = TABLE_SIZE - 1;
                self.stack_hi = TABLE_SIZE;
            } else if code == self.clear_code {
                self.use_save_code = false;
                self.save_code = self.end_code;
                self.prev_code = 0;
                self.width = self.literal_width + 1;
            } else if code == self.end_code {
                self.reset_stream();
                return Ok(DecodeStatus::Done);
            } else if code <= self.save_code {
                let mut s = TABLE_SIZE - 1;
                let mut c = code;
                if code == self.save_code && self.use_save_code {
                    // The code about to be defined: its expansion is the
                    // previous string followed by that string's first
                    // symbol, patched in after the walk.
                    s -= 1;
                    c = self.prev_code;
                }
                while c >= self.clear_code {
                    self.stack[s] = self.suffixes[usize::from(c)];
                    if s == 0 {
                        // A legal chain has at most 4095 links; running
                        // the stack dry proves the table is cyclical.
                        return Err(LzwError::CyclicalPrefixChain);
                    }
                    s -= 1;
                    c = self.prefixes[usize::from(c)];
                }
                self.stack[s] = c as u8;
                if code == self.save_code && self.use_save_code {
                    self.stack[TABLE_SIZE - 1] = c as u8;
                }
                if self.use_save_code {
                    self.suffixes[usize::from(self.save_code)] = c as u8;
                    self.prefixes[usize::from(self.save_code)] = self.prev_code;
                }
                self.advance_table(code);
                self.stack_lo = s;
                self.stack_hi = TABLE_SIZE;
            } else {
                return Err(LzwError::CodeOutOfRange {
                    code,
                    limit: self.save_code,
                });
            }
        }
    }

    /// Post-code table bookkeeping: claim the next slot and grow the
    /// width pre-emptively, one entry before the encoder needs it.
    fn advance_table(&mut self, code: u16) {
        self.use_save_code = self.save_code < MAX_CODE;
        if self.use_save_code {
            self.save_code += 1;
            if self.save_code == 1 << self.width && self.width < MAX_WIDTH {
                self.width += 1;
            }
        }
        self.prev_code = code;
    }

    fn reset_stream(&mut self) {
        self.clear_code = 1 << self.literal_width;
        self.end_code = self.clear_code + 1;
        self.save_code = self.end_code;
        self.prev_code = 0;
        self.use_save_code = false;
        self.width = self.literal_width + 1;
        self.bits = 0;
        self.n_bits = 0;
        self.stack_lo = 0;
        self.stack_hi = 0;
    }
}

impl Default for LzwDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecode for LzwDecoder {
    type Error = LzwError;

    fn decode(&mut self, dst: &mut Buffer, src: &mut Buffer) -> Result<DecodeStatus> {
        LzwDecoder::decode(self, dst, src)
    }
}
