//! GIF-variant LZW encoder.
//!
//! The encoder is the one-shot counterpart of the streaming decoder:
//! slice in, compressed `Vec` out. It emits a leading clear code, packs
//! codes LSB-first, and grows the code width in lockstep with the
//! decoder's table counter, including on the final pending emit before
//! the end code.

use std::collections::HashMap;

use crate::bitstream_lsb::LsbBitWriter;
use crate::error::{LzwError, Result};
use crate::{MAX_WIDTH, TABLE_SIZE};

const MAX_CODE: u16 = (TABLE_SIZE - 1) as u16;

/// One-shot LZW encoder (GIF variant).
#[derive(Debug)]
pub struct LzwEncoder {
    literal_width: u8,
}

impl LzwEncoder {
    /// Create an encoder with the default literal width of 8.
    pub fn new() -> Self {
        Self { literal_width: 8 }
    }

    /// Create an encoder for the given literal width (`2..=8`).
    pub fn with_literal_width(literal_width: u8) -> Result<Self> {
        if !(2..=8).contains(&literal_width) {
            return Err(LzwError::InvalidLiteralWidth(literal_width));
        }
        Ok(Self { literal_width })
    }

    /// The configured literal width.
    pub fn literal_width(&self) -> u8 {
        self.literal_width
    }

    /// Compress `input` into a GIF LZW code stream.
    ///
    /// Every input byte must be below `1 << literal_width`. The stream
    /// always begins with a clear code and ends with the end code; a
    /// full table is handled by emitting a clear code and starting a
    /// fresh dictionary, the way classic GIF writers do.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let clear_code: u16 = 1 << self.literal_width;
        let end_code = clear_code + 1;

        let mut writer = LsbBitWriter::new();
        let mut table: HashMap<(u16, u8), u16> = HashMap::new();
        let mut width = self.literal_width + 1;
        // Mirrors the decoder's next-slot counter; both sides bump the
        // width off this value, which keeps them synchronised.
        let mut save_code = end_code;
        let mut prefix: Option<u16> = None;

        writer.write_bits(clear_code, width);
        for &byte in input {
            if u16::from(byte) >= clear_code {
                return Err(LzwError::LiteralOutOfRange {
                    byte,
                    literal_width: self.literal_width,
                });
            }
            let Some(p) = prefix else {
                prefix = Some(u16::from(byte));
                continue;
            };
            if let Some(&code) = table.get(&(p, byte)) {
                prefix = Some(code);
                continue;
            }

            writer.write_bits(p, width);
            if save_code < MAX_CODE {
                save_code += 1;
                if save_code == 1 << width && width < MAX_WIDTH {
                    width += 1;
                }
                table.insert((p, byte), save_code);
            } else {
                // Table full: reset both sides with a clear code.
                writer.write_bits(clear_code, width);
                table.clear();
                width = self.literal_width + 1;
                save_code = end_code;
            }
            prefix = Some(u16::from(byte));
        }

        if let Some(p) = prefix {
            writer.write_bits(p, width);
            // The decoder still claims a slot for this code, so the
            // width of the end code can differ from the width of `p`.
            if save_code < MAX_CODE {
                save_code += 1;
                if save_code == 1 << width && width < MAX_WIDTH {
                    width += 1;
                }
            }
        }
        writer.write_bits(end_code, width);
        Ok(writer.into_vec())
    }
}

impl Default for LzwEncoder {
    fn default() -> Self {
        Self::new()
    }
}
