//! Streaming GIF container decoder.
//!
//! [`GifDecoder`] drives the whole file parse as a resumable state
//! machine: signature, logical screen descriptor, colour-table and
//! extension skipping, image descriptors, and the length-prefixed image
//! sub-blocks that carry the LZW stream. Decoded palette indices for
//! every frame stream to the caller's destination buffer in file order.
//!
//! The decoder can suspend at any byte boundary, including mid-field:
//! multi-byte structures accumulate through a scratch array, and
//! sub-block payload bytes are staged through an internal 255-byte
//! buffer feeding the embedded [`LzwDecoder`].

use oxigif_core::{Buffer, DecodeStatus, StreamDecode};
use oxigif_lzw::{LzwDecoder, LzwError};

use crate::error::{GifError, Result};
use crate::header::{ImageDescriptor, ScreenDescriptor, Version, block};

/// Largest structure read through the scratch array (the image
/// descriptor body).
const SCRATCH_SIZE: usize = 9;

/// Sub-block payloads are at most 255 bytes.
const SUB_BLOCK_CAP: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Signature,
    ScreenDescriptor,
    GlobalColorTable { remaining: usize },
    BlockLabel,
    ExtensionLabel,
    ExtensionBlockLen,
    ExtensionBlockData { remaining: usize },
    ImageDescriptor,
    LocalColorTable { remaining: usize },
    CodeSize,
    ImageBlockLen,
    ImageBlockData { remaining: usize },
    FlushImage,
}

/// Streaming GIF decoder.
///
/// Produces the LZW-decoded palette index bytes of every frame; palette
/// application, deinterlacing, and compositing are the caller's concern.
/// After the trailer the instance resets and can decode another file.
#[derive(Debug)]
pub struct GifDecoder {
    state: State,
    poisoned: Option<GifError>,
    version: Option<Version>,
    screen: Option<ScreenDescriptor>,
    frame: Option<ImageDescriptor>,
    frames_decoded: u32,
    /// Whether the current image's LZW stream already hit its end code.
    image_done: bool,
    scratch: [u8; SCRATCH_SIZE],
    scratch_len: usize,
    lzw: LzwDecoder,
    /// Staging buffer carrying de-chained sub-block bytes into `lzw`.
    chunk: Buffer,
}

impl GifDecoder {
    /// Create a decoder expecting a fresh GIF file.
    pub fn new() -> Self {
        Self {
            state: State::Signature,
            poisoned: None,
            version: None,
            screen: None,
            frame: None,
            frames_decoded: 0,
            image_done: false,
            scratch: [0; SCRATCH_SIZE],
            scratch_len: 0,
            lzw: LzwDecoder::new(),
            chunk: Buffer::with_capacity(SUB_BLOCK_CAP),
        }
    }

    /// The file version, once the signature has been parsed.
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// The logical screen descriptor, once parsed.
    pub fn screen(&self) -> Option<ScreenDescriptor> {
        self.screen
    }

    /// The most recent image descriptor.
    pub fn frame(&self) -> Option<ImageDescriptor> {
        self.frame
    }

    /// Number of frames fully decoded so far in the current file.
    pub fn frames_decoded(&self) -> u32 {
        self.frames_decoded
    }

    /// Consume bytes from `src` and append palette indices to `dst`.
    ///
    /// Returns [`DecodeStatus::Done`] at the file trailer,
    /// [`DecodeStatus::NeedsInput`] when `src` runs dry while open, and
    /// [`DecodeStatus::NeedsOutput`] when `dst` fills up. Terminal
    /// errors poison the instance and are replayed by every later call.
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
            match self.state {
                State::Signature => {
                    if !self.fill_scratch(src, 6)? {
                        return Ok(DecodeStatus::NeedsInput);
                    }
                    let mut signature = [0u8; 6];
                    signature.copy_from_slice(&self.scratch[..6]);
                    self.scratch_len = 0;
                    self.version = Some(Version::parse(&signature)?);
                    self.screen = None;
                    self.frame = None;
                    self.frames_decoded = 0;
                    self.state = State::ScreenDescriptor;
                }

                State::ScreenDescriptor => {
                    if !self.fill_scratch(src, 7)? {
                        return Ok(DecodeStatus::NeedsInput);
                    }
                    let mut raw = [0u8; 7];
                    raw.copy_from_slice(&self.scratch[..7]);
                    self.scratch_len = 0;
                    let screen = ScreenDescriptor::parse(raw);
                    let table = screen.color_table_bytes();
                    self.screen = Some(screen);
                    self.state = if table > 0 {
                        State::GlobalColorTable { remaining: table }
                    } else {
                        State::BlockLabel
                    };
                }

                State::GlobalColorTable { remaining } => {
                    let remaining = skip_ahead(src, remaining);
                    if remaining > 0 {
                        self.state = State::GlobalColorTable { remaining };
                        return starved(src);
                    }
                    self.state = State::BlockLabel;
                }

                State::BlockLabel => {
                    let Some(label) = src.read_byte() else {
                        return starved(src);
                    };
                    match label {
                        block::EXTENSION => self.state = State::ExtensionLabel,
                        block::IMAGE_SEPARATOR => self.state = State::ImageDescriptor,
                        block::TRAILER => {
                            self.state = State::Signature;
                            return Ok(DecodeStatus::Done);
                        }
                        label => return Err(GifError::UnknownBlock { label }),
                    }
                }

                State::ExtensionLabel => {
                    // The label itself does not matter here: every
                    // extension payload is a sub-block chain, and none
                    // of them carries palette indices.
                    if src.read_byte().is_none() {
                        return starved(src);
                    }
                    self.state = State::ExtensionBlockLen;
                }

                State::ExtensionBlockLen => {
                    let Some(len) = src.read_byte() else {
                        return starved(src);
                    };
                    self.state = if len == 0 {
                        State::BlockLabel
                    } else {
                        State::ExtensionBlockData {
                            remaining: usize::from(len),
                        }
                    };
                }

                State::ExtensionBlockData { remaining } => {
                    let remaining = skip_ahead(src, remaining);
                    if remaining > 0 {
                        self.state = State::ExtensionBlockData { remaining };
                        return starved(src);
                    }
                    self.state = State::ExtensionBlockLen;
                }

                State::ImageDescriptor => {
                    if !self.fill_scratch(src, 9)? {
                        return Ok(DecodeStatus::NeedsInput);
                    }
                    let mut raw = [0u8; 9];
                    raw.copy_from_slice(&self.scratch[..9]);
                    self.scratch_len = 0;
                    let frame = ImageDescriptor::parse(raw);
                    let table = frame.color_table_bytes();
                    self.frame = Some(frame);
                    self.state = if table > 0 {
                        State::LocalColorTable { remaining: table }
                    } else {
                        State::CodeSize
                    };
                }

                State::LocalColorTable { remaining } => {
                    let remaining = skip_ahead(src, remaining);
                    if remaining > 0 {
                        self.state = State::LocalColorTable { remaining };
                        return starved(src);
                    }
                    self.state = State::CodeSize;
                }

                State::CodeSize => {
                    let Some(code_size) = src.read_byte() else {
                        return starved(src);
                    };
                    self.lzw.set_literal_width(code_size)?;
                    self.image_done = false;
                    self.chunk.clear();
                    self.state = State::ImageBlockLen;
                }

                State::ImageBlockLen => {
                    let Some(len) = src.read_byte() else {
                        return starved(src);
                    };
                    if len == 0 {
                        if self.image_done {
                            self.finish_image();
                        } else {
                            // Terminator before the end code: let the
                            // LZW layer flush and report truncation.
                            self.chunk.close();
                            self.state = State::FlushImage;
                        }
                    } else {
                        self.state = State::ImageBlockData {
                            remaining: usize::from(len),
                        };
                    }
                }

                State::ImageBlockData { remaining } => {
                    if self.image_done {
                        // The end code arrived before the terminator;
                        // drain the leftover payload without decoding.
                        let remaining = skip_ahead(src, remaining);
                        if remaining > 0 {
                            self.state = State::ImageBlockData { remaining };
                            return starved(src);
                        }
                        self.state = State::ImageBlockLen;
                        continue;
                    }

                    // Reclaim staging space the LZW layer has consumed.
                    self.chunk.compact();
                    let n = remaining.min(src.len()).min(self.chunk.spare());
                    let moved = self.chunk.push(&src.readable()[..n]);
                    src.consume(moved);
                    let remaining = remaining - moved;
                    self.state = if remaining == 0 {
                        State::ImageBlockLen
                    } else {
                        State::ImageBlockData { remaining }
                    };

                    match self.lzw.decode(dst, &mut self.chunk)? {
                        DecodeStatus::Done => self.image_done = true,
                        DecodeStatus::NeedsOutput => return Ok(DecodeStatus::NeedsOutput),
                        DecodeStatus::NeedsInput => {
                            if remaining > 0 && src.is_empty() {
                                return starved(src);
                            }
                        }
                    }
                }

                State::FlushImage => match self.lzw.decode(dst, &mut self.chunk)? {
                    DecodeStatus::Done => self.finish_image(),
                    DecodeStatus::NeedsOutput => return Ok(DecodeStatus::NeedsOutput),
                    DecodeStatus::NeedsInput => return Err(LzwError::UnexpectedEof.into()),
                },
            }
        }
    }

    fn finish_image(&mut self) {
        self.frames_decoded += 1;
        self.image_done = false;
        self.chunk.clear();
        self.state = State::BlockLabel;
    }

    /// Accumulate exactly `n` bytes in the scratch array across calls.
    /// Returns `false` when the source ran dry while open.
    fn fill_scratch(&mut self, src: &mut Buffer, n: usize) -> Result<bool> {
        while self.scratch_len < n {
            let Some(byte) = src.read_byte() else {
                return if src.is_closed() {
                    Err(GifError::UnexpectedEof)
                } else {
                    Ok(false)
                };
            };
            self.scratch[self.scratch_len] = byte;
            self.scratch_len += 1;
        }
        Ok(true)
    }
}

impl Default for GifDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecode for GifDecoder {
    type Error = GifError;

    fn decode(&mut self, dst: &mut Buffer, src: &mut Buffer) -> Result<DecodeStatus> {
        GifDecoder::decode(self, dst, src)
    }
}

/// Consume up to `remaining` bytes from `src`; returns what is left.
fn skip_ahead(src: &mut Buffer, remaining: usize) -> usize {
    let n = remaining.min(src.len());
    src.consume(n);
    remaining - n
}

/// The source ran dry mid-structure: suspend if more may come, fail if
/// the producer already closed the stream.
fn starved(src: &Buffer) -> Result<DecodeStatus> {
    if src.is_closed() {
        Err(GifError::UnexpectedEof)
    } else {
        Ok(DecodeStatus::NeedsInput)
    }
}
