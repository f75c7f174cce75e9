//! End-to-end GIF container tests: hand-assembled files decoded whole
//! and in drip-fed fragments.

use oxigif_gif::header::{block, extension};
use oxigif_gif::{Buffer, DecodeStatus, GifDecoder, GifError, LzwError, StreamDecode, Version};
use oxigif_lzw::compress;

/// Signature plus logical screen descriptor, with an all-zero global
/// colour table when `table_bits` is given.
fn screen(width: u16, height: u16, table_bits: Option<u8>) -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    match table_bits {
        Some(bits) => {
            bytes.push(0x80 | bits);
            bytes.extend_from_slice(&[0, 0]);
            bytes.extend(std::iter::repeat_n(0u8, 3 * (2usize << bits)));
        }
        None => bytes.extend_from_slice(&[0, 0, 0]),
    }
    bytes
}

/// Image descriptor at the origin plus the LZW-compressed pixel data,
/// chained into length-prefixed sub-blocks.
fn image(pixels: &[u8], width: u16, height: u16, code_size: u8) -> Vec<u8> {
    let mut bytes = vec![block::IMAGE_SEPARATOR, 0, 0, 0, 0];
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.push(0);
    bytes.push(code_size);
    let stream = compress(pixels, code_size).unwrap();
    for chunk in stream.chunks(255) {
        bytes.push(chunk.len() as u8);
        bytes.extend_from_slice(chunk);
    }
    bytes.push(0);
    bytes
}

fn ext(label: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = vec![block::EXTENSION, label];
    for chunk in payload.chunks(255) {
        bytes.push(chunk.len() as u8);
        bytes.extend_from_slice(chunk);
    }
    bytes.push(0);
    bytes
}

#[test]
fn test_single_frame_with_extensions_and_global_table() {
    let pixels: Vec<u8> = (0..64u8).map(|i| i % 4).collect();
    let mut file = screen(8, 8, Some(7));
    file.extend(ext(extension::GRAPHIC_CONTROL, &[0, 10, 0, 0]));
    file.extend(ext(extension::COMMENT, b"made with oxigif tests"));
    file.extend(ext(extension::APPLICATION, b"NETSCAPE2.0"));
    file.extend(image(&pixels, 8, 8, 2));
    file.push(block::TRAILER);

    let mut decoder = GifDecoder::new();
    let indices = decoder.decode_all(&file).unwrap();
    assert_eq!(indices, pixels);
    assert_eq!(decoder.version(), Some(Version::Gif89a));
    assert_eq!(decoder.frames_decoded(), 1);

    let screen = decoder.screen().unwrap();
    assert_eq!((screen.width, screen.height), (8, 8));
    assert!(screen.has_color_table);
    assert_eq!(screen.color_table_entries(), 256);

    let frame = decoder.frame().unwrap();
    assert_eq!((frame.width, frame.height), (8, 8));
    assert_eq!(frame.pixel_count(), 64);
}

#[test]
fn test_two_frames_concatenate_in_file_order() {
    let first: Vec<u8> = vec![1; 20];
    let second: Vec<u8> = (0..30u8).map(|i| i % 8).collect();
    let mut file = screen(10, 3, None);
    file.extend(image(&first, 5, 4, 2));
    file.extend(image(&second, 6, 5, 3));
    file.push(block::TRAILER);

    let mut decoder = GifDecoder::new();
    let indices = decoder.decode_all(&file).unwrap();
    let expected: Vec<u8> = first.iter().chain(second.iter()).copied().collect();
    assert_eq!(indices, expected);
    assert_eq!(decoder.frames_decoded(), 2);
    // The stored descriptor is the most recent frame's.
    assert_eq!(decoder.frame().unwrap().width, 6);
}

#[test]
fn test_large_frame_code_size_8() {
    let pixels: Vec<u8> = (0..100 * 80u32).map(|i| (i * 7 % 251) as u8).collect();
    let mut file = screen(100, 80, Some(7));
    file.extend(image(&pixels, 100, 80, 8));
    file.push(block::TRAILER);

    let indices = GifDecoder::new().decode_all(&file).unwrap();
    assert_eq!(indices, pixels);
}

#[test]
fn test_drip_fed_source_and_tiny_destination() {
    let pixels: Vec<u8> = (0..48u8).map(|i| i % 4).collect();
    let mut file = screen(8, 6, Some(1));
    file.extend(ext(extension::COMMENT, b"stream me"));
    file.extend(image(&pixels, 8, 6, 2));
    file.push(block::TRAILER);

    let mut decoder = GifDecoder::new();
    let mut src = Buffer::with_capacity(1);
    let mut dst = Buffer::with_capacity(3);
    let mut out = Vec::new();
    let mut fed = 0;

    loop {
        match decoder.decode(&mut dst, &mut src).unwrap() {
            DecodeStatus::Done => {
                out.extend_from_slice(dst.readable());
                break;
            }
            DecodeStatus::NeedsOutput => {
                out.extend_from_slice(dst.readable());
                dst.clear();
            }
            DecodeStatus::NeedsInput => {
                src.clear();
                src.push(&file[fed..fed + 1]);
                fed += 1;
                if fed == file.len() {
                    src.close();
                }
            }
        }
    }
    assert_eq!(out, pixels);
    assert_eq!(decoder.frames_decoded(), 1);
}

#[test]
fn test_multi_sub_block_image_streams_in_fragments() {
    // Varied pixels so the LZW stream spans several 255-byte
    // sub-blocks, exercising the staging buffer across block seams.
    let pixels: Vec<u8> = (0..100 * 60u32).map(|i| (i * 31 % 253) as u8).collect();
    let stream_len = compress(&pixels, 8).unwrap().len();
    assert!(
        stream_len > 3 * 255,
        "image data must span multiple sub-blocks, got {stream_len} bytes"
    );

    let mut file = screen(100, 60, None);
    file.extend(image(&pixels, 100, 60, 8));
    file.push(block::TRAILER);

    let mut decoder = GifDecoder::new();
    let mut src = Buffer::with_capacity(64);
    let mut dst = Buffer::with_capacity(512);
    let mut out = Vec::new();
    let mut fed = 0;

    loop {
        match decoder.decode(&mut dst, &mut src).unwrap() {
            DecodeStatus::Done => {
                out.extend_from_slice(dst.readable());
                break;
            }
            DecodeStatus::NeedsOutput => {
                out.extend_from_slice(dst.readable());
                dst.clear();
            }
            DecodeStatus::NeedsInput => {
                src.compact();
                let n = (file.len() - fed).min(src.spare());
                assert!(n > 0, "decoder asked for input past the end of file");
                src.push(&file[fed..fed + n]);
                fed += n;
                if fed == file.len() {
                    src.close();
                }
            }
        }
    }
    assert_eq!(out, pixels);
    assert_eq!(decoder.frames_decoded(), 1);
}

#[test]
fn test_instance_is_reusable_after_trailer() {
    let mut first = screen(2, 2, None);
    first.extend(image(&[0, 1, 1, 0], 2, 2, 2));
    first.push(block::TRAILER);

    let mut second = screen(3, 1, None);
    second.extend(image(&[2, 2, 2], 3, 1, 2));
    second.push(block::TRAILER);

    let mut decoder = GifDecoder::new();
    assert_eq!(decoder.decode_all(&first).unwrap(), [0, 1, 1, 0]);
    assert_eq!(decoder.decode_all(&second).unwrap(), [2, 2, 2]);
    assert_eq!(decoder.frames_decoded(), 1);
}

#[test]
fn test_missing_end_code_is_truncation() {
    let stream = compress(&[0u8, 1, 2, 3, 2, 1], 2).unwrap();
    let cut = &stream[..stream.len() - 1];
    let mut file = screen(3, 2, None);
    file.push(block::IMAGE_SEPARATOR);
    file.extend_from_slice(&[0, 0, 0, 0, 3, 0, 2, 0, 0]);
    file.push(2);
    file.push(cut.len() as u8);
    file.extend_from_slice(cut);
    file.push(0);
    file.push(block::TRAILER);

    let err = GifDecoder::new().decode_all(&file).unwrap_err();
    assert_eq!(err, GifError::Lzw(LzwError::UnexpectedEof));
}

#[test]
fn test_truncated_color_table_is_eof() {
    let full = screen(4, 4, Some(7));
    // Cut the file in the middle of the global colour table.
    let cut = &full[..full.len() - 100];
    let err = GifDecoder::new().decode_all(cut).unwrap_err();
    assert_eq!(err, GifError::UnexpectedEof);
}

#[test]
fn test_end_code_before_terminator_drains_padding() {
    // Append garbage sub-blocks after the real image data; the decoder
    // must skip them once the end code has been seen.
    let pixels = [3u8, 0, 3, 0];
    let mut file = screen(2, 2, None);
    let mut img = image(&pixels, 2, 2, 2);
    let terminator = img.pop().unwrap();
    assert_eq!(terminator, 0);
    img.extend_from_slice(&[4, 0xDE, 0xAD, 0xBE, 0xEF, 0]);
    file.extend(img);
    file.push(block::TRAILER);

    let mut decoder = GifDecoder::new();
    assert_eq!(decoder.decode_all(&file).unwrap(), pixels);
    assert_eq!(decoder.frames_decoded(), 1);
}
