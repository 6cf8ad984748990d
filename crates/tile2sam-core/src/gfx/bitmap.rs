//! Tile packing: CLUT-index bitmaps to 4-bpp (or lower) packed byte
//! rows, and the even/odd-aligned plane pair the code generator needs.
//!
//! Ported from `original_source/tile2sam.py`'s `image_data_bytes`,
//! `tile_to_data` and the `img0`/`img1` construction in `tile_to_code`.

use crate::errors::{CResult, InvalidInputError};
use crate::core::types::Byte;

/// A tile reduced to CLUT indices (`0..16` for mode 4), row-major.
pub struct TileBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Byte>,
}

/// Bits per pixel for a screen mode (`1..=4`).
pub fn bpp_from_mode(mode: u8) -> CResult<u8> {
    match mode {
        1 => Ok(1),
        2 => Ok(1),
        3 => Ok(2),
        4 => Ok(4),
        _ => Err(Box::new(InvalidInputError(format!(
            "invalid screen mode ({}), must be 1-4",
            mode
        )))),
    }
}

/// Pack a row of CLUT indices into display bytes and parallel mask
/// bytes (`0xF`-per-nibble where the source index is non-zero). Any
/// trailing pixels that don't fill a whole byte are dropped, matching
/// the original's group-and-zip truncation (callers pad beforehand).
pub fn image_data_bytes(pixels: &[Byte], bpp: u8) -> (Vec<Byte>, Vec<Byte>) {
    let per_byte = (8 / bpp) as usize;
    let mask_value = (1u8 << bpp) - 1;

    let mut data = Vec::with_capacity(pixels.len() / per_byte);
    let mut mask = Vec::with_capacity(pixels.len() / per_byte);

    for chunk in pixels.chunks(per_byte) {
        if chunk.len() < per_byte {
            break;
        }
        let mut d = 0u8;
        let mut m = 0u8;
        for (i, &n) in chunk.iter().rev().enumerate() {
            d |= n << (bpp as usize * i);
            if n != 0 {
                m |= mask_value << (bpp as usize * i);
            }
        }
        data.push(d);
        mask.push(m);
    }

    (data, mask)
}

/// Pack a tile for plain data-mode output (no code generation): pads
/// `shift` pixels on the left and enough zero columns on the right to
/// reach a whole number of packed bytes, then returns the image bytes.
pub fn pack_tile_data(tile: &TileBitmap, bpp: u8, shift: u8) -> Vec<Byte> {
    let pixels_per_byte = (8 / bpp) as usize;
    let pad_left = shift as usize;
    let pad_right = (pixels_per_byte - (pad_left + tile.width) % pixels_per_byte) % pixels_per_byte;
    let sprite_width = pad_left + tile.width + pad_right;

    let mut padded = vec![0u8; sprite_width * tile.height];
    for y in 0..tile.height {
        for x in 0..tile.width {
            padded[y * sprite_width + pad_left + x] = tile.pixels[y * tile.width + x];
        }
    }

    image_data_bytes(&padded, bpp).0
}

/// Even- and odd-aligned 4bpp packed planes for code generation. Both
/// planes share `width_bytes`/`height`; `odd` is the tile shifted one
/// pixel right, as `tile_to_code`'s `img1` paste does, truncating any
/// pixel pushed past the (even-padded) canvas width.
pub struct ShiftedPlanes {
    pub image0: Vec<Byte>,
    pub mask0: Vec<Byte>,
    pub image1: Vec<Byte>,
    pub mask1: Vec<Byte>,
    pub width_bytes: usize,
    pub height: usize,
}

pub fn pack_tile_code_planes(tile: &TileBitmap) -> ShiftedPlanes {
    let width_bytes = (tile.width + 1) / 2;
    let canvas_width = width_bytes * 2;

    let mut even = vec![0u8; canvas_width * tile.height];
    let mut odd = vec![0u8; canvas_width * tile.height];

    for y in 0..tile.height {
        for x in 0..tile.width {
            even[y * canvas_width + x] = tile.pixels[y * tile.width + x];
            let shifted_x = x + 1;
            if shifted_x < canvas_width {
                odd[y * canvas_width + shifted_x] = tile.pixels[y * tile.width + x];
            }
        }
    }

    let (image0, mask0) = image_data_bytes(&even, 4);
    let (image1, mask1) = image_data_bytes(&odd, 4);

    ShiftedPlanes {
        image0,
        mask0,
        image1,
        mask1,
        width_bytes,
        height: tile.height,
    }
}
