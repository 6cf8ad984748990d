//! End-to-end tests driving `tile2sam-core` the way `main.rs` does:
//! decode an image, quantize it to the SAM palette, build a CLUT, slice
//! a tile and pack or generate code for it. Grounded on the teacher's
//! `tests/test_assembler.rs` convention of exercising the library crate
//! from a top-level `tests/` directory rather than spawning the binary.

use image::{ImageBuffer, Rgb, RgbImage};

use tile2sam_core::core::tile::{generate_tile_routines, Routine, TilePlanes};
use tile2sam_core::gfx::bitmap::{bpp_from_mode, pack_tile_code_planes, pack_tile_data, TileBitmap};
use tile2sam_core::gfx::clut::{apply_clut, build_clut, quantize_to_sam_palette};
use tile2sam_core::gfx::palette::sam_palette;

/// Build a tiny 2x2 RGB image, round-trip it through the `image`
/// crate's own PNG encoder/decoder, and confirm the pixels survive.
#[test]
fn png_round_trip_preserves_pixels() {
    let mut img: RgbImage = ImageBuffer::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(0, 1, Rgb([0, 0, 255]));
    img.put_pixel(1, 1, Rgb([0, 0, 0]));

    let mut bytes: Vec<u8> = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode PNG");

    let decoded = image::load_from_memory(&bytes).expect("decode PNG").to_rgb8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([255, 0, 0]));
    assert_eq!(decoded.get_pixel(1, 1), &Rgb([0, 0, 0]));
}

/// Decode a synthetic image, quantize and CLUT-map it, then pack a
/// single tile's worth of pixels as plain mode-4 data — the data-mode
/// path `main.rs` takes when `--code` is absent.
#[test]
fn synthetic_image_packs_to_mode4_data() {
    let mut img: RgbImage = ImageBuffer::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 0, 0]));
    img.put_pixel(0, 1, Rgb([0, 255, 0]));
    img.put_pixel(1, 1, Rgb([0, 255, 0]));

    let palette = sam_palette();
    let rgb_pixels: Vec<(u8, u8, u8)> = img.pixels().map(|p| (p[0], p[1], p[2])).collect();
    let sam_indices = quantize_to_sam_palette(&rgb_pixels, &palette);

    let bpp = bpp_from_mode(4).unwrap();
    let clut = build_clut(&sam_indices, None, bpp).unwrap();
    assert!(clut.len() <= 16);

    let clut_indices = apply_clut(&sam_indices, &clut);
    let tile = TileBitmap {
        width: 2,
        height: 2,
        pixels: clut_indices,
    };
    let packed = pack_tile_data(&tile, bpp, 0);
    // Two rows of two 4bpp pixels packed two-per-byte: one byte per row.
    assert_eq!(packed.len(), 2);
}

/// Same synthetic tile, but through the code-generation path: packed
/// into shifted planes and handed to the Z80 routine generator.
#[test]
fn synthetic_image_generates_draw_routine() {
    let mut img: RgbImage = ImageBuffer::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 0, 0]));
    img.put_pixel(0, 1, Rgb([255, 0, 0]));
    img.put_pixel(1, 1, Rgb([255, 0, 0]));

    let palette = sam_palette();
    let rgb_pixels: Vec<(u8, u8, u8)> = img.pixels().map(|p| (p[0], p[1], p[2])).collect();
    let sam_indices = quantize_to_sam_palette(&rgb_pixels, &palette);

    let bpp = bpp_from_mode(4).unwrap();
    let clut = build_clut(&sam_indices, None, bpp).unwrap();
    let clut_indices = apply_clut(&sam_indices, &clut);
    let tile = TileBitmap {
        width: 2,
        height: 2,
        pixels: clut_indices,
    };

    let planes = pack_tile_code_planes(&tile);
    let tile_planes = TilePlanes {
        image0: &planes.image0,
        mask0: &planes.mask0,
        image1: &planes.image1,
        mask1: &planes.mask1,
        width_bytes: planes.width_bytes,
        height: planes.height,
    };
    let text = generate_tile_routines(&tile_planes, false, false, "solid", &[Routine::Unmasked]);
    assert!(text.contains("unmasked_solid:\n"));
    assert!(text.trim_end().ends_with("ret"));
}
