//! tile2sam command-line front end.
//!
//! Decodes a source image, quantizes it to the SAM Coupé hardware
//! palette, slices it into tiles and either packs raw display data or
//! generates Z80 drawing routines per tile. Mirrors
//! `original_source/tile2sam.py`'s `main`/`tile_to_data`/`tile_to_code`.

mod logger;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use argh::FromArgs;
use image::imageops;

use tile2sam_core::core::tile::{generate_tile_routines, Routine, TilePlanes};
use tile2sam_core::errors::{CResult, InvalidInputError, NoTilesError};
use tile2sam_core::gfx::bitmap::{bpp_from_mode, pack_tile_code_planes, pack_tile_data, TileBitmap};
use tile2sam_core::gfx::clut::{apply_clut, build_clut, parse_colour_list, quantize_to_sam_palette};
use tile2sam_core::gfx::geometry::{parse_crop, parse_scale, parse_tile_selection, parse_tile_size};
use tile2sam_core::gfx::palette::sam_palette;

/// Convert raster tile images into SAM Coupé graphics data and Z80 code.
#[derive(FromArgs)]
struct Args {
    /// output data screen mode (1-4)
    #[argh(option, short = 'm', default = "4")]
    mode: u8,

    /// custom colour file or list
    #[argh(option, short = 'c')]
    clut: Option<String>,

    /// custom output filename
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// append to existing output file
    #[argh(switch, short = 'a')]
    append: bool,

    /// write clut to .pal file
    #[argh(switch, short = 'p')]
    pal: bool,

    /// write offsets index to .idx
    #[argh(switch, short = 'i')]
    index: bool,

    /// tile count or list of ranges (N-M)
    #[argh(option, short = 't')]
    tiles: Option<String>,

    /// Z80 code to generate
    #[argh(option, short = 'z')]
    code: Option<String>,

    /// names for sprite labels
    #[argh(option, short = 'n')]
    names: Option<String>,

    /// screen at 0 instead of 0x8000
    #[argh(switch, short = '0')]
    low: bool,

    /// quiet mode
    #[argh(switch, short = 'q')]
    quiet: bool,

    /// crop region (WxH or WxH+X+Y)
    #[argh(option)]
    crop: Option<String>,

    /// scale region (S or HxV)
    #[argh(option)]
    scale: Option<String>,

    /// pixels to shift right (data mode); 0 or 1 selects the unshifted
    /// or shifted-alignment routine pair for code generation
    #[argh(option)]
    shift: Option<u32>,

    /// source image path
    #[argh(positional)]
    image: PathBuf,

    /// tile dimensions, WxH or N
    #[argh(positional)]
    tilesize: String,
}

fn main() {
    let args: Args = argh::from_env();

    let level = if args.quiet { log::LevelFilter::Warn } else { log::LevelFilter::Info };
    if let Err(err) = logger::init_logger(level) {
        eprintln!("error: failed to start logger: {}", err);
        process::exit(1);
    }

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> CResult {
    let bpp = bpp_from_mode(args.mode)?;
    let (tile_width, tile_height) = parse_tile_size(&args.tilesize)?;

    let routines = parse_requested_routines(args.code.as_deref())?;
    let shift = args.shift.unwrap_or(0);
    if routines.is_some() {
        if args.mode != 4 {
            return Err(Box::new(InvalidInputError(
                "code generation requires mode 4".to_owned(),
            )));
        }
        if shift > 1 {
            return Err(Box::new(InvalidInputError(
                "code generation supports shift 0 or 1 only".to_owned(),
            )));
        }
    }

    let dynamic = image::open(&args.image)?;
    let mut img = dynamic.to_rgb8();
    log::info!("Source image {} is {}x{}", args.image.display(), img.width(), img.height());

    if let Some(spec) = &args.crop {
        let crop = parse_crop(spec)?;
        img = imageops::crop(&mut img, crop.x, crop.y, crop.width, crop.height).to_image();
        log::info!("Cropped image to {}x{}", img.width(), img.height());
    }

    if let Some(spec) = &args.scale {
        let scale = parse_scale(spec)?;
        let new_width = ((img.width() as f64) * scale.x).round().max(1.0) as u32;
        let new_height = ((img.height() as f64) * scale.y).round().max(1.0) as u32;
        img = imageops::resize(&img, new_width, new_height, imageops::FilterType::Nearest);
        log::info!("Scaled image to {}x{}", img.width(), img.height());
    }

    let tiles_x = img.width() / tile_width;
    let tiles_y = img.height() / tile_height;
    if tiles_x == 0 || tiles_y == 0 {
        return Err(Box::new(NoTilesError));
    }
    log::info!(
        "Contains {}x{} grid of {}x{} tiles",
        tiles_x,
        tiles_y,
        tile_width,
        tile_height
    );

    let tile_select = parse_tile_selection(args.tiles.as_deref(), tiles_x * tiles_y)?;

    let palette = sam_palette();
    let rgb_pixels: Vec<(u8, u8, u8)> =
        img.as_raw().chunks_exact(3).map(|c| (c[0], c[1], c[2])).collect();
    let sam_indices = quantize_to_sam_palette(&rgb_pixels, &palette);

    let user_clut = match &args.clut {
        None => None,
        Some(spec) => Some(resolve_clut_spec(spec)?),
    };
    let clut = build_clut(&sam_indices, user_clut, bpp)?;
    let clut_indices = apply_clut(&sam_indices, &clut);

    let names: Vec<String> = args
        .names
        .as_deref()
        .map(|s| s.split(',').map(|n| n.trim().to_owned()).collect())
        .unwrap_or_default();

    let mut gfx_data: Vec<u8> = Vec::new();
    let mut index_data: Vec<u16> = Vec::new();
    let mut code_text = String::new();
    let mut num_tiles = 0u32;

    for range in &tile_select {
        let step: i64 = if range.start <= range.end { 1 } else { -1 };
        let mut idx_tile = range.start;
        loop {
            let tile_index = idx_tile as u32;
            if tile_index >= tiles_x * tiles_y {
                if idx_tile == range.end {
                    break;
                }
                idx_tile += step;
                continue;
            }
            let x = (tile_index % tiles_x) * tile_width;
            let y = (tile_index / tiles_x) * tile_height;

            let pixels = extract_tile(&clut_indices, img.width(), x, y, tile_width, tile_height);
            let tile = TileBitmap {
                width: tile_width as usize,
                height: tile_height as usize,
                pixels,
            };

            if let Some(routines) = &routines {
                let name = names
                    .get(tile_index as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("sprite{}", tile_index));
                let planes = pack_tile_code_planes(&tile);
                let tile_planes = TilePlanes {
                    image0: &planes.image0,
                    mask0: &planes.mask0,
                    image1: &planes.image1,
                    mask1: &planes.mask1,
                    width_bytes: planes.width_bytes,
                    height: planes.height,
                };
                code_text += &generate_tile_routines(&tile_planes, shift == 1, args.low, &name, routines);
            } else {
                index_data.push(gfx_data.len() as u16);
                gfx_data.extend(pack_tile_data(&tile, bpp, shift as u8));
            }

            num_tiles += 1;
            if idx_tile == range.end {
                break;
            }
            idx_tile += step;
        }
    }

    let basename = args.output.clone().unwrap_or_else(|| args.image.clone()).with_extension("");

    if !gfx_data.is_empty() {
        let path = args.output.clone().unwrap_or_else(|| basename.with_extension("bin"));
        write_output(&path, &gfx_data, args.append)?;
        log::info!(
            "{} tile(s) of size {}x{} for mode {} = {} bytes",
            num_tiles,
            tile_width,
            tile_height,
            args.mode,
            gfx_data.len()
        );
    }

    if !code_text.is_empty() {
        let path = args.output.clone().unwrap_or_else(|| basename.with_extension("asm"));
        write_output(&path, code_text.as_bytes(), args.append)?;
    }

    if args.pal {
        fs::write(basename.with_extension("pal"), &clut)?;
    }

    if args.index && !index_data.is_empty() {
        let mut bytes = Vec::with_capacity(index_data.len() * 2);
        for offset in &index_data {
            bytes.push((offset >> 8) as u8);
            bytes.push((offset & 0xff) as u8);
        }
        fs::write(basename.with_extension("idx"), &bytes)?;
    }

    log::info!("{} colours: {:?}", clut.len(), clut);

    Ok(())
}

fn write_output(path: &Path, data: &[u8], append: bool) -> CResult {
    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let mut file = options.open(path)?;
    file.write_all(data)?;
    Ok(())
}

fn resolve_clut_spec(spec: &str) -> CResult<Vec<u8>> {
    if Path::new(spec).is_file() {
        Ok(fs::read(spec)?.into_iter().map(|b| b & 0x7f).collect())
    } else {
        parse_colour_list(spec.trim())
    }
}

fn parse_requested_routines(spec: Option<&str>) -> CResult<Option<Vec<Routine>>> {
    let spec = match spec {
        None => return Ok(None),
        Some(s) => s,
    };
    spec.split(',')
        .map(|tok| {
            let tok = tok.trim();
            Routine::parse(tok)
                .ok_or_else(|| Box::new(InvalidInputError(format!("invalid routine: {}", tok))) as Box<dyn std::error::Error>)
        })
        .collect::<CResult<Vec<Routine>>>()
        .map(Some)
}

fn extract_tile(buffer: &[u8], image_width: u32, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        let start = ((y + row) * image_width + x) as usize;
        out.extend_from_slice(&buffer[start..start + width as usize]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A `.pal` file is raw masked bytes (`-p`'s own output format);
    /// `-c <path>` on a later invocation must read it back the same
    /// way, not as a UTF-8 comma list.
    #[test]
    fn clut_spec_round_trips_a_pal_file() {
        let path = std::env::temp_dir().join("tile2sam_test_round_trip.pal");
        fs::write(&path, [0x01u8, 0xff, 0x80, 0x7f]).unwrap();

        let clut = resolve_clut_spec(path.to_str().unwrap()).unwrap();

        fs::remove_file(&path).ok();
        assert_eq!(clut, vec![0x01, 0x7f, 0x00, 0x7f]);
    }

    #[test]
    fn clut_spec_parses_inline_list_when_not_a_file() {
        let clut = resolve_clut_spec("5, 0x7f, 0o17").unwrap();
        assert_eq!(clut, vec![5, 0x7f, 0o17]);
    }
}
