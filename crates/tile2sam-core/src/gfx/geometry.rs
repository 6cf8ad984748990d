//! Crop, scale, tile-size and tile-selection geometry parsing.
//!
//! Ported from `original_source/tile2sam.py`'s `crop_image`/
//! `scale_image`/`get_tile_size`/`get_tile_selection`. The actual crop/
//! scale pixel transforms are the CLI's job (they operate on a decoded
//! `image::DynamicImage`); this module only parses the option strings
//! into plain geometry values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{CResult, InvalidInputError};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static FLOATS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d.]+").unwrap());

fn digits(s: &str) -> Vec<u32> {
    DIGITS.find_iter(s).filter_map(|m| m.as_str().parse().ok()).collect()
}

/// A crop region in pixels: `width x height`, optionally offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Parse `WxH` or `WxH+X+Y`.
pub fn parse_crop(spec: &str) -> CResult<Crop> {
    let nums = digits(spec);
    match nums.as_slice() {
        [w, h] => Ok(Crop { width: *w, height: *h, x: 0, y: 0 }),
        [w, h, x, y] => Ok(Crop { width: *w, height: *h, x: *x, y: *y }),
        _ => Err(Box::new(InvalidInputError(
            "invalid crop region (should be WxH or WxH+X+Y)".to_owned(),
        ))),
    }
}

/// Horizontal/vertical scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

/// Parse `S` (uniform) or `HxV`.
pub fn parse_scale(spec: &str) -> CResult<Scale> {
    let nums: Vec<f64> = FLOATS
        .find_iter(spec)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    match nums.as_slice() {
        [s] => Ok(Scale { x: *s, y: *s }),
        [x, y, ..] => Ok(Scale { x: *x, y: *y }),
        _ => Err(Box::new(InvalidInputError("invalid scale factors".to_owned()))),
    }
}

/// Parse `N` (square) or `WxH` tile dimensions.
pub fn parse_tile_size(spec: &str) -> CResult<(u32, u32)> {
    let nums = digits(spec);
    match nums.as_slice() {
        [n] => Ok((*n, *n)),
        [w, h, ..] => Ok((*w, *h)),
        _ => Err(Box::new(InvalidInputError("invalid tile dimensions".to_owned()))),
    }
}

/// An inclusive tile-index range; `start > end` means descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub start: i64,
    pub end: i64,
}

/// Determine the tile selection: `None` selects every tile; a bare
/// count selects `0..N-1`; a comma list of `N` or `N-M` tokens selects
/// each listed (possibly descending) range.
pub fn parse_tile_selection(spec: Option<&str>, max_tiles: u32) -> CResult<Vec<TileRange>> {
    let spec = match spec {
        None => return Ok(vec![TileRange { start: 0, end: i64::from(max_tiles) - 1 }]),
        Some(s) => s,
    };

    if let Ok(n) = parse_int_auto(spec.trim()) {
        if n > 0 {
            let end = n.min(i64::from(max_tiles)) - 1;
            return Ok(vec![TileRange { start: 0, end }]);
        }
    }

    spec.split(',')
        .map(|tok| {
            let tok = tok.trim();
            let parts: Vec<&str> = tok.split('-').collect();
            let nums: Option<Vec<i64>> = parts.iter().map(|p| parse_int_auto(p.trim())).collect();
            match nums {
                Some(n) if n.len() == 1 => Ok(TileRange { start: n[0], end: n[0] }),
                Some(n) if n.len() >= 2 => Ok(TileRange { start: n[0], end: n[1] }),
                _ => Err(Box::new(InvalidInputError(
                    "invalid tile count or range".to_owned(),
                )) as Box<dyn std::error::Error>),
            }
        })
        .collect()
}

fn parse_int_auto(tok: &str) -> Result<i64, std::num::ParseIntError> {
    if let Some(hex) = tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        tok.parse::<i64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_without_offset() {
        assert_eq!(parse_crop("32x16").unwrap(), Crop { width: 32, height: 16, x: 0, y: 0 });
    }

    #[test]
    fn crop_with_offset() {
        assert_eq!(
            parse_crop("32x16+4+8").unwrap(),
            Crop { width: 32, height: 16, x: 4, y: 8 }
        );
    }

    #[test]
    fn uniform_scale() {
        assert_eq!(parse_scale("2.0").unwrap(), Scale { x: 2.0, y: 2.0 });
    }

    #[test]
    fn non_uniform_scale() {
        assert_eq!(parse_scale("2x0.5").unwrap(), Scale { x: 2.0, y: 0.5 });
    }

    #[test]
    fn square_tile_size() {
        assert_eq!(parse_tile_size("16").unwrap(), (16, 16));
    }

    #[test]
    fn rect_tile_size() {
        assert_eq!(parse_tile_size("16x8").unwrap(), (16, 8));
    }

    #[test]
    fn no_selection_spans_all_tiles() {
        let sel = parse_tile_selection(None, 10).unwrap();
        assert_eq!(sel, vec![TileRange { start: 0, end: 9 }]);
    }

    #[test]
    fn bare_count_clamped_to_max() {
        let sel = parse_tile_selection(Some("100"), 10).unwrap();
        assert_eq!(sel, vec![TileRange { start: 0, end: 9 }]);
    }

    #[test]
    fn comma_separated_ranges_may_descend() {
        let sel = parse_tile_selection(Some("0-2,5-3"), 10).unwrap();
        assert_eq!(
            sel,
            vec![TileRange { start: 0, end: 2 }, TileRange { start: 5, end: 3 }]
        );
    }
}
