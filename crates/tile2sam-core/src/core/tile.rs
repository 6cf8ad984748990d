//! Tile driver: combines the six strategy generators into one tile's
//! worth of labeled assembly text.
//!
//! Ported from `original_source/tile2sam.py`'s `tile_to_code`; see
//! `spec.md` §2 ("Tile driver") and §6 ("Generator output").

use super::codegen::{clear, draw, preamble, save_restore};
use super::emit::format_code;
use super::instr::Stmt;
use super::selector::fastest_code;
use super::types::Byte;

/// One of the six primitives a caller may request per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    Masked,
    Unmasked,
    Save,
    Restore,
    Clear,
    Rect,
}

impl Routine {
    /// Parse the comma-separated `--code` option's routine names.
    pub fn parse(name: &str) -> Option<Routine> {
        match name {
            "masked" => Some(Routine::Masked),
            "unmasked" => Some(Routine::Unmasked),
            "save" => Some(Routine::Save),
            "restore" => Some(Routine::Restore),
            "clear" => Some(Routine::Clear),
            "rect" => Some(Routine::Rect),
            _ => None,
        }
    }
}

/// One tile's even- and odd-aligned image/mask byte planes, as produced
/// by the packing front end for a given width/height.
pub struct TilePlanes<'a> {
    pub image0: &'a [Byte],
    pub mask0: &'a [Byte],
    pub image1: &'a [Byte],
    pub mask1: &'a [Byte],
    pub width_bytes: usize,
    pub height: usize,
}

fn combined_mask(planes: &TilePlanes, shifted: bool) -> Vec<Byte> {
    if shifted {
        planes
            .mask0
            .iter()
            .zip(planes.mask1)
            .map(|(a, b)| a | b)
            .collect()
    } else {
        planes.mask0.to_vec()
    }
}

fn with_preamble(low: bool, body: Vec<Stmt>) -> Vec<Stmt> {
    let mut full: Vec<Stmt> = preamble::coord_preamble(low).into_iter().map(Stmt::Instr).collect();
    full.extend(body);
    full
}

/// Generate the requested routines for one tile, as a single string of
/// assembly text ready to append to a `.asm` file.
pub fn generate_tile_routines(
    planes: &TilePlanes,
    shifted: bool,
    low: bool,
    name: &str,
    requested: &[Routine],
) -> String {
    let has = |r: Routine| requested.contains(&r);
    let mut out = String::from("; tile2sam generated code\n\n");

    for (masked, kind, prefix) in [(true, Routine::Masked, "masked"), (false, Routine::Unmasked, "unmasked")]
    {
        if !has(kind) {
            continue;
        }
        let label = format!("{}_{}", prefix, name);
        if !shifted {
            let code = draw::generate_draw(planes.image0, planes.mask0, planes.width_bytes, planes.height, masked);
            out += &format_code(Some(&label), &code);
        } else {
            out += &format_code(Some(&label), &preamble::shift_dispatch(low, &label));
            let code0 = draw::generate_draw(planes.image0, planes.mask0, planes.width_bytes, planes.height, masked);
            out += &format_code(Some(&format!("{}0", label)), &code0);
            let code1 = draw::generate_draw(planes.image1, planes.mask1, planes.width_bytes, planes.height, masked);
            out += &format_code(Some(&format!("{}1", label)), &code1);
        }
    }

    if has(Routine::Save) || has(Routine::Restore) {
        let mask = combined_mask(planes, shifted);
        let (mstack_save, mstack_restore) =
            save_restore::generate_save_restore_mem_stack(&mask, planes.width_bytes, planes.height);
        let (ldi_save, ldi_restore) =
            save_restore::generate_save_restore_ldi(&mask, planes.width_bytes, planes.height);

        let candidates = vec![
            vec![mstack_save.clone(), mstack_restore.clone()],
            vec![ldi_save.clone(), ldi_restore.clone()],
        ];
        let (save_code, restore_code) = if fastest_code(&candidates) == 0 {
            (mstack_save, mstack_restore)
        } else {
            (ldi_save, ldi_restore)
        };

        out += &format_code(Some(&format!("save_{}", name)), &with_preamble(low, save_code));
        out += &format_code(Some(&format!("restore_{}", name)), &with_preamble(low, restore_code));
    }

    if has(Routine::Clear) {
        let mask = combined_mask(planes, shifted);
        let zero = vec![0u8; mask.len()];
        let poke = draw::generate_draw(&zero, &mask, planes.width_bytes, planes.height, false);
        let push = clear::generate_clear_push(&mask, planes.width_bytes, planes.height);

        let candidates = vec![vec![poke.clone()], vec![push.clone()]];
        let chosen = if fastest_code(&candidates) == 0 { poke } else { push };
        out += &format_code(Some(&format!("clear_{}", name)), &with_preamble(low, chosen));
    }

    if has(Routine::Rect) {
        let cells = planes.width_bytes * planes.height;
        let no_image = vec![0u8; cells];
        let full_mask = vec![0xffu8; cells];
        let poke = draw::generate_draw(&no_image, &full_mask, planes.width_bytes, planes.height, false);
        let push = clear::generate_clear_rect_push(planes.width_bytes, planes.height);

        let candidates = vec![vec![poke.clone()], vec![push.clone()]];
        let chosen = if fastest_code(&candidates) == 0 { poke } else { push };
        let label = format!("clear_rect_{}x{}", planes.width_bytes, planes.height);
        out += &format_code(Some(&label), &with_preamble(low, chosen));
    }

    out
}
