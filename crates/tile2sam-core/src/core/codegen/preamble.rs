//! Coordinate-decoding preamble and shift dispatch stub.
//!
//! Callers pass `h=y, l=x_bytes` (i.e. `y*256 + x`); the preamble turns
//! that into a true display offset and, for the high screen page, sets
//! the page select bit. See `spec.md` §4.4.4.

use crate::core::instr::{Instr, Stmt};
use crate::core::types::Reg8;

/// `scf ; rr h ; rr l` (default, page at `0x8000`) or `srl h ; rr l`
/// (`low` flag, page at `0x0000`).
pub fn coord_preamble(low: bool) -> Vec<Instr> {
    if low {
        vec![Instr::SrlReg(Reg8::H), Instr::RrReg(Reg8::L)]
    } else {
        vec![Instr::Scf, Instr::RrReg(Reg8::H), Instr::RrReg(Reg8::L)]
    }
}

/// The entry-point body for a shifted routine pair: preamble followed
/// by `jp c,<label>1`, dispatching to the odd-aligned variant when the
/// shift bit lands in the carry.
pub fn shift_dispatch(low: bool, label: &str) -> Vec<Stmt> {
    let mut code = coord_preamble(low);
    code.push(Instr::JpC(format!("{}1", label)));
    code.into_iter().map(Stmt::Instr).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preamble_sets_carry_first() {
        assert_eq!(
            coord_preamble(false),
            vec![Instr::Scf, Instr::RrReg(Reg8::H), Instr::RrReg(Reg8::L)]
        );
    }

    #[test]
    fn low_page_preamble_has_no_scf() {
        assert_eq!(coord_preamble(true), vec![Instr::SrlReg(Reg8::H), Instr::RrReg(Reg8::L)]);
    }

    #[test]
    fn shift_dispatch_jumps_to_suffixed_label() {
        let stmts = shift_dispatch(false, "masked_sprite0_name");
        assert_eq!(
            stmts,
            vec![
                Stmt::Instr(Instr::Scf),
                Stmt::Instr(Instr::RrReg(Reg8::H)),
                Stmt::Instr(Instr::RrReg(Reg8::L)),
                Stmt::Instr(Instr::JpC("masked_sprite0_name1".to_owned())),
            ]
        );
    }
}
