//! Clear and clear-rect push strategies.
//!
//! Ported from `original_source/tile2sam.py`'s `generate_clear_push` and
//! `generate_clear_rect_push`; see `spec.md` §4.4.3. The poke-strategy
//! counterpart to each of these is just [`super::draw::generate_draw`]
//! called with an all-zero image array, so it has no dedicated function
//! here.

use super::row_order;
use crate::core::delta::reg16_change;
use crate::core::instr::{Instr, Operand, Stmt};
use crate::core::types::{Addr, Byte, Reg8, RegPair};

fn sp_patch() -> Instr {
    Instr::Raw {
        text: "ld (@+sp_restore+1),sp".to_owned(),
        bytes: 4,
        tstates: 24,
    }
}

/// Zero-fill `from..=end_addr`-per-row pairs via `push de` (`de == 0`),
/// emitting a single `ld (hl),e` first when the run length is odd.
fn emit_runs(mut code: Vec<Instr>, runs: &[(Addr, usize)]) -> Vec<Stmt> {
    let mut last_addr: Addr = 0;

    for &(end_addr, fill_len) in runs {
        let odd = (fill_len & 1) != 0;
        let target = end_addr - if odd { 1 } else { 0 };
        let (d, _) = reg16_change(last_addr, target, RegPair::Hl, Some(RegPair::Bc), None);
        code.extend(d);
        last_addr = target;

        if odd {
            code.push(Instr::LdIndHlOperand(Operand::Reg(Reg8::E)));
        }
        if fill_len > 1 {
            code.push(Instr::LdSpHl);
            for _ in 0..(fill_len / 2) {
                code.push(Instr::Push(RegPair::De));
            }
        }
    }

    let mut stmts: Vec<Stmt> = code.into_iter().map(Stmt::Instr).collect();
    stmts.push(Stmt::Label("@sp_restore".to_owned()));
    stmts.push(Stmt::Instr(Instr::LdSpZero));
    stmts.push(Stmt::Instr(Instr::Ret));
    stmts
}

/// Zero only the opaque span of each row touched by the mask.
pub fn generate_clear_push(mask_data: &[Byte], width_bytes: usize, height: usize) -> Vec<Stmt> {
    let mut runs: Vec<(Addr, usize)> = Vec::new();

    for y in row_order(height) {
        let row = &mask_data[y * width_bytes..(y + 1) * width_bytes];
        let start = row.iter().position(|&m| m != 0);
        if let Some(start) = start {
            let end = row.iter().rposition(|&m| m != 0).unwrap() + 1;
            let end_addr = (y * 128 + end) as Addr;
            runs.push((end_addr, end - start));
        }
    }

    let prologue = vec![sp_patch(), Instr::LdPairImmHex(RegPair::De, 0)];
    emit_runs(prologue, &runs)
}

/// Zero the whole tile-sized rectangle regardless of mask content.
pub fn generate_clear_rect_push(width_bytes: usize, height: usize) -> Vec<Stmt> {
    let runs: Vec<(Addr, usize)> = row_order(height)
        .into_iter()
        .map(|y| ((y * 128 + width_bytes) as Addr, width_bytes))
        .collect();

    let prologue = vec![sp_patch(), Instr::LdPairImmHex(RegPair::De, 0)];
    emit_runs(prologue, &runs)
}
