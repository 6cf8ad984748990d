//! Save/restore strategies: `ldi`-based and memory+stack-based.
//!
//! Ported from `original_source/tile2sam.py`'s `generate_save_restore_ldi`
//! and `generate_save_restore_mem_stack`; see `spec.md` §4.4.2.

use super::row_order;
use crate::core::delta::reg16_change;
use crate::core::instr::{Instr, Operand, Stmt};
use crate::core::types::{Addr, Byte, Reg8, RegPair};

/// `ldi`-based save/restore: left-to-right on every visited row, since
/// `ldi` itself post-increments both pointers.
pub fn generate_save_restore_ldi(
    mask_data: &[Byte],
    width_bytes: usize,
    height: usize,
) -> (Vec<Stmt>, Vec<Stmt>) {
    let mut cell_addrs: Vec<Addr> = Vec::new();
    for y in row_order(height) {
        for x in 0..width_bytes {
            if mask_data[y * width_bytes + x] != 0 {
                cell_addrs.push((y * 128 + x) as Addr);
            }
        }
    }

    let mut last_addr: Addr = 0;
    let mut save_code = Vec::new();
    let mut restore_code = vec![Instr::ExDeHl];

    for addr in cell_addrs {
        let (d, _) = reg16_change(last_addr, addr, RegPair::Hl, Some(RegPair::Bc), None);
        save_code.extend(d);
        save_code.push(Instr::Ldi);

        let (d, _) = reg16_change(last_addr, addr, RegPair::De, None, None);
        restore_code.extend(d);
        restore_code.push(Instr::Ldi);

        last_addr = addr + 1;
    }

    save_code.push(Instr::Ret);
    restore_code.push(Instr::Ret);

    (
        save_code.into_iter().map(Stmt::Instr).collect(),
        restore_code.into_iter().map(Stmt::Instr).collect(),
    )
}

/// Memory+stack save/restore: redirects `sp` above a scratch buffer and
/// pairs two opaque-cell bytes per `push`/`pop`.
pub fn generate_save_restore_mem_stack(
    mask_data: &[Byte],
    width_bytes: usize,
    height: usize,
) -> (Vec<Stmt>, Vec<Stmt>) {
    let mut cell_addrs: Vec<Addr> = Vec::new();
    let mut dx: i32 = 1;

    for y in row_order(height) {
        let cols: Vec<usize> = if dx > 0 {
            (0..width_bytes).collect()
        } else {
            (0..width_bytes).rev().collect()
        };
        for x in cols {
            if mask_data[y * width_bytes + x] != 0 {
                cell_addrs.push((y * 128 + x) as Addr);
            }
        }
        dx = -dx;
    }

    let stack_space = cell_addrs.len() as u16;
    let sp_patch = || Instr::Raw {
        text: "ld (@+sp_restore+1),sp".to_owned(),
        bytes: 4,
        tstates: 24,
    };

    let mut last_addr: Addr = 0;
    let mut first_byte = true;
    let mut save_code = vec![
        sp_patch(),
        Instr::ExDeHl,
        Instr::LdPairImmHex(RegPair::Bc, stack_space.wrapping_add(1) & !1u16),
        Instr::AddHlPair(RegPair::Bc),
        Instr::LdSpHl,
        Instr::ExDeHl,
    ];

    for &addr in &cell_addrs {
        let (d, _) = reg16_change(last_addr, addr, RegPair::Hl, Some(RegPair::Bc), None);
        save_code.extend(d);

        if first_byte {
            save_code.push(Instr::LdRIndHl(Reg8::E));
        } else {
            save_code.push(Instr::LdRIndHl(Reg8::D));
            save_code.push(Instr::Push(RegPair::De));
        }

        last_addr = addr;
        first_byte = !first_byte;
    }

    if !first_byte {
        save_code.push(Instr::Push(RegPair::De));
    }

    let mut save_stmts: Vec<Stmt> = save_code.into_iter().map(Stmt::Instr).collect();
    save_stmts.push(Stmt::Label("@sp_restore".to_owned()));
    save_stmts.push(Stmt::Instr(Instr::LdSpZero));
    save_stmts.push(Stmt::Instr(Instr::Ret));

    let mut restore_code = vec![sp_patch(), Instr::ExDeHl, Instr::LdSpHl, Instr::ExDeHl];

    let mut last_addr: Addr = 0;
    let mut first_byte = (stack_space & 1) == 0;
    if !first_byte {
        restore_code.push(Instr::Pop(RegPair::De));
    }

    for &addr in cell_addrs.iter().rev() {
        let (d, _) = reg16_change(last_addr, addr, RegPair::Hl, Some(RegPair::Bc), None);
        restore_code.extend(d);

        if first_byte {
            restore_code.push(Instr::Pop(RegPair::De));
            restore_code.push(Instr::LdIndHlOperand(Operand::Reg(Reg8::D)));
        } else {
            restore_code.push(Instr::LdIndHlOperand(Operand::Reg(Reg8::E)));
        }

        last_addr = addr;
        first_byte = !first_byte;
    }

    let mut restore_stmts: Vec<Stmt> = restore_code.into_iter().map(Stmt::Instr).collect();
    restore_stmts.push(Stmt::Label("@sp_restore".to_owned()));
    restore_stmts.push(Stmt::Instr(Instr::LdSpZero));
    restore_stmts.push(Stmt::Instr(Instr::Ret));

    (save_stmts, restore_stmts)
}
