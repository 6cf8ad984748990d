//! Instruction table and timing scorer.
//!
//! `tile2sam.py` matches instruction *text* against an ordered regex
//! table to find its byte size and T-state cost; the first matching
//! pattern wins, and a string nothing matches is a programmer error.
//! With a tagged [`Instr`](super::instr::Instr) the compiler's exhaustive
//! `match` plays the role of "first matching pattern wins" — there is no
//! instruction the table lacks an entry for, because every variant has
//! one built in, and [`Instr::Raw`] carries its own. The scorer is
//! therefore total rather than fallible; the original's unknown-
//! instruction failure mode is eliminated by construction rather than
//! caught at run time.

use super::instr::{Instr, Stmt};

/// Byte size and nominal T-state cost of a single instruction.
pub fn instr_cost(instr: &Instr) -> (u32, u32) {
    use Instr::*;
    match instr {
        LdRIndHl(_) => (1, 8),               // ld r,(hl)
        LdIndHlOperand(op) => match op {
            super::instr::Operand::Reg(_) => (1, 8), // ld (hl),r
            super::instr::Operand::Imm(_) => (2, 12), // ld (hl),n
        },
        And(op) | Or(op) | Sub(op) => match op {
            super::instr::Operand::Reg(_) => (1, 4), // and|or|sub r
            super::instr::Operand::Imm(_) => (2, 8), // and|or|sub n
        },
        AddA(op) | AdcA(op) | SbcA(op) => match op {
            super::instr::Operand::Reg(_) => (1, 4), // add|adc|sbc a,r
            super::instr::Operand::Imm(_) => (2, 8), // add|adc|sbc a,n
        },
        LdAFromReg(_) | LdRegFromA(_) => (1, 4), // ld r,r
        IncReg(_) | DecReg(_) => (1, 4),         // inc|dec r
        LdRegImm(_, _) => (2, 8),                // ld r,n
        LdPairImmHex(_, _) => (3, 12), // ld rr,n
        AddHlPair(_) => (1, 8),                  // add hl,rr
        Push(_) => (1, 16),
        Pop(_) => (1, 12),
        LdSpHl => (1, 8),
        LdSpZero => (3, 12), // ld sp,n
        ExDeHl => (1, 4),
        Ldi => (2, 20),
        Scf => (1, 4),
        RrReg(_) | SrlReg(_) => (2, 8), // CB-prefixed shift/rotate
        JpC(_) => (3, 10),              // jp c,nn (never fed through the scorer: see module docs)
        Ret => (1, 12),
        Raw { bytes, tstates, .. } => (*bytes, *tstates),
    }
}

/// Sum the nominal T-states of a routine. Labels cost nothing.
pub fn nominal_timing(routine: &[Stmt]) -> u32 {
    routine
        .iter()
        .map(|stmt| match stmt {
            Stmt::Label(_) => 0,
            Stmt::Instr(i) => instr_cost(i).1,
        })
        .sum()
}
