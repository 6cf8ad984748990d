//! Tagged-variant instruction IR.
//!
//! `tile2sam.py` represents every instruction as a free-form string and
//! re-parses it with a regex table to cost it. That was fine for a
//! prototype; here each instruction is a small enum variant with a
//! `render()` method, and the timing table (`super::timing`) matches on
//! the variant instead of re-parsing text. Labels and the one piece of
//! raw addressing arithmetic the stack-patching strategies need keep an
//! escape hatch into free-form text.

use super::types::{Reg8, RegPair};

/// Either a literal byte or a register already holding that byte,
/// exactly as handed out by [`super::value_stream::ValueStream::next_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// A register serving the literal from the cache.
    Reg(Reg8),
    /// An inline immediate byte, printed as `&xx`.
    Imm(u8),
}

impl Operand {
    fn render(self) -> String {
        match self {
            Operand::Reg(r) => r.to_string(),
            Operand::Imm(b) => format!("&{:02x}", b),
        }
    }
}

/// A single Z80 instruction this generator ever emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// `ld r,(hl)`
    LdRIndHl(Reg8),
    /// `ld (hl),<operand>` — operand is a register or an inline immediate.
    LdIndHlOperand(Operand),
    /// `and <operand>`
    And(Operand),
    /// `or <operand>`
    Or(Operand),
    /// `sub <operand>`
    Sub(Operand),
    /// `add a,<operand>`
    AddA(Operand),
    /// `adc a,<operand>`
    AdcA(Operand),
    /// `sbc a,<operand>`
    SbcA(Operand),
    /// `ld a,r`
    LdAFromReg(Reg8),
    /// `ld r,a`
    LdRegFromA(Reg8),
    /// `inc r` (single 8-bit register)
    IncReg(Reg8),
    /// `dec r` (single 8-bit register)
    DecReg(Reg8),
    /// `ld r,&xx` — load a single cache register with an immediate.
    LdRegImm(Reg8, u8),
    /// `ld rr,&xxxx` — load a register pair with a 16-bit immediate,
    /// either two packed cache literals or a raw delta/count (rendered
    /// as its 16-bit two's-complement hex form per §6's literal
    /// convention, regardless of source).
    LdPairImmHex(RegPair, u16),
    /// `add hl,rr`
    AddHlPair(RegPair),
    /// `push rr`
    Push(RegPair),
    /// `pop rr`
    Pop(RegPair),
    /// `ld sp,hl`
    LdSpHl,
    /// `ld sp,0` — the epilogue whose `0` operand is patched at runtime
    /// by the prologue's `ld (@+sp_restore+1),sp`.
    LdSpZero,
    /// `ex de,hl`
    ExDeHl,
    /// `ldi`
    Ldi,
    /// `scf`
    Scf,
    /// `rr h` / `rr l`
    RrReg(Reg8),
    /// `srl h`
    SrlReg(Reg8),
    /// `jp c,<label>`
    JpC(String),
    /// `ret`
    Ret,
    /// Anything that doesn't fit the above: the `ld (@+sp_restore+1),sp`
    /// stack-pointer patch, which addresses a label-relative byte rather
    /// than a register or plain immediate. Preserved as the design notes
    /// require — raw text for labels and directives, never for anything
    /// the timing table needs to reason about structurally.
    Raw {
        /// Rendered instruction text.
        text: String,
        /// Byte size, for the instruction table.
        bytes: u32,
        /// Nominal T-states, for the timing scorer.
        tstates: u32,
    },
}

impl Instr {
    /// Render to the text form the emitter prints (no indentation, no
    /// trailing newline).
    pub fn render(&self) -> String {
        match self {
            Instr::LdRIndHl(r) => format!("ld {},(hl)", r),
            Instr::LdIndHlOperand(op) => format!("ld (hl),{}", op.render()),
            Instr::And(op) => format!("and {}", op.render()),
            Instr::Or(op) => format!("or {}", op.render()),
            Instr::Sub(op) => format!("sub {}", op.render()),
            Instr::AddA(op) => format!("add a,{}", op.render()),
            Instr::AdcA(op) => format!("adc a,{}", op.render()),
            Instr::SbcA(op) => format!("sbc a,{}", op.render()),
            Instr::LdAFromReg(r) => format!("ld a,{}", r),
            Instr::LdRegFromA(r) => format!("ld {},a", r),
            Instr::IncReg(r) => format!("inc {}", r),
            Instr::DecReg(r) => format!("dec {}", r),
            Instr::LdRegImm(r, v) => format!("ld {},&{:02x}", r, v),
            Instr::LdPairImmHex(p, v) => format!("ld {},&{:04x}", p, v),
            Instr::AddHlPair(p) => format!("add hl,{}", p),
            Instr::Push(p) => format!("push {}", p),
            Instr::Pop(p) => format!("pop {}", p),
            Instr::LdSpHl => "ld sp,hl".to_owned(),
            Instr::LdSpZero => "ld sp,0".to_owned(),
            Instr::ExDeHl => "ex de,hl".to_owned(),
            Instr::Ldi => "ldi".to_owned(),
            Instr::Scf => "scf".to_owned(),
            Instr::RrReg(r) => format!("rr {}", r),
            Instr::SrlReg(r) => format!("srl {}", r),
            Instr::JpC(label) => format!("jp c,{}", label),
            Instr::Ret => "ret".to_owned(),
            Instr::Raw { text, .. } => text.clone(),
        }
    }
}

/// A routine statement: either a label or an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A label definition, e.g. `masked_sprite0` or `@sp_restore`.
    Label(String),
    /// An instruction.
    Instr(Instr),
}

impl Stmt {
    /// Convenience constructor.
    pub fn instr(i: Instr) -> Stmt {
        Stmt::Instr(i)
    }
}

/// An ordered sequence of statements forming one routine body.
pub type Routine = Vec<Stmt>;
