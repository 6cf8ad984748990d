//! Core types shared by the code generator.

/// A single literal/data byte, e.g. a pixel nibble pair or a mask byte.
pub type Byte = u8;

/// A 16-bit display address (offset into one of the two screen pages).
pub type Addr = u16;

/// An 8-bit Z80 register this generator ever names directly.
///
/// Only [`Reg8::B`], [`Reg8::C`], [`Reg8::D`] and [`Reg8::E`] ever
/// participate in the literal cache (§3's four-register budget); `a`,
/// `h` and `l` are reserved for addressing and arithmetic scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg8 {
    /// `a`, the accumulator.
    A,
    /// `b`
    B,
    /// `c`
    C,
    /// `d`
    D,
    /// `e`
    E,
    /// `h`
    H,
    /// `l`
    L,
}

impl Reg8 {
    /// Letter used in rendered assembly text.
    pub fn letter(self) -> char {
        match self {
            Reg8::A => 'a',
            Reg8::B => 'b',
            Reg8::C => 'c',
            Reg8::D => 'd',
            Reg8::E => 'e',
            Reg8::H => 'h',
            Reg8::L => 'l',
        }
    }

    /// The four registers eligible for literal caching, in allocation
    /// preference order (`bc` before `de`).
    pub const CACHEABLE: [Reg8; 4] = [Reg8::B, Reg8::C, Reg8::D, Reg8::E];
}

impl std::fmt::Display for Reg8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A 16-bit register pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegPair {
    /// `bc`
    Bc,
    /// `de`
    De,
    /// `hl`
    Hl,
}

impl RegPair {
    /// High/low 8-bit halves, in that order.
    pub fn halves(self) -> (Reg8, Reg8) {
        match self {
            RegPair::Bc => (Reg8::B, Reg8::C),
            RegPair::De => (Reg8::D, Reg8::E),
            RegPair::Hl => (Reg8::H, Reg8::L),
        }
    }

    /// Either spare pair, as a [`Reg8`] pair usable for caching.
    pub fn cache_halves(self) -> Option<(Reg8, Reg8)> {
        match self {
            RegPair::Bc | RegPair::De => Some(self.halves()),
            RegPair::Hl => None,
        }
    }
}

impl std::fmt::Display for RegPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (hi, lo) = self.halves();
        write!(f, "{}{}", hi, lo)
    }
}
