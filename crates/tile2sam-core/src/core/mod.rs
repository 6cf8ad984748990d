//! Core code-generation engine: the Z80 instruction model, the timing
//! scorer, the register-delta synthesizer, the literal-value cache, and
//! the six draw/save/restore/clear strategies built on top of them.

pub mod codegen;
pub mod delta;
pub mod emit;
pub mod instr;
pub mod selector;
pub mod tile;
pub mod timing;
pub mod types;
pub mod value_stream;
