//! Assembly text emitter.
//!
//! Ported from `original_source/tile2sam.py`'s `format_code`; see
//! `spec.md` §4.5/§6. Instructions get an 8-space indent; labels
//! (outer and embedded) are flush-left; routines are blank-line
//! separated.

use super::instr::Stmt;

const INDENT: &str = "        ";

/// Format one labeled routine as assembly text, trailing blank line
/// included so callers can simply concatenate routine groups.
pub fn format_code(label: Option<&str>, routine: &[Stmt]) -> String {
    let mut text = String::new();
    if let Some(label) = label {
        text.push_str(label);
        text.push_str(":\n");
    }

    let lines: Vec<String> = routine
        .iter()
        .map(|stmt| match stmt {
            Stmt::Label(name) => format!("{}:", name),
            Stmt::Instr(instr) => format!("{}{}", INDENT, instr.render()),
        })
        .collect();

    text.push_str(&lines.join("\n"));
    text.push_str("\n\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instr::{Instr, Operand};
    use crate::core::types::Reg8;

    #[test]
    fn labeled_routine_indents_instructions_and_blank_lines_after() {
        let routine = vec![
            Stmt::Instr(Instr::LdIndHlOperand(Operand::Imm(0x12))),
            Stmt::Instr(Instr::Ret),
        ];
        let text = format_code(Some("unmasked_sprite0"), &routine);
        assert_eq!(
            text,
            "unmasked_sprite0:\n        ld (hl),&12\n        ret\n\n"
        );
    }

    #[test]
    fn embedded_label_is_flush_left() {
        let routine = vec![
            Stmt::Instr(Instr::LdRegImm(Reg8::B, 0x01)),
            Stmt::Label("@sp_restore".to_owned()),
            Stmt::Instr(Instr::Ret),
        ];
        let text = format_code(Some("clear_sprite0"), &routine);
        assert!(text.contains("\n@sp_restore:\n"));
        assert!(!text.contains("        @sp_restore"));
    }
}
