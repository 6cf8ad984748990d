//! Strategy selector: pick the candidate with lowest summed T-states.
//!
//! Ported from `original_source/tile2sam.py`'s `fastest_code`; see
//! `spec.md` §4.5. A candidate is one or more routines (save/restore
//! score together; clear/rect strategies are scored alone) — the caller
//! groups them accordingly.

use super::instr::Stmt;
use super::timing::nominal_timing;

/// Index of the cheapest candidate group, ties broken by listing order
/// (the first minimal group wins, matching Python's stable `min`).
pub fn fastest_code(candidates: &[Vec<Vec<Stmt>>]) -> usize {
    let scored: Vec<u32> = candidates
        .iter()
        .map(|group| group.iter().map(|r| nominal_timing(r)).sum::<u32>())
        .collect();
    log::trace!("candidate T-state scores: {:?}", scored);
    let winner = scored
        .iter()
        .enumerate()
        .min_by_key(|&(_, cost)| cost)
        .map(|(i, _)| i)
        .expect("fastest_code called with no candidates");
    log::debug!("selected candidate {} ({} T-states)", winner, scored[winner]);
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instr::Instr;

    #[test]
    fn cheaper_single_routine_wins() {
        let cheap = vec![Stmt::Instr(Instr::Ret)];
        let expensive = vec![
            Stmt::Instr(Instr::Push(crate::core::types::RegPair::Bc)),
            Stmt::Instr(Instr::Ret),
        ];
        let candidates = vec![vec![expensive], vec![cheap]];
        assert_eq!(fastest_code(&candidates), 1);
    }

    #[test]
    fn ties_keep_first_listed() {
        let a = vec![Stmt::Instr(Instr::Ret)];
        let b = vec![Stmt::Instr(Instr::Ret)];
        let candidates = vec![vec![a], vec![b]];
        assert_eq!(fastest_code(&candidates), 0);
    }

    #[test]
    fn multi_routine_candidate_sums_all_members() {
        let save = vec![Stmt::Instr(Instr::Ret)];
        let restore = vec![Stmt::Instr(Instr::Ret), Stmt::Instr(Instr::Ret)];
        let other_save = vec![
            Stmt::Instr(Instr::Ret),
            Stmt::Instr(Instr::Ret),
            Stmt::Instr(Instr::Ret),
        ];
        let other_restore = vec![Stmt::Instr(Instr::Ret)];
        let candidates = vec![vec![save, restore], vec![other_save, other_restore]];
        // Both sum to 3 rets' worth of cost -> tie, first wins.
        assert_eq!(fastest_code(&candidates), 0);
    }
}
