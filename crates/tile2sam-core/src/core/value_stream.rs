//! Literal-value cache ("value stream").
//!
//! Plans which byte literals in a routine's consumption order should
//! live in spare registers rather than being re-emitted as inline
//! immediates, then hands each one out in turn as either a register
//! name or a hex literal. See `spec.md` §4.3 for the algorithm this
//! ports from `original_source/tile2sam.py`'s `ValueStream` class.

use std::collections::HashMap;

use super::instr::{Instr, Operand};
use super::types::Reg8;
use crate::core::types::RegPair;

/// A `(literal, first_use, last_use)` triple: a byte value the planner
/// decided is worth caching, and the span of positions over which it
/// stays live.
type Cacheable = (u8, usize, usize);

/// Plans and hands out cached literals for one routine's literal
/// sequence, in consumption order.
pub struct ValueStream {
    values: Vec<Operand>,
    changes: HashMap<usize, Vec<Instr>>,
    index: usize,
}

impl ValueStream {
    /// Plan a value stream over the given literal sequence.
    pub fn new(data: &[u8]) -> Self {
        let cacheable = get_cacheable(data, Reg8::CACHEABLE.len());
        log::trace!("cache plan over {} literals: {:?}", data.len(), cacheable);
        let (values, changes) = bind(data, &cacheable);
        if !changes.is_empty() {
            log::debug!("{} literal(s) promoted to register cache", cacheable.len());
        }
        ValueStream {
            values,
            changes,
            index: 0,
        }
    }

    /// Consume the next literal, splicing any prelude load instructions
    /// into `code` first. Returns the operand (register or immediate)
    /// the caller should embed in the instruction it is building.
    pub fn next_value(&mut self, code: &mut Vec<Instr>) -> Operand {
        if let Some(prelude) = self.changes.get(&self.index) {
            code.extend(prelude.iter().cloned());
        }
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    /// Whether a register pair is wholly unused by the literals not yet
    /// consumed, and so free for the caller to use as 16-bit scratch.
    pub fn spare_pair(&self) -> Option<RegPair> {
        let remaining = &self.values[self.index..];
        let used = |r: Reg8| remaining.iter().any(|v| matches!(v, Operand::Reg(x) if *x == r));
        if !used(Reg8::B) && !used(Reg8::C) {
            Some(RegPair::Bc)
        } else if !used(Reg8::D) && !used(Reg8::E) {
            Some(RegPair::De)
        } else {
            None
        }
    }
}

/// Which of a free register list can serve as a spare pair, `bc`
/// preferred over `de`.
fn pair_available(free: &[Reg8]) -> Option<RegPair> {
    let has = |r: Reg8| free.contains(&r);
    if has(Reg8::B) && has(Reg8::C) {
        Some(RegPair::Bc)
    } else if has(Reg8::D) && has(Reg8::E) {
        Some(RegPair::De)
    } else {
        None
    }
}

/// Maintain an MRU window of recently-seen literals with occurrence
/// counts; when the window of count-≥2 candidates would exceed the
/// register budget, commit and evict the least-recently-used one.
fn get_cacheable(data: &[u8], budget: usize) -> Vec<Cacheable> {
    let mut mru: Vec<u8> = Vec::new();
    let mut count: HashMap<u8, usize> = HashMap::new();
    let mut first: HashMap<u8, usize> = HashMap::new();
    let mut last: HashMap<u8, usize> = HashMap::new();
    let mut cacheable: Vec<Cacheable> = Vec::new();

    for (i, &b) in data.iter().enumerate() {
        *count.entry(b).or_insert(0) += 1;
        first.entry(b).or_insert(i);
        last.insert(b, i);

        if let Some(pos) = mru.iter().position(|&x| x == b) {
            mru.remove(pos);
        }
        mru.push(b);

        let candidates: Vec<u8> = mru
            .iter()
            .copied()
            .filter(|x| count[x] >= 2)
            .collect();

        if candidates.len() >= budget {
            let b0 = candidates[0];
            let mut idx = mru.iter().position(|&x| x == b0).unwrap();

            if candidates.len() > budget {
                if count[&b0] >= 2 {
                    cacheable.push((b0, first[&b0], last[&b0]));
                }
                idx += 1;
            }

            for entry in mru.iter().take(idx) {
                count.remove(entry);
                first.remove(entry);
            }
            mru.drain(0..idx);
        }
    }

    for &x in &mru {
        if *count.get(&x).unwrap_or(&0) >= 2 {
            cacheable.push((x, first[&x], last[&x]));
        }
    }
    cacheable
}

/// Walk the literal sequence, maintaining a live `literal -> register`
/// map and emitting the load instructions needed each time the active
/// candidate set changes.
fn bind(data: &[u8], cacheable: &[Cacheable]) -> (Vec<Operand>, HashMap<usize, Vec<Instr>>) {
    let budget = Reg8::CACHEABLE.len();
    let mut values = Vec::with_capacity(data.len());
    let mut changes: HashMap<usize, Vec<Instr>> = HashMap::new();
    let mut cache: HashMap<u8, Reg8> = HashMap::new();

    for (i, &b) in data.iter().enumerate() {
        if !cache.contains_key(&b) {
            let mut scoped: Vec<(u8, i64)> = cacheable
                .iter()
                .filter(|&&(_, _, last)| i <= last)
                .map(|&(val, first, _)| (val, first as i64 - i as i64))
                .collect();
            scoped.sort_by_key(|&(_, key)| key);
            let pending: Vec<u8> = scoped.into_iter().take(budget).map(|(v, _)| v).collect();

            if pending.contains(&b) {
                cache.retain(|k, _| pending.contains(k));
                let mut adding: Vec<u8> = pending
                    .iter()
                    .copied()
                    .filter(|v| !cache.contains_key(v))
                    .collect();
                let mut free: Vec<Reg8> = Reg8::CACHEABLE
                    .iter()
                    .copied()
                    .filter(|r| !cache.values().any(|v| v == r))
                    .collect();

                let mut code: Vec<Instr> = Vec::new();
                while !adding.is_empty() {
                    if let Some(pair) = pair_available(&free) {
                        if adding.len() >= 2 {
                            let (hi, lo) = pair.halves();
                            let value = (u16::from(adding[0]) << 8) | u16::from(adding[1]);
                            code.push(Instr::LdPairImmHex(pair, value));
                            cache.insert(adding[0], hi);
                            cache.insert(adding[1], lo);
                            adding.drain(0..2);
                            free.retain(|r| *r != hi && *r != lo);
                            continue;
                        }
                    }
                    let r = free[0];
                    code.push(Instr::LdRegImm(r, adding[0]));
                    cache.insert(adding[0], r);
                    adding.remove(0);
                    free.retain(|x| *x != r);
                }

                if !code.is_empty() {
                    changes.insert(i, code);
                }
            }
        }

        values.push(match cache.get(&b) {
            Some(&r) => Operand::Reg(r),
            None => Operand::Imm(b),
        });
    }

    (values, changes)
}
