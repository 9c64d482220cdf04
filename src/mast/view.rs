//! Compiled byte layout for a minimized state table, and a zero-copy view
//! over it that walks the same way the in-memory builder does.

use super::state::{Arc, State, StateId};

const ARC_RECORD_LEN: usize = 1 + 8 + 4; // label, dest, output
const STATE_HEADER_LEN: usize = 8 + 1; // id, final

/// Owns the compiled byte stream and jump table for a state table. Produced
/// by [`compile`]; callers that want a zero-copy view over borrowed bytes
/// (e.g. a shard's mmap region) use [`CompiledFst::from_parts`] directly.
pub struct CompiledMast {
    pub bytes: Vec<u8>,
    pub jump_table: Vec<u64>,
}

impl CompiledMast {
    pub fn as_fst(&self) -> CompiledFst<'_> {
        CompiledFst::from_parts(&self.bytes, &self.jump_table)
    }
}

/// Lays out `states` (sorted by id ascending, contiguous from 0 — the shape
/// `MastBuilder::build` produces) as a flat byte stream plus a per-id
/// offset table.
pub fn compile(states: &[State]) -> CompiledMast {
    let mut jump_table = vec![0u64; states.len()];
    let mut bytes = Vec::new();
    for state in states {
        jump_table[state.id as usize] = bytes.len() as u64;
        bytes.extend_from_slice(&state.id.to_ne_bytes());
        bytes.push(state.is_final as u8);
        for arc in &state.arcs {
            bytes.push(arc.label);
            bytes.extend_from_slice(&arc.dest.to_ne_bytes());
            bytes.extend_from_slice(&arc.output.to_ne_bytes());
        }
    }
    CompiledMast { bytes, jump_table }
}

/// Decodes a flat native-endian `u64` array from raw bytes,
/// without relying on the slice's alignment (mmap regions aren't
/// guaranteed 8-byte aligned).
pub fn decode_jump_table(bytes: &[u8]) -> Vec<u64> {
    bytes
        .chunks_exact(8)
        .map(|c| u64::from_ne_bytes(c.try_into().unwrap()))
        .collect()
}

/// A state materialized on demand from a byte slice.
pub struct StateRecord<'a> {
    pub id: StateId,
    pub is_final: bool,
    arc_bytes: &'a [u8],
}

impl<'a> StateRecord<'a> {
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + 'a {
        self.arc_bytes.chunks_exact(ARC_RECORD_LEN).map(|c| Arc {
            label: c[0],
            dest: u64::from_ne_bytes(c[1..9].try_into().unwrap()),
            output: u32::from_ne_bytes(c[9..13].try_into().unwrap()),
        })
    }

    pub fn find_arc(&self, label: u8) -> Option<Arc> {
        self.arcs().find(|a| a.label == label)
    }
}

/// Zero-copy view over a compiled state table. Borrows both the byte stream
/// and the decoded jump table; never allocates except for the per-hop arc
/// iterator's bounds bookkeeping (which is stack-only).
#[derive(Clone, Copy)]
pub struct CompiledFst<'a> {
    bytes: &'a [u8],
    jump_table: &'a [u64],
}

impl<'a> CompiledFst<'a> {
    pub fn from_parts(bytes: &'a [u8], jump_table: &'a [u64]) -> Self {
        CompiledFst { bytes, jump_table }
    }

    fn record_at(&self, id: StateId) -> StateRecord<'a> {
        let start = self.jump_table[id as usize] as usize;
        let end = self
            .jump_table
            .get(id as usize + 1)
            .map(|&o| o as usize)
            .unwrap_or(self.bytes.len());
        let rec = &self.bytes[start..end];
        let rec_id = u64::from_ne_bytes(rec[0..8].try_into().unwrap());
        let is_final = rec[8] != 0;
        StateRecord {
            id: rec_id,
            is_final,
            arc_bytes: &rec[STATE_HEADER_LEN..],
        }
    }

    /// Walks `key` from the root, summing arc outputs. Returns `None` if no
    /// path for `key` exists or the reached state isn't final.
    pub fn get(&self, key: &[u8]) -> Option<u64> {
        let mut id: StateId = 0;
        let mut total: u64 = 0;
        for &b in key {
            let rec = self.record_at(id);
            let arc = rec.find_arc(b)?;
            total += arc.output as u64;
            id = arc.dest;
        }
        let rec = self.record_at(id);
        rec.is_final.then_some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mast::builder::MastBuilder;

    #[test]
    fn compiled_view_matches_in_memory_lookup() {
        let mut b = MastBuilder::new();
        b.add(b"ab", 5).unwrap();
        b.add(b"ac", 7).unwrap();
        b.add(b"b", 2).unwrap();
        let states = b.build();
        let compiled = compile(&states);
        let fst = compiled.as_fst();
        assert_eq!(fst.get(b"ab"), Some(5));
        assert_eq!(fst.get(b"ac"), Some(7));
        assert_eq!(fst.get(b"b"), Some(2));
        assert_eq!(fst.get(b"a"), None);
        assert_eq!(fst.get(b"zz"), None);
    }

    #[test]
    fn decode_jump_table_round_trips() {
        let original: Vec<u64> = vec![0, 9, 42, 1000];
        let mut bytes = Vec::new();
        for v in &original {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(decode_jump_table(&bytes), original);
    }
}
