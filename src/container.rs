//! Columnar, mmap-friendly binary layout for one compiled shard: a names
//! table, a path table, a token-indexed entries table, and the compiled
//! MAST, each addressed through its own jump table.

use crate::mast::state::State;
use crate::mast::view::{compile as compile_mast, decode_jump_table, CompiledFst};

/// Per-book posting for one token: how many times the token appears in the
/// title and in the content of book `book_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookEntry {
    pub book_id: u32,
    pub title_freq: u64,
    pub content_freq: u64,
}

pub const BOOK_ENTRY_LEN: usize = 4 + 8 + 8;

impl BookEntry {
    pub fn encode(&self) -> [u8; BOOK_ENTRY_LEN] {
        let mut out = [0u8; BOOK_ENTRY_LEN];
        out[0..4].copy_from_slice(&self.book_id.to_ne_bytes());
        out[4..12].copy_from_slice(&self.title_freq.to_ne_bytes());
        out[12..20].copy_from_slice(&self.content_freq.to_ne_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> BookEntry {
        BookEntry {
            book_id: u32::from_ne_bytes(bytes[0..4].try_into().unwrap()),
            title_freq: u64::from_ne_bytes(bytes[4..12].try_into().unwrap()),
            content_freq: u64::from_ne_bytes(bytes[12..20].try_into().unwrap()),
        }
    }
}

/// Which frequency channel a search targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreqField {
    Title,
    Content,
}

const HEADER_FIELD_COUNT: usize = 8;
const HEADER_LEN: u64 = (HEADER_FIELD_COUNT * 8) as u64;

struct Section {
    bytes: Vec<u8>,
    jump_table_len: usize,
}

fn build_section(jump_table: &[u64], payload: &[u8]) -> Section {
    let mut bytes = Vec::with_capacity(jump_table.len() * 8 + payload.len());
    for &off in jump_table {
        bytes.extend_from_slice(&off.to_ne_bytes());
    }
    bytes.extend_from_slice(payload);
    Section {
        bytes,
        jump_table_len: jump_table.len(),
    }
}

/// Compiles one shard's worth of data into the on-disk layout. `entries[k]`
/// must be the `BookEntry` group addressed by the FST output value `k`
/// (i.e. the order `IndexBuilder::build` appended groups in).
pub fn compile(
    names: &[String],
    paths: &[Vec<u32>],
    entries: &[Vec<BookEntry>],
    states: &[State],
) -> Vec<u8> {
    // names section
    let mut names_jump = Vec::with_capacity(names.len());
    let mut names_payload = Vec::new();
    for name in names {
        names_jump.push(names_payload.len() as u64);
        names_payload.extend_from_slice(name.as_bytes());
        names_payload.push(0);
    }
    let names_section = build_section(&names_jump, &names_payload);

    // paths section
    let mut paths_jump = Vec::with_capacity(paths.len());
    let mut paths_payload = Vec::new();
    for segments in paths {
        paths_jump.push(paths_payload.len() as u64);
        for &idx in segments {
            paths_payload.extend_from_slice(&idx.to_ne_bytes());
        }
    }
    let paths_section = build_section(&paths_jump, &paths_payload);

    // entries section
    let mut entries_jump = Vec::with_capacity(entries.len());
    let mut entries_payload = Vec::new();
    for group in entries {
        entries_jump.push(entries_payload.len() as u64);
        for e in group {
            entries_payload.extend_from_slice(&e.encode());
        }
    }
    let entries_section = build_section(&entries_jump, &entries_payload);

    // fst section: reuse the compiled MAST's own jump table + bytes.
    let compiled = compile_mast(states);
    let fst_section = build_section(&compiled.jump_table, &compiled.bytes);

    let n_pos = 0u64;
    let p_pos = n_pos + names_section.bytes.len() as u64;
    let e_pos = p_pos + paths_section.bytes.len() as u64;
    let f_pos = e_pos + entries_section.bytes.len() as u64;

    let header: [u64; HEADER_FIELD_COUNT] = [
        n_pos,
        names_section.jump_table_len as u64,
        p_pos,
        paths_section.jump_table_len as u64,
        e_pos,
        entries_section.jump_table_len as u64,
        f_pos,
        fst_section.jump_table_len as u64,
    ];

    let mut out = Vec::new();
    out.extend_from_slice(&HEADER_LEN.to_ne_bytes());
    for field in header {
        out.extend_from_slice(&field.to_ne_bytes());
    }
    out.extend_from_slice(&names_section.bytes);
    out.extend_from_slice(&paths_section.bytes);
    out.extend_from_slice(&entries_section.bytes);
    out.extend_from_slice(&fst_section.bytes);
    out
}

/// A column's jump table plus the payload slice it indexes into, borrowed
/// from the container's bytes.
struct ColumnView<'a> {
    jump_table: Vec<u64>,
    payload: &'a [u8],
}

impl<'a> ColumnView<'a> {
    fn slice(&self, index: usize) -> &'a [u8] {
        let start = self.jump_table[index] as usize;
        let end = self
            .jump_table
            .get(index + 1)
            .map(|&o| o as usize)
            .unwrap_or(self.payload.len());
        &self.payload[start..end]
    }

    fn len(&self) -> usize {
        self.jump_table.len()
    }
}

/// Zero-copy view over one compiled shard's bytes (typically an mmap
/// region). Construction only parses the fixed header and the four jump
/// tables; section payloads are sliced on demand, never copied until a
/// lookup needs to materialize a path string.
pub struct IndexView<'a> {
    names: ColumnView<'a>,
    paths: ColumnView<'a>,
    entries: ColumnView<'a>,
    fst_bytes: &'a [u8],
    fst_jump_table: Vec<u64>,
}

impl<'a> IndexView<'a> {
    pub fn new(bytes: &'a [u8]) -> IndexView<'a> {
        let header_len = u64::from_ne_bytes(bytes[0..8].try_into().unwrap()) as usize;
        let header_bytes = &bytes[8..8 + header_len];
        let header = decode_jump_table(header_bytes);
        let body = &bytes[8 + header_len..];

        let (n_pos, n_len, p_pos, p_len, e_pos, e_len, f_pos, f_len) = (
            header[0] as usize,
            header[1] as usize,
            header[2] as usize,
            header[3] as usize,
            header[4] as usize,
            header[5] as usize,
            header[6] as usize,
            header[7] as usize,
        );

        let names = parse_column(body, n_pos, n_len, p_pos);
        let paths = parse_column(body, p_pos, p_len, e_pos);
        let entries = parse_column(body, e_pos, e_len, f_pos);

        let fst_section = &body[f_pos..];
        let fst_jump_bytes = &fst_section[..f_len * 8];
        let fst_jump_table = decode_jump_table(fst_jump_bytes);
        let fst_bytes = &fst_section[f_len * 8..];

        IndexView {
            names,
            paths,
            entries,
            fst_bytes,
            fst_jump_table,
        }
    }

    fn fst(&self) -> CompiledFst<'_> {
        CompiledFst::from_parts(self.fst_bytes, &self.fst_jump_table)
    }

    fn name(&self, index: usize) -> String {
        let raw = self.names.slice(index);
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }

    fn book_path(&self, book_id: usize) -> String {
        let raw = self.paths.slice(book_id);
        let segments: Vec<String> = raw
            .chunks_exact(4)
            .map(|c| {
                let idx = u32::from_ne_bytes(c.try_into().unwrap());
                self.name(idx as usize)
            })
            .collect();
        segments.join("/")
    }

    fn entries_for(&self, k: usize) -> impl Iterator<Item = BookEntry> + '_ {
        self.entries
            .slice(k)
            .chunks_exact(BOOK_ENTRY_LEN)
            .map(BookEntry::decode)
    }

    /// Resolves `token` against the FST and returns the paths of every book
    /// whose `which` frequency for that token is nonzero, in ascending
    /// `book_id` order.
    pub fn search(&self, token: &[u8], which: FreqField) -> Vec<String> {
        let Some(k) = self.fst().get(token) else {
            return Vec::new();
        };
        self.entries_for(k as usize)
            .filter(|e| match which {
                FreqField::Title => e.title_freq != 0,
                FreqField::Content => e.content_freq != 0,
            })
            .map(|e| self.book_path(e.book_id as usize))
            .collect()
    }

    pub fn token_count(&self) -> usize {
        self.entries.len()
    }

    pub fn book_count(&self) -> usize {
        self.paths.len()
    }
}

fn parse_column<'a>(body: &'a [u8], pos: usize, len: usize, next_pos: usize) -> ColumnView<'a> {
    let section = &body[pos..next_pos];
    let jump_bytes = &section[..len * 8];
    let jump_table = decode_jump_table(jump_bytes);
    let payload = &section[len * 8..];
    ColumnView { jump_table, payload }
}
