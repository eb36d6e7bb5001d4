//! Code table generation from a Huffman tree

use crate::bitio::BitSink;
use crate::config::PSEUDO_EOF;
use crate::tree::HuffNode;
use std::fmt;
use std::io;

/// A variable-length code, stored most significant bit first in 32-bit words.
/// The last word holds `len % 32` bits in its low end when not full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    words: Vec<u32>,
    len: usize,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % 32 == 0 {
            self.words.push(0);
        }
        if let Some(last) = self.words.last_mut() {
            *last = (*last << 1) | u32::from(bit);
        }
        self.len += 1;
    }

    fn with_bit(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| {
            let word = self.words[i / 32];
            let width = self.word_width(i / 32);
            (word >> (width - 1 - (i % 32) as u32)) & 1 == 1
        })
    }

    /// True when `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && self.bits().zip(other.bits()).all(|(a, b)| a == b)
    }

    pub fn write_to<S: BitSink>(&self, output: &mut S) -> io::Result<()> {
        for (i, &word) in self.words.iter().enumerate() {
            output.write_bits(self.word_width(i), word)?;
        }
        Ok(())
    }

    fn word_width(&self, index: usize) -> u32 {
        if index + 1 < self.words.len() || self.len % 32 == 0 {
            32
        } else {
            (self.len % 32) as u32
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codes indexed by symbol, `0..=PSEUDO_EOF`.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn get(&self, symbol: u16) -> Option<&Code> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u16, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assign every leaf its root-to-leaf path. A root that is itself a leaf gets
/// the one-bit code `0`.
pub fn generate(root: &HuffNode) -> CodeTable {
    let mut table = CodeTable {
        codes: vec![None; PSEUDO_EOF as usize + 1],
    };
    match root {
        HuffNode::Leaf { symbol, .. } => assign(&mut table, *symbol, Code::new().with_bit(false)),
        HuffNode::Internal { .. } => walk(root, Code::new(), &mut table),
    }
    for (symbol, code) in table.iter() {
        tracing::trace!(symbol, %code, "code");
    }
    table
}

fn walk(node: &HuffNode, path: Code, table: &mut CodeTable) {
    match node {
        HuffNode::Leaf { symbol, .. } => assign(table, *symbol, path),
        HuffNode::Internal { left, right, .. } => {
            walk(left, path.with_bit(false), table);
            walk(right, path.with_bit(true), table);
        }
    }
}

fn assign(table: &mut CodeTable, symbol: u16, code: Code) {
    if let Some(slot) = table.codes.get_mut(symbol as usize) {
        *slot = Some(code);
    }
}
