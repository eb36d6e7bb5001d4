//! Preorder tree header.
//!
//! Each node is one bit: `0` for an internal node, followed by its left and
//! right subtrees, or `1` for a leaf, followed by the symbol in
//! [`SYMBOL_BITS`] bits. The encoding is self-delimiting.

use crate::bitio::{BitSink, BitSource};
use crate::config::{PSEUDO_EOF, SYMBOL_BITS};
use crate::error::CompressError;
use crate::tree::HuffNode;

/// No tree over `PSEUDO_EOF + 1` distinct leaves is deeper than this.
const MAX_DEPTH: usize = PSEUDO_EOF as usize;

pub fn write_header<S: BitSink>(root: &HuffNode, output: &mut S) -> Result<(), CompressError> {
    match root {
        HuffNode::Internal { left, right, .. } => {
            output.write_bits(1, 0)?;
            write_header(left, output)?;
            write_header(right, output)?;
        }
        HuffNode::Leaf { symbol, .. } => {
            output.write_bits(1, 1)?;
            output.write_bits(SYMBOL_BITS, u32::from(*symbol))?;
        }
    }
    Ok(())
}

pub fn read_header<S: BitSource>(input: &mut S) -> Result<HuffNode, CompressError> {
    let mut seen = [false; PSEUDO_EOF as usize + 1];
    let root = read_node(input, 0, &mut seen)?;
    tracing::debug!(leaves = root.leaf_count(), depth = root.depth(), "read tree header");
    Ok(root)
}

fn read_node<S: BitSource>(
    input: &mut S,
    depth: usize,
    seen: &mut [bool],
) -> Result<HuffNode, CompressError> {
    let marker = input.read_bits(1)?.ok_or(CompressError::TruncatedHeader)?;
    if marker == 0 {
        if depth >= MAX_DEPTH {
            return Err(CompressError::MalformedInput(format!(
                "tree header nests deeper than {MAX_DEPTH} levels"
            )));
        }
        let left = read_node(input, depth + 1, seen)?;
        let right = read_node(input, depth + 1, seen)?;
        return Ok(HuffNode::merge(left, right));
    }

    let value = input
        .read_bits(SYMBOL_BITS)?
        .ok_or(CompressError::TruncatedHeader)?;
    let slot = seen
        .get_mut(value as usize)
        .ok_or_else(|| CompressError::MalformedInput(format!("leaf symbol {value} out of range")))?;
    if *slot {
        return Err(CompressError::MalformedInput(format!(
            "leaf symbol {value} appears twice"
        )));
    }
    *slot = true;
    Ok(HuffNode::leaf(value as u16, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::{BitInput, BitOutput};
    use crate::frequency::FrequencyTable;
    use crate::tree;
    use std::io::Cursor;

    fn header_bytes(root: &HuffNode) -> (Vec<u8>, u64) {
        let mut out = BitOutput::new(Vec::new());
        write_header(root, &mut out).unwrap();
        let bits = out.bits_written();
        out.close().unwrap();
        (out.into_inner(), bits)
    }

    fn bits_to_bytes(bits: &str) -> Vec<u8> {
        let mut out = BitOutput::new(Vec::new());
        for c in bits.chars().filter(|c| !c.is_whitespace()) {
            out.write_bits(1, u32::from(c == '1')).unwrap();
        }
        out.close().unwrap();
        out.into_inner()
    }

    #[test]
    fn test_header_layout() {
        let root = HuffNode::merge(HuffNode::leaf(PSEUDO_EOF, 1), HuffNode::leaf(0x41, 4));
        let (bytes, bits) = header_bytes(&root);
        // 0, then 1 + 100000000, then 1 + 001000001
        assert_eq!(bits, 21);
        assert_eq!(bytes, bits_to_bytes("0 1100000000 1001000001"));
    }

    #[test]
    fn test_header_roundtrip() {
        let table = FrequencyTable::from_bytes(b"a man a plan a canal panama");
        let root = tree::build(&table).unwrap();
        let (bytes, bits) = header_bytes(&root);

        let leaves = root.leaf_count() as u64;
        assert_eq!(bits, leaves * (1 + u64::from(SYMBOL_BITS)) + (leaves - 1));

        let mut input = BitInput::new(Cursor::new(bytes));
        let decoded = read_header(&mut input).unwrap();
        assert_eq!(decoded, root);
        assert_eq!(input.bits_read(), bits);
    }

    #[test]
    fn test_header_roundtrip_all_symbols() {
        let data: Vec<u8> = (0..=255).collect();
        let root = tree::build(&FrequencyTable::from_bytes(&data)).unwrap();
        let (bytes, _) = header_bytes(&root);
        let decoded = read_header(&mut BitInput::new(Cursor::new(bytes))).unwrap();
        assert_eq!(decoded, root);
        assert_eq!(decoded.leaf_count(), 257);
    }

    #[test]
    fn test_truncated_header() {
        let root = tree::build(&FrequencyTable::from_bytes(b"truncate me")).unwrap();
        let (bytes, _) = header_bytes(&root);
        for cut in 0..bytes.len() - 1 {
            let mut input = BitInput::new(Cursor::new(bytes[..cut].to_vec()));
            let result = read_header(&mut input);
            assert!(matches!(result, Err(CompressError::TruncatedHeader)), "cut at {cut}");
        }
    }

    #[test]
    fn test_symbol_out_of_range() {
        let bytes = bits_to_bytes("0 1111111111 1000000000");
        let result = read_header(&mut BitInput::new(Cursor::new(bytes)));
        assert!(matches!(result, Err(CompressError::MalformedInput(_))));
    }

    #[test]
    fn test_duplicate_symbol() {
        let bytes = bits_to_bytes("0 1000000001 1000000001");
        let result = read_header(&mut BitInput::new(Cursor::new(bytes)));
        assert!(matches!(result, Err(CompressError::MalformedInput(_))));
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let bytes = vec![0u8; 64];
        let result = read_header(&mut BitInput::new(Cursor::new(bytes)));
        assert!(matches!(result, Err(CompressError::MalformedInput(_))));
    }
}
