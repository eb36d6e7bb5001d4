//! Body encoding and decoding

use crate::bitio::{BitSink, BitSource};
use crate::codes::CodeTable;
use crate::config::{BITS_PER_WORD, PSEUDO_EOF};
use crate::error::CompressError;
use crate::tree::HuffNode;

/// Write the code of every 8-bit chunk of `input`, then the end-of-stream
/// code. Returns the number of input bytes encoded. The output is not closed.
pub fn encode<R: BitSource, W: BitSink>(
    codes: &CodeTable,
    input: &mut R,
    output: &mut W,
) -> Result<u64, CompressError> {
    let mut encoded = 0u64;
    while let Some(chunk) = input.read_bits(BITS_PER_WORD)? {
        let symbol = chunk as u16;
        codes
            .get(symbol)
            .ok_or(CompressError::UnencodableSymbol(symbol))?
            .write_to(output)?;
        encoded += 1;
    }
    codes
        .get(PSEUDO_EOF)
        .ok_or(CompressError::UnencodableSymbol(PSEUDO_EOF))?
        .write_to(output)?;

    tracing::debug!(bytes = encoded, "encoded body");
    Ok(encoded)
}

/// Walk the tree one bit at a time, emitting each literal leaf reached,
/// until the end-of-stream leaf. Returns the number of bytes written.
pub fn decode<R: BitSource, W: BitSink>(
    root: &HuffNode,
    input: &mut R,
    output: &mut W,
) -> Result<u64, CompressError> {
    let mut written = 0u64;
    let mut current = root;
    loop {
        let bit = input.read_bits(1)?.ok_or(CompressError::TruncatedStream)?;
        current = match current {
            HuffNode::Internal { left, right, .. } => {
                if bit == 0 {
                    left.as_ref()
                } else {
                    right.as_ref()
                }
            }
            // a leaf root has the one-bit code 0; any bit lands on it
            leaf => leaf,
        };

        if let HuffNode::Leaf { symbol, .. } = current {
            if *symbol == PSEUDO_EOF {
                break;
            }
            output.write_bits(BITS_PER_WORD, u32::from(*symbol))?;
            written += 1;
            current = root;
        }
    }

    tracing::debug!(bytes = written, "decoded body");
    Ok(written)
}
