//! Symbol frequency counting

use crate::bitio::BitSource;
use crate::config::{BITS_PER_WORD, PSEUDO_EOF};
use crate::error::CompressError;

/// Occurrence counts for every symbol, `0..=PSEUDO_EOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; PSEUDO_EOF as usize + 1],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; PSEUDO_EOF as usize + 1],
        }
    }

    /// Tally every byte of `data`, then add the end-of-stream symbol.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in data {
            table.counts[b as usize] += 1;
        }
        table.counts[PSEUDO_EOF as usize] = 1;
        table
    }

    #[cfg(test)]
    pub(crate) fn add(&mut self, symbol: u16, count: u64) {
        self.counts[symbol as usize] += count;
    }

    pub fn get(&self, symbol: u16) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// `(symbol, count)` for every symbol with a non-zero count, ascending.
    pub fn nonzero(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u16, count))
    }

    /// Number of literal bytes counted (EOF excluded).
    pub fn total_bytes(&self) -> u64 {
        self.counts[..PSEUDO_EOF as usize].iter().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Count 8-bit chunks until the source runs dry. The source is left at its
/// end; reset it before reading again.
pub fn count<S: BitSource>(
    input: &mut S,
    max_input_size: Option<u64>,
) -> Result<FrequencyTable, CompressError> {
    let mut table = FrequencyTable::new();
    let mut seen = 0u64;
    while let Some(chunk) = input.read_bits(BITS_PER_WORD)? {
        seen += 1;
        if let Some(limit) = max_input_size {
            if seen > limit {
                return Err(CompressError::InputTooLarge { limit });
            }
        }
        table.counts[chunk as usize] += 1;
    }
    table.counts[PSEUDO_EOF as usize] = 1;

    tracing::debug!(
        bytes = seen,
        distinct = table.nonzero().count() - 1,
        "counted input"
    );
    Ok(table)
}
