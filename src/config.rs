//! Configuration for huffproc

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

pub const BITS_PER_WORD: u32 = 8;
pub const BITS_PER_INT: u32 = 32;
/// Bits per header leaf payload, wide enough for `0..=PSEUDO_EOF`.
pub const SYMBOL_BITS: u32 = BITS_PER_WORD + 1;
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
pub const PSEUDO_EOF: u16 = ALPH_SIZE as u16;
pub const HUFF_NUMBER: u32 = 0xface_8200;
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub format_tag: u32,
    pub max_input_size: Option<u64>,
}

impl CompressionConfig {
    /// Parse a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CompressError> {
        serde_json::from_str(json).map_err(|e| CompressError::SerializationError(e.to_string()))
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            format_tag: HUFF_TREE,
            max_input_size: None,
        }
    }
}
