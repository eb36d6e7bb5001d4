//! huffproc: tree-header Huffman compression over bit streams.
//!
//! Compression runs in two passes over a rewindable input:
//! - count symbol frequencies and build the Huffman tree
//! - write the format tag and the tree header, rewind, encode the body
//!
//! Decompression checks the tag, rebuilds the tree from the header and walks
//! it bit by bit until the end-of-stream code.

pub mod bitio;
pub mod codes;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod stream;
pub mod tree;

use std::io::{self, Cursor};

use crate::bitio::{BitInput, BitOutput, BitSink, BitSource};
use crate::config::{CompressionConfig, BITS_PER_INT};
use crate::error::CompressError;

/// Figures gathered while compressing or decompressing one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Literal bytes on the uncompressed side.
    pub original_bytes: u64,
    /// Bits on the compressed side: tag, header and body, without padding.
    pub compressed_bits: u64,
    /// Bits taken by the tree header alone.
    pub header_bits: u64,
    /// Leaves in the tree, the end-of-stream symbol included.
    pub distinct_symbols: usize,
}

impl CompressionStats {
    /// Compressed size over original size, both in bits.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 1.0;
        }
        self.compressed_bits as f64 / (self.original_bytes * 8) as f64
    }
}

/// Counts bits passing through to the wrapped sink.
struct CountingSink<'a, S> {
    inner: &'a mut S,
    bits: u64,
}

impl<'a, S: BitSink> BitSink for CountingSink<'a, S> {
    fn write_bits(&mut self, bits: u32, value: u32) -> io::Result<()> {
        self.inner.write_bits(bits, value)?;
        self.bits += u64::from(bits);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
}

/// Counts bits pulled from the wrapped source.
struct CountingSource<'a, S> {
    inner: &'a mut S,
    bits: u64,
}

impl<'a, S: BitSource> BitSource for CountingSource<'a, S> {
    fn read_bits(&mut self, bits: u32) -> io::Result<Option<u32>> {
        let value = self.inner.read_bits(bits)?;
        if value.is_some() {
            self.bits += u64::from(bits);
        }
        Ok(value)
    }

    fn reset(&mut self) -> io::Result<()> {
        self.bits = 0;
        self.inner.reset()
    }
}

/// The compression engine
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Create a compressor with default configuration
    pub fn default() -> Self {
        Self::new(CompressionConfig::default())
    }

    /// Compress `input` into `output` and close `output`. `input` is read
    /// twice and rewound in between.
    pub fn compress<R: BitSource, W: BitSink>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<CompressionStats, CompressError> {
        let counts = frequency::count(input, self.config.max_input_size)?;
        let root = tree::build(&counts)?;
        let table = codes::generate(&root);

        let mut out = CountingSink { inner: output, bits: 0 };
        out.write_bits(BITS_PER_INT, self.config.format_tag)?;
        header::write_header(&root, &mut out)?;
        let header_bits = out.bits - u64::from(BITS_PER_INT);

        input.reset()?;
        let original_bytes = stream::encode(&table, input, &mut out)?;
        out.close()?;

        let stats = CompressionStats {
            original_bytes,
            compressed_bits: out.bits,
            header_bits,
            distinct_symbols: root.leaf_count(),
        };
        tracing::debug!(
            original_bytes,
            compressed_bits = stats.compressed_bits,
            ratio = stats.ratio(),
            "compressed"
        );
        Ok(stats)
    }

    /// Decompress `input` into `output` and close `output`. The format tag is
    /// checked before anything else is read.
    pub fn decompress<R: BitSource, W: BitSink>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<CompressionStats, CompressError> {
        let mut inp = CountingSource { inner: input, bits: 0 };
        let tag = inp
            .read_bits(BITS_PER_INT)?
            .ok_or(CompressError::TruncatedHeader)?;
        if tag != self.config.format_tag {
            return Err(CompressError::BadHeaderTag {
                expected: self.config.format_tag,
                found: tag,
            });
        }

        let root = header::read_header(&mut inp)?;
        let header_bits = inp.bits - u64::from(BITS_PER_INT);
        let original_bytes = stream::decode(&root, &mut inp, output)?;
        output.close()?;

        let stats = CompressionStats {
            original_bytes,
            compressed_bits: inp.bits,
            header_bits,
            distinct_symbols: root.leaf_count(),
        };
        tracing::debug!(original_bytes, compressed_bits = stats.compressed_bits, "decompressed");
        Ok(stats)
    }

    /// Compress an in-memory buffer
    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        let mut input = BitInput::new(Cursor::new(data));
        let mut output = BitOutput::new(Vec::new());
        self.compress(&mut input, &mut output)?;
        Ok(output.into_inner())
    }

    /// Decompress an in-memory buffer
    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        let mut input = BitInput::new(Cursor::new(data));
        let mut output = BitOutput::new(Vec::new());
        self.decompress(&mut input, &mut output)?;
        Ok(output.into_inner())
    }
}
