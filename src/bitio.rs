//! Bit-level input and output used by every codec stage.
//!
//! The codec talks to [`BitSource`] and [`BitSink`]; [`BitInput`] and
//! [`BitOutput`] implement them over `bitstream-io` readers and writers,
//! most significant bit first.

use std::io::{self, Read, Seek, SeekFrom, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

/// A source of bits that can be rewound.
pub trait BitSource {
    /// Read `bits` bits (at most 32) as an unsigned value, or `None` once
    /// the input cannot satisfy the request.
    fn read_bits(&mut self, bits: u32) -> io::Result<Option<u32>>;

    /// Rewind to the first bit of the input.
    fn reset(&mut self) -> io::Result<()>;
}

/// A sink for bits.
pub trait BitSink {
    /// Write the low `bits` bits (at most 32) of `value`.
    fn write_bits(&mut self, bits: u32, value: u32) -> io::Result<()>;

    /// Pad to a byte boundary with zero bits and flush.
    fn close(&mut self) -> io::Result<()>;
}

pub struct BitInput<R: Read> {
    inner: BitReader<R, BigEndian>,
    bits_read: u64,
}

impl<R: Read> BitInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BitReader::endian(reader, BigEndian),
            bits_read: 0,
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    pub fn into_inner(self) -> R {
        self.inner.into_reader()
    }
}

impl<R: Read + Seek> BitSource for BitInput<R> {
    fn read_bits(&mut self, bits: u32) -> io::Result<Option<u32>> {
        match self.inner.read::<u32>(bits) {
            Ok(value) => {
                self.bits_read += u64::from(bits);
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn reset(&mut self) -> io::Result<()> {
        self.inner.byte_align();
        let reader = self
            .inner
            .reader()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "reader not byte aligned"))?;
        reader.seek(SeekFrom::Start(0))?;
        self.bits_read = 0;
        Ok(())
    }
}

pub struct BitOutput<W: Write> {
    inner: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: BitWriter::endian(writer, BigEndian),
            bits_written: 0,
        }
    }

    /// Bits written so far, excluding the padding added by `close`.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Hand back the underlying writer. Call `close` first or a trailing
    /// partial byte is lost.
    pub fn into_inner(self) -> W {
        self.inner.into_writer()
    }
}

impl<W: Write> BitSink for BitOutput<W> {
    fn write_bits(&mut self, bits: u32, value: u32) -> io::Result<()> {
        if bits == 0 {
            return Ok(());
        }
        self.inner.write(bits, value)?;
        self.bits_written += u64::from(bits);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.byte_align()?;
        match self.inner.writer() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_then_read_msb_first() {
        let mut out = BitOutput::new(Vec::new());
        out.write_bits(1, 1).unwrap();
        out.write_bits(3, 0b010).unwrap();
        out.write_bits(9, 256).unwrap();
        out.close().unwrap();
        assert_eq!(out.bits_written(), 13);

        let bytes = out.into_inner();
        assert_eq!(bytes, vec![0b1010_1000, 0b0000_0000]);

        let mut input = BitInput::new(Cursor::new(bytes));
        assert_eq!(input.read_bits(1).unwrap(), Some(1));
        assert_eq!(input.read_bits(3).unwrap(), Some(0b010));
        assert_eq!(input.read_bits(9).unwrap(), Some(256));
        assert_eq!(input.bits_read(), 13);
    }

    #[test]
    fn test_read_past_end_is_none() {
        let mut input = BitInput::new(Cursor::new(vec![0xAB]));
        assert_eq!(input.read_bits(8).unwrap(), Some(0xAB));
        assert_eq!(input.read_bits(8).unwrap(), None);
        assert_eq!(input.read_bits(1).unwrap(), None);
    }

    #[test]
    fn test_reset_rewinds() {
        let mut input = BitInput::new(Cursor::new(vec![1, 2, 3]));
        while input.read_bits(8).unwrap().is_some() {}
        input.reset().unwrap();
        assert_eq!(input.bits_read(), 0);
        assert_eq!(input.read_bits(8).unwrap(), Some(1));
    }

    #[test]
    fn test_zero_width_write_is_noop() {
        let mut out = BitOutput::new(Vec::new());
        out.write_bits(0, 0).unwrap();
        out.close().unwrap();
        assert_eq!(out.bits_written(), 0);
        assert!(out.into_inner().is_empty());
    }
}
