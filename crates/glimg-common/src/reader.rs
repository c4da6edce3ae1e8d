//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor over a byte slice that
//! reads magic bytes and fixed-layout structures without copying
//! the underlying buffer.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// Every read is bounds-checked and fails with [`Error::UnexpectedEof`]
/// instead of panicking.
///
/// # Example
///
/// ```
/// use glimg_common::BinaryReader;
///
/// let data = *b"DDS \x01\x02";
/// let mut reader = BinaryReader::new(&data);
///
/// reader.expect_magic(b"DDS ").unwrap();
/// assert_eq!(reader.read_bytes(2).unwrap(), [0x01, 0x02]);
/// assert_eq!(reader.remaining(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate. Use the
    /// `zerocopy::byteorder` integer types for fields that have a fixed
    /// byte order on disk.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Expect specific magic bytes.
    ///
    /// A buffer shorter than the magic is reported as [`Error::InvalidMagic`]
    /// with whatever bytes were available, not as an EOF.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let available = self.remaining().min(expected.len());
        let actual = self.peek_bytes(available)?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        self.position += expected.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::byteorder::little_endian::U32;

    #[derive(FromBytes)]
    #[repr(C)]
    struct Pair {
        a: U32,
        b: U32,
    }

    #[test]
    fn test_read_struct() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // a: 0x04030201
            0xFF, 0xFF, 0xFF, 0xFF, // b: 0xFFFFFFFF
        ];
        let mut reader = BinaryReader::new(&data);

        let pair: Pair = reader.read_struct().unwrap();
        assert_eq!(pair.a.get(), 0x04030201);
        assert_eq!(pair.b.get(), 0xFFFFFFFF);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), [0x01, 0x02]);
        assert_eq!(reader.remaining(), 4);
        assert_eq!(reader.read_bytes(3).unwrap(), [0x01, 0x02, 0x03]);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_struct::<Pair>(),
            Err(Error::UnexpectedEof { needed: 8, available: 2 })
        ));
    }

    #[test]
    fn test_expect_magic() {
        let mut reader = BinaryReader::new(b"DDS \x7c\0\0\0");
        reader.expect_magic(b"DDS ").unwrap();
        assert_eq!(reader.remaining(), 4);

        let mut reader = BinaryReader::new(b"PNG!");
        assert!(matches!(
            reader.expect_magic(b"DDS "),
            Err(Error::InvalidMagic { .. })
        ));
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_expect_magic_short_buffer() {
        let mut reader = BinaryReader::new(b"DD");
        match reader.expect_magic(b"DDS ") {
            Err(Error::InvalidMagic { actual, .. }) => assert_eq!(actual, b"DD"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
