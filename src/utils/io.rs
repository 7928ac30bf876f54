// Bounded byte reading over in-memory tag data

use crate::error::ShortRead;
use crate::id3::synchsafe;
use crate::utils::encoding::TextEncoding;

/// Forward-only cursor over a byte slice
///
/// Every read checks the remaining length first, so a size taken from the
/// file can never move the cursor outside the slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Offset of the next unread byte
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn ensure(&self, needed: usize) -> Result<(), ShortRead> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(ShortRead { needed, remaining });
        }
        Ok(())
    }

    /// Take the next `len` bytes
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], ShortRead> {
        self.ensure(len)?;
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Take everything left
    pub fn take_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    pub fn skip(&mut self, len: usize) -> Result<(), ShortRead> {
        self.take(len).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, ShortRead> {
        Ok(self.take(1)?[0])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ShortRead> {
        let mut buffer = [0u8; N];
        buffer.copy_from_slice(self.take(N)?);
        Ok(buffer)
    }

    /// Read big-endian 16-bit integer
    pub fn read_be_u16(&mut self) -> Result<u16, ShortRead> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read synchsafe 32-bit integer (7 bits per byte)
    pub fn read_synchsafe_u32(&mut self) -> Result<u32, ShortRead> {
        Ok(synchsafe::decode(self.read_array()?))
    }

    /// Take a string field ending in the terminator used by `encoding`
    ///
    /// The terminator is consumed but not returned. The scan never looks
    /// past the end of the slice: an unterminated field is the rest of it.
    pub fn take_terminated(&mut self, encoding: TextEncoding) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        let (field_len, terminator_len) = if encoding.is_wide() {
            match rest.chunks_exact(2).position(|pair| pair == [0, 0]) {
                Some(index) => (index * 2, 2),
                None => (rest.len(), 0),
            }
        } else {
            match rest.iter().position(|&b| b == 0) {
                Some(index) => (index, 1),
                None => (rest.len(), 0),
            }
        };

        self.pos += field_len + terminator_len;
        &rest[..field_len]
    }
}

/// Space separated hex bytes, for trace logging
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
