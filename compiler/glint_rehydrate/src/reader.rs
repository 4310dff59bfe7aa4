//! Little-endian cursor over a blob.
//!
//! Layout of a blob:
//!
//! ```text
//! u16  offset of the first command (end of the string table)
//! u16  format version
//! ...  string table: for each string, u8 length then UTF-8 bytes
//! ...  command stream
//! ```
//!
//! A string in the command stream is a `u16` offset into the blob pointing
//! at its length byte. Strings are handed out as slices of the blob.

use crate::command::{Command, FORMAT_VERSION};
use crate::BlobError;

/// Size of the two `u16` header fields.
pub(crate) const HEADER_LEN: usize = 4;

#[derive(Clone, Debug)]
pub struct BlobReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BlobReader<'a> {
    /// Validate the header and position the cursor on the first command.
    pub fn new(bytes: &'a [u8]) -> Result<Self, BlobError> {
        let len = bytes.len();
        let [end_lo, end_hi, version_lo, version_hi, ..] = *bytes else {
            return Err(BlobError::TruncatedHeader { len });
        };
        let version = u16::from_le_bytes([version_lo, version_hi]);
        if version != FORMAT_VERSION {
            return Err(BlobError::VersionMismatch {
                found: version,
                expected: FORMAT_VERSION,
            });
        }
        let end = usize::from(u16::from_le_bytes([end_lo, end_hi]));
        if end < HEADER_LEN || end > len {
            return Err(BlobError::StringTableOutOfBounds { end, len });
        }
        Ok(BlobReader { bytes, pos: end })
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let Some(chunk) = self.bytes.get(self.pos..self.pos + N) else {
            panic!(
                "blob truncated: {N} bytes wanted at offset {} of {}",
                self.pos,
                self.bytes.len()
            );
        };
        let mut out = [0; N];
        out.copy_from_slice(chunk);
        self.pos += N;
        out
    }

    pub fn read_u8(&mut self) -> u8 {
        u8::from_le_bytes(self.take())
    }

    pub fn read_s8(&mut self) -> i8 {
        i8::from_le_bytes(self.take())
    }

    pub fn read_u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    pub fn read_s16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    pub fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    pub fn read_s32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    pub fn read_bool(&mut self) -> bool {
        self.read_u8() != 0
    }

    /// # Panics
    ///
    /// Panics if the byte is not a known command.
    pub fn read_command(&mut self) -> Command {
        let byte = self.read_u8();
        match Command::from_u8(byte) {
            Some(command) => command,
            None => panic!("unknown command byte {byte} at offset {}", self.pos - 1),
        }
    }

    /// # Panics
    ///
    /// Panics if the offset or length runs past the blob, or the bytes are
    /// not UTF-8.
    pub fn read_string(&mut self) -> &'a str {
        let offset = usize::from(self.read_u16());
        let bytes: &'a [u8] = self.bytes;
        let Some(&len) = bytes.get(offset) else {
            panic!("string offset {offset} outside the {}-byte blob", bytes.len());
        };
        let start = offset + 1;
        let Some(text) = bytes.get(start..start + usize::from(len)) else {
            panic!("string at offset {offset} runs past the end of the blob");
        };
        match std::str::from_utf8(text) {
            Ok(text) => text,
            Err(err) => panic!("string at offset {offset} is not UTF-8: {err}"),
        }
    }
}

#[cfg(test)]
mod tests;
