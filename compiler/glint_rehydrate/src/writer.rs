//! Producing blobs.
//!
//! The writer keeps the string table and the command stream apart and
//! joins them in [`BlobWriter::finish`]. Because the header has a fixed
//! size, a string's final offset is known the moment it is interned.

use glint_ir::{Layout, Modifiers};
use rustc_hash::FxHashMap;

use crate::command::{Command, FORMAT_VERSION};
use crate::reader::HEADER_LEN;

#[derive(Debug, Default)]
pub struct BlobWriter {
    strings: Vec<u8>,
    interned: FxHashMap<String, u16>,
    commands: Vec<u8>,
}

impl BlobWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.commands.push(value);
    }

    pub fn write_s8(&mut self, value: i8) {
        self.commands.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u16(&mut self, value: u16) {
        self.commands.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_s16(&mut self, value: i16) {
        self.commands.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.commands.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_s32(&mut self, value: i32) {
        self.commands.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_command(&mut self, command: Command) {
        self.write_u8(command.as_u8());
    }

    /// Write a reference to `text`, adding it to the string table on first
    /// use.
    ///
    /// # Panics
    ///
    /// Panics if `text` is longer than 255 bytes or the string table
    /// outgrows a `u16` offset.
    pub fn write_string(&mut self, text: &str) {
        let offset = self.intern(text);
        self.write_u16(offset);
    }

    fn intern(&mut self, text: &str) -> u16 {
        if let Some(&offset) = self.interned.get(text) {
            return offset;
        }
        let Ok(len) = u8::try_from(text.len()) else {
            panic!("string '{text}' is too long for the string table");
        };
        let Ok(offset) = u16::try_from(HEADER_LEN + self.strings.len()) else {
            panic!("string table is full");
        };
        self.strings.push(len);
        self.strings.extend_from_slice(text.as_bytes());
        self.interned.insert(text.to_owned(), offset);
        offset
    }

    /// Write `layout` in the shortest form that preserves it.
    pub fn write_layout(&mut self, layout: &Layout) {
        if layout.is_default() {
            self.write_command(Command::DefaultLayout);
        } else if *layout == Layout::builtin(layout.builtin) {
            self.write_command(Command::BuiltinLayout);
            self.write_s16(layout.builtin as i16);
        } else {
            self.write_command(Command::Layout);
            self.write_u32(layout.flags.bits());
            self.write_s8(layout.location as i8);
            self.write_s8(layout.offset as i8);
            self.write_s8(layout.binding as i8);
            self.write_s8(layout.index as i8);
            self.write_s8(layout.set as i8);
            self.write_s16(layout.builtin as i16);
            self.write_s8(layout.input_attachment_index as i8);
            self.write_s8(layout.primitive as i8);
            self.write_s8(layout.max_vertices as i8);
            self.write_s8(layout.invocations as i8);
            self.write_string(&layout.when);
            self.write_s8(layout.ctype as i8);
        }
    }

    /// Write `modifiers`, using the one-byte flag form when it fits.
    pub fn write_modifiers(&mut self, modifiers: &Modifiers) {
        if *modifiers == Modifiers::default() {
            self.write_command(Command::DefaultModifiers);
        } else if modifiers.fits_in_byte() {
            self.write_command(Command::Modifiers8Bit);
            self.write_layout(&modifiers.layout);
            self.write_u8(modifiers.flags.bits() as u8);
        } else {
            self.write_command(Command::Modifiers);
            self.write_layout(&modifiers.layout);
            self.write_s32(modifiers.flags.bits() as i32);
        }
    }

    /// Assemble the header, string table and command stream.
    ///
    /// # Panics
    ///
    /// Panics if the string table pushes the first command past a `u16`
    /// offset.
    pub fn finish(self) -> Vec<u8> {
        let Ok(end) = u16::try_from(HEADER_LEN + self.strings.len()) else {
            panic!("string table is full");
        };
        let mut blob = Vec::with_capacity(usize::from(end) + self.commands.len());
        blob.extend_from_slice(&end.to_le_bytes());
        blob.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        blob.extend_from_slice(&self.strings);
        blob.extend_from_slice(&self.commands);
        blob
    }
}
