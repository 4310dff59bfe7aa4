use super::*;
use crate::writer::BlobWriter;
use pretty_assertions::assert_eq;

fn blob_with(build: impl FnOnce(&mut BlobWriter)) -> Vec<u8> {
    let mut writer = BlobWriter::new();
    build(&mut writer);
    writer.finish()
}

#[test]
fn short_buffers_have_no_header() {
    let cases: [&[u8]; 3] = [&[], &[4], &[4, 0, 1]];
    for bytes in cases {
        assert_eq!(
            BlobReader::new(bytes).map(|reader| reader.position()),
            Err(BlobError::TruncatedHeader { len: bytes.len() })
        );
    }
}

#[test]
fn version_is_checked_before_the_string_table() {
    let bytes = [0xff, 0xff, 2, 0];
    assert_eq!(
        BlobReader::new(&bytes).map(|reader| reader.position()),
        Err(BlobError::VersionMismatch {
            found: 2,
            expected: FORMAT_VERSION,
        })
    );
}

#[test]
fn string_table_end_must_lie_inside_the_blob() {
    let past_end = [9, 0, 1, 0, 0];
    assert_eq!(
        BlobReader::new(&past_end).map(|reader| reader.position()),
        Err(BlobError::StringTableOutOfBounds { end: 9, len: 5 })
    );

    let inside_header = [2, 0, 1, 0];
    assert_eq!(
        BlobReader::new(&inside_header).map(|reader| reader.position()),
        Err(BlobError::StringTableOutOfBounds { end: 2, len: 4 })
    );
}

#[test]
fn cursor_starts_after_the_string_table() {
    let bytes = blob_with(|writer| {
        writer.write_string("float");
        writer.write_u8(7);
    });
    let Ok(mut reader) = BlobReader::new(&bytes) else {
        panic!("header rejected");
    };
    assert_eq!(reader.position(), HEADER_LEN + 1 + "float".len());
    assert_eq!(reader.read_string(), "float");
    assert_eq!(reader.read_u8(), 7);
    assert_eq!(reader.position(), bytes.len());
}

#[test]
fn integers_are_little_endian() {
    let bytes = blob_with(|writer| {
        writer.write_u16(0x1234);
        writer.write_s16(-2);
        writer.write_u32(0xdead_beef);
        writer.write_s32(-100_000);
        writer.write_s8(-5);
        writer.write_bool(true);
    });
    let Ok(mut reader) = BlobReader::new(&bytes) else {
        panic!("header rejected");
    };
    assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 2], &[0x34, 0x12]);
    assert_eq!(reader.read_u16(), 0x1234);
    assert_eq!(reader.read_s16(), -2);
    assert_eq!(reader.read_u32(), 0xdead_beef);
    assert_eq!(reader.read_s32(), -100_000);
    assert_eq!(reader.read_s8(), -5);
    assert!(reader.read_bool());
}

#[test]
fn strings_borrow_from_the_blob() {
    let bytes = blob_with(|writer| {
        writer.write_string("frag_color");
        writer.write_string("");
    });
    let (name, empty) = {
        let Ok(mut reader) = BlobReader::new(&bytes) else {
            panic!("header rejected");
        };
        (reader.read_string(), reader.read_string())
    };
    assert_eq!(name, "frag_color");
    assert_eq!(empty, "");
}

#[test]
fn commands_decode_from_their_tag() {
    let bytes = blob_with(|writer| {
        writer.write_command(Command::SymbolTable);
        writer.write_command(Command::Void);
    });
    let Ok(mut reader) = BlobReader::new(&bytes) else {
        panic!("header rejected");
    };
    assert_eq!(reader.read_command(), Command::SymbolTable);
    assert_eq!(reader.read_command(), Command::Void);
}

#[test]
#[should_panic(expected = "unknown command byte 200")]
fn unknown_command_byte_panics() {
    let bytes = blob_with(|writer| writer.write_u8(200));
    if let Ok(mut reader) = BlobReader::new(&bytes) {
        reader.read_command();
    }
}

#[test]
#[should_panic(expected = "blob truncated")]
fn reading_past_the_end_panics() {
    let bytes = blob_with(|writer| writer.write_u8(1));
    if let Ok(mut reader) = BlobReader::new(&bytes) {
        reader.read_u32();
    }
}

#[test]
#[should_panic(expected = "outside the")]
fn string_offset_past_the_end_panics() {
    let bytes = blob_with(|writer| writer.write_u16(500));
    if let Ok(mut reader) = BlobReader::new(&bytes) {
        reader.read_string();
    }
}
