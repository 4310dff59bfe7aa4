//! Errors detected before decoding starts.
//!
//! Once the header checks out the stream is trusted, and malformed records
//! panic instead of producing one of these.

/// A blob whose header cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
    #[error("blob is {len} bytes, too short for a header")]
    TruncatedHeader { len: usize },
    #[error("string table ends at offset {end}, outside the {len}-byte blob")]
    StringTableOutOfBounds { end: usize, len: usize },
    #[error("blob format version {found} does not match decoder version {expected}")]
    VersionMismatch { found: u16, expected: u16 },
}
