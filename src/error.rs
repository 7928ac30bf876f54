// Error and notice types for ID3v2 tag decoding

use serde::Serialize;

use crate::id3::frame::FrameId;

/// A read ran past the end of the bytes available to it
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("needed {needed} more byte(s) but only {remaining} remain")]
pub struct ShortRead {
    pub needed: usize,
    pub remaining: usize,
}

/// Errors that abort a parse. No partial result is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("buffer of {len} byte(s) is too small to hold an ID3v2 header (10 bytes)")]
    TruncatedHeader { len: usize },

    #[error("no ID3v2 tag at the start of the buffer (found magic {found:02X?})")]
    BadMagic { found: [u8; 3] },

    #[error("cannot process ID3v2.{major}.{revision} tag, only ID3v2.4 is supported")]
    UnsupportedVersion { major: u8, revision: u8 },

    #[error("extended header needs {declared} byte(s) but only {available} remain")]
    TruncatedExtendedHeader { declared: usize, available: usize },

    #[error("tag declares {declared} byte(s) after offset {offset} but the buffer holds {available}")]
    TruncatedTag {
        declared: u32,
        offset: usize,
        available: usize,
    },

    #[error("frame header at offset {offset} is cut off by the end of the tag")]
    TruncatedFrameHeader { offset: usize },

    #[error("frame {id} at offset {offset} declares {declared} byte(s) but only {available} remain in the tag")]
    FrameOverrun {
        id: FrameId,
        offset: usize,
        declared: u32,
        available: usize,
    },
}

/// Why a frame with format flags could not be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndecodableReason {
    Compressed,
    Encrypted,
}

impl std::fmt::Display for UndecodableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UndecodableReason::Compressed => write!(f, "compressed"),
            UndecodableReason::Encrypted => write!(f, "encrypted"),
        }
    }
}

/// Per-frame problems. Parsing continues with the next frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameNotice {
    #[error("decoding of encoding type {encoding} is not supported in frame {id}")]
    UnsupportedEncoding { id: FrameId, encoding: u8 },

    #[error("frame {id} is {reason} and cannot be read")]
    Undecodable {
        id: FrameId,
        reason: UndecodableReason,
    },

    #[error("frame ID {id:?} is not made of A-Z and 0-9")]
    InvalidFrameId { id: FrameId },

    #[error("frame {id} is malformed: {detail}")]
    MalformedFrame { id: FrameId, detail: String },
}

impl FrameNotice {
    /// ID of the frame the notice was raised for
    pub fn frame_id(&self) -> &FrameId {
        match self {
            FrameNotice::UnsupportedEncoding { id, .. }
            | FrameNotice::Undecodable { id, .. }
            | FrameNotice::InvalidFrameId { id }
            | FrameNotice::MalformedFrame { id, .. } => id,
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
