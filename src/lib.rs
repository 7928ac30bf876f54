//! id3lens - reads ID3v2.4 tags
//!
//! The tag is expected at the very start of the buffer. Text information
//! frames, unsynchronised lyrics (`USLT`) and attached pictures (`APIC`)
//! are decoded; other frames are skipped.
//!
//! ```
//! let mut file = b"ID3\x04\x00\x00\x00\x00\x00\x10".to_vec();
//! file.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x00Hello");
//!
//! let tag = id3lens::parse(&file)?;
//! assert_eq!(tag.text("TIT2"), Some("Hello"));
//! # Ok::<(), id3lens::TagError>(())
//! ```

pub mod error;
pub mod id3;
pub mod utils;

pub use error::{FrameNotice, TagError};
pub use id3::v2::parse;
pub use id3::{
    FrameRegistry, LyricsRecord, ParseResult, PictureRecord, TagHeader, TagParser,
    TextFrameRecord,
};
