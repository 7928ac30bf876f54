// ID3v2.4 tag decoding
pub mod body;
pub mod frame;
pub mod frames;
pub mod header;
pub mod record;
pub mod synchsafe;
pub mod v2;

pub use frame::{FrameFlags, FrameHeader, FrameId};
pub use frames::FrameRegistry;
pub use header::{TagFlags, TagHeader};
pub use record::{LyricsRecord, ParseResult, PictureRecord, TextFrameRecord};
pub use v2::TagParser;
