// Decoded records and the per-parse result that owns them

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Serialize, Serializer};

use crate::error::FrameNotice;
use crate::id3::frame::{FrameFlags, FrameId};
use crate::id3::frames::FrameRegistry;
use crate::id3::header::TagHeader;

/// One slot of the text frame table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFrameRecord {
    pub id: FrameId,
    pub label: &'static str,
    /// Absent until a frame with this ID has been decoded
    pub text: Option<String>,
}

impl TextFrameRecord {
    /// The NUL separated values of a multi-value frame
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.text.as_deref().into_iter().flat_map(|text| text.split('\0'))
    }
}

/// Contents of a `USLT` frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricsRecord {
    pub language: String,
    pub description: String,
    pub text: String,
}

/// Contents of an `APIC` frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PictureRecord {
    /// Type byte as found in the frame
    pub type_code: u8,
    pub type_label: &'static str,
    pub mime: String,
    pub description: String,
    /// Image bytes with unsynchronisation already removed
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
    /// Flags of the frame the picture came from
    pub flags: FrameFlags,
}

impl PictureRecord {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File extension for the image, from its MIME type
    pub fn extension(&self) -> &str {
        match self.mime.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => match self.mime.split_once('/') {
                Some((_, subtype))
                    if !subtype.is_empty()
                        && subtype.bytes().all(|b| b.is_ascii_alphanumeric()) =>
                {
                    subtype
                }
                _ => "bin",
            },
        }
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(data))
}

/// Everything decoded from one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    header: TagHeader,
    text_frames: Vec<TextFrameRecord>,
    lyrics: Option<LyricsRecord>,
    #[serde(serialize_with = "serialize_present")]
    pictures: Vec<Option<PictureRecord>>,
    notices: Vec<FrameNotice>,
    frames_seen: usize,
}

fn serialize_present<S: Serializer>(
    pictures: &[Option<PictureRecord>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(pictures.iter().flatten())
}

impl ParseResult {
    /// Empty result with one slot per registry entry
    pub(crate) fn new(header: TagHeader, registry: &FrameRegistry) -> Self {
        let text_frames = registry
            .text_frames()
            .iter()
            .map(|def| TextFrameRecord {
                id: FrameId::from(def.id),
                label: def.label,
                text: None,
            })
            .collect();

        ParseResult {
            header,
            text_frames,
            lyrics: None,
            pictures: vec![None; registry.picture_slot_count()],
            notices: Vec::new(),
            frames_seen: 0,
        }
    }

    pub fn header(&self) -> &TagHeader {
        &self.header
    }

    /// The whole text frame table in registry order, unset slots included
    pub fn text_frames(&self) -> &[TextFrameRecord] {
        &self.text_frames
    }

    /// Text of the frame `id`, if one was decoded
    pub fn text(&self, id: &str) -> Option<&str> {
        let id = FrameId::from(id);
        self.text_frames
            .iter()
            .find(|record| record.id == id)
            .and_then(|record| record.text.as_deref())
    }

    pub fn lyrics(&self) -> Option<&LyricsRecord> {
        self.lyrics.as_ref()
    }

    /// Stored pictures in registry order, the unmatched slot last
    pub fn pictures(&self) -> impl Iterator<Item = &PictureRecord> {
        self.pictures.iter().flatten()
    }

    /// Picture stored for a type byte
    pub fn picture(&self, type_code: u8) -> Option<&PictureRecord> {
        self.pictures().find(|picture| picture.type_code == type_code)
    }

    /// Problems with individual frames that did not stop the parse
    pub fn notices(&self) -> &[FrameNotice] {
        &self.notices
    }

    /// Number of frame headers read before the end of the tag or padding
    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub(crate) fn set_text(&mut self, slot: usize, text: String) {
        self.text_frames[slot].text = Some(text);
    }

    pub(crate) fn set_lyrics(&mut self, lyrics: LyricsRecord) {
        self.lyrics = Some(lyrics);
    }

    pub(crate) fn set_picture(&mut self, slot: usize, picture: PictureRecord) {
        self.pictures[slot] = Some(picture);
    }

    pub(crate) fn push_notice(&mut self, notice: FrameNotice) {
        log::warn!("{notice}");
        self.notices.push(notice);
    }

    pub(crate) fn count_frame(&mut self) {
        self.frames_seen += 1;
    }
}
