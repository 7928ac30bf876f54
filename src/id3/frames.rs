// ID3 frame definitions: the text frames and picture types that are read

use crate::id3::frame::FrameId;

/// A known text information frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFrameDef {
    pub id: &'static str,
    pub label: &'static str,
}

/// A known attached picture type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureTypeDef {
    pub code: u8,
    pub label: &'static str,
}

const fn text(id: &'static str, label: &'static str) -> TextFrameDef {
    TextFrameDef { id, label }
}

const fn picture(code: u8, label: &'static str) -> PictureTypeDef {
    PictureTypeDef { code, label }
}

pub const TEXT_FRAMES: &[TextFrameDef] = &[
    // Identification
    text("TIT1", "Content group"),
    text("TIT2", "Title"),
    text("TIT3", "Subtitle"),
    text("TALB", "Album"),
    text("TOAL", "Original album"),
    text("TRCK", "Track number"),
    text("TPOS", "Part of a set"),
    text("TSST", "Set subtitle"),
    text("TSRC", "ISRC"),
    // Involved persons
    text("TPE1", "Lead artist"),
    text("TPE2", "Band"),
    text("TPE3", "Conductor"),
    text("TPE4", "Interpreted"),
    text("TOPE", "Orig. artist"),
    text("TEXT", "Lyricist"),
    text("TOLY", "Original lyricist"),
    text("TCOM", "Composer"),
    text("TMCL", "Musician credits"),
    text("TIPL", "Involved people"),
    text("TENC", "Encoded by"),
    // Derived and subjective properties
    text("TBPM", "BPM"),
    text("TLEN", "Length"),
    text("TKEY", "Initial key"),
    text("TLAN", "Language"),
    text("TCON", "Content type"),
    text("TFLT", "File type"),
    text("TMED", "Media type"),
    text("TMOO", "Mood"),
    // Rights and license
    text("TCOP", "Copyright message"),
    text("TPRO", "Produced notice"),
    text("TPUB", "Publisher"),
    text("TOWN", "File owner"),
    text("TRSN", "Internet radio station name"),
    text("TRSO", "Internet radio station owner"),
    // Other
    text("TOFN", "Orig. filename"),
    text("TDLY", "Playlist delay"),
    text("TDEN", "Encoding time"),
    text("TDOR", "Orig. release time"),
    text("TDRC", "Recording time"),
    text("TDRL", "Release time"),
    text("TDTG", "Tagging time"),
    text("TSSE", "SW/HW and settings used for encoding"),
    text("TSOA", "Album sort"),
    text("TSOP", "Performer sort"),
    text("TSOT", "Title sort"),
];

pub const PICTURE_TYPES: &[PictureTypeDef] = &[
    picture(0x00, "other"),
    picture(0x01, "file icon"),
    picture(0x02, "other file icon"),
    picture(0x03, "cover front"),
    picture(0x04, "cover back"),
    picture(0x05, "leaflet page"),
    picture(0x06, "media"),
    picture(0x07, "soloist"),
    picture(0x08, "artist"),
    picture(0x09, "conductor"),
    picture(0x0A, "band"),
    picture(0x0B, "composer"),
    picture(0x0C, "lyricist"),
    picture(0x0D, "recording location"),
    picture(0x0E, "during recording"),
    picture(0x0F, "during performance"),
    picture(0x10, "movie screen capture"),
    picture(0x11, "bright coloured fish"),
    picture(0x12, "illustration"),
    picture(0x13, "band logotype"),
    picture(0x14, "publisher"),
];

/// Label of the slot that collects pictures with an unlisted type byte
pub const UNMATCHED_PICTURE_LABEL: &str = "unknown type";

/// Read-only lookup tables for the frames the decoder understands
///
/// A parse borrows the registry; results are written to a separate
/// per-parse structure.
#[derive(Debug, Clone, Copy)]
pub struct FrameRegistry {
    text_frames: &'static [TextFrameDef],
    picture_types: &'static [PictureTypeDef],
}

static STANDARD: FrameRegistry = FrameRegistry {
    text_frames: TEXT_FRAMES,
    picture_types: PICTURE_TYPES,
};

impl FrameRegistry {
    /// The ID3v2.4 frames listed above
    pub fn standard() -> &'static FrameRegistry {
        &STANDARD
    }

    pub fn text_frames(&self) -> &'static [TextFrameDef] {
        self.text_frames
    }

    pub fn picture_types(&self) -> &'static [PictureTypeDef] {
        self.picture_types
    }

    /// Index of `id` in the text frame table
    pub fn text_slot(&self, id: &FrameId) -> Option<usize> {
        self.text_frames
            .iter()
            .position(|def| def.id.as_bytes() == id.as_bytes())
    }

    /// Number of picture slots, the unmatched slot included
    pub fn picture_slot_count(&self) -> usize {
        self.picture_types.len() + 1
    }

    /// Slot for a picture type byte; unlisted bytes share the last slot
    pub fn picture_slot(&self, code: u8) -> usize {
        self.picture_types
            .iter()
            .position(|def| def.code == code)
            .unwrap_or(self.picture_types.len())
    }

    pub fn picture_label(&self, slot: usize) -> &'static str {
        self.picture_types
            .get(slot)
            .map_or(UNMATCHED_PICTURE_LABEL, |def| def.label)
    }
}
