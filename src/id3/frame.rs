// ID3v2.4 frame headers

use serde::{Serialize, Serializer};

use crate::error::ShortRead;
use crate::id3::header::HEADER_LEN;
use crate::utils::ByteReader;

/// Four byte frame identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub [u8; 4]);

impl FrameId {
    pub const LYRICS: FrameId = FrameId(*b"USLT");
    pub const PICTURE: FrameId = FrameId(*b"APIC");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// IDs are made of capital A-Z and 0-9
    pub fn is_valid(&self) -> bool {
        self.0
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    /// Text information frames all start with `T`
    pub fn is_text(&self) -> bool {
        self.0[0] == b'T'
    }
}

impl From<&str> for FrameId {
    /// Takes the first four bytes, padding with NUL
    fn from(id: &str) -> Self {
        let mut bytes = [0u8; 4];
        for (slot, byte) in bytes.iter_mut().zip(id.bytes()) {
            *slot = byte;
        }
        FrameId(bytes)
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl std::fmt::Debug for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{self}")
        } else {
            write!(f, "{:02X?}", self.0)
        }
    }
}

impl Serialize for FrameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Frame header flags (`%0abc0000 %0h00kmnp`)
///
/// The high byte holds status flags, the low byte format flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameFlags(pub u16);

impl FrameFlags {
    pub const TAG_ALTER_PRESERVATION: u16 = 0x4000;
    pub const FILE_ALTER_PRESERVATION: u16 = 0x2000;
    pub const READ_ONLY: u16 = 0x1000;
    pub const GROUPING_IDENTITY: u16 = 0x0040;
    pub const COMPRESSION: u16 = 0x0008;
    pub const ENCRYPTION: u16 = 0x0004;
    pub const UNSYNCHRONISATION: u16 = 0x0002;
    pub const DATA_LENGTH_INDICATOR: u16 = 0x0001;

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn status(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn format(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    fn has(self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    pub fn tag_alter_preservation(self) -> bool {
        self.has(Self::TAG_ALTER_PRESERVATION)
    }

    pub fn file_alter_preservation(self) -> bool {
        self.has(Self::FILE_ALTER_PRESERVATION)
    }

    pub fn read_only(self) -> bool {
        self.has(Self::READ_ONLY)
    }

    pub fn grouping_identity(self) -> bool {
        self.has(Self::GROUPING_IDENTITY)
    }

    pub fn compression(self) -> bool {
        self.has(Self::COMPRESSION)
    }

    pub fn encryption(self) -> bool {
        self.has(Self::ENCRYPTION)
    }

    pub fn unsynchronisation(self) -> bool {
        self.has(Self::UNSYNCHRONISATION)
    }

    pub fn data_length_indicator(self) -> bool {
        self.has(Self::DATA_LENGTH_INDICATOR)
    }
}

/// A parsed frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameHeader {
    pub id: FrameId,
    /// Payload size, excluding this header
    pub size: u32,
    pub flags: FrameFlags,
}

/// Outcome of reading at a frame boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHeaderRead {
    Frame(FrameHeader),
    /// A zero ID byte: the rest of the tag is padding
    Padding,
}

impl FrameHeader {
    /// Read one frame header
    ///
    /// Padding is recognised from the first byte alone, so it is reported
    /// even when fewer than 10 bytes remain.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<FrameHeaderRead, ShortRead> {
        match reader.peek_u8() {
            None | Some(0x00) => return Ok(FrameHeaderRead::Padding),
            Some(_) => {}
        }

        if reader.remaining() < HEADER_LEN {
            return Err(ShortRead {
                needed: HEADER_LEN,
                remaining: reader.remaining(),
            });
        }

        let id = FrameId(reader.read_array()?);
        let size = reader.read_synchsafe_u32()?;
        let flags = FrameFlags(reader.read_be_u16()?);

        Ok(FrameHeaderRead::Frame(FrameHeader { id, size, flags }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frame_header() {
        let bytes = [b'T', b'I', b'T', b'2', 0x00, 0x00, 0x01, 0x00, 0x40, 0x03];
        let mut reader = ByteReader::new(&bytes);

        let FrameHeaderRead::Frame(header) = FrameHeader::parse(&mut reader).unwrap() else {
            panic!("expected a frame");
        };
        assert_eq!(header.id, FrameId(*b"TIT2"));
        assert_eq!(header.size, 128);
        assert_eq!(header.flags.status(), 0x40);
        assert_eq!(header.flags.format(), 0x03);
        assert!(header.flags.tag_alter_preservation());
        assert!(header.flags.unsynchronisation());
        assert!(header.flags.data_length_indicator());
        assert!(!header.flags.compression());
        assert_eq!(reader.position(), HEADER_LEN);
    }

    #[test]
    fn zero_id_is_padding() {
        let bytes = [0x00, b'I', b'T', b'2', 0x7F, 0x7F, 0x7F, 0x7F, 0xFF, 0xFF];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(FrameHeader::parse(&mut reader).unwrap(), FrameHeaderRead::Padding);
        assert_eq!(reader.position(), 0);

        let mut reader = ByteReader::new(&[0x00, 0x00]);
        assert_eq!(FrameHeader::parse(&mut reader).unwrap(), FrameHeaderRead::Padding);
    }

    #[test]
    fn cut_off_header() {
        let mut reader = ByteReader::new(b"TIT2\x00\x00");
        assert_eq!(
            FrameHeader::parse(&mut reader).unwrap_err(),
            ShortRead { needed: 10, remaining: 6 }
        );
    }

    #[test]
    fn frame_id_rules() {
        assert!(FrameId(*b"TDRC").is_valid());
        assert!(FrameId(*b"TDRC").is_text());
        assert!(FrameId(*b"WXX1").is_valid());
        assert!(!FrameId(*b"tit2").is_valid());
        assert!(!FrameId(*b"TI \x01").is_valid());
        assert!(!FrameId::PICTURE.is_text());
        assert_eq!(FrameId::from("USLT"), FrameId::LYRICS);
        assert_eq!(FrameId::from("APIC").to_string(), "APIC");
    }
}
