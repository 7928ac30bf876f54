// ID3v2 tag header and extended header

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::utils::ByteReader;

/// Length of the tag header, and of every frame header
pub const HEADER_LEN: usize = 10;

const MAGIC: [u8; 3] = *b"ID3";

/// Tag header flag byte (`%abcd0000`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagFlags(pub u8);

impl TagFlags {
    pub const UNSYNCHRONISATION: u8 = 0x80;
    pub const EXTENDED_HEADER: u8 = 0x40;
    pub const EXPERIMENTAL: u8 = 0x20;
    pub const FOOTER: u8 = 0x10;

    pub fn bits(self) -> u8 {
        self.0
    }

    /// All frames in the tag have been unsynchronised
    pub fn unsynchronisation(self) -> bool {
        self.0 & Self::UNSYNCHRONISATION != 0
    }

    pub fn extended_header(self) -> bool {
        self.0 & Self::EXTENDED_HEADER != 0
    }

    pub fn experimental(self) -> bool {
        self.0 & Self::EXPERIMENTAL != 0
    }

    pub fn footer(self) -> bool {
        self.0 & Self::FOOTER != 0
    }
}

/// ID3v2 header structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagHeader {
    pub major_version: u8,
    pub revision: u8,
    pub flags: TagFlags,
    /// Bytes following the header, extended header and padding included, footer excluded
    pub size: u32,
}

impl TagHeader {
    /// Read the 10-byte header at the reader's position
    ///
    /// The version is not checked here; see [`TagHeader::ensure_supported`].
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let remaining = reader.remaining();
        let truncated = |_| TagError::TruncatedHeader { len: remaining };

        let magic: [u8; 3] = reader.read_array().map_err(truncated)?;
        if magic != MAGIC {
            return Err(TagError::BadMagic { found: magic });
        }

        let [major_version, revision, flags] = reader.read_array().map_err(truncated)?;
        let size = reader.read_synchsafe_u32().map_err(truncated)?;

        Ok(TagHeader {
            major_version,
            revision,
            flags: TagFlags(flags),
            size,
        })
    }

    /// Only ID3v2.4 tags are read
    pub fn ensure_supported(&self) -> Result<()> {
        if self.major_version != 4 {
            return Err(TagError::UnsupportedVersion {
                major: self.major_version,
                revision: self.revision,
            });
        }
        Ok(())
    }

    /// Offset one past the last byte covered by `size`
    pub fn tag_end(&self) -> usize {
        HEADER_LEN + self.size as usize
    }
}

/// Skip the extended header at the reader's position
///
/// Layout is a synchsafe size, the flag byte count and one flag byte,
/// followed by `size` bytes of flag data. None of it is interpreted.
/// Returns the decoded size.
pub fn skip_extended_header(reader: &mut ByteReader<'_>) -> Result<u32> {
    let available = reader.remaining();

    let size = reader
        .read_synchsafe_u32()
        .map_err(|_| TagError::TruncatedExtendedHeader { declared: 6, available })?;

    let declared = 6 + size as usize;
    reader
        .skip(2)
        .and_then(|()| reader.skip(size as usize))
        .map_err(|_| TagError::TruncatedExtendedHeader { declared, available })?;

    log::debug!("Skipped extended header of {declared} byte(s)");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::synchsafe;

    fn header_bytes(major: u8, flags: u8, size: u32) -> Vec<u8> {
        let mut bytes = b"ID3".to_vec();
        bytes.extend_from_slice(&[major, 0, flags]);
        bytes.extend_from_slice(&synchsafe::encode(size));
        bytes
    }

    #[test]
    fn parse_v24_header() {
        let bytes = header_bytes(4, 0, 1234);
        let mut reader = ByteReader::new(&bytes);
        let header = TagHeader::parse(&mut reader).unwrap();

        assert_eq!(header.major_version, 4);
        assert_eq!(header.revision, 0);
        assert_eq!(header.flags, TagFlags(0));
        assert_eq!(header.size, 1234);
        assert_eq!(header.tag_end(), 1244);
        assert_eq!(reader.position(), HEADER_LEN);
        assert!(header.ensure_supported().is_ok());
    }

    #[test]
    fn bad_magic() {
        let mut bytes = header_bytes(4, 0, 0);
        bytes[..3].copy_from_slice(b"TAG");
        let err = TagHeader::parse(&mut ByteReader::new(&bytes)).unwrap_err();
        assert_eq!(err, TagError::BadMagic { found: *b"TAG" });
    }

    #[test]
    fn truncated_header() {
        let err = TagHeader::parse(&mut ByteReader::new(b"ID3\x04\x00")).unwrap_err();
        assert_eq!(err, TagError::TruncatedHeader { len: 5 });
    }

    #[test]
    fn other_versions_are_rejected() {
        let bytes = header_bytes(3, 0, 0);
        let header = TagHeader::parse(&mut ByteReader::new(&bytes)).unwrap();
        assert_eq!(
            header.ensure_supported().unwrap_err(),
            TagError::UnsupportedVersion { major: 3, revision: 0 }
        );
    }

    #[test]
    fn flag_bits() {
        let flags = TagFlags(TagFlags::UNSYNCHRONISATION | TagFlags::FOOTER);
        assert!(flags.unsynchronisation());
        assert!(flags.footer());
        assert!(!flags.extended_header());
        assert!(!flags.experimental());
    }

    #[test]
    fn extended_header_is_skipped() {
        let mut bytes = synchsafe::encode(3).to_vec();
        bytes.extend_from_slice(&[0x01, 0x20, 0xAA, 0xBB, 0xCC, 0x54]);
        let mut reader = ByteReader::new(&bytes);

        assert_eq!(skip_extended_header(&mut reader).unwrap(), 3);
        assert_eq!(reader.peek_u8(), Some(0x54));
    }

    #[test]
    fn extended_header_past_the_end() {
        let mut bytes = synchsafe::encode(100).to_vec();
        bytes.extend_from_slice(&[0x01, 0x00, 0xAA]);
        let err = skip_extended_header(&mut ByteReader::new(&bytes)).unwrap_err();
        assert_eq!(
            err,
            TagError::TruncatedExtendedHeader { declared: 106, available: 7 }
        );
    }
}
