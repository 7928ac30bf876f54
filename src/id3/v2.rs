// ID3v2.4 tag parsing

use crate::error::{Result, TagError};
use crate::id3::body::FrameBodyDecoder;
use crate::id3::frame::{FrameHeader, FrameHeaderRead};
use crate::id3::frames::FrameRegistry;
use crate::id3::header::{skip_extended_header, TagHeader, HEADER_LEN};
use crate::id3::record::ParseResult;
use crate::utils::io::hex_dump;
use crate::utils::ByteReader;

/// Reads an ID3v2.4 tag from the start of an in-memory file
///
/// The parser only borrows its registry, so one parser can be shared
/// between threads and every call returns an independent result.
#[derive(Debug, Clone, Copy)]
pub struct TagParser<'r> {
    registry: &'r FrameRegistry,
}

impl Default for TagParser<'static> {
    fn default() -> Self {
        TagParser::new(FrameRegistry::standard())
    }
}

impl<'r> TagParser<'r> {
    pub fn new(registry: &'r FrameRegistry) -> Self {
        TagParser { registry }
    }

    /// Parse the tag at the start of `buffer`
    ///
    /// Header problems abort the parse. Problems inside single frames are
    /// collected in [`ParseResult::notices`] and the next frame is read.
    pub fn parse(&self, buffer: &[u8]) -> Result<ParseResult> {
        log::debug!("Buffer length: {}", buffer.len());
        if buffer.len() < HEADER_LEN {
            return Err(TagError::TruncatedHeader { len: buffer.len() });
        }
        log::trace!("Tag header: {}", hex_dump(&buffer[..HEADER_LEN]));

        let mut reader = ByteReader::new(buffer);
        let header = TagHeader::parse(&mut reader)?;
        log::debug!(
            "ID3v2.{}.{} tag, flags {:#04x}, size {}",
            header.major_version,
            header.revision,
            header.flags.bits(),
            header.size
        );

        header.ensure_supported()?;

        if header.flags.extended_header() {
            skip_extended_header(&mut reader)?;
        }

        let offset = reader.position();
        if buffer.len() < offset + header.size as usize {
            return Err(TagError::TruncatedTag {
                declared: header.size,
                offset,
                available: buffer.len(),
            });
        }

        let tag_end = header.tag_end();
        let start = offset.min(tag_end);
        let mut frames = ByteReader::new(&buffer[start..tag_end]);

        let decoder = FrameBodyDecoder::new(self.registry, header.flags);
        let mut result = ParseResult::new(header, self.registry);

        while !frames.is_empty() {
            let frame_offset = start + frames.position();

            let frame = match FrameHeader::parse(&mut frames) {
                Ok(FrameHeaderRead::Frame(frame)) => frame,
                Ok(FrameHeaderRead::Padding) => {
                    log::debug!(
                        "Padding of {} byte(s) at offset {frame_offset}",
                        frames.remaining()
                    );
                    break;
                }
                Err(_) => return Err(TagError::TruncatedFrameHeader { offset: frame_offset }),
            };

            result.count_frame();
            log::debug!(
                "Frame {} at offset {frame_offset}: size {}, flags {:#06x}",
                frame.id,
                frame.size,
                frame.flags.bits()
            );

            let payload = frames
                .take(frame.size as usize)
                .map_err(|e| TagError::FrameOverrun {
                    id: frame.id,
                    offset: frame_offset,
                    declared: frame.size,
                    available: e.remaining,
                })?;

            decoder.decode(&frame, payload, &mut result);
        }

        Ok(result)
    }
}

/// Parse with the standard frame registry
pub fn parse(buffer: &[u8]) -> Result<ParseResult> {
    TagParser::default().parse(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::frame::FrameId;
    use crate::id3::header::TagFlags;
    use crate::id3::synchsafe;

    fn frame(id: &[u8; 4], flags: u16, payload: &[u8]) -> Vec<u8> {
        let mut bytes = id.to_vec();
        bytes.extend_from_slice(&synchsafe::encode(payload.len() as u32));
        bytes.extend_from_slice(&flags.to_be_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    fn tag(flags: u8, body: &[u8], padding: usize) -> Vec<u8> {
        let mut bytes = b"ID3\x04\x00".to_vec();
        bytes.push(flags);
        bytes.extend_from_slice(&synchsafe::encode((body.len() + padding) as u32));
        bytes.extend_from_slice(body);
        bytes.resize(bytes.len() + padding, 0);
        bytes
    }

    #[test]
    fn frames_until_padding() {
        let mut body = frame(b"TIT2", 0, b"\x00Hello");
        body.extend(frame(b"TPE1", 0, b"\x03World"));
        let mut buffer = tag(0, &body, 32);
        // Audio data after the tag is never read
        buffer.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);

        let result = parse(&buffer).unwrap();
        assert_eq!(result.header().size as usize, body.len() + 32);
        assert_eq!(result.text("TIT2"), Some("Hello"));
        assert_eq!(result.text("TPE1"), Some("World"));
        assert_eq!(result.frames_seen(), 2);
        assert!(result.notices().is_empty());
    }

    #[test]
    fn padding_ends_the_loop_whatever_follows() {
        let mut body = frame(b"TIT2", 0, b"\x00Hello");
        body.push(0x00);
        body.extend(frame(b"TALB", 0, b"\x00Hidden"));

        let result = parse(&tag(0, &body, 0)).unwrap();
        assert_eq!(result.text("TIT2"), Some("Hello"));
        assert_eq!(result.text("TALB"), None);
        assert_eq!(result.frames_seen(), 1);
    }

    #[test]
    fn tag_without_padding_ends_at_declared_size() {
        let body = frame(b"TCON", 0, b"\x00Ambient");
        let result = parse(&tag(0, &body, 0)).unwrap();
        assert_eq!(result.text("TCON"), Some("Ambient"));
    }

    #[test]
    fn unsupported_encoding_does_not_stop_the_parse() {
        let mut body = frame(b"TIT2", 0, b"\x01\xFF\xFEH\x00");
        body.extend(frame(b"TALB", 0, b"\x00Album"));

        let result = parse(&tag(0, &body, 10)).unwrap();
        assert_eq!(result.text("TIT2"), None);
        assert_eq!(result.text("TALB"), Some("Album"));
        assert_eq!(result.notices().len(), 1);
    }

    #[test]
    fn extended_header_is_skipped() {
        let mut body = synchsafe::encode(2).to_vec();
        body.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        body.extend(frame(b"TIT2", 0, b"\x00After"));

        let mut buffer = tag(TagFlags::EXTENDED_HEADER, &body, 4);

        // The size check after the extended header counts from the cursor,
        // so the file has to extend past the tag by the extended header's length
        assert!(matches!(parse(&buffer), Err(TagError::TruncatedTag { offset: 18, .. })));

        buffer.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00]);
        let result = parse(&buffer).unwrap();
        assert_eq!(result.text("TIT2"), Some("After"));
        assert_eq!(result.frames_seen(), 1);
    }

    #[test]
    fn short_buffer() {
        assert_eq!(
            parse(b"ID3\x04").unwrap_err(),
            TagError::TruncatedHeader { len: 4 }
        );
    }

    #[test]
    fn missing_magic() {
        let mut buffer = tag(0, &[], 10);
        buffer[0] = b'X';
        assert!(matches!(parse(&buffer), Err(TagError::BadMagic { .. })));
    }

    #[test]
    fn version_three_is_refused() {
        let mut buffer = tag(0, &frame(b"TIT2", 0, b"\x00x"), 0);
        buffer[3] = 3;
        assert_eq!(
            parse(&buffer).unwrap_err(),
            TagError::UnsupportedVersion { major: 3, revision: 0 }
        );
    }

    #[test]
    fn declared_size_past_the_buffer() {
        let mut buffer = tag(0, &frame(b"TIT2", 0, b"\x00Hello"), 0);
        buffer.truncate(buffer.len() - 1);
        assert!(matches!(parse(&buffer), Err(TagError::TruncatedTag { .. })));
    }

    #[test]
    fn frame_larger_than_the_tag() {
        let mut body = frame(b"TIT2", 0, b"\x00Hello");
        body[4..8].copy_from_slice(&synchsafe::encode(500));

        let err = parse(&tag(0, &body, 0)).unwrap_err();
        assert_eq!(
            err,
            TagError::FrameOverrun {
                id: FrameId(*b"TIT2"),
                offset: 10,
                declared: 500,
                available: 6,
            }
        );
    }

    #[test]
    fn frame_header_cut_off_by_tag_end() {
        let mut body = frame(b"TIT2", 0, b"\x00Hello");
        body.extend_from_slice(b"TAL");

        let err = parse(&tag(0, &body, 0)).unwrap_err();
        assert_eq!(err, TagError::TruncatedFrameHeader { offset: 26 });
    }

    #[test]
    fn parses_are_independent() {
        let first = tag(0, &frame(b"TIT2", 0, b"\x00One"), 0);
        let second = tag(0, &frame(b"TALB", 0, b"\x00Two"), 0);

        let parser = TagParser::default();
        let a = parser.parse(&first).unwrap();
        let b = parser.parse(&second).unwrap();
        assert_eq!(a.text("TALB"), None);
        assert_eq!(b.text("TIT2"), None);
        assert_eq!(a.text("TIT2"), Some("One"));
        assert_eq!(b.text("TALB"), Some("Two"));
    }
}
