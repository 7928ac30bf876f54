// Frame payload decoding

use crate::error::{FrameNotice, ShortRead, UndecodableReason};
use crate::id3::frame::{FrameHeader, FrameId};
use crate::id3::frames::FrameRegistry;
use crate::id3::header::TagFlags;
use crate::id3::record::{LyricsRecord, ParseResult, PictureRecord};
use crate::id3::synchsafe;
use crate::utils::encoding::{decode_text, TextEncoding};
use crate::utils::ByteReader;

/// How a frame's payload is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    /// Text frame with its slot in the registry
    Text(usize),
    Lyrics,
    Picture,
    Skipped,
}

/// Decodes frame payloads into a [`ParseResult`]
#[derive(Debug, Clone, Copy)]
pub struct FrameBodyDecoder<'r> {
    registry: &'r FrameRegistry,
    tag_unsynchronised: bool,
}

impl<'r> FrameBodyDecoder<'r> {
    pub fn new(registry: &'r FrameRegistry, tag_flags: TagFlags) -> Self {
        FrameBodyDecoder {
            registry,
            tag_unsynchronised: tag_flags.unsynchronisation(),
        }
    }

    fn kind(&self, id: &FrameId) -> FrameKind {
        if id.is_text() {
            self.registry
                .text_slot(id)
                .map_or(FrameKind::Skipped, FrameKind::Text)
        } else if *id == FrameId::LYRICS {
            FrameKind::Lyrics
        } else if *id == FrameId::PICTURE {
            FrameKind::Picture
        } else {
            FrameKind::Skipped
        }
    }

    /// Decode `payload`, exactly the `header.size` bytes following the header
    ///
    /// Problems are recorded as notices on `result`; the caller moves on to
    /// the next frame whatever happens here.
    pub fn decode(&self, header: &FrameHeader, payload: &[u8], result: &mut ParseResult) {
        let id = header.id;

        if !id.is_valid() {
            result.push_notice(FrameNotice::InvalidFrameId { id });
            return;
        }

        let kind = self.kind(&id);
        if kind == FrameKind::Skipped {
            log::debug!("Frame {id} skipped");
            return;
        }

        if header.flags.compression() {
            result.push_notice(FrameNotice::Undecodable {
                id,
                reason: UndecodableReason::Compressed,
            });
            return;
        }
        if header.flags.encryption() {
            result.push_notice(FrameNotice::Undecodable {
                id,
                reason: UndecodableReason::Encrypted,
            });
            return;
        }

        let mut reader = ByteReader::new(payload);
        let decoded = skip_format_fields(header, &mut reader).and_then(|()| match kind {
            FrameKind::Text(slot) => decode_text_frame(id, slot, &mut reader, result),
            FrameKind::Lyrics => decode_lyrics(id, &mut reader, result),
            FrameKind::Picture => self.decode_picture(header, &mut reader, result),
            FrameKind::Skipped => Ok(()),
        });

        if let Err(e) = decoded {
            result.push_notice(FrameNotice::MalformedFrame {
                id,
                detail: e.to_string(),
            });
        }
    }

    fn decode_picture(
        &self,
        header: &FrameHeader,
        reader: &mut ByteReader<'_>,
        result: &mut ParseResult,
    ) -> Result<(), ShortRead> {
        let id = header.id;
        let encoding = TextEncoding::from_byte(reader.read_u8()?);
        let mime = decode_text(reader.take_terminated(TextEncoding::Latin1), TextEncoding::Latin1)
            .unwrap_or_default();
        let type_code = reader.read_u8()?;

        let description_bytes = reader.take_terminated(encoding);
        let description = match decode_text(description_bytes, encoding) {
            Some(description) => description,
            None => {
                result.push_notice(FrameNotice::UnsupportedEncoding {
                    id,
                    encoding: encoding.as_byte(),
                });
                String::new()
            }
        };

        let raw = reader.take_rest();
        let data = if header.flags.unsynchronisation() || self.tag_unsynchronised {
            synchsafe::remove_unsynchronisation(raw)
        } else {
            raw.to_vec()
        };

        let slot = self.registry.picture_slot(type_code);
        let type_label = self.registry.picture_label(slot);
        log::debug!(
            "Picture ({type_label}, {mime}) of {} byte(s), {} before desynchronisation",
            data.len(),
            raw.len()
        );

        result.set_picture(
            slot,
            PictureRecord {
                type_code,
                type_label,
                mime,
                description,
                data,
                flags: header.flags,
            },
        );
        Ok(())
    }
}

/// Skip the fields format flags add in front of the payload: the group
/// identifier, then the data length indicator. Encrypted frames never get
/// here, so there is no encryption method byte to skip.
fn skip_format_fields(header: &FrameHeader, reader: &mut ByteReader<'_>) -> Result<(), ShortRead> {
    if header.flags.grouping_identity() {
        let group = reader.read_u8()?;
        log::trace!("Frame {} belongs to group {group:#04x}", header.id);
    }
    if header.flags.data_length_indicator() {
        let data_length = reader.read_synchsafe_u32()?;
        log::trace!("Frame {} data length indicator: {data_length}", header.id);
    }
    Ok(())
}

/// Read the encoding byte, reporting encodings that are not decoded
fn read_encoding(
    id: FrameId,
    reader: &mut ByteReader<'_>,
    result: &mut ParseResult,
) -> Result<Option<TextEncoding>, ShortRead> {
    let encoding = TextEncoding::from_byte(reader.read_u8()?);
    if !encoding.is_supported() {
        result.push_notice(FrameNotice::UnsupportedEncoding {
            id,
            encoding: encoding.as_byte(),
        });
        return Ok(None);
    }
    Ok(Some(encoding))
}

fn decode_text_frame(
    id: FrameId,
    slot: usize,
    reader: &mut ByteReader<'_>,
    result: &mut ParseResult,
) -> Result<(), ShortRead> {
    let Some(encoding) = read_encoding(id, reader, result)? else {
        return Ok(());
    };

    if let Some(text) = decode_text(reader.take_rest(), encoding) {
        log::debug!("{id}: {text:?}");
        result.set_text(slot, text);
    }
    Ok(())
}

fn decode_lyrics(
    id: FrameId,
    reader: &mut ByteReader<'_>,
    result: &mut ParseResult,
) -> Result<(), ShortRead> {
    let Some(encoding) = read_encoding(id, reader, result)? else {
        return Ok(());
    };

    let language = decode_text(reader.take(3)?, TextEncoding::Latin1).unwrap_or_default();
    let description = decode_text(reader.take_terminated(encoding), encoding).unwrap_or_default();
    let text = decode_text(reader.take_rest(), encoding).unwrap_or_default();

    log::debug!("Lyrics in {language:?}, {} character(s)", text.chars().count());
    result.set_lyrics(LyricsRecord {
        language,
        description,
        text,
    });
    Ok(())
}
