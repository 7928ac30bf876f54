// Synchsafe integers and unsynchronisation
//
// A synchsafe integer spreads 28 bits over 4 bytes, leaving the top bit of
// every byte clear so the tag never contains an MPEG sync pattern.

/// Largest value that fits in 28 bits
pub const MAX: u32 = 0x0FFF_FFFF;

/// Decode a 4-byte synchsafe integer
///
/// The top bit of each byte is masked off rather than rejected.
pub fn decode(bytes: [u8; 4]) -> u32 {
    (u32::from(bytes[0] & 0x7F) << 21)
        | (u32::from(bytes[1] & 0x7F) << 14)
        | (u32::from(bytes[2] & 0x7F) << 7)
        | u32::from(bytes[3] & 0x7F)
}

/// Encode the low 28 bits of `value` as a synchsafe integer
pub fn encode(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

/// Undo unsynchronisation by dropping every 0x00 that directly follows 0xFF
///
/// `FF 00 00` becomes `FF 00`: only the stuffed byte is removed.
pub fn remove_unsynchronisation(content: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(content.len());
    let mut after_ff = false;

    for &byte in content {
        if after_ff && byte == 0x00 {
            after_ff = false;
            continue;
        }

        output.push(byte);
        after_ff = byte == 0xFF;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_known_values() {
        assert_eq!(decode([0x00, 0x00, 0x02, 0x01]), 257);
        assert_eq!(decode([0x7F, 0x7F, 0x7F, 0x7F]), MAX);
        assert_eq!(decode([0x00, 0x00, 0x00, 0x00]), 0);
    }

    #[test]
    fn decode_ignores_high_bits() {
        assert_eq!(decode([0x80, 0x80, 0x82, 0x81]), 257);
        assert_eq!(decode([0xFF, 0xFF, 0xFF, 0xFF]), MAX);
    }

    #[test]
    fn round_trip() {
        for value in [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 1_000_000, 0x0ABC_DEF1, MAX] {
            let bytes = encode(value);
            assert!(bytes.iter().all(|b| b & 0x80 == 0), "{value:#x} -> {bytes:02X?}");
            assert_eq!(decode(bytes), value);
        }
    }

    #[test]
    fn unsynchronisation_removal() {
        assert_eq!(remove_unsynchronisation(&[0xFF, 0x00, 0xE0]), [0xFF, 0xE0]);
        assert_eq!(remove_unsynchronisation(&[0xFF, 0x00, 0x00]), [0xFF, 0x00]);
        assert_eq!(
            remove_unsynchronisation(&[0xFF, 0xFF, 0x00, 0x12]),
            [0xFF, 0xFF, 0x12]
        );
        assert_eq!(remove_unsynchronisation(&[0x00, 0xFF]), [0x00, 0xFF]);
        assert_eq!(remove_unsynchronisation(&[0x12, 0x00, 0x34]), [0x12, 0x00, 0x34]);
        assert!(remove_unsynchronisation(&[]).is_empty());
    }
}
