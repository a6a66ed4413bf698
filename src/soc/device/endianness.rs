#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    #[inline(always)]
    pub fn decode_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        }
    }

    #[inline(always)]
    pub fn decode_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::Little => u32::from_le_bytes(bytes),
            Endianness::Big => u32::from_be_bytes(bytes),
        }
    }

    #[inline(always)]
    pub fn decode_u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            Endianness::Little => u64::from_le_bytes(bytes),
            Endianness::Big => u64::from_be_bytes(bytes),
        }
    }

    #[inline(always)]
    pub fn encode_u16(self, value: u16) -> [u8; 2] {
        match self {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        }
    }

    #[inline(always)]
    pub fn encode_u32(self, value: u32) -> [u8; 4] {
        match self {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        }
    }

    #[inline(always)]
    pub fn encode_u64(self, value: u64) -> [u8; 8] {
        match self {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Endianness;

    #[test]
    fn big_and_little_disagree_on_byte_order() {
        let word = 0x1234_5678u32;
        assert_eq!(Endianness::Little.encode_u32(word), [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(Endianness::Big.encode_u32(word), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(
            Endianness::Big.decode_u16([0xAB, 0xCD]),
            0xABCD,
            "big-endian decode keeps the leading byte high"
        );
    }
}
