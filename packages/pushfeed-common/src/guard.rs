use cosmwasm_std::Int256;

/// Byte length of one encoded value: a 32-byte big-endian two's-complement word.
pub const DATA_LENGTH: usize = 32;

/// Largest value a feed can hold, `2^223 - 1`.
pub const INT224_MAX: Int256 = Int256::from_be_bytes(int224_bound(false));

/// Smallest value a feed can hold, `-2^223`.
pub const INT224_MIN: Int256 = Int256::from_be_bytes(int224_bound(true));

const fn int224_bound(negative: bool) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        bytes[i] = match (negative, i) {
            (true, 0..=3) => 0xff,
            (true, 4) => 0x80,
            (true, _) => 0x00,
            (false, 0..=3) => 0x00,
            (false, 4) => 0x7f,
            (false, _) => 0xff,
        };
        i += 1;
    }
    bytes
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is not exactly one 32-byte word.
    MalformedPayload { len: usize },
    /// The word decodes to a value outside int224.
    ValueOutOfRange { value: Int256 },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MalformedPayload { len } => {
                write!(f, "payload must be {} bytes, got {}", DATA_LENGTH, len)
            }
            DecodeError::ValueOutOfRange { value } => {
                write!(f, "value {} does not fit in int224", value)
            }
        }
    }
}

/// Narrows an int256 into the int224 storage range.
pub fn narrow_to_int224(value: Int256) -> Result<Int256, DecodeError> {
    if value > INT224_MAX || value < INT224_MIN {
        return Err(DecodeError::ValueOutOfRange { value });
    }
    Ok(value)
}

/// Decodes a signed payload into a feed value.
///
/// The length is checked before the value is inspected.
pub fn decode_data(data: &[u8]) -> Result<Int256, DecodeError> {
    let word: [u8; DATA_LENGTH] = data
        .try_into()
        .map_err(|_| DecodeError::MalformedPayload { len: data.len() })?;
    narrow_to_int224(Int256::from_be_bytes(word))
}

/// Encodes a value as the 32-byte payload Airnodes sign.
pub fn encode_data(value: Int256) -> [u8; DATA_LENGTH] {
    value.to_be_bytes()
}
