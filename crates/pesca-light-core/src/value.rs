//! Little-endian decoding of characteristic payloads.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("payload is empty")]
    Empty,
    #[error("payload length {0} does not match the value width")]
    Length(usize),
    #[error("value {0} is out of range")]
    OutOfRange(u32),
}

pub fn decode_bool(data: &[u8]) -> Result<bool, ValueError> {
    data.first().map(|b| *b != 0).ok_or(ValueError::Empty)
}

pub fn decode_u32_le(data: &[u8]) -> Result<u32, ValueError> {
    let bytes: [u8; 4] = data.try_into().map_err(|_| ValueError::Length(data.len()))?;
    Ok(u32::from_le_bytes(bytes))
}

pub fn decode_f32_le(data: &[u8]) -> Result<f32, ValueError> {
    let bytes: [u8; 4] = data.try_into().map_err(|_| ValueError::Length(data.len()))?;
    Ok(f32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_uses_first_byte() {
        crate::test::init();
        assert_eq!(decode_bool(&[0]), Ok(false));
        assert_eq!(decode_bool(&[1]), Ok(true));
        assert_eq!(decode_bool(&[2]), Ok(true));
        assert_eq!(decode_bool(&[]), Err(ValueError::Empty));
    }

    #[test]
    fn u32_is_little_endian() {
        crate::test::init();
        assert_eq!(decode_u32_le(&[50, 0, 0, 0]), Ok(50));
        assert_eq!(decode_u32_le(&[0x01, 0x02, 0, 0]), Ok(0x0201));
    }

    #[test]
    fn u32_rejects_short_and_long_payloads() {
        crate::test::init();
        assert_eq!(decode_u32_le(&[1, 2]), Err(ValueError::Length(2)));
        assert_eq!(decode_u32_le(&[0; 5]), Err(ValueError::Length(5)));
    }

    #[test]
    fn f32_is_little_endian() {
        crate::test::init();
        assert_eq!(decode_f32_le(&180.0_f32.to_le_bytes()), Ok(180.0));
        assert_eq!(decode_f32_le(&[]), Err(ValueError::Length(0)));
    }
}
