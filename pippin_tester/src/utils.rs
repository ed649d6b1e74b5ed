use anyhow::anyhow;

use crate::AppResult;

/// Parse a signed hexadecimal machine word. Values up to 32 bits wide are
/// accepted and read as two's complement: `ffffffff` is -1.
pub fn parse_word(text: &str) -> AppResult<i32> {
    if text.trim().is_empty() {
        return Err(anyhow!("Empty string is not a valid Hexadecimal."));
    }
    let value = i64::from_str_radix(text.trim(), 16)
        .map_err(|e| anyhow!("'{text}' is not a valid hexadecimal word: {e}"))?;

    if let Ok(word) = i32::try_from(value) {
        Ok(word)
    } else if let Ok(word) = u32::try_from(value) {
        Ok(word as i32)
    } else {
        Err(anyhow!("'{text}' does not fit in a 32 bits word."))
    }
}

/// Parse an unsigned hexadecimal address.
pub fn parse_address(text: &str) -> AppResult<usize> {
    if text.trim().is_empty() {
        return Err(anyhow!("Empty string is not a valid Hexadecimal."));
    }

    usize::from_str_radix(text.trim(), 16)
        .map_err(|e| anyhow!("'{text}' is not a valid hexadecimal address: {e}"))
}

pub fn parse_opcode(text: &str) -> AppResult<u8> {
    u8::from_str_radix(text.trim(), 16)
        .map_err(|e| anyhow!("'{text}' is not a valid opcode: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(0x1a, parse_word("1a").unwrap());
        assert_eq!(-1, parse_word("-1").unwrap());
        assert_eq!(-1, parse_word("ffffffff").unwrap());
        assert_eq!(i32::MIN, parse_word("-80000000").unwrap());
        parse_word("").expect_err("Empty string must yield an error.");
        parse_word("xx").expect_err("Non hexa must yield an error.");
        parse_word("100000000").expect_err("33 bits must yield an error.");
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(0x01ff, parse_address("01ff").unwrap());
        parse_address("   ").expect_err("Invisible string must yield an error.");
        parse_address("-1").expect_err("Addresses are not signed.");
    }

    #[test]
    fn test_parse_opcode() {
        assert_eq!(0x1b, parse_opcode("1b").unwrap());
        parse_opcode("100").expect_err("Opcodes are one byte.");
    }
}
