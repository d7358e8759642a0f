//! hex literal parsing for command arguments

use crate::error::MonitorError;

/// parses a `0x` prefixed hex literal into a 32 bit value
///
/// only the leading `0` of the prefix is actually checked, the second character is skipped whatever it is. digits are
/// accumulated from the last one backwards, so anything past 8 digits falls off the top of the value
pub fn parse_hex(arg: &str) -> Result<u32, MonitorError> {
    let bytes = arg.as_bytes();

    if bytes.first() != Some(&b'0') {
        return Err(MonitorError::InvalidHex);
    }

    let digits = bytes.get(2..).unwrap_or_default();

    let mut value: u32 = 0;
    let mut weight: u32 = 1;

    for &c in digits.iter().rev() {
        let digit = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => return Err(MonitorError::InvalidHex),
        };

        value = value.wrapping_add(weight.wrapping_mul(digit.into()));
        weight = weight.wrapping_mul(16);
    }

    Ok(value)
}
