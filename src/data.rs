//! Conversion between textual protocol values and their wire representation.
//!
//! The protocol speaks of field values as unsigned [0, 255], but stores them
//! in signed 8-bit wire units. Both views share one bit pattern; only the
//! label changes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteError {
    /// Text is not a plain base-10 integer (empty, signed, spaced or fractional).
    Malformed,
    /// Value does not fit in eight bits.
    OutOfRange,
}

/// Scans a plain base-10 integer: ASCII digits only, no sign, no whitespace.
///
/// Accumulation saturates, so oversized literals stay above every caller's
/// bound instead of wrapping back into range.
pub(crate) fn decimal(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }

    let mut value = 0u32;
    for b in text.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    Some(value)
}

/// Parses a decimal string in [0, 255] into its signed 8-bit wire unit.
///
/// 0..=127 map to themselves, 128..=255 map to `v - 256`. This is a
/// reinterpretation of the low 8 bits, not arithmetic: the result is
/// bit-identical to truncating the value to a byte and reading it signed.
pub fn parse_unsigned_byte(text: &str) -> Result<i8, ByteError> {
    let value = decimal(text).ok_or(ByteError::Malformed)?;
    if value > u32::from(u8::MAX) {
        return Err(ByteError::OutOfRange);
    }
    Ok(value as u8 as i8)
}
