//! The textual offset marker written at the start of every block.
//!
//! A marker is `0x` followed by the block offset in lowercase hex, zero-padded
//! to at least eight digits. Offsets that need more digits get a wider marker;
//! nothing is ever truncated.

/// Length of a marker for any offset below `0x1_0000_0000`.
pub const MIN_MARKER_LEN: usize = 2 + MIN_DIGITS;

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 16;

pub fn format_marker(offset: u64) -> String {
    format!("0x{:08x}", offset)
}

pub fn marker_len(offset: u64) -> usize {
    let digits = (64 - offset.leading_zeros() as usize).div_ceil(4);
    2 + digits.max(MIN_DIGITS)
}

/// Decodes a marker from the start of `bytes`.
///
/// Reads hex digits greedily after the `0x` prefix, so trailing block content
/// that happens to be a lowercase hex digit is taken as part of the marker.
/// Returns `None` when the prefix is missing or fewer than eight digits follow.
pub fn parse_marker(bytes: &[u8]) -> Option<u64> {
    let digits = bytes.strip_prefix(b"0x")?;
    let count = digits
        .iter()
        .take(MAX_DIGITS)
        .take_while(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        .count();
    if count < MIN_DIGITS {
        return None;
    }
    let text = std::str::from_utf8(&digits[..count]).ok()?;
    u64::from_str_radix(text, 16).ok()
}

/// Start offsets of every block in a file of `len` bytes, including a short
/// final block. Yields nothing for an empty file or a zero block size.
pub fn block_offsets(len: u64, block_size: u64) -> impl Iterator<Item = u64> {
    let count = if block_size == 0 {
        0
    } else {
        len.div_ceil(block_size)
    };
    (0..count).map(move |i| i * block_size)
}
