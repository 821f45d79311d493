//! Hex+ASCII rendering of raw buffers, one 16-byte row per line.

use std::fmt::Write;

/// Bytes rendered per hexdump row.
pub const HEX_ROW_BYTES: usize = 16;

/// Width of the zero-padded row offset.
pub const HEX_OFFSET_WIDTH: usize = 8;

/// Length of a full row: offset, gap, hex columns, separator, ASCII column.
pub const HEXDUMP_LINE_LEN: usize = HEX_OFFSET_WIDTH + 2 + HEX_ROW_BYTES * 3 + 3 + HEX_ROW_BYTES;

/// Number of rows needed for `len` bytes.
pub fn row_count(len: usize) -> usize {
    len.div_ceil(HEX_ROW_BYTES)
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        char::from(byte)
    } else {
        '.'
    }
}

/// Render row `row` of `buffer`.
///
/// Columns past the end of a short row are padded with blanks so the
/// separator stays aligned; the ASCII column is not padded. A row past the
/// end of the buffer renders only its offset and padding.
pub fn compose_hexdump_line(buffer: &[u8], row: usize) -> String {
    let start = row.saturating_mul(HEX_ROW_BYTES);
    let rest = buffer.get(start..).unwrap_or_default();
    let chunk = &rest[..rest.len().min(HEX_ROW_BYTES)];

    let mut out = String::with_capacity(HEXDUMP_LINE_LEN);
    let _ = write!(out, "{start:0width$X}  ", width = HEX_OFFSET_WIDTH);
    for byte in chunk {
        let _ = write!(out, " {byte:02X}");
    }
    for _ in chunk.len()..HEX_ROW_BYTES {
        out.push_str("   ");
    }
    out.push_str(" | ");
    out.extend(chunk.iter().copied().map(printable));
    out
}

/// Iterate over every row of `buffer`.
pub fn hexdump_lines(buffer: &[u8]) -> impl Iterator<Item = String> + '_ {
    (0..row_count(buffer.len())).map(move |row| compose_hexdump_line(buffer, row))
}
