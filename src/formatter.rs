//! Rendering of record prefixes, message lines and raw dumps.
//!
//! Everything here is plain text composition with fixed column widths.
//! Output is bounded: a prefix never exceeds `PREFIX_CAPACITY - 1` bytes and
//! a message line, newline included, never exceeds [`RECORD_CAPACITY`]
//! bytes. Overlong input is truncated, never reported as an error.

use std::fmt::{self, Write};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::level::LogLevel;
use crate::log_record::{CallSite, Payload, Record};

mod bounded;
mod hexdump;
mod timestamp;

pub use bounded::{BoundedBuf, floor_char_boundary};
pub use hexdump::{
    HEX_OFFSET_WIDTH, HEX_ROW_BYTES, HEXDUMP_LINE_LEN, compose_hexdump_line, hexdump_lines,
    row_count,
};
pub use timestamp::Timestamp;

/// Characters of the source name shown in a prefix.
pub const SOURCE_DISPLAY_WIDTH: usize = 16;
/// Characters of the base file name shown in a prefix.
pub const FILE_NAME_WIDTH: usize = 20;
/// Characters of the function name shown in a prefix.
pub const FUNCTION_NAME_WIDTH: usize = 20;
/// Minimum width of the right-justified line number.
pub const LINE_WIDTH: usize = 5;
/// Size of the prefix buffer; one byte is reserved.
pub const PREFIX_CAPACITY: usize = 128;
/// Largest message line, newline included.
pub const RECORD_CAPACITY: usize = 8192;

/// Marker line written for a raw record without a buffer.
pub const NULL_MARKER: &str = "NULL";

/// Optional prefix parts, fixed when the facility is initialised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Prepend the local time.
    pub timestamps: bool,
    /// Append the enclosing function name.
    pub function_names: bool,
}

impl FormatOptions {
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_function_names(mut self, enabled: bool) -> Self {
        self.function_names = enabled;
        self
    }
}

/// Render the prefix for a record at `level` from `site`.
///
/// `timestamp` is only rendered when given; [`RecordFormatter`] supplies the
/// current time when [`FormatOptions::timestamps`] is set.
pub fn compose_prefix(
    site: &CallSite<'_>,
    level: LogLevel,
    options: &FormatOptions,
    timestamp: Option<NaiveDateTime>,
) -> String {
    let mut out = BoundedBuf::new(PREFIX_CAPACITY - 1);
    if let Some(at) = timestamp {
        let _ = write!(out, "{}:", Timestamp(at));
    }
    let _ = write!(
        out,
        "[{tag}][{source:<sw$.sw$}][{file:<fw$.fw$}:{line:>lw$}]",
        tag = level.tag(),
        source = site.source,
        file = site.file_name(),
        line = site.line,
        sw = SOURCE_DISPLAY_WIDTH,
        fw = FILE_NAME_WIDTH,
        lw = LINE_WIDTH,
    );
    if options.function_names {
        let _ = write!(
            out,
            " in {function:<w$.w$}()",
            function = site.function,
            w = FUNCTION_NAME_WIDTH,
        );
    }
    out.into_string()
}

/// Render `<prefix> | <message>\n`, bounded by [`RECORD_CAPACITY`].
pub fn compose_message_line(prefix: &str, args: fmt::Arguments<'_>) -> String {
    let mut out = BoundedBuf::new(RECORD_CAPACITY - 1);
    let _ = write!(out, "{prefix} | {args}");
    let mut line = out.into_string();
    line.push('\n');
    line
}

/// Render the prefix line followed by the hexdump rows or the `NULL` marker.
pub fn compose_raw_block(prefix: &str, buffer: Option<&[u8]>) -> String {
    let rows = buffer.map_or(1, |bytes| row_count(bytes.len()));
    let mut out = String::with_capacity(prefix.len() + 1 + rows * (HEXDUMP_LINE_LEN + 1));
    out.push_str(prefix);
    out.push('\n');
    match buffer {
        Some(bytes) => {
            for line in hexdump_lines(bytes) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        None => {
            out.push_str(NULL_MARKER);
            out.push('\n');
        }
    }
    out
}

/// Formats whole records using a fixed set of [`FormatOptions`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordFormatter {
    options: FormatOptions,
}

impl RecordFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Format `record`, reading the clock when timestamps are enabled.
    pub fn format(&self, record: &Record<'_>) -> String {
        let at = self.options.timestamps.then(timestamp::now);
        self.format_at(record, at)
    }

    /// Format `record` with an explicit timestamp.
    pub fn format_at(&self, record: &Record<'_>, timestamp: Option<NaiveDateTime>) -> String {
        let prefix = compose_prefix(&record.site, record.level, &self.options, timestamp);
        match record.payload {
            Payload::Message(args) => compose_message_line(&prefix, args),
            Payload::Raw(buffer) => compose_raw_block(&prefix, buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn site() -> CallSite<'static> {
        CallSite::new("NET", "src/net/tcp.rs", 42, "connect")
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_milli_opt(3, 4, 5, 6))
            .expect("valid date")
    }

    #[test]
    fn default_prefix_layout() {
        let prefix = compose_prefix(&site(), LogLevel::Info, &FormatOptions::default(), None);
        assert_eq!(prefix, "[I][NET             ][tcp.rs              :   42]");
    }

    #[test]
    fn prefix_with_time_and_function() {
        let options = FormatOptions::default()
            .with_timestamps(true)
            .with_function_names(true);
        let prefix = compose_prefix(&site(), LogLevel::Warning, &options, Some(fixed_time()));
        assert_eq!(
            prefix,
            "2024.01.02-03:04:05:006 :[W][NET             ][tcp.rs              :   42] in connect             ()"
        );
    }

    #[rstest]
    #[case(LogLevel::Raw, 'R')]
    #[case(LogLevel::Trace, 'T')]
    #[case(LogLevel::Debug, 'D')]
    #[case(LogLevel::Error, 'E')]
    fn prefix_starts_with_level_tag(#[case] level: LogLevel, #[case] tag: char) {
        let prefix = compose_prefix(&site(), level, &FormatOptions::default(), None);
        assert_eq!(prefix.chars().nth(1), Some(tag));
    }

    #[test]
    fn long_fields_are_truncated_to_their_width() {
        let site = CallSite::new(
            "a-very-long-source-name",
            "/tmp/an_extremely_long_file_name.rs",
            123_456,
            "f",
        );
        let prefix = compose_prefix(&site, LogLevel::Info, &FormatOptions::default(), None);
        assert_eq!(prefix, "[I][a-very-long-sour][an_extremely_long_fi:123456]");
    }

    #[test]
    fn prefix_never_exceeds_capacity() {
        let long = "é".repeat(200);
        let site = CallSite::new(&long, &long, u32::MAX, &long);
        let options = FormatOptions::default()
            .with_timestamps(true)
            .with_function_names(true);
        let prefix = compose_prefix(&site, LogLevel::Info, &options, Some(fixed_time()));
        assert!(prefix.len() < PREFIX_CAPACITY);
    }

    #[test]
    fn message_line_joins_prefix_and_message() {
        let line = compose_message_line("[I][x]", format_args!("hello {}", 7));
        assert_eq!(line, "[I][x] | hello 7\n");
    }

    #[test]
    fn message_line_is_bounded() {
        let huge = "x".repeat(RECORD_CAPACITY * 2);
        let line = compose_message_line("[I]", format_args!("{huge}"));
        assert_eq!(line.len(), RECORD_CAPACITY);
        assert!(line.ends_with("x\n"));
    }

    #[test]
    fn raw_block_without_buffer_writes_null_marker() {
        let block = compose_raw_block("[R]", None);
        assert_eq!(block, "[R]\nNULL\n");
    }

    #[test]
    fn raw_block_with_empty_buffer_writes_prefix_only() {
        assert_eq!(compose_raw_block("[R]", Some(&[])), "[R]\n");
    }

    #[test]
    fn formatter_renders_raw_records() {
        let formatter = RecordFormatter::default();
        let record = Record::raw(site(), Some(b"hi"));
        let out = formatter.format(&record);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("[R][NET             ][tcp.rs              :   42]"));
        let row = lines.next().expect("hexdump row");
        assert!(row.starts_with("00000000   68 69"));
        assert!(row.ends_with(" | hi"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn formatter_uses_given_timestamp() {
        let formatter = RecordFormatter::new(FormatOptions::default().with_timestamps(true));
        let out = formatter.format_at(
            &Record::message(site(), LogLevel::Error, format_args!("boom")),
            Some(fixed_time()),
        );
        assert_eq!(
            out,
            "2024.01.02-03:04:05:006 :[E][NET             ][tcp.rs              :   42] | boom\n"
        );
    }
}
