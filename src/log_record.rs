//! Ephemeral record passed from an emission call to the formatter.
//!
//! A [`Record`] borrows everything it renders: the call-site metadata, the
//! caller's format arguments or byte buffer. It is built and consumed within
//! a single emission call and never stored.

use std::borrow::Cow;
use std::fmt;

use crate::level::LogLevel;

/// Call-site metadata captured by the logging macros.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// Source name the record is tagged with.
    pub source: &'a str,
    /// Source file of the call, as given by `file!()`.
    pub file: &'a str,
    /// Line number of the call.
    pub line: u32,
    /// Name of the enclosing function.
    pub function: &'a str,
}

impl<'a> CallSite<'a> {
    pub const fn new(source: &'a str, file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            source,
            file,
            line,
            function,
        }
    }

    /// Base name of [`Self::file`] with any directory components removed.
    pub fn file_name(&self) -> &'a str {
        base_file_name(self.file)
    }
}

/// Strip directories from `path`, accepting `/` or `\` as separators.
///
/// A forward slash wins when present, matching paths produced by `file!()`
/// on Unix hosts even when they embed Windows-style components.
pub fn base_file_name(path: &str) -> &str {
    path.rsplit_once('/')
        .or_else(|| path.rsplit_once('\\'))
        .map_or(path, |(_, name)| name)
}

/// Source name for a `log` or `tracing` target, with `::` replaced by `.`.
pub fn source_from_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

/// Reduce a `type_name` path of a nested item to the enclosing function name.
///
/// Used by [`__function_name!`](crate::__function_name) which names a local
/// item `__here` inside the caller.
#[doc(hidden)]
pub fn function_name_of(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__here").unwrap_or(path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit_once("::").map_or(path, |(_, name)| name)
}

/// What a record carries after its prefix.
#[derive(Clone, Copy, Debug)]
pub enum Payload<'a> {
    /// Caller-formatted message.
    Message(fmt::Arguments<'a>),
    /// Raw bytes rendered as a hexdump; `None` renders a `NULL` marker.
    Raw(Option<&'a [u8]>),
}

/// Byte containers accepted by the raw-dump macros.
///
/// `None` yields no buffer, which renders as a `NULL` marker line.
pub trait RawBytes {
    fn raw_bytes(&self) -> Option<&[u8]>;
}

impl RawBytes for [u8] {
    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<const N: usize> RawBytes for [u8; N] {
    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl RawBytes for Vec<u8> {
    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<T: RawBytes + ?Sized> RawBytes for &T {
    fn raw_bytes(&self) -> Option<&[u8]> {
        (**self).raw_bytes()
    }
}

impl<T: RawBytes + ?Sized> RawBytes for Option<&T> {
    fn raw_bytes(&self) -> Option<&[u8]> {
        self.and_then(|bytes| bytes.raw_bytes())
    }
}

/// One logging event.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    pub site: CallSite<'a>,
    pub level: LogLevel,
    pub payload: Payload<'a>,
}

impl<'a> Record<'a> {
    /// A formatted message record.
    pub fn message(site: CallSite<'a>, level: LogLevel, args: fmt::Arguments<'a>) -> Self {
        Self {
            site,
            level,
            payload: Payload::Message(args),
        }
    }

    /// A raw buffer record, always at [`LogLevel::Raw`].
    pub fn raw(site: CallSite<'a>, buffer: Option<&'a [u8]>) -> Self {
        Self {
            site,
            level: LogLevel::Raw,
            payload: Payload::Raw(buffer),
        }
    }
}
