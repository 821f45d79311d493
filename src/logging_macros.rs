//! Logging macros that capture the call site.
//!
//! Each macro records `file!()`, `line!()` and the name of the enclosing
//! function, then hands the record to a [`Facility`](crate::Facility). The
//! plain forms use the process-wide facility; the `_to` forms take an
//! explicit one.
//!
//! The macros are prefixed with `srclog` to avoid collision with the `log`
//! crate's macros, which the facility uses for its own diagnostics.
//!
//! # Examples
//!
//! ```rust,ignore
//! use srclog::LogLevel;
//!
//! srclog::init(LogLevel::Info, true)?;
//! srclog::register("NET", LogLevel::Debug)?;
//! srclog::srclog_info!("NET", "listening on port {}", 8080);
//! srclog::srclog_raw!("NET", b"\x01\x02\x03");
//! ```

use std::io;

/// Human-readable description of an OS error code.
#[doc(hidden)]
pub fn os_error_text(code: i32) -> String {
    let text = io::Error::from_raw_os_error(code).to_string();
    match text.rfind(" (os error ") {
        Some(pos) => text[..pos].to_owned(),
        None => text,
    }
}

/// Code of the last OS error on this thread, `0` when unavailable.
#[doc(hidden)]
pub fn last_os_error_code() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Name of the function enclosing the macro invocation.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        $crate::log_record::function_name_of(::std::any::type_name_of_val(&__here))
    }};
}

/// Build a [`CallSite`](crate::CallSite) for the invocation site.
#[doc(hidden)]
#[macro_export]
macro_rules! __srclog_site {
    ($source:expr) => {
        $crate::CallSite::new(
            $source,
            ::std::file!(),
            ::std::line!(),
            $crate::__function_name!(),
        )
    };
}

/// Log a formatted message through an explicit facility.
///
/// ```rust,ignore
/// let facility = srclog::Facility::new();
/// srclog_to!(&facility, "NET", LogLevel::Warning, "retry {}", attempt);
/// ```
#[macro_export]
macro_rules! srclog_to {
    ($facility:expr, $source:expr, $level:expr, $($arg:tt)+) => {
        $facility.log_message(
            &$crate::__srclog_site!($source),
            $level,
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log a formatted message through the process-wide facility.
#[macro_export]
macro_rules! srclog {
    ($source:expr, $level:expr, $($arg:tt)+) => {
        $crate::srclog_to!($crate::manager::facility(), $source, $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! srclog_trace {
    ($source:expr, $($arg:tt)+) => {
        $crate::srclog!($source, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! srclog_debug {
    ($source:expr, $($arg:tt)+) => {
        $crate::srclog!($source, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! srclog_info {
    ($source:expr, $($arg:tt)+) => {
        $crate::srclog!($source, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! srclog_warning {
    ($source:expr, $($arg:tt)+) => {
        $crate::srclog!($source, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! srclog_error {
    ($source:expr, $($arg:tt)+) => {
        $crate::srclog!($source, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Hexdump a byte container through an explicit facility.
///
/// Accepts anything implementing [`RawBytes`](crate::RawBytes); `None`
/// writes a `NULL` marker line.
#[macro_export]
macro_rules! srclog_raw_to {
    ($facility:expr, $source:expr, $bytes:expr) => {
        $facility.log_raw(
            &$crate::__srclog_site!($source),
            $crate::RawBytes::raw_bytes(&$bytes),
        )
    };
}

/// Hexdump a byte container through the process-wide facility.
#[macro_export]
macro_rules! srclog_raw {
    ($source:expr, $bytes:expr) => {
        $crate::srclog_raw_to!($crate::manager::facility(), $source, $bytes)
    };
}

/// Log an error with a numeric code and its description appended.
///
/// The message is followed by ` :[<code>]: <text>`, the code right-justified
/// in six columns.
#[macro_export]
macro_rules! srclog_error_ex {
    ($source:expr, $code:expr, $text:expr, $($arg:tt)+) => {
        $crate::srclog!(
            $source,
            $crate::LogLevel::Error,
            "{} :[{:>6}]: {}",
            ::std::format_args!($($arg)+),
            $code,
            $text
        )
    };
}

/// Log an error annotated with the last OS error.
#[macro_export]
macro_rules! srclog_error_errno {
    ($source:expr, $($arg:tt)+) => {{
        let __code = $crate::logging_macros::last_os_error_code();
        $crate::srclog_error_ex!(
            $source,
            __code,
            $crate::logging_macros::os_error_text(__code),
            $($arg)+
        )
    }};
}

/// Log an error annotated with an explicit OS error code.
#[macro_export]
macro_rules! srclog_error_errno2 {
    ($source:expr, $code:expr, $($arg:tt)+) => {{
        let __code: i32 = $code;
        $crate::srclog_error_ex!(
            $source,
            __code,
            $crate::logging_macros::os_error_text(__code),
            $($arg)+
        )
    }};
}

/// Whether the process-wide facility would emit `source` at `level`.
#[macro_export]
macro_rules! srclog_will_be_printed {
    ($source:expr, $level:expr) => {
        $crate::manager::will_be_printed($source, $level)
    };
}
