//! Fixed-capacity text buffer used for record composition.

use std::fmt;

/// Largest index `<= max` that lies on a char boundary of `s`.
pub fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// `fmt::Write` sink that silently truncates once `capacity` bytes are used.
///
/// Truncation happens on a char boundary, so the contents are always valid
/// UTF-8 and never longer than the capacity. Writes after truncation are
/// dropped.
#[derive(Debug)]
pub struct BoundedBuf {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl BoundedBuf {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: String::new(),
            capacity,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether any write was cut short.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Write for BoundedBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        let room = self.capacity - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
        } else {
            self.buf.push_str(&s[..floor_char_boundary(s, room)]);
            self.truncated = true;
        }
        Ok(())
    }
}
