//! Shared in-memory writer for capturing facility output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Thread-safe byte buffer handed to a facility as its output stream.
///
/// Clones share the same buffer, so a test keeps one clone and gives the
/// other to the facility.
#[derive(Clone, Default)]
pub struct SharedBuf {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Return the output written so far.
    pub fn contents(&self) -> String {
        let bytes = self.buffer.lock().expect("SharedBuf mutex poisoned").clone();
        String::from_utf8(bytes).expect("Buffer contains invalid UTF-8")
    }

    /// Return the output written so far and clear the buffer.
    #[allow(dead_code)]
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buffer.lock().expect("SharedBuf mutex poisoned"));
        String::from_utf8(bytes).expect("Buffer contains invalid UTF-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("SharedBuf mutex poisoned")
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
