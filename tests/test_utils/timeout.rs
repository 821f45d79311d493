//! Run facility calls on a worker thread so a lock-up fails the test
//! instead of hanging it.

#![allow(dead_code)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Generous bound for calls that should return immediately.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `f` on a new thread and return its result, panicking with `what`
/// if it does not finish within [`CALL_TIMEOUT`].
pub fn finishes<T, F>(what: &str, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(CALL_TIMEOUT)
        .unwrap_or_else(|_| panic!("{what} did not return within {CALL_TIMEOUT:?}"))
}
