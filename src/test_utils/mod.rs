//! Test-only helpers shared across crate unit tests.
//!
//! Compiled only for unit tests so each test module does not carry its own
//! copy of the same writers.

pub mod capture;

pub use capture::{FailingWriter, SharedBuf};
