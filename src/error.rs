//! Error type shared by the registry and facility operations.

use thiserror::Error;

use crate::level::LogLevel;

/// Errors returned by mutating facility operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FacilityError {
    /// The level is a sentinel that is not valid for this operation.
    #[error("invalid log level: {0}")]
    InvalidLevel(LogLevel),
    /// The facility has not been initialised yet.
    #[error("logging facility is not initialised")]
    NotInitialised,
    /// `init` was called more than once.
    #[error("logging facility is already initialised")]
    AlreadyInitialised,
    /// The source name exceeds the accepted length.
    #[error("source name is {len} bytes long; at most {max} are accepted")]
    SourceNameTooLong {
        /// Length of the rejected name in bytes.
        len: usize,
        /// Longest accepted name in bytes.
        max: usize,
    },
    /// Memory for a new entry or snapshot could not be reserved.
    #[error("out of memory while updating the source registry")]
    OutOfMemory,
    /// An entry of a batch registration failed; earlier entries stay applied.
    #[error("failed to register source #{index} ({name:?}): {source}")]
    Batch {
        /// Position of the failing descriptor.
        index: usize,
        /// Name of the failing descriptor.
        name: String,
        /// Why the descriptor was rejected.
        #[source]
        source: Box<FacilityError>,
    },
}
