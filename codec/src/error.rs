//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of data")]
    EndOfData,
    #[error("layout is not in its building phase")]
    NotBuilding,
    #[error("layout is already being built")]
    AlreadyBuilding,
    #[error("layout was never sealed")]
    UnsealedLayout,
    #[error("invalid element count: {0}")]
    InvalidCount(i128),
    #[error("string bytes are not valid UTF-8")]
    InvalidString,
    #[error("layout nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}
