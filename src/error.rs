//! Error taxonomy for the fallible parts of the public API.
//!
//! Matching, opcode derivation, and diff rendering can't fail on well-formed
//! input; they only fail at the few boundaries where a caller passes an
//! argument outside its documented domain.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DifflibError {
    #[error("n must be greater than 0, got {0}")]
    InvalidCloseMatchCount(usize),

    #[error("cutoff must be in [0.0, 1.0], got {0}")]
    InvalidCutoff(f64),

    #[error("which must be 1 or 2, got {0}")]
    InvalidRestoreSelector(i32),
}

pub type Result<T> = std::result::Result<T, DifflibError>;
