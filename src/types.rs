//! Core types for the SECDED ARQ link
//!
//! This module defines the fundamental types shared by the codec, the
//! codeword buffer, and the link controller: payload and codeword
//! representations, the decode classification, the injected-fault selector,
//! and the crate-wide error type.
//!
//! ## Words and codewords
//!
//! A **word** is the unit of payload: an unsigned integer of configurable
//! width (default 4 bits). A **codeword** is a word plus SECDED redundancy
//! bits, enough to correct any single-bit error and detect any double-bit
//! error. Both are carried in wider integer types and masked to their
//! configured widths; bit offsets are always counted from the LSB.

use serde::{Deserialize, Serialize};

/// Payload word (masked to the configured width, up to 32 bits).
pub type Word = u32;

/// SECDED codeword: payload plus parity bits (masked to the codeword width).
pub type Codeword = u64;

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Outcome of decoding one codeword.
///
/// This is a closed classification: the code always detects errors up to
/// its guaranteed distance, so there is no silent-corruption case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The codeword is a valid code point; payload is exact.
    Clean,
    /// Exactly one bit was flipped and has been corrected; payload is exact.
    CorrectedSingleBit,
    /// Two or more bit errors detected; the payload is not trustworthy
    /// and must be ignored by the caller.
    DetectedUncorrectable,
}

impl ErrorClass {
    /// Whether the decoded payload can be trusted.
    pub fn payload_valid(&self) -> bool {
        !matches!(self, ErrorClass::DetectedUncorrectable)
    }
}

/// Injected channel fault, supplied by the caller on the read path.
///
/// This is a simulation hook, not a physical fault model: the codec never
/// generates faults itself. The flipped bit positions are fixed and
/// deterministic so that a given stimulus always reproduces the same
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultKind {
    /// No fault; the codeword is decoded as stored.
    #[default]
    None,
    /// Flip one bit (correctable).
    SingleBit,
    /// Flip two distinct bits (detectable, not correctable).
    DoubleBit,
}

/// Errors that can occur in the link core.
///
/// All runtime variants are locally recoverable: the caller retries on a
/// later tick. The construction variants signal an invalid configuration
/// and are reported once, from `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("buffer full: write rejected, retry after a successful read")]
    BufferFull,

    #[error("buffer empty: no word available to read")]
    BufferEmpty,

    #[error("invalid word width: {bits} bits (must be 1..=32)")]
    InvalidWordWidth { bits: u8 },

    #[error("invalid buffer depth: {depth} (must be at least 1)")]
    InvalidDepth { depth: usize },
}
