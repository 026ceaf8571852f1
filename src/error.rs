//! Error types for table generation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Hard failures of table generation.
///
/// A candidate table that misses the error bound is not one of these; the
/// builder reports that as a [`Rejection`](crate::bucket::Rejection) and the
/// search moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The largest shift to try leaves fewer than two table entries.
    #[error("max shift {max_shift} is out of range (at most {limit})")]
    MaxShiftOutOfRange {
        /// Requested shift.
        max_shift: u32,
        /// Largest supported shift.
        limit: u32,
    },

    /// The tolerance is not finite or is below half an 8-bit step, which
    /// even an uncompressed table cannot meet.
    #[error("tolerance {tolerance} is invalid (must be finite and at least {minimum})")]
    InvalidTolerance {
        /// Requested tolerance.
        tolerance: f64,
        /// Smallest tolerance every shift-0 table satisfies.
        minimum: f64,
    },

    /// No shift produced an acceptable table.
    #[error("no table meets tolerance {tolerance}")]
    NoAcceptableTable {
        /// Tolerance in effect.
        tolerance: f64,
    },

    /// A finished reverse table misses the bound for some linear sample.
    #[error("linear sample {linear} is off by {error}, not below {tolerance}")]
    Verification {
        /// Offending 16-bit linear input.
        linear: u16,
        /// Absolute error in normalized sRGB units.
        error: f64,
        /// Tolerance in effect.
        tolerance: f64,
    },
}
