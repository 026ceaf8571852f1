//! Search for the smallest reverse table that meets the tolerance.
//!
//! Shifts are tried from largest (smallest table) to zero. The first shift
//! with any acceptable addend wins outright; among its addends the lowest
//! mean-squared error wins, with ties going to the lower addend.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::ACCEPT_ERROR;
use crate::bucket::{CandidateTable, EncodedSamples, MAX_SHIFT, build_candidate, nominal_len};
use crate::error::{Error, Result};

/// Smallest tolerance a shift-0 table is guaranteed to meet: half an 8-bit step.
pub const MIN_TOLERANCE: f64 = 0.5 / 255.0;

/// Parameters of the table search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Largest shift to try. The search starts here.
    pub max_shift: u32,
    /// Largest acceptable per-entry error in normalized sRGB units.
    pub tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_shift: 5,
            tolerance: ACCEPT_ERROR,
        }
    }
}

impl SearchConfig {
    /// Check that the search is guaranteed to end with a table.
    pub fn validate(&self) -> Result<()> {
        if self.max_shift > MAX_SHIFT {
            return Err(Error::MaxShiftOutOfRange {
                max_shift: self.max_shift,
                limit: MAX_SHIFT,
            });
        }
        if !self.tolerance.is_finite() || self.tolerance < MIN_TOLERANCE {
            return Err(Error::InvalidTolerance {
                tolerance: self.tolerance,
                minimum: MIN_TOLERANCE,
            });
        }
        Ok(())
    }
}

/// Run the full search.
///
/// Always yields a table for a valid config: at shift 0 every bucket holds a
/// single sample, so only 8-bit quantization error remains.
pub fn search(config: &SearchConfig) -> Result<CandidateTable> {
    config.validate()?;
    let _span = info_span!(
        "search",
        max_shift = config.max_shift,
        tolerance = config.tolerance
    )
    .entered();

    let samples = EncodedSamples::new();
    for shift in (0..=config.max_shift).rev() {
        match best_at_shift(&samples, shift, config.tolerance) {
            Some(best) => {
                info!(
                    shift = best.shift,
                    addend = best.addend,
                    len = best.entries.len(),
                    mse = best.mse,
                    max_error = best.max_error,
                    "best table"
                );
                return Ok(best);
            }
            None => debug!(shift, "no acceptable addend"),
        }
    }

    Err(Error::NoAcceptableTable {
        tolerance: config.tolerance,
    })
}

/// Best acceptable candidate at one shift, or `None` if every addend is
/// rejected.
///
/// With the `parallel` feature the addends are evaluated concurrently; the
/// result does not depend on evaluation order.
pub fn best_at_shift(
    samples: &EncodedSamples,
    shift: u32,
    tolerance: f64,
) -> Option<CandidateTable> {
    let _span = info_span!("shift", shift, len = nominal_len(shift)).entered();
    let addends = 0..1u32 << shift;

    #[cfg(feature = "parallel")]
    let best = addends
        .into_par_iter()
        .filter_map(|addend| evaluate(samples, shift, addend, tolerance))
        .reduce_with(prefer);

    #[cfg(not(feature = "parallel"))]
    let best = addends
        .filter_map(|addend| evaluate(samples, shift, addend, tolerance))
        .reduce(prefer);

    best
}

fn evaluate(
    samples: &EncodedSamples,
    shift: u32,
    addend: u32,
    tolerance: f64,
) -> Option<CandidateTable> {
    match build_candidate(samples, shift, addend, tolerance) {
        Ok(candidate) => {
            debug!(shift, addend, mse = candidate.mse, "accepted");
            Some(candidate)
        }
        Err(rejection) => {
            debug!(
                shift,
                addend,
                index = rejection.index,
                error = rejection.error,
                "rejected"
            );
            None
        }
    }
}

/// Lower MSE wins; equal MSE goes to the lower addend.
fn prefer(a: CandidateTable, b: CandidateTable) -> CandidateTable {
    if b.mse < a.mse || (b.mse == a.mse && b.addend < a.addend) {
        b
    } else {
        a
    }
}
