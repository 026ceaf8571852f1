//! Candidate table construction for a single `(shift, addend)` pair.
//!
//! A reverse table is indexed by `(l + addend) >> shift`. That index is
//! monotone in `l`, so every bucket is a contiguous run of linear samples and
//! can be represented as a sub-slice of the encoded sample array.

use thiserror::Error;
use tracing::trace;

use crate::transfer::linear_u16_to_srgb_f64;

/// Number of 16-bit linear samples.
pub const LINEAR_SAMPLES: usize = 1 << 16;

/// Largest shift that still leaves at least two table entries.
pub const MAX_SHIFT: u32 = 15;

/// Nominal reverse table length for a shift: `2^(16 - shift)`.
///
/// A non-zero addend adds one trailing entry on top of this.
#[inline]
pub const fn nominal_len(shift: u32) -> usize {
    LINEAR_SAMPLES >> shift
}

/// Encoded value of every 16-bit linear sample, `encode(l / 65535)`.
///
/// Computed once per search and shared read-only by all candidates.
pub struct EncodedSamples {
    values: Box<[f64]>,
}

impl EncodedSamples {
    /// Evaluate the encoding curve at all 65536 linear samples.
    pub fn new() -> Self {
        let values = (0..=u16::MAX).map(linear_u16_to_srgb_f64).collect();
        Self { values }
    }

    /// Encoded values indexed by linear sample.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Buckets in table-index order for `(shift, addend)`.
    ///
    /// The first bucket is short by `addend` samples; when `addend > 0` the
    /// last one spills over into index `2^(16 - shift)`.
    ///
    /// # Panics
    ///
    /// Panics if `shift > MAX_SHIFT` or `addend >= 2^shift`.
    pub fn buckets(&self, shift: u32, addend: u32) -> impl Iterator<Item = Bucket<'_>> {
        assert!(shift <= MAX_SHIFT, "shift {} exceeds {}", shift, MAX_SHIFT);
        let width = 1usize << shift;
        let addend = addend as usize;
        assert!(addend < width, "addend {} not below 2^{}", addend, shift);

        let (head, tail) = self.values.split_at(width - addend);
        core::iter::once(head)
            .chain(tail.chunks(width))
            .map(|values| Bucket { values })
    }
}

impl Default for EncodedSamples {
    fn default() -> Self {
        Self::new()
    }
}

/// True encoded values of the linear samples sharing one table index.
///
/// Never empty, and non-decreasing because the encoding curve is monotone.
#[derive(Debug, Clone, Copy)]
pub struct Bucket<'a> {
    values: &'a [f64],
}

impl<'a> Bucket<'a> {
    /// Encoded values in linear-sample order.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Smallest encoded value (the first one).
    #[inline]
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Largest encoded value (the last one).
    #[inline]
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// The 8-bit code minimizing the worst error over this bucket.
    ///
    /// Scans `[trunc(255 * min) - 1, trunc(255 * max) + 1]` clamped to
    /// `[0, 255]`. The first code with the smallest error wins. If no code
    /// beats an error of 1.0 the entry is code 0 with error 1.0.
    pub fn best_entry(&self) -> Entry {
        let (mins, maxs) = (self.min(), self.max());
        let lo = ((mins * 255.0) as i32 - 1).max(0);
        let hi = ((maxs * 255.0) as i32 + 1).min(255);

        let mut best = Entry {
            value: 0,
            error: 1.0,
        };
        for b in lo..=hi {
            let s = b as f64 / 255.0;
            let error = (s - mins).abs().max((s - maxs).abs());
            if error < best.error {
                best = Entry {
                    value: b as u8,
                    error,
                };
            }
        }
        best
    }
}

/// A chosen table value and its worst-case error over its bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// 8-bit sRGB code.
    pub value: u8,
    /// Worst absolute error in normalized sRGB units.
    pub error: f64,
}

/// A `(shift, addend)` pair whose table misses the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "shift {shift} addend {addend}: entry {index} error {error} exceeds acceptable error {tolerance}"
)]
pub struct Rejection {
    /// Shift of the rejected candidate.
    pub shift: u32,
    /// Addend of the rejected candidate.
    pub addend: u32,
    /// First table index whose best entry is out of bounds.
    pub index: usize,
    /// Error of that entry.
    pub error: f64,
    /// Tolerance in effect.
    pub tolerance: f64,
}

/// A reverse table that meets the tolerance for one `(shift, addend)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    /// Right shift applied to the biased linear value.
    pub shift: u32,
    /// Bias added before shifting.
    pub addend: u32,
    /// One 8-bit code per bucket.
    pub entries: Box<[u8]>,
    /// Mean of the squared per-entry errors.
    pub mse: f64,
    /// Largest per-entry error.
    pub max_error: f64,
}

/// Build the reverse table for `(shift, addend)`.
///
/// Every bucket gets its [`best_entry`](Bucket::best_entry). The candidate is
/// rejected as soon as one entry's error exceeds `tolerance`.
///
/// # Panics
///
/// Panics if `shift > MAX_SHIFT` or `addend >= 2^shift`.
pub fn build_candidate(
    samples: &EncodedSamples,
    shift: u32,
    addend: u32,
    tolerance: f64,
) -> Result<CandidateTable, Rejection> {
    let mut entries = Vec::with_capacity(nominal_len(shift) + 1);
    let mut sum_sq = 0.0;
    let mut max_error = 0.0f64;

    for (index, bucket) in samples.buckets(shift, addend).enumerate() {
        let entry = bucket.best_entry();
        if entry.error > tolerance {
            trace!(
                shift,
                addend,
                index,
                min = bucket.min(),
                max = bucket.max(),
                error = entry.error,
                "entry exceeds acceptable error"
            );
            return Err(Rejection {
                shift,
                addend,
                index,
                error: entry.error,
                tolerance,
            });
        }
        sum_sq += entry.error * entry.error;
        max_error = max_error.max(entry.error);
        entries.push(entry.value);
    }

    let mse = sum_sq / entries.len() as f64;
    Ok(CandidateTable {
        shift,
        addend,
        entries: entries.into_boxed_slice(),
        mse,
        max_error,
    })
}
