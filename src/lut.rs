//! The generated lookup tables.
//!
//! - [`SrgbToLinearTable`]: 256 entries, sRGB u8 → linear u16, exact to rounding
//! - [`LinearToSrgbTable`]: `2^(16 - shift)` entries (plus one when the addend
//!   is non-zero), linear u16 → sRGB u8, indexed by `(l + addend) >> shift`

use crate::bucket::CandidateTable;
use crate::error::{Error, Result};
use crate::transfer::{linear_u16_to_srgb_f64, srgb_u8_to_linear_f64};

/// Exact sRGB u8 → linear u16 table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrgbToLinearTable {
    table: [u16; 256],
}

impl SrgbToLinearTable {
    /// Tabulate `round(65535 * decode(i / 255))` for every 8-bit code.
    pub fn new() -> Self {
        let mut table = [0u16; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (srgb_u8_to_linear_f64(i as u8) * 65535.0).round() as u16;
        }
        Self { table }
    }

    /// Linear value of an 8-bit sRGB code.
    #[inline]
    pub fn lookup(&self, srgb: u8) -> u16 {
        self.table[srgb as usize]
    }

    /// Get the raw table.
    pub fn as_slice(&self) -> &[u16] {
        &self.table
    }
}

impl Default for SrgbToLinearTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Compressed linear u16 → sRGB u8 table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearToSrgbTable {
    shift: u32,
    addend: u32,
    table: Box<[u8]>,
}

impl LinearToSrgbTable {
    /// Right shift of the index function.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// Bias of the index function.
    pub fn addend(&self) -> u32 {
        self.addend
    }

    /// Table slot for a linear value.
    #[inline]
    pub fn index(&self, linear: u16) -> usize {
        ((linear as u32 + self.addend) >> self.shift) as usize
    }

    /// Approximate sRGB code of a linear value.
    #[inline]
    pub fn lookup(&self, linear: u16) -> u8 {
        self.table[self.index(linear)]
    }

    /// Get the raw table.
    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }

    /// Largest lookup error over all 16-bit inputs, with the input it occurs at.
    pub fn max_error(&self) -> (u16, f64) {
        (0..=u16::MAX)
            .map(|l| (l, self.error_at(l)))
            .fold((0, 0.0), |worst, cur| if cur.1 > worst.1 { cur } else { worst })
    }

    /// Check every 16-bit input against the exact curve.
    ///
    /// Fails on the first input whose error is not below `tolerance`.
    pub fn verify(&self, tolerance: f64) -> Result<()> {
        for linear in 0..=u16::MAX {
            let error = self.error_at(linear);
            if error >= tolerance {
                return Err(Error::Verification {
                    linear,
                    error,
                    tolerance,
                });
            }
        }
        Ok(())
    }

    fn error_at(&self, linear: u16) -> f64 {
        (self.lookup(linear) as f64 / 255.0 - linear_u16_to_srgb_f64(linear)).abs()
    }
}

impl From<CandidateTable> for LinearToSrgbTable {
    fn from(candidate: CandidateTable) -> Self {
        Self {
            shift: candidate.shift,
            addend: candidate.addend,
            table: candidate.entries,
        }
    }
}

/// Both directions, as produced by [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq)]
pub struct SrgbTables {
    /// Exact sRGB → linear table.
    pub forward: SrgbToLinearTable,
    /// Compressed linear → sRGB table.
    pub reverse: LinearToSrgbTable,
    /// Mean-squared entry error of the reverse table.
    pub mse: f64,
}

impl SrgbTables {
    /// Convert 8-bit sRGB to 16-bit linear.
    #[inline]
    pub fn srgb_u8_to_linear_u16(&self, srgb: u8) -> u16 {
        self.forward.lookup(srgb)
    }

    /// Convert 16-bit linear to 8-bit sRGB.
    #[inline]
    pub fn linear_u16_to_srgb_u8(&self, linear: u16) -> u8 {
        self.reverse.lookup(linear)
    }

    /// Batch convert sRGB u8 values to linear u16.
    pub fn batch_srgb_to_linear(&self, input: &[u8], output: &mut [u16]) {
        assert_eq!(input.len(), output.len());
        for (i, o) in input.iter().zip(output.iter_mut()) {
            *o = self.srgb_u8_to_linear_u16(*i);
        }
    }

    /// Batch convert linear u16 values to sRGB u8.
    pub fn batch_linear_to_srgb(&self, input: &[u16], output: &mut [u8]) {
        assert_eq!(input.len(), output.len());
        for (i, o) in input.iter().zip(output.iter_mut()) {
            *o = self.linear_u16_to_srgb_u8(*i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::srgb_to_linear_f64;

    #[test]
    fn test_forward_table_exact() {
        let table = SrgbToLinearTable::new();
        for i in 0..=255u8 {
            let expected = (65535.0 * srgb_to_linear_f64(i as f64 / 255.0)).round() as u16;
            assert_eq!(table.lookup(i), expected, "Mismatch at {}", i);
        }
        assert_eq!(table.lookup(0), 0);
        assert_eq!(table.lookup(255), 65535);
    }

    #[test]
    fn test_forward_table_non_decreasing() {
        let table = SrgbToLinearTable::new();
        assert!(table.as_slice().windows(2).all(|w| w[0] <= w[1]));
    }

    fn reverse(shift: u32, addend: u32, table: Vec<u8>) -> LinearToSrgbTable {
        LinearToSrgbTable {
            shift,
            addend,
            table: table.into_boxed_slice(),
        }
    }

    #[test]
    fn test_reverse_index_function() {
        let table = reverse(4, 3, (0..=255u8).cycle().take(4097).collect());
        assert_eq!(table.index(0), 0);
        assert_eq!(table.index(12), 0);
        assert_eq!(table.index(13), 1);
        assert_eq!(table.index(u16::MAX), 4096);
        assert_eq!(table.lookup(13), 1);
    }

    #[test]
    fn test_verify_reports_offending_input() {
        // A constant table is only right near black.
        let table = reverse(15, 0, vec![0, 0]);
        match table.verify(1.0 / 256.0) {
            Err(Error::Verification { linear, error, .. }) => {
                assert!(linear > 0);
                assert!(error >= 1.0 / 256.0);
            }
            other => panic!("expected verification failure, got {:?}", other),
        }
        let (worst, error) = table.max_error();
        assert_eq!(worst, u16::MAX);
        assert!((error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_table_verifies() {
        let table = reverse(
            0,
            0,
            (0..=u16::MAX)
                .map(|l| (linear_u16_to_srgb_f64(l) * 255.0).round() as u8)
                .collect(),
        );
        assert!(table.verify(1.0 / 256.0).is_ok());
        assert!(table.max_error().1 <= 0.5 / 255.0 + 1e-12);
    }

    #[test]
    fn test_batch_matches_single() {
        let tables = SrgbTables {
            forward: SrgbToLinearTable::new(),
            reverse: reverse(
                0,
                0,
                (0..=u16::MAX)
                    .map(|l| (linear_u16_to_srgb_f64(l) * 255.0).round() as u8)
                    .collect(),
            ),
            mse: 0.0,
        };
        let input: Vec<u8> = (0..=255).collect();
        let mut linear = vec![0u16; 256];
        let mut back = vec![0u8; 256];

        tables.batch_srgb_to_linear(&input, &mut linear);
        tables.batch_linear_to_srgb(&linear, &mut back);

        for i in 0..256 {
            assert_eq!(linear[i], tables.srgb_u8_to_linear_u16(input[i]));
            assert_eq!(input[i], back[i], "Batch roundtrip failed at {}", i);
        }
    }
}
