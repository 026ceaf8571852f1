//! Offline generation of sRGB ↔ linear lookup tables.
//!
//! Converting between 8-bit sRGB and 16-bit linear light normally takes a
//! `powf` per value. This crate precomputes two tables that replace it:
//!
//! - **sRGB → linear**: 256 `u16` entries, exact to rounding.
//! - **linear → sRGB**: a compressed `u8` table read as
//!   `table[(linear + addend) >> shift]`, accurate to within 1/256 of the
//!   sRGB range for every one of the 65536 linear inputs.
//!
//! The reverse table is the interesting part. [`search`] tries shifts from 5
//! down to 0 and returns the first (so smallest) table that meets the error
//! bound, picking the addend with the lowest mean-squared error at that
//! shift. Every linear input is checked; nothing is sampled.
//!
//! # Module Organization
//!
//! - [`transfer`] - the exact sRGB curves (ground truth)
//! - [`bucket`] - building and scoring one candidate table
//! - [`search`] - the shift/addend search
//! - [`lut`] - the finished tables
//! - [`codegen`] - rendering tables as Rust source
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use srgb_lut_gen::{SearchConfig, generate};
//!
//! let tables = generate(&SearchConfig::default())?;
//! let linear = tables.srgb_u8_to_linear_u16(128);
//! let srgb = tables.linear_u16_to_srgb_u8(linear);
//! assert!(srgb.abs_diff(128) <= 1);
//! # Ok::<(), srgb_lut_gen::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default): evaluate the addends of a shift concurrently with
//!   rayon. Results are identical either way.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Candidate table construction for one `(shift, addend)` pair.
pub mod bucket;

/// Rendering of generated tables as Rust source.
pub mod codegen;

/// Error types.
pub mod error;

/// The generated lookup tables.
pub mod lut;

/// The shift/addend search.
pub mod search;

/// Exact sRGB transfer curves.
pub mod transfer;

mod mlaf;

pub use error::{Error, Result};
pub use lut::{LinearToSrgbTable, SrgbTables, SrgbToLinearTable};
pub use search::SearchConfig;

use tracing::info_span;

/// Default acceptable error: 1/256 of the normalized sRGB range.
pub const ACCEPT_ERROR: f64 = 1.0 / 256.0;

/// Build both tables and check the reverse one against every linear input.
pub fn generate(config: &SearchConfig) -> Result<SrgbTables> {
    let _span = info_span!("generate").entered();

    let forward = SrgbToLinearTable::new();
    let best = search::search(config)?;
    let mse = best.mse;
    let reverse = LinearToSrgbTable::from(best);
    reverse.verify(config.tolerance)?;

    Ok(SrgbTables {
        forward,
        reverse,
        mse,
    })
}
