//! sRGB transfer curves used as ground truth for table generation.
//!
//! These are the piecewise IEC 61966-2-1 curves with the classic rounded
//! breakpoints (0.0405 on the encoded side, 0.0031308 on the linear side).
//! Everything is evaluated in f64: the tables are built offline, so precision
//! matters more than speed here.

use crate::mlaf::fmla;

/// Encoded-side breakpoint between the linear and power segments.
const SRGB_LINEAR_THRESHOLD: f64 = 0.0405;

/// Linear-side breakpoint between the linear and power segments.
const LINEAR_THRESHOLD: f64 = 0.003_130_8;

/// Slope of the linear segment.
const LINEAR_SLOPE: f64 = 12.92;

const SRGB_A: f64 = 0.055;
const SRGB_A_PLUS_1: f64 = 1.055;

const GAMMA: f64 = 2.4;
const INV_GAMMA: f64 = 1.0 / GAMMA;

/// Decode an sRGB value to linear light.
///
/// Input: sRGB value in \[0, 1\]
/// Output: Linear light value in \[0, 1\]
///
/// Out-of-range inputs are clamped; table generation never produces them.
#[inline]
pub fn srgb_to_linear_f64(gamma: f64) -> f64 {
    if gamma <= 0.0 {
        0.0
    } else if gamma <= SRGB_LINEAR_THRESHOLD {
        gamma / LINEAR_SLOPE
    } else if gamma < 1.0 {
        ((gamma + SRGB_A) / SRGB_A_PLUS_1).powf(GAMMA)
    } else {
        1.0
    }
}

/// Encode a linear light value as sRGB.
///
/// Input: Linear light value in \[0, 1\]
/// Output: sRGB value in \[0, 1\]
///
/// Out-of-range inputs are clamped; table generation never produces them.
#[inline]
pub fn linear_to_srgb_f64(linear: f64) -> f64 {
    if linear <= 0.0 {
        0.0
    } else if linear <= LINEAR_THRESHOLD {
        linear * LINEAR_SLOPE
    } else if linear < 1.0 {
        // 1.055 * pow(linear, 1/2.4) - 0.055
        fmla(SRGB_A_PLUS_1, linear.powf(INV_GAMMA), -SRGB_A)
    } else {
        1.0
    }
}

/// Encoded value of a 16-bit linear sample, `encode(l / 65535)`.
#[inline]
pub fn linear_u16_to_srgb_f64(linear: u16) -> f64 {
    linear_to_srgb_f64(linear as f64 / 65535.0)
}

/// Linear value of an 8-bit sRGB code, `decode(b / 255)`.
#[inline]
pub fn srgb_u8_to_linear_f64(srgb: u8) -> f64 {
    srgb_to_linear_f64(srgb as f64 / 255.0)
}
