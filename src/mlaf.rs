//! Fused multiply-add with compile-time hardware detection.
//!
//! When FMA is available (x86 with FMA feature or ARM64 NEON), uses the
//! hardware instruction through `num_traits::MulAdd`. Otherwise falls back to
//! a separate multiply and add.

#[cfg(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "fma"
    ),
    all(target_arch = "aarch64", target_feature = "neon")
))]
use num_traits::MulAdd;

/// Computes `acc + a * b` using FMA when available.
#[cfg(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "fma"
    ),
    all(target_arch = "aarch64", target_feature = "neon")
))]
#[inline(always)]
pub fn mlaf<T: MulAdd<T, Output = T>>(acc: T, a: T, b: T) -> T {
    MulAdd::mul_add(a, b, acc)
}

/// Computes `acc + a * b` (fallback without hardware FMA).
#[cfg(not(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "fma"
    ),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
#[inline(always)]
pub fn mlaf<T: core::ops::Add<Output = T> + core::ops::Mul<Output = T>>(acc: T, a: T, b: T) -> T {
    acc + a * b
}

/// Computes `a * b + c`.
#[inline(always)]
pub fn fmla(a: f64, b: f64, c: f64) -> f64 {
    mlaf(c, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mlaf_f64() {
        let result = mlaf(1.0f64, 2.0f64, 3.0f64);
        assert!((result - 7.0f64).abs() < 1e-12);
    }

    #[test]
    fn test_fmla_f64() {
        let result = fmla(2.0, 3.0, 1.0);
        assert!((result - 7.0).abs() < 1e-12);

        let result = fmla(1.055, 1.0, -0.055);
        assert!((result - 1.0).abs() < 1e-12);
    }
}
