//! # Column Stability Formulas
//!
//! Closed-form pieces of the skin-stringer column problem. The coupled
//! flexural-torsional eigenproblem itself is solved in
//! `calculations::global_stability`.
//!
//! ## Notation
//!
//! - `k` = Effective length factor (1.0 pinned, 0.5 clamped)
//! - `L` = Free length, `L_e = k·L`
//! - `k_z = π / L_e` = Axial half-wave number
//! - `EI`, `EΓ`, `GJ` = Flexural, warping and St. Venant rigidities

use std::f64::consts::PI;

/// Effective column length L_e = k·L
#[inline]
pub fn effective_length(k: f64, free_length: f64) -> f64 {
    k * free_length
}

/// Axial half-wave number k_z = π / L_e
#[inline]
pub fn half_wave_number(effective_length: f64) -> f64 {
    PI / effective_length
}

/// Euler load of a column
///
/// # Formula
/// - P_E = π²·EI / L_e²
///
/// ```rust
/// use tew_core::equations::euler_load;
/// use std::f64::consts::PI;
///
/// let p = euler_load(1.0e9, 330.0);
/// assert!((p - PI * PI * 1.0e9 / (330.0 * 330.0)).abs() < 1e-6);
/// ```
#[inline]
pub fn euler_load(ei: f64, effective_length: f64) -> f64 {
    let kz = half_wave_number(effective_length);
    kz * kz * ei
}

/// Torsional buckling load about an enforced axis
///
/// # Formula
/// - P_T = (k_z²·EΓ + GJ) / (I_pA / A)
///
/// `polar_ratio` is the modulus-weighted I_pA / A of the rotating part of the
/// section (mm²).
///
/// ```rust
/// use tew_core::equations::torsional_load;
///
/// // No warping: P_T = GJ / (I_p/A)
/// let p = torsional_load(0.0, 5.0e6, 250.0, 330.0);
/// assert!((p - 2.0e4).abs() < 1e-9);
/// ```
#[inline]
pub fn torsional_load(warping_rigidity: f64, torsional_rigidity: f64, polar_ratio: f64, effective_length: f64) -> f64 {
    let kz = half_wave_number(effective_length);
    (kz * kz * warping_rigidity + torsional_rigidity) / polar_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamped_column_carries_four_times_pinned() {
        let pinned = euler_load(2.0e8, effective_length(1.0, 660.0));
        let clamped = euler_load(2.0e8, effective_length(0.5, 660.0));
        assert_relative_eq!(clamped / pinned, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_torsional_load_grows_with_warping() {
        let without = torsional_load(0.0, 1.0e6, 300.0, 330.0);
        let with = torsional_load(1.0e10, 1.0e6, 300.0, 330.0);
        assert!(with > without);
    }
}
