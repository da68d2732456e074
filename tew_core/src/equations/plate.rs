//! # Skin Buckling Formulas
//!
//! Local buckling of one skin bay between stringers and the post-buckling
//! effective width of that bay.
//!
//! ## Notation
//!
//! - `b` = Bay width (stringer pitch)
//! - `t` = Skin thickness
//! - `R` = Skin radius of curvature
//! - `L` = Free panel length
//! - `Dij` = Laminate bending stiffnesses (N·mm)
//! - `E_b` = Bending-equivalent axial modulus of the skin
//! - `σ_cr` = Skin critical stress
//! - `σ_e` = Stress at the stiffened edge of the bay

use std::f64::consts::PI;

/// Critical stress of a long, simply supported, orthotropic flat plate
///
/// ```text
///    σ →  ┌──────────────┐  ← σ
///         │              │ b
///         └──────────────┘
/// ```
///
/// # Formula
/// - σ_flat = 2π² / (b²·t) · (√(D11·D22) + D12 + 2·D66)
///
/// For an isotropic plate this reduces to the classical k = 4 result.
///
/// ```rust
/// use tew_core::equations::flat_orthotropic_critical_stress;
/// use std::f64::consts::PI;
///
/// let d = 1000.0;
/// let nu = 0.3;
/// let sigma = flat_orthotropic_critical_stress(d, d, nu * d, (1.0 - nu) * d / 2.0, 100.0, 1.0);
/// let classical = 4.0 * PI * PI * d / (100.0 * 100.0 * 1.0);
/// assert!((sigma - classical).abs() < 1e-9);
/// ```
#[inline]
pub fn flat_orthotropic_critical_stress(d11: f64, d22: f64, d12: f64, d66: f64, b: f64, t: f64) -> f64 {
    2.0 * PI * PI / (b * b * t) * ((d11 * d22).sqrt() + d12 + 2.0 * d66)
}

/// Kanemitsu–Nojima critical stress of an axially compressed cylinder
///
/// # Formula
/// - σ_cyl = E_b · (9·(t/R)^1.6 + 0.16·(t/L)^1.3)
///
/// Empirical lower-bound fit to test data; it already includes the
/// knock-down for imperfections.
///
/// ```rust
/// use tew_core::equations::cylinder_critical_stress;
///
/// let sigma = cylinder_critical_stress(93_490.9, 1.0, 938.0, 660.0);
/// assert!(sigma > 17.0 && sigma < 19.0);
/// ```
#[inline]
pub fn cylinder_critical_stress(e_b: f64, t: f64, r: f64, l: f64) -> f64 {
    e_b * (9.0 * (t / r).powf(1.6) + 0.16 * (t / l).powf(1.3))
}

/// Redshaw interaction of flat-plate and cylinder buckling stresses
///
/// # Formula
/// - σ_cr = σ_flat/2 + √(σ_flat²/4 + σ_cyl²)
///
/// Reduces to σ_flat for a flat panel (σ_cyl = 0).
///
/// ```rust
/// use tew_core::equations::redshaw_interaction;
///
/// assert_eq!(redshaw_interaction(10.0, 0.0), 10.0);
/// assert!(redshaw_interaction(10.0, 5.0) > 10.0);
/// ```
#[inline]
pub fn redshaw_interaction(sigma_flat: f64, sigma_cyl: f64) -> f64 {
    sigma_flat / 2.0 + (sigma_flat * sigma_flat / 4.0 + sigma_cyl * sigma_cyl).sqrt()
}

/// Marguerre effective width of a buckled bay
///
/// # Formula
/// - w = b · (σ_cr / σ_e)^(1/3), capped at b
///
/// Below the buckling stress (σ_e ≤ σ_cr) the whole bay is effective.
///
/// ```rust
/// use tew_core::equations::marguerre_effective_width;
///
/// assert_eq!(marguerre_effective_width(136.0, 20.0, 10.0), 136.0);
/// let w = marguerre_effective_width(136.0, 20.0, 160.0);
/// assert!((w - 68.0).abs() < 1e-12);
/// ```
#[inline]
pub fn marguerre_effective_width(b: f64, sigma_cr: f64, sigma_e: f64) -> f64 {
    if sigma_e <= sigma_cr {
        return b;
    }
    (b * (sigma_cr / sigma_e).cbrt()).min(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_plate_scales_with_inverse_square_pitch() {
        let s1 = flat_orthotropic_critical_stress(5000.0, 3000.0, 1500.0, 1800.0, 100.0, 1.0);
        let s2 = flat_orthotropic_critical_stress(5000.0, 3000.0, 1500.0, 1800.0, 200.0, 1.0);
        assert_relative_eq!(s1 / s2, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cylinder_stress_increases_with_curvature() {
        let shallow = cylinder_critical_stress(90_000.0, 1.0, 2000.0, 660.0);
        let deep = cylinder_critical_stress(90_000.0, 1.0, 500.0, 660.0);
        assert!(deep > shallow);
    }

    #[test]
    fn test_redshaw_bounds() {
        // Interaction exceeds both contributions
        let (flat, cyl) = (9.0, 18.0);
        let cr = redshaw_interaction(flat, cyl);
        assert!(cr > flat && cr > cyl);
        assert!(cr < flat + cyl);
    }

    #[test]
    fn test_marguerre_width_decreases_with_edge_stress() {
        let w1 = marguerre_effective_width(136.0, 23.0, 50.0);
        let w2 = marguerre_effective_width(136.0, 23.0, 100.0);
        assert!(w2 < w1);
        assert!(w1 < 136.0);
        assert_relative_eq!(w1 / w2, 2.0_f64.cbrt(), max_relative = 1e-12);
    }
}
