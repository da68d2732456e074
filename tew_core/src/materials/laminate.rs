//! Laminated stacks and classical lamination theory (CLT).
//!
//! A [`LaminateStack`] is an ordered list of plies, first ply at the bottom
//! face (z = -h/2). [`LaminateStack::homogenize`] returns the A, B and D
//! matrices together with the equivalent engineering constants used by the
//! buckling and section calculations.
//!
//! ## References
//!
//! - Jones, *Mechanics of Composite Materials*, 2nd Ed., Ch. 2 and 4
//! - Reddy, *Mechanics of Laminated Composite Plates and Shells*, Ch. 3

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use super::OrthotropicMaterial;
use crate::errors::{TewError, TewResult};

/// One ply of a laminate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness_mm": 0.125,
///   "orientation_deg": 45.0,
///   "material": { "e11_mpa": 147300.0, "e22_mpa": 11800.0, "g12_mpa": 6000.0, "nu12": 0.3 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ply {
    /// Cured ply thickness (mm)
    pub thickness_mm: f64,
    /// Fibre angle measured from the panel axis (degrees, -90..=90)
    pub orientation_deg: f64,
    /// Ply material constants
    pub material: OrthotropicMaterial,
}

impl Ply {
    /// Create a ply.
    pub fn new(thickness_mm: f64, orientation_deg: f64, material: OrthotropicMaterial) -> Self {
        Ply {
            thickness_mm,
            orientation_deg,
            material,
        }
    }

    fn validate(&self, index: usize) -> TewResult<()> {
        if !self.thickness_mm.is_finite() || self.thickness_mm <= 0.0 {
            return Err(TewError::invalid_laminate(
                format!("plies[{index}].thickness_mm"),
                self.thickness_mm.to_string(),
                "Ply thickness must be positive",
            ));
        }
        if !self.orientation_deg.is_finite() || !(-90.0..=90.0).contains(&self.orientation_deg) {
            return Err(TewError::invalid_laminate(
                format!("plies[{index}].orientation_deg"),
                self.orientation_deg.to_string(),
                "Orientation must lie between -90 and 90 degrees",
            ));
        }
        self.material.validate()
    }

    /// Reduced stiffness matrix Q in the ply material axes (plane stress).
    fn reduced_stiffness(&self) -> Matrix3<f64> {
        let m = &self.material;
        let denom = 1.0 - m.nu12 * m.nu21();
        let q11 = m.e11_mpa / denom;
        let q22 = m.e22_mpa / denom;
        let q12 = m.nu12 * m.e22_mpa / denom;
        Matrix3::new(
            q11, q12, 0.0, //
            q12, q22, 0.0, //
            0.0, 0.0, m.g12_mpa,
        )
    }

    /// Transformed reduced stiffness Q̄ in the laminate axes.
    pub fn transformed_stiffness(&self) -> Matrix3<f64> {
        let q = self.reduced_stiffness();
        let (q11, q12, q22, q66) = (q[(0, 0)], q[(0, 1)], q[(1, 1)], q[(2, 2)]);
        let (s, c) = self.orientation_deg.to_radians().sin_cos();
        let (c2, s2) = (c * c, s * s);

        let qb11 = q11 * c2 * c2 + 2.0 * (q12 + 2.0 * q66) * s2 * c2 + q22 * s2 * s2;
        let qb22 = q11 * s2 * s2 + 2.0 * (q12 + 2.0 * q66) * s2 * c2 + q22 * c2 * c2;
        let qb12 = (q11 + q22 - 4.0 * q66) * s2 * c2 + q12 * (s2 * s2 + c2 * c2);
        let qb66 = (q11 + q22 - 2.0 * q12 - 2.0 * q66) * s2 * c2 + q66 * (s2 * s2 + c2 * c2);
        let qb16 = (q11 - q12 - 2.0 * q66) * s * c * c2 + (q12 - q22 + 2.0 * q66) * s * c * s2;
        let qb26 = (q11 - q12 - 2.0 * q66) * s * c * s2 + (q12 - q22 + 2.0 * q66) * s * c * c2;

        Matrix3::new(
            qb11, qb12, qb16, //
            qb12, qb22, qb26, //
            qb16, qb26, qb66,
        )
    }
}

/// Homogenized stiffness of a laminate.
#[derive(Debug, Clone, PartialEq)]
pub struct LaminateStiffness {
    /// Extensional stiffness A (N/mm)
    pub a: Matrix3<f64>,
    /// Coupling stiffness B (N)
    pub b: Matrix3<f64>,
    /// Bending stiffness D (N·mm)
    pub d: Matrix3<f64>,
    /// Total laminate thickness h (mm)
    pub thickness_mm: f64,
    /// Membrane modulus along the panel axis, 1/(h·a11) (MPa)
    pub ex_mpa: f64,
    /// Membrane modulus across the panel axis, 1/(h·a22) (MPa)
    pub ey_mpa: f64,
    /// Membrane shear modulus, 1/(h·a66) (MPa)
    pub gxy_mpa: f64,
    /// Membrane Poisson ratio, -a12/a11
    pub nu_xy: f64,
    /// Bending-equivalent axial modulus, 12/(h³·d11) (MPa)
    pub ex_bending_mpa: f64,
}

/// Ordered ply stack. Construction validates every ply and the stack is
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Ply>", into = "Vec<Ply>")]
pub struct LaminateStack {
    plies: Vec<Ply>,
}

impl LaminateStack {
    /// Create a stack from plies listed bottom to top.
    pub fn new(plies: Vec<Ply>) -> TewResult<Self> {
        if plies.is_empty() {
            return Err(TewError::invalid_laminate(
                "plies",
                "[]",
                "Laminate must contain at least one ply",
            ));
        }
        for (index, ply) in plies.iter().enumerate() {
            ply.validate(index)?;
        }
        Ok(LaminateStack { plies })
    }

    /// Create a stack of equal-thickness plies of one material.
    pub fn from_layup(orientations_deg: &[f64], ply_thickness_mm: f64, material: OrthotropicMaterial) -> TewResult<Self> {
        let plies = orientations_deg
            .iter()
            .map(|&angle| Ply::new(ply_thickness_mm, angle, material))
            .collect();
        LaminateStack::new(plies)
    }

    /// Create a symmetric stack from its lower half, e.g. `[0/90/±45]s`.
    pub fn symmetric(half_layup_deg: &[f64], ply_thickness_mm: f64, material: OrthotropicMaterial) -> TewResult<Self> {
        let full: Vec<f64> = half_layup_deg
            .iter()
            .chain(half_layup_deg.iter().rev())
            .copied()
            .collect();
        LaminateStack::from_layup(&full, ply_thickness_mm, material)
    }

    /// Plies, bottom to top
    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    /// Number of plies
    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    /// Total thickness: the sum of ply thicknesses (mm)
    pub fn thickness_mm(&self) -> f64 {
        self.plies.iter().map(|p| p.thickness_mm).sum()
    }

    /// Orientations, bottom to top (degrees)
    pub fn orientations_deg(&self) -> Vec<f64> {
        self.plies.iter().map(|p| p.orientation_deg).collect()
    }

    /// True when the stack mirrors about its mid-plane
    pub fn is_symmetric(&self) -> bool {
        let n = self.plies.len();
        (0..n / 2).all(|i| self.plies[i] == self.plies[n - 1 - i])
    }

    /// Compute the A, B, D matrices and equivalent moduli.
    ///
    /// # Errors
    ///
    /// `InvalidLaminate` if A or D cannot be inverted (cannot happen for
    /// plies that passed validation, but the check keeps the moduli finite).
    pub fn homogenize(&self) -> TewResult<LaminateStiffness> {
        let h = self.thickness_mm();
        let mut a = Matrix3::zeros();
        let mut b = Matrix3::zeros();
        let mut d = Matrix3::zeros();

        let mut z0 = -h / 2.0;
        for ply in &self.plies {
            let z1 = z0 + ply.thickness_mm;
            let qbar = ply.transformed_stiffness();
            a += qbar * (z1 - z0);
            b += qbar * ((z1 * z1 - z0 * z0) / 2.0);
            d += qbar * ((z1.powi(3) - z0.powi(3)) / 3.0);
            z0 = z1;
        }

        let a_inv = a.try_inverse().ok_or_else(|| {
            TewError::invalid_laminate("plies", format!("{:?}", self.orientations_deg()), "Extensional stiffness is singular")
        })?;
        let d_inv = d.try_inverse().ok_or_else(|| {
            TewError::invalid_laminate("plies", format!("{:?}", self.orientations_deg()), "Bending stiffness is singular")
        })?;

        Ok(LaminateStiffness {
            a,
            b,
            d,
            thickness_mm: h,
            ex_mpa: 1.0 / (h * a_inv[(0, 0)]),
            ey_mpa: 1.0 / (h * a_inv[(1, 1)]),
            gxy_mpa: 1.0 / (h * a_inv[(2, 2)]),
            nu_xy: -a_inv[(0, 1)] / a_inv[(0, 0)],
            ex_bending_mpa: 12.0 / (h.powi(3) * d_inv[(0, 0)]),
        })
    }
}

impl TryFrom<Vec<Ply>> for LaminateStack {
    type Error = TewError;

    fn try_from(plies: Vec<Ply>) -> Result<Self, Self::Error> {
        LaminateStack::new(plies)
    }
}

impl From<LaminateStack> for Vec<Ply> {
    fn from(stack: LaminateStack) -> Self {
        stack.plies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn carbon() -> OrthotropicMaterial {
        OrthotropicMaterial::carbon_epoxy()
    }

    #[test]
    fn test_unidirectional_ply_recovers_material_moduli() {
        let ud = LaminateStack::from_layup(&[0.0], 1.0, carbon()).unwrap();
        let k = ud.homogenize().unwrap();
        assert_relative_eq!(k.ex_mpa, 147_300.0, max_relative = 1e-9);
        assert_relative_eq!(k.ey_mpa, 11_800.0, max_relative = 1e-9);
        assert_relative_eq!(k.gxy_mpa, 6_000.0, max_relative = 1e-9);
        assert_relative_eq!(k.nu_xy, 0.3, max_relative = 1e-9);

        let q11 = 147_300.0 / (1.0 - 0.3 * carbon().nu21());
        assert_relative_eq!(k.a[(0, 0)], q11, max_relative = 1e-12);
    }

    #[test]
    fn test_ninety_degree_ply_swaps_axes() {
        let ply = LaminateStack::from_layup(&[90.0], 0.5, carbon()).unwrap();
        let k = ply.homogenize().unwrap();
        assert_relative_eq!(k.ex_mpa, 11_800.0, max_relative = 1e-9);
        assert_relative_eq!(k.ey_mpa, 147_300.0, max_relative = 1e-9);
    }

    #[test]
    fn test_symmetric_layup_has_no_coupling() {
        let skin = LaminateStack::symmetric(&[0.0, 90.0, 45.0, -45.0], 0.125, carbon()).unwrap();
        assert_eq!(skin.ply_count(), 8);
        assert!(skin.is_symmetric());
        assert_relative_eq!(skin.thickness_mm(), 1.0, epsilon = 1e-12);

        let k = skin.homogenize().unwrap();
        let scale = k.a.amax() * k.thickness_mm;
        assert!(k.b.amax() < 1e-10 * scale);
    }

    #[test]
    fn test_unsymmetric_layup_couples() {
        let stack = LaminateStack::from_layup(&[0.0, 90.0], 0.125, carbon()).unwrap();
        assert!(!stack.is_symmetric());
        let k = stack.homogenize().unwrap();
        assert!(k.b[(0, 0)].abs() > 1.0);
    }

    #[test]
    fn test_panel_laminate_moduli() {
        let skin = LaminateStack::symmetric(&[0.0, 90.0, 45.0, -45.0], 0.125, carbon()).unwrap();
        let k = skin.homogenize().unwrap();
        assert_relative_eq!(k.ex_mpa, 57_918.3, max_relative = 1e-4);
        // 0° plies on the outside make the skin stiffer in bending than in membrane
        assert!(k.ex_bending_mpa > k.ex_mpa);

        let half: Vec<f64> = [45.0, -45.0, 0.0].repeat(4);
        let stringer = LaminateStack::symmetric(&half, 0.125, carbon()).unwrap();
        assert_eq!(stringer.ply_count(), 24);
        let k = stringer.homogenize().unwrap();
        assert_relative_eq!(k.thickness_mm, 3.0, epsilon = 1e-12);
        assert_relative_eq!(k.ex_mpa, 63_804.7, max_relative = 1e-4);
        assert_relative_eq!(k.gxy_mpa, 27_520.7, max_relative = 1e-4);
    }

    #[test]
    fn test_balanced_layup_has_no_shear_extension_coupling() {
        let stack = LaminateStack::symmetric(&[45.0, -45.0], 0.125, carbon()).unwrap();
        let k = stack.homogenize().unwrap();
        assert!(k.a[(0, 2)].abs() < 1e-9 * k.a[(0, 0)]);
    }

    #[test]
    fn test_empty_laminate_rejected() {
        let err = LaminateStack::new(Vec::new()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LAMINATE");
    }

    #[test]
    fn test_non_positive_thickness_rejected() {
        assert!(LaminateStack::from_layup(&[0.0, 90.0], 0.0, carbon()).is_err());
        assert!(LaminateStack::from_layup(&[0.0], -0.125, carbon()).is_err());
    }

    #[test]
    fn test_orientation_out_of_range_rejected() {
        let err = LaminateStack::from_layup(&[0.0, 95.0], 0.125, carbon()).unwrap_err();
        match err {
            TewError::InvalidLaminate { field, .. } => assert_eq!(field, "plies[1].orientation_deg"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serialization_validates() {
        let stack = LaminateStack::symmetric(&[0.0, 90.0], 0.125, carbon()).unwrap();
        let json = serde_json::to_string(&stack).unwrap();
        let roundtrip: LaminateStack = serde_json::from_str(&json).unwrap();
        assert_eq!(stack, roundtrip);

        assert!(serde_json::from_str::<LaminateStack>("[]").is_err());
    }
}
