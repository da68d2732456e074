//! # Materials
//!
//! Orthotropic ply materials and laminated stacks built from them.
//!
//! ## Example
//!
//! ```rust
//! use tew_core::materials::{LaminateStack, OrthotropicMaterial};
//!
//! // [0/90/±45]s skin with 0.125 mm plies
//! let skin = LaminateStack::symmetric(
//!     &[0.0, 90.0, 45.0, -45.0],
//!     0.125,
//!     OrthotropicMaterial::carbon_epoxy(),
//! ).unwrap();
//!
//! let stiffness = skin.homogenize().unwrap();
//! assert!((stiffness.thickness_mm - 1.0).abs() < 1e-12);
//! println!("Ex = {:.0} MPa", stiffness.ex_mpa);
//! ```

pub mod laminate;

pub use laminate::{LaminateStack, LaminateStiffness, Ply};

use serde::{Deserialize, Serialize};

use crate::errors::{TewError, TewResult};

/// In-plane elastic constants of a unidirectional ply (material axes).
///
/// ## JSON Example
///
/// ```json
/// { "e11_mpa": 147300.0, "e22_mpa": 11800.0, "g12_mpa": 6000.0, "nu12": 0.3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthotropicMaterial {
    /// Longitudinal (fibre direction) modulus E11 (MPa)
    pub e11_mpa: f64,
    /// Transverse modulus E22 (MPa)
    pub e22_mpa: f64,
    /// In-plane shear modulus G12 (MPa)
    pub g12_mpa: f64,
    /// Major Poisson ratio ν12
    pub nu12: f64,
}

impl OrthotropicMaterial {
    /// Create a material from its four in-plane constants.
    pub fn new(e11_mpa: f64, e22_mpa: f64, g12_mpa: f64, nu12: f64) -> Self {
        OrthotropicMaterial {
            e11_mpa,
            e22_mpa,
            g12_mpa,
            nu12,
        }
    }

    /// Carbon/epoxy prepreg used for the Technion curved panel tests.
    pub fn carbon_epoxy() -> Self {
        OrthotropicMaterial::new(147_300.0, 11_800.0, 6_000.0, 0.3)
    }

    /// Minor Poisson ratio ν21 = ν12 · E22 / E11
    pub fn nu21(&self) -> f64 {
        self.nu12 * self.e22_mpa / self.e11_mpa
    }

    /// Validate the constants.
    ///
    /// Moduli must be positive and finite, and ν12² < E11/E22 so the ply
    /// compliance stays positive definite.
    pub fn validate(&self) -> TewResult<()> {
        for (field, value) in [
            ("e11_mpa", self.e11_mpa),
            ("e22_mpa", self.e22_mpa),
            ("g12_mpa", self.g12_mpa),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TewError::invalid_laminate(
                    field,
                    value.to_string(),
                    "Modulus must be positive and finite",
                ));
            }
        }
        if !self.nu12.is_finite() || self.nu12 < 0.0 {
            return Err(TewError::invalid_laminate(
                "nu12",
                self.nu12.to_string(),
                "Poisson ratio must be non-negative and finite",
            ));
        }
        if self.nu12 * self.nu21() >= 1.0 {
            return Err(TewError::invalid_laminate(
                "nu12",
                self.nu12.to_string(),
                "Poisson ratio too large: nu12 * nu21 must be below 1",
            ));
        }
        Ok(())
    }
}

impl Default for OrthotropicMaterial {
    fn default() -> Self {
        OrthotropicMaterial::carbon_epoxy()
    }
}
