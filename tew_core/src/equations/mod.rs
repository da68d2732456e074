//! # Stability Equations
//!
//! Closed-form buckling and effective-width formulas used by the TEW
//! calculations. Keeping them in one place makes each one easy to check
//! against its reference.
//!
//! ## Modules
//!
//! - [`plate`] - Skin buckling (flat orthotropic plate, curved shell, interaction)
//!   and the effective-width law
//! - [`column`] - Column instability of the skin-stringer section
//!
//! ## Sign Conventions
//!
//! - **Loads and stresses**: Positive in compression
//! - **Lengths**: Millimetres; moduli in MPa, rigidities in N·mm^k
//!
//! ## References
//!
//! - Kanemitsu, S. and Nojima, H., *Axial compression tests of thin circular
//!   cylinders*, 1939
//! - Redshaw, S.C., *The elastic instability of a thin curved panel subjected
//!   to an axial thrust*, 1933
//! - Marguerre, K., *Die mittragende Breite der gedrückten Platte*, 1937
//! - Vlasov, V.Z., *Thin-Walled Elastic Beams*, 1961
//! - Abramovich, H., Weller, T. and Bisagni, C., *Buckling behavior of
//!   composite laminated stiffened panels under combined shear-axial
//!   compression*, 2008

pub mod column;
pub mod plate;

pub use column::{effective_length, euler_load, half_wave_number, torsional_load};
pub use plate::{
    cylinder_critical_stress, flat_orthotropic_critical_stress, marguerre_effective_width, redshaw_interaction,
};
