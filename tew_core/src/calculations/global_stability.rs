//! # Global Stability
//!
//! Flexural-torsional instability of the equivalent skin-stringer column.
//!
//! The section translates `v` normal to the skin and the stringer rotates `φ`
//! about the enforced axis A on the skin line under the web, which the
//! continuous skin holds in place. With sinusoidal half-waves of length L_e
//! the energy balance gives the 2×2 generalized eigenproblem
//!
//! ```text
//! ┌ k²EI    k²EΓy     ┐ ┌v┐       ┌ 1        S_x/EA  ┐ ┌v┐
//! │                   │ │ │ = P · │                  │ │ │
//! └ k²EΓy   k²EΓ + GJ ┘ └φ┘       └ S_x/EA   I_pA/EA ┘ └φ┘
//! ```
//!
//! whose smallest eigenvalue is the critical column load. A blade stringer is
//! symmetric about the web, so S_x = EΓy = 0 and the problem splits into a
//! pure flexural and a pure torsional load. A J-form stringer keeps the
//! coupling, which always lowers the critical load.

use log::debug;
use nalgebra::{Matrix2, SymmetricEigen};
use serde::{Deserialize, Serialize};

use super::effective_width::ConvergedSection;
use crate::equations::{effective_length, euler_load, half_wave_number, torsional_load};
use crate::errors::{TewError, TewResult};
use crate::geometry::PanelGeometry;
use crate::panel::{AnalysisSettings, CouplingMode, StiffenedPanelConfig, MIN_EFFECTIVE_WIDTH_FRACTION};
use crate::section::ColumnRigidities;
use crate::units::{Kilonewtons, Newtons};

/// Failure mode that governs the collapse load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoverningMode {
    /// Euler bending of the skin-stringer column
    Flexural,
    /// Stringer rotation about the skin line
    Torsional,
    /// Coupled bending and rotation (asymmetric stringers)
    FlexuralTorsional,
    /// Column fails before the skin buckles
    PreBuckling,
}

impl GoverningMode {
    /// Label for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            GoverningMode::Flexural => "flexural",
            GoverningMode::Torsional => "torsional",
            GoverningMode::FlexuralTorsional => "flexural-torsional",
            GoverningMode::PreBuckling => "pre-buckling",
        }
    }
}

/// Critical global load of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalStability {
    /// Panel load, stringer count × column load
    pub load: Kilonewtons,
    /// Critical load of one skin-stringer column (N)
    pub column_load_n: f64,
    /// Governing mode
    pub mode: GoverningMode,
    /// Panel load for pure flexure
    pub flexural_load: Kilonewtons,
    /// Panel load for pure rotation about the skin line
    pub torsional_load: Kilonewtons,
}

/// Global collapse load of a converged section.
///
/// # Errors
///
/// `IllConditionedSection` when the effective width is degenerate or a
/// rigidity is non-positive.
pub fn collapse_load(
    config: &StiffenedPanelConfig,
    converged: &ConvergedSection,
    settings: &AnalysisSettings,
) -> TewResult<GlobalStability> {
    settings.validate()?;
    config.validate()?;
    column_stability(converged, &config.geometry, config.stringer_count, settings)
}

pub(crate) fn column_stability(
    converged: &ConvergedSection,
    geometry: &PanelGeometry,
    stringer_count: usize,
    settings: &AnalysisSettings,
) -> TewResult<GlobalStability> {
    check_section(converged)?;
    let coupled = settings.coupling == CouplingMode::Coupled && !geometry.profile.is_symmetric();
    let r = coupling_applied(&converged.rigidities, coupled);

    let le = effective_length(settings.end_fixity.length_factor(), geometry.free_length_mm);
    let kz2 = half_wave_number(le).powi(2);

    let k = Matrix2::new(
        kz2 * r.flexural,
        kz2 * r.warping_flexural,
        kz2 * r.warping_flexural,
        kz2 * r.warping + r.torsional,
    );
    let g = Matrix2::new(
        1.0,
        r.first_moment_x / r.axial,
        r.first_moment_x / r.axial,
        r.polar_about_axis / r.axial,
    );

    let column_load = smallest_eigenvalue(&k, &g)?;
    let flexural = euler_load(r.flexural, le);
    let torsional = torsional_load(r.warping, r.torsional, r.polar_about_axis / r.axial, le);

    let mode = if coupled {
        GoverningMode::FlexuralTorsional
    } else if flexural <= torsional {
        GoverningMode::Flexural
    } else {
        GoverningMode::Torsional
    };

    let n = stringer_count as f64;
    debug!(
        "w = {:.3} mm: P_col = {:.1} N, P_flex = {:.1} N, P_tors = {:.1} N ({})",
        converged.effective_width_mm,
        column_load,
        flexural,
        torsional,
        mode.display_name()
    );

    Ok(GlobalStability {
        load: Newtons(n * column_load).into(),
        column_load_n: column_load,
        mode,
        flexural_load: Newtons(n * flexural).into(),
        torsional_load: Newtons(n * torsional).into(),
    })
}

fn check_section(converged: &ConvergedSection) -> TewResult<()> {
    let width = converged.effective_width_mm;
    if !width.is_finite() || width < MIN_EFFECTIVE_WIDTH_FRACTION * converged.bay_width_mm {
        return Err(TewError::ill_conditioned(format!(
            "effective width {width:e} mm is degenerate for a {} mm bay",
            converged.bay_width_mm
        )));
    }

    let r = &converged.rigidities;
    for (name, value) in [
        ("EA", r.axial),
        ("EI", r.flexural),
        ("GJ", r.torsional),
        ("EI_pA", r.polar_about_axis),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(TewError::ill_conditioned(format!("{name} = {value:e} is not positive")));
        }
    }
    if !r.warping.is_finite() || r.warping < 0.0 {
        return Err(TewError::ill_conditioned(format!("EΓ = {:e} is negative", r.warping)));
    }
    if !r.warping_flexural.is_finite() || !r.first_moment_x.is_finite() {
        return Err(TewError::ill_conditioned("coupling rigidities are not finite"));
    }
    Ok(())
}

/// Symmetric profiles and decoupled runs drop S_x and EΓy.
fn coupling_applied(rigidities: &ColumnRigidities, coupled: bool) -> ColumnRigidities {
    if coupled {
        *rigidities
    } else {
        ColumnRigidities {
            warping_flexural: 0.0,
            first_moment_x: 0.0,
            ..*rigidities
        }
    }
}

/// Smallest λ of K·q = λ·G·q for symmetric K and positive definite G.
fn smallest_eigenvalue(k: &Matrix2<f64>, g: &Matrix2<f64>) -> TewResult<f64> {
    let chol = g
        .cholesky()
        .ok_or_else(|| TewError::ill_conditioned("geometric matrix is not positive definite"))?;
    let l_inv = chol
        .l()
        .try_inverse()
        .ok_or_else(|| TewError::ill_conditioned("geometric matrix is singular"))?;

    let m = &l_inv * k * l_inv.transpose();
    let m = (m + m.transpose()) * 0.5;
    let eigen = SymmetricEigen::new(m);
    let lambda = eigen.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);

    if !lambda.is_finite() || lambda <= 0.0 {
        return Err(TewError::ill_conditioned(format!("critical column load {lambda:e} N is not positive")));
    }
    Ok(lambda)
}
