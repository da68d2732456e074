//! # Effective Width Iteration
//!
//! Past skin buckling only a strip of each bay next to the stringer keeps
//! carrying load. The width of that strip depends on the stress at the
//! stiffened edge, which in turn depends on how much skin shares the load
//! with the stringer. The two are solved as a fixed point:
//!
//! ```text
//! w ──► ε = P_c / (EA_st + E_sk·t·w) ──► σ_e = E_sk·ε ──► w' = b·(σ_cr/σ_e)^(1/3)
//! ▲                                                                  │
//! └──────────────────────────── until |w' - w| / w < tol ────────────┘
//! ```
//!
//! The map is monotone and contracting, so successive width changes shrink
//! steadily. Below the buckling load the whole bay is effective and no
//! iteration is performed.

use log::debug;
use serde::{Deserialize, Serialize};

use super::buckling::SkinBuckling;
use super::PanelModel;
use crate::equations::marguerre_effective_width;
use crate::errors::{TewError, TewResult};
use crate::panel::{AnalysisSettings, StiffenedPanelConfig};
use crate::section::{ColumnRigidities, EffectiveSection};
use crate::units::{Kilonewtons, Newtons};

/// Skin-stringer column at a converged effective width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergedSection {
    /// Converged effective skin width per stringer (mm)
    pub effective_width_mm: f64,

    /// Skin width attributed to one stringer (mm)
    pub bay_width_mm: f64,

    /// Iterations performed (0 below the buckling load)
    pub iterations: usize,

    /// Load carried by one stringer column (N)
    pub column_load_n: f64,

    /// Skin stress at the stiffened edge (MPa)
    pub edge_stress_mpa: f64,

    /// Axial and flexural properties at the converged width
    pub section: EffectiveSection,

    /// Full rigidity set for the global stability evaluation
    pub rigidities: ColumnRigidities,

    /// Successive width estimates, starting from the full bay (mm)
    pub trajectory: Vec<f64>,
}

impl ConvergedSection {
    /// True when the whole bay is effective
    pub fn is_full_width(&self) -> bool {
        self.iterations == 0
    }
}

/// Converge the effective width of a configuration under a panel load.
///
/// # Errors
///
/// - `InvalidGeometry` / `InvalidLaminate` for an invalid configuration
/// - `InvalidInput` for invalid settings or a non-finite load
/// - `Convergence` when `settings.max_iterations` is reached
pub fn converge(
    config: &StiffenedPanelConfig,
    applied_load: Kilonewtons,
    settings: &AnalysisSettings,
) -> TewResult<ConvergedSection> {
    settings.validate()?;
    let model = PanelModel::new(config)?;
    let buckling = SkinBuckling::of(&model);
    let applied: Newtons = applied_load.into();
    converge_model(&model, &buckling, applied.value(), settings)
}

/// Fixed-point iteration on a prepared panel; `applied_n` is the panel load (N).
pub(crate) fn converge_model(
    model: &PanelModel,
    buckling: &SkinBuckling,
    applied_n: f64,
    settings: &AnalysisSettings,
) -> TewResult<ConvergedSection> {
    if !applied_n.is_finite() {
        return Err(TewError::invalid_input(
            "applied_load",
            applied_n.to_string(),
            "Panel load must be finite",
        ));
    }
    let bay = model.bay_width_mm();
    let column_load = applied_n / model.stringer_count();
    let stringer_ea = model.stringer.axial_rigidity();
    let skin = &model.skin;
    let sigma_cr = buckling.critical_stress_mpa;

    let edge_stress = |width: f64| skin.ex_mpa * column_load / (stringer_ea + model.skin_strip(width).axial_rigidity());

    if applied_n <= buckling.load_n {
        return Ok(finish(model, bay, 0, column_load, edge_stress(bay), vec![bay]));
    }

    let mut width = bay;
    let mut trajectory = vec![bay];
    let mut residual = f64::INFINITY;

    for iteration in 1..=settings.max_iterations {
        let sigma_e = edge_stress(width);
        let next = marguerre_effective_width(bay, sigma_cr, sigma_e);
        trajectory.push(next);
        residual = (next - width).abs() / width;

        debug!(
            "{}: iteration {iteration}: sigma_e = {sigma_e:.3} MPa, w = {next:.4} mm, residual = {residual:.3e}",
            model.config.id
        );

        if residual < settings.width_tolerance {
            return Ok(finish(model, bay, iteration, column_load, edge_stress(next), trajectory));
        }
        width = next;
    }

    Err(TewError::convergence("effective width", settings.max_iterations, residual))
}

fn finish(
    model: &PanelModel,
    bay: f64,
    iterations: usize,
    column_load_n: f64,
    edge_stress_mpa: f64,
    trajectory: Vec<f64>,
) -> ConvergedSection {
    let width = trajectory.last().copied().unwrap_or(bay);
    let strip = model.skin_strip(width);
    ConvergedSection {
        effective_width_mm: width,
        bay_width_mm: bay,
        iterations,
        column_load_n,
        edge_stress_mpa,
        section: EffectiveSection::new(&model.stringer, &strip),
        rigidities: model.stringer.rigidities(&strip),
        trajectory,
    }
}
