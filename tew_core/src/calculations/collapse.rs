//! # Collapse Load
//!
//! Sequences the TEW stages for one panel.
//!
//! Let h(P) be the global stability load of the section whose effective width
//! has converged under the panel load P. A wider skin strip is stiffer, and
//! the strip narrows as P grows, so h is non-increasing. The panel collapses
//! at the load that its own post-buckled section can just carry:
//!
//! ```text
//!   load
//!    │ H₀ ────────╮
//!    │             ╲  h(P)
//!    │              ╲
//!    │         ╱─────●  P* = h(P*)
//!    │       ╱  P
//!    │     ╱
//!    └──── P_b ─────────────► applied load
//! ```
//!
//! If the full-width column already fails below P_b the skin never buckles
//! and the collapse load is H₀.
//!
//! ## Example
//!
//! ```rust,ignore
//! let result = tew_core::evaluate(&config)?;
//! println!("{}: {:.1} kN ({})", result.case_id, result.collapse_load.value(),
//!     result.governing_mode.display_name());
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::buckling::SkinBuckling;
use super::effective_width::{converge_model, ConvergedSection};
use super::global_stability::{column_stability, GlobalStability, GoverningMode};
use super::PanelModel;
use crate::errors::{TewError, TewResult};
use crate::panel::{AnalysisSettings, StiffenedPanelConfig};
use crate::units::{Kilonewtons, Newtons};

/// Outcome of the TEW analysis of one configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "case_id": "Case I",
///   "initial_buckling_load": 30.93,
///   "skin_critical_stress_mpa": 23.07,
///   "effective_width_mm": 61.63,
///   "bay_width_mm": 136.0,
///   "width_iterations": 6,
///   "load_iterations": 20,
///   "collapse_load": 240.23,
///   "governing_mode": "Flexural"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapseResult {
    /// Identifier of the analysed configuration
    pub case_id: String,

    /// Panel load at first skin buckling
    pub initial_buckling_load: Kilonewtons,

    /// Skin critical stress σ_cr (MPa)
    pub skin_critical_stress_mpa: f64,

    /// Effective skin width per stringer at collapse (mm)
    pub effective_width_mm: f64,

    /// Skin width attributed to one stringer (mm)
    pub bay_width_mm: f64,

    /// Effective-width iterations at the collapse load
    pub width_iterations: usize,

    /// Bisection steps of the collapse-load search
    pub load_iterations: usize,

    /// Collapse load of the panel
    pub collapse_load: Kilonewtons,

    /// Mode that governs collapse
    pub governing_mode: GoverningMode,
}

impl CollapseResult {
    /// Ratio of collapse load to initial buckling load
    pub fn postbuckling_reserve(&self) -> f64 {
        self.collapse_load.value() / self.initial_buckling_load.value()
    }
}

/// Run the TEW analysis of one configuration.
///
/// Every failure is tagged with the configuration id.
pub fn run(config: &StiffenedPanelConfig, settings: &AnalysisSettings) -> TewResult<CollapseResult> {
    run_untagged(config, settings).map_err(|e| e.for_case(config.id.clone()))
}

/// Evaluate configurations one after the other, keeping every outcome.
pub fn evaluate_all(
    configs: &[StiffenedPanelConfig],
    settings: &AnalysisSettings,
) -> Vec<(String, TewResult<CollapseResult>)> {
    configs
        .iter()
        .map(|config| (config.id.clone(), run(config, settings)))
        .collect()
}

fn run_untagged(config: &StiffenedPanelConfig, settings: &AnalysisSettings) -> TewResult<CollapseResult> {
    settings.validate()?;
    let model = PanelModel::new(config)?;
    let buckling = SkinBuckling::of(&model);
    let p_b = buckling.load_n;

    let global_at = |load_n: f64| -> TewResult<(ConvergedSection, GlobalStability)> {
        let section = converge_model(&model, &buckling, load_n, settings)?;
        let global = column_stability(&section, &config.geometry, config.stringer_count, settings)?;
        Ok((section, global))
    };

    let (full_section, full_global) = global_at(p_b)?;
    let h0 = Newtons::from(full_global.load).value();

    if h0 <= p_b {
        warn!(
            "{}: column fails at {:.1} kN before the skin buckles at {:.1} kN",
            config.id,
            h0 / 1000.0,
            p_b / 1000.0
        );
        return Ok(CollapseResult {
            case_id: config.id.clone(),
            initial_buckling_load: buckling.load(),
            skin_critical_stress_mpa: buckling.critical_stress_mpa,
            effective_width_mm: full_section.effective_width_mm,
            bay_width_mm: full_section.bay_width_mm,
            width_iterations: 0,
            load_iterations: 0,
            collapse_load: full_global.load,
            governing_mode: GoverningMode::PreBuckling,
        });
    }

    // f(P) = h(P) - P is positive at P_b and non-positive at H₀
    let (mut lo, mut hi) = (p_b, h0);
    let mut load_iterations = 0;
    while (hi - lo) > settings.load_tolerance * hi {
        if load_iterations == settings.max_load_iterations {
            return Err(TewError::convergence(
                "collapse load",
                load_iterations,
                (hi - lo) / hi,
            ));
        }
        load_iterations += 1;
        let mid = 0.5 * (lo + hi);
        let (_, global) = global_at(mid)?;
        if Newtons::from(global.load).value() > mid {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let p_star = 0.5 * (lo + hi);
    let (section, global) = global_at(p_star)?;

    info!(
        "{}: P_b = {:.1} kN, collapse = {:.1} kN, w = {:.2} / {:.1} mm after {} width and {} load iterations ({})",
        config.id,
        p_b / 1000.0,
        p_star / 1000.0,
        section.effective_width_mm,
        section.bay_width_mm,
        section.iterations,
        load_iterations,
        global.mode.display_name()
    );

    Ok(CollapseResult {
        case_id: config.id.clone(),
        initial_buckling_load: buckling.load(),
        skin_critical_stress_mpa: buckling.critical_stress_mpa,
        effective_width_mm: section.effective_width_mm,
        bay_width_mm: section.bay_width_mm,
        width_iterations: section.iterations,
        load_iterations,
        collapse_load: Newtons(p_star).into(),
        governing_mode: global.mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StringerProfile;
    use crate::panel::fixtures::{case_one, j_form};
    use crate::panel::CouplingMode;
    use approx::assert_relative_eq;

    #[test]
    fn test_case_one_collapse_load() {
        let result = run(&case_one(), &AnalysisSettings::default()).unwrap();

        assert_eq!(result.case_id, "Case I");
        assert_relative_eq!(result.collapse_load.value(), 240.5, max_relative = 0.05);
        assert!(result.width_iterations > 0);
        assert!(result.width_iterations < 100);
        assert!(result.load_iterations <= AnalysisSettings::default().max_load_iterations);
        assert!(result.effective_width_mm > 0.0);
        assert!(result.effective_width_mm < result.bay_width_mm);
        assert!(result.collapse_load.value() > result.initial_buckling_load.value());
        assert!(result.postbuckling_reserve() > 1.0);
    }

    #[test]
    fn test_case_one_documented_values() {
        let result = run(&case_one(), &AnalysisSettings::default()).unwrap();

        assert_relative_eq!(result.initial_buckling_load.value(), 30.93, max_relative = 0.01);
        assert_relative_eq!(result.skin_critical_stress_mpa, 23.07, max_relative = 0.01);
        assert_relative_eq!(result.effective_width_mm, 61.63, max_relative = 0.01);
        assert_relative_eq!(result.collapse_load.value(), 240.23, max_relative = 0.01);
        assert_eq!(result.bay_width_mm, 136.0);
        assert!((5..=7).contains(&result.width_iterations));
        assert_eq!(result.governing_mode, GoverningMode::Flexural);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let config = case_one();
        let settings = AnalysisSettings::default();
        let first = run(&config, &settings).unwrap();
        let second = run(&config, &settings).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.collapse_load.value().to_bits(), second.collapse_load.value().to_bits());
    }

    #[test]
    fn test_blade_result_independent_of_coupling() {
        let config = case_one();
        let coupled = run(&config, &AnalysisSettings::default()).unwrap();
        let decoupled = run(
            &config,
            &AnalysisSettings {
                coupling: CouplingMode::Decoupled,
                ..AnalysisSettings::default()
            },
        )
        .unwrap();
        assert_relative_eq!(
            coupled.collapse_load.value(),
            decoupled.collapse_load.value(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_j_form_coupling_lowers_collapse() {
        let config = j_form();
        let coupled = run(&config, &AnalysisSettings::default()).unwrap();
        let decoupled = run(
            &config,
            &AnalysisSettings {
                coupling: CouplingMode::Decoupled,
                ..AnalysisSettings::default()
            },
        )
        .unwrap();
        assert_eq!(coupled.governing_mode, GoverningMode::FlexuralTorsional);
        assert!(coupled.collapse_load.value() < decoupled.collapse_load.value());
    }

    #[test]
    fn test_slender_stringer_collapses_before_buckling() {
        let mut config = case_one();
        config.geometry.profile = StringerProfile::Blade {
            web_height_mm: 2.0,
            foot_width_mm: 4.0,
        };
        config.geometry.radius_mm = 1.0e6;
        config.geometry.total_length_mm = 3000.0;
        config.geometry.free_length_mm = 3000.0;
        config.skin = crate::materials::LaminateStack::symmetric(
            &[0.0, 90.0, 45.0, -45.0].repeat(3),
            0.125,
            crate::materials::OrthotropicMaterial::carbon_epoxy(),
        )
        .unwrap();
        config.stringer_count = 10;
        config.geometry.stringer_pitch_mm = 68.0;

        let result = run(&config, &AnalysisSettings::default()).unwrap();
        assert_eq!(result.governing_mode, GoverningMode::PreBuckling);
        assert_eq!(result.width_iterations, 0);
        assert_eq!(result.effective_width_mm, result.bay_width_mm);
        assert!(result.collapse_load.value() <= result.initial_buckling_load.value());
    }

    #[test]
    fn test_errors_carry_case_id() {
        let mut config = case_one();
        config.geometry.stringer_pitch_mm = 0.0;
        let err = run(&config, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.case_id(), Some("Case I"));
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_evaluate_all_keeps_every_outcome() {
        let mut broken = case_one();
        broken.id = "broken".to_string();
        broken.geometry.radius_mm = -1.0;

        let outcomes = evaluate_all(&[case_one(), broken, j_form()], &AnalysisSettings::default());
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].1.is_ok());
        assert_eq!(outcomes[1].0, "broken");
        assert!(outcomes[1].1.is_err());
        assert!(outcomes[2].1.is_ok());
    }
}
