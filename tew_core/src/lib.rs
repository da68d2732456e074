//! # tew_core - Collapse Analysis of Curved Stiffened Composite Panels
//!
//! `tew_core` computes the axial collapse load of curved, stringer-stiffened
//! laminated panels with the Technion Effective Width (TEW) method:
//!
//! 1. local skin buckling from the laminate and the panel curvature,
//! 2. a converged effective width of buckled skin working with each stringer,
//! 3. flexural-torsional instability of the resulting skin-stringer column.
//!
//! All inputs and outputs are JSON-serializable and every failure is a
//! structured [`TewError`].
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from a configuration to a result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types tagged with the failing case
//!
//! ## Quick Start
//!
//! ```rust
//! use tew_core::geometry::{PanelGeometry, StringerProfile};
//! use tew_core::materials::{LaminateStack, OrthotropicMaterial};
//! use tew_core::StiffenedPanelConfig;
//!
//! let mat = OrthotropicMaterial::carbon_epoxy();
//! let config = StiffenedPanelConfig {
//!     id: "Case I".to_string(),
//!     description: "Panel with 5 T-type stringers, 20 mm web height".to_string(),
//!     skin: LaminateStack::symmetric(&[0.0, 90.0, 45.0, -45.0], 0.125, mat).unwrap(),
//!     stringer: LaminateStack::symmetric(&[45.0, -45.0, 0.0].repeat(4), 0.125, mat).unwrap(),
//!     geometry: PanelGeometry {
//!         total_length_mm: 720.0,
//!         free_length_mm: 660.0,
//!         radius_mm: 938.0,
//!         arc_length_mm: 680.0,
//!         stringer_pitch_mm: 136.0,
//!         profile: StringerProfile::Blade { web_height_mm: 20.0, foot_width_mm: 20.0 },
//!     },
//!     stringer_count: 5,
//! };
//!
//! let result = tew_core::evaluate(&config).unwrap();
//! assert!(result.collapse_load.value() > result.initial_buckling_load.value());
//! println!("{}: collapse at {:.1} kN", result.case_id, result.collapse_load.value());
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Ply materials and classical lamination theory
//! - [`geometry`] - Panel dimensions and stringer profiles
//! - [`section`] - Thin-walled section model and rigidities
//! - [`equations`] - Closed-form buckling and effective-width formulas
//! - [`calculations`] - Buckling, effective width, global stability, collapse
//! - [`panel`] - Panel configuration and analysis settings
//! - [`study`] - Study container with reference values
//! - [`file_io`] - Atomic study saves and version-checked loads
//! - [`units`] - Load and stress newtypes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod materials;
pub mod panel;
pub mod section;
pub mod study;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate_all, CollapseResult, GoverningMode};
pub use errors::{TewError, TewResult};
pub use file_io::{load_study, save_study};
pub use panel::{AnalysisSettings, CouplingMode, EndFixity, StiffenedPanelConfig};
pub use study::{ReferenceData, Study, StudyCase};

/// Evaluate one configuration with default settings.
///
/// # Errors
///
/// Any `InvalidLaminate`, `InvalidGeometry`, `InvalidInput`, `Convergence` or
/// `IllConditionedSection` failure, wrapped in `TewError::Case` with the
/// configuration id.
pub fn evaluate(config: &StiffenedPanelConfig) -> TewResult<CollapseResult> {
    calculations::run(config, &AnalysisSettings::default())
}

/// Evaluate one configuration with explicit settings.
pub fn evaluate_with(config: &StiffenedPanelConfig, settings: &AnalysisSettings) -> TewResult<CollapseResult> {
    calculations::run(config, settings)
}
