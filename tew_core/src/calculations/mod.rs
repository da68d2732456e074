//! # TEW Calculations
//!
//! The collapse analysis runs in four stages, each in its own module:
//!
//! - [`buckling`] - Initial local skin buckling (σ_cr, P_b)
//! - [`effective_width`] - Post-buckling effective-width fixed point
//! - [`global_stability`] - Flexural-torsional instability of the skin-stringer column
//! - [`collapse`] - Sequencing of the stages into a [`CollapseResult`]
//!
//! Every stage is a pure function of a [`StiffenedPanelConfig`] and
//! [`AnalysisSettings`]; results are JSON-serializable and errors are
//! structured [`TewError`](crate::errors::TewError) values.
//!
//! [`StiffenedPanelConfig`]: crate::panel::StiffenedPanelConfig
//! [`AnalysisSettings`]: crate::panel::AnalysisSettings

pub mod buckling;
pub mod collapse;
pub mod effective_width;
pub mod global_stability;

pub use buckling::{critical_stress, initial_buckling_load, SkinBuckling};
pub use collapse::{evaluate_all, run, CollapseResult};
pub use effective_width::{converge, ConvergedSection};
pub use global_stability::{collapse_load, GlobalStability, GoverningMode};

use crate::errors::TewResult;
use crate::materials::LaminateStiffness;
use crate::panel::StiffenedPanelConfig;
use crate::section::{SkinStrip, StringerSection};

/// A validated configuration with its laminates homogenized.
///
/// Built once per analysis and shared by the stages so the laminates are not
/// re-homogenized at every iteration.
#[derive(Debug, Clone)]
pub struct PanelModel<'a> {
    /// The configuration being analysed
    pub config: &'a StiffenedPanelConfig,
    /// Skin laminate stiffness
    pub skin: LaminateStiffness,
    /// Stringer wall model with its laminate moduli
    pub stringer: StringerSection,
}

impl<'a> PanelModel<'a> {
    /// Validate the configuration and homogenize both laminates.
    pub fn new(config: &'a StiffenedPanelConfig) -> TewResult<Self> {
        config.validate()?;
        let skin = config.skin.homogenize()?;
        let stringer_stiffness = config.stringer.homogenize()?;
        let stringer = StringerSection::new(&config.geometry.profile, &stringer_stiffness);
        Ok(PanelModel {
            config,
            skin,
            stringer,
        })
    }

    /// Skin width attributed to one stringer (mm)
    pub fn bay_width_mm(&self) -> f64 {
        self.config.bay_width_mm()
    }

    /// Number of stringers as a float
    pub fn stringer_count(&self) -> f64 {
        self.config.stringer_count as f64
    }

    /// Skin strip of the given width acting with one stringer
    pub fn skin_strip(&self, width_mm: f64) -> SkinStrip {
        SkinStrip {
            width_mm,
            thickness_mm: self.skin.thickness_mm,
            e_mpa: self.skin.ex_mpa,
        }
    }
}
