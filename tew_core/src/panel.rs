//! # Panel Configuration
//!
//! The unit of analysis: one curved stiffened panel (skin laminate, stringer
//! laminate, geometry, stringer count) and the numerical settings the
//! analysis runs with.
//!
//! ## Example
//!
//! ```rust
//! use tew_core::geometry::{PanelGeometry, StringerProfile};
//! use tew_core::materials::{LaminateStack, OrthotropicMaterial};
//! use tew_core::panel::{AnalysisSettings, StiffenedPanelConfig};
//!
//! let mat = OrthotropicMaterial::carbon_epoxy();
//! let config = StiffenedPanelConfig {
//!     id: "Case I".to_string(),
//!     description: "5 T-type stringers, 20 mm web".to_string(),
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
//! assert!(config.validate().is_ok());
//! assert_eq!(config.bay_width_mm(), 136.0);
//!
//! let settings = AnalysisSettings::default();
//! assert_eq!(settings.max_iterations, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TewError, TewResult};
use crate::geometry::PanelGeometry;
use crate::materials::LaminateStack;

/// Default relative tolerance on successive effective-width estimates
pub const DEFAULT_WIDTH_TOLERANCE: f64 = 1e-4;

/// Default cap on effective-width iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default relative tolerance on the collapse-load bracket
pub const DEFAULT_LOAD_TOLERANCE: f64 = 1e-6;

/// Default cap on collapse-load bisection steps
pub const DEFAULT_MAX_LOAD_ITERATIONS: usize = 200;

/// Smallest effective width, as a fraction of the bay, accepted by the
/// global stability evaluation
pub const MIN_EFFECTIVE_WIDTH_FRACTION: f64 = 1e-6;

/// One curved, stringer-stiffened panel.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "Case I",
///   "description": "Panel with 5 T-type stringers, 20 mm web height",
///   "skin": [{ "thickness_mm": 0.125, "orientation_deg": 0.0, "material": { "...": "..." } }],
///   "stringer": [{ "thickness_mm": 0.125, "orientation_deg": 45.0, "material": { "...": "..." } }],
///   "geometry": { "...": "..." },
///   "stringer_count": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StiffenedPanelConfig {
    /// Configuration identifier (e.g., "Case I")
    pub id: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Skin laminate
    pub skin: LaminateStack,

    /// Stringer laminate (web, foot and flange share it)
    pub stringer: LaminateStack,

    /// Panel and stringer dimensions
    pub geometry: PanelGeometry,

    /// Number of stringers (and skin bays)
    pub stringer_count: usize,
}

impl StiffenedPanelConfig {
    /// Validate every part of the configuration.
    pub fn validate(&self) -> TewResult<()> {
        self.geometry.validate()?;
        if self.stringer_count == 0 {
            return Err(TewError::invalid_geometry(
                "stringer_count",
                "0",
                "At least one stringer is required",
            ));
        }
        let occupied = self.stringer_count as f64 * self.geometry.stringer_pitch_mm;
        // Small slack for pitches quoted to the nearest millimetre
        if occupied > self.geometry.arc_length_mm * (1.0 + 1e-9) {
            return Err(TewError::invalid_geometry(
                "stringer_pitch_mm",
                self.geometry.stringer_pitch_mm.to_string(),
                format!(
                    "{} stringers at this pitch need {} mm, arc length is {} mm",
                    self.stringer_count, occupied, self.geometry.arc_length_mm
                ),
            ));
        }
        Ok(())
    }

    /// Skin width attributed to one stringer, arc length / stringer count (mm)
    pub fn bay_width_mm(&self) -> f64 {
        self.geometry.arc_length_mm / self.stringer_count as f64
    }
}

/// Column end condition of the panel in the test fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EndFixity {
    /// Both ends free to rotate, k = 1.0
    Pinned,
    /// Both ends potted, k = 0.5
    Clamped,
    /// User-supplied effective length factor
    Custom(f64),
}

impl EndFixity {
    /// Effective length factor k
    pub fn length_factor(&self) -> f64 {
        match *self {
            EndFixity::Pinned => 1.0,
            EndFixity::Clamped => 0.5,
            EndFixity::Custom(k) => k,
        }
    }
}

/// Whether the global evaluation keeps the bending-torsion coupling terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouplingMode {
    /// Full flexural-torsional problem
    Coupled,
    /// Coupling terms forced to zero (verification only)
    Decoupled,
}

/// Tolerances, caps and boundary conditions of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Relative tolerance on successive effective-width estimates
    pub width_tolerance: f64,

    /// Maximum effective-width iterations
    pub max_iterations: usize,

    /// Relative tolerance on the collapse-load bracket
    pub load_tolerance: f64,

    /// Maximum collapse-load bisection steps
    pub max_load_iterations: usize,

    /// Column end condition
    pub end_fixity: EndFixity,

    /// Coupling treatment in the global evaluation
    pub coupling: CouplingMode,
}

impl AnalysisSettings {
    /// Validate tolerances and caps.
    pub fn validate(&self) -> TewResult<()> {
        for (field, value) in [
            ("width_tolerance", self.width_tolerance),
            ("load_tolerance", self.load_tolerance),
            ("end_fixity", self.end_fixity.length_factor()),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TewError::invalid_input(
                    field,
                    value.to_string(),
                    "Setting must be positive and finite",
                ));
            }
        }
        if self.max_iterations == 0 || self.max_load_iterations == 0 {
            return Err(TewError::invalid_input(
                "max_iterations",
                format!("{}/{}", self.max_iterations, self.max_load_iterations),
                "Iteration caps must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            width_tolerance: DEFAULT_WIDTH_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            load_tolerance: DEFAULT_LOAD_TOLERANCE,
            max_load_iterations: DEFAULT_MAX_LOAD_ITERATIONS,
            end_fixity: EndFixity::Clamped,
            coupling: CouplingMode::Coupled,
        }
    }
}

/// Shared configurations for unit tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::geometry::StringerProfile;
    use crate::materials::OrthotropicMaterial;

    pub fn skin() -> LaminateStack {
        LaminateStack::symmetric(&[0.0, 90.0, 45.0, -45.0], 0.125, OrthotropicMaterial::carbon_epoxy()).unwrap()
    }

    pub fn stringer() -> LaminateStack {
        LaminateStack::symmetric(&[45.0, -45.0, 0.0].repeat(4), 0.125, OrthotropicMaterial::carbon_epoxy()).unwrap()
    }

    /// Case I: 5 T-type stringers, 20 mm web, 20 mm foot
    pub fn case_one() -> StiffenedPanelConfig {
        StiffenedPanelConfig {
            id: "Case I".to_string(),
            description: "Panel with 5 T-type stringers, 20 mm web height".to_string(),
            skin: skin(),
            stringer: stringer(),
            geometry: PanelGeometry {
                total_length_mm: 720.0,
                free_length_mm: 660.0,
                radius_mm: 938.0,
                arc_length_mm: 680.0,
                stringer_pitch_mm: 136.0,
                profile: StringerProfile::Blade {
                    web_height_mm: 20.0,
                    foot_width_mm: 20.0,
                },
            },
            stringer_count: 5,
        }
    }

    /// Case I panel with J-form stringers
    pub fn j_form() -> StiffenedPanelConfig {
        let mut config = case_one();
        config.id = "J-form".to_string();
        config.geometry.profile = StringerProfile::JForm {
            web_height_mm: 20.0,
            flange_width_mm: 12.0,
            foot_width_mm: 30.0,
        };
        config
    }
}
