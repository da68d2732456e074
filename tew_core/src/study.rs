//! # Study Data Structures
//!
//! A `Study` is the root container for a set of panel configurations analysed
//! with common settings. Studies serialize to `.tew.json` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (version, analyst, reference, timestamps)
//! ├── settings: AnalysisSettings (tolerances, caps, end fixity, coupling)
//! └── cases: Vec<StudyCase>
//!     ├── config: StiffenedPanelConfig
//!     └── reference: Option<ReferenceData> (test / FE / published values)
//! ```
//!
//! Reference values are only compared against computed results; they never
//! feed the analysis.
//!
//! ## Example
//!
//! ```rust
//! use tew_core::study::Study;
//!
//! let study = Study::new("A. Analyst", "Composite Structures 83 (2008) 341-353");
//! let json = serde_json::to_string_pretty(&study).unwrap();
//! assert!(json.contains("A. Analyst"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate_all, CollapseResult};
use crate::errors::TewResult;
use crate::panel::{AnalysisSettings, StiffenedPanelConfig};

/// Current schema version for .tew.json files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root study container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    /// Study metadata (version, analyst, reference)
    pub meta: StudyMetadata,

    /// Settings shared by every case
    #[serde(default)]
    pub settings: AnalysisSettings,

    /// Panel configurations in evaluation order
    pub cases: Vec<StudyCase>,
}

impl Study {
    /// Create an empty study.
    pub fn new(analyst: impl Into<String>, reference: impl Into<String>) -> Self {
        let now = Utc::now();
        Study {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                analyst: analyst.into(),
                reference: reference.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            cases: Vec::new(),
        }
    }

    /// Add a case, replacing any existing case with the same id.
    ///
    /// Returns the replaced case.
    ///
    /// ```rust
    /// use tew_core::study::{Study, StudyCase};
    /// # use tew_core::geometry::{PanelGeometry, StringerProfile};
    /// # use tew_core::materials::{LaminateStack, OrthotropicMaterial};
    /// # use tew_core::panel::StiffenedPanelConfig;
    /// # let mat = OrthotropicMaterial::carbon_epoxy();
    /// # let config = StiffenedPanelConfig {
    /// #     id: "Case I".to_string(),
    /// #     description: String::new(),
    /// #     skin: LaminateStack::symmetric(&[0.0, 90.0, 45.0, -45.0], 0.125, mat).unwrap(),
    /// #     stringer: LaminateStack::symmetric(&[45.0, -45.0, 0.0].repeat(4), 0.125, mat).unwrap(),
    /// #     geometry: PanelGeometry {
    /// #         total_length_mm: 720.0, free_length_mm: 660.0, radius_mm: 938.0,
    /// #         arc_length_mm: 680.0, stringer_pitch_mm: 136.0,
    /// #         profile: StringerProfile::Blade { web_height_mm: 20.0, foot_width_mm: 20.0 },
    /// #     },
    /// #     stringer_count: 5,
    /// # };
    ///
    /// let mut study = Study::new("Analyst", "");
    /// assert!(study.add_case(StudyCase::new(config.clone())).is_none());
    /// assert!(study.add_case(StudyCase::new(config)).is_some());
    /// assert_eq!(study.case_count(), 1);
    /// ```
    pub fn add_case(&mut self, case: StudyCase) -> Option<StudyCase> {
        self.touch();
        match self.cases.iter_mut().find(|c| c.config.id == case.config.id) {
            Some(existing) => Some(std::mem::replace(existing, case)),
            None => {
                self.cases.push(case);
                None
            }
        }
    }

    /// Remove a case by id.
    pub fn remove_case(&mut self, id: &str) -> Option<StudyCase> {
        let index = self.cases.iter().position(|c| c.config.id == id)?;
        self.touch();
        Some(self.cases.remove(index))
    }

    /// Get a case by id.
    pub fn case(&self, id: &str) -> Option<&StudyCase> {
        self.cases.iter().find(|c| c.config.id == id)
    }

    /// Number of cases
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Evaluate every case with the study settings.
    pub fn evaluate(&self) -> Vec<(String, TewResult<CollapseResult>)> {
        let configs: Vec<StiffenedPanelConfig> = self.cases.iter().map(|c| c.config.clone()).collect();
        evaluate_all(&configs, &self.settings)
    }
}

impl Default for Study {
    fn default() -> Self {
        Study::new("", "")
    }
}

/// Study metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Person responsible for the study
    pub analyst: String,

    /// Source of the reference values (paper, report)
    #[serde(default)]
    pub reference: String,

    /// When the study was created
    pub created: DateTime<Utc>,

    /// When the study was last modified
    pub modified: DateTime<Utc>,
}

/// One configuration with its optional reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCase {
    /// Panel to analyse
    pub config: StiffenedPanelConfig,

    /// Values to compare the computed result against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceData>,
}

impl StudyCase {
    /// Case without reference values
    pub fn new(config: StiffenedPanelConfig) -> Self {
        StudyCase {
            config,
            reference: None,
        }
    }

    /// Case with reference values
    pub fn with_reference(config: StiffenedPanelConfig, reference: ReferenceData) -> Self {
        StudyCase {
            config,
            reference: Some(reference),
        }
    }
}

/// Measured and published loads for one configuration (kN).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Buckling loads of the tested specimens
    #[serde(default)]
    pub experimental_buckling_kn: Vec<f64>,

    /// Collapse loads of the tested specimens
    #[serde(default)]
    pub experimental_collapse_kn: Vec<f64>,

    /// Nonlinear finite-element buckling load
    pub fe_buckling_kn: Option<f64>,

    /// Nonlinear finite-element collapse load
    pub fe_collapse_kn: Option<f64>,

    /// Published semi-empirical buckling load
    pub published_buckling_kn: Option<f64>,

    /// Published approximate-analytical buckling load
    #[serde(default)]
    pub published_buckling_analytical_kn: Option<f64>,

    /// Published TEW collapse load
    pub published_collapse_kn: Option<f64>,
}

impl ReferenceData {
    /// Mean of the experimental collapse loads
    pub fn experimental_collapse_mean_kn(&self) -> Option<f64> {
        mean(&self.experimental_collapse_kn)
    }

    /// Mean of the experimental buckling loads
    pub fn experimental_buckling_mean_kn(&self) -> Option<f64> {
        mean(&self.experimental_buckling_kn)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
