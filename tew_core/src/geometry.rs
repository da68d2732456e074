//! # Panel Geometry
//!
//! Dimensions of a curved, stringer-stiffened panel and the stringer profile.
//!
//! ```text
//!             ┌── flange (J-form only)
//!        ┌────┴───┐
//!        │ web      h = web height
//!        │
//!   ─────┴─────       foot (bonded to the skin)
//! ══════════════════  skin (arc length s, radius R)
//!   |<-- pitch -->|
//! ```
//!
//! All dimensions are in millimetres. Stringer walls take the thickness of the
//! stringer laminate.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{TewError, TewResult};
use crate::materials::LaminateStack;
use crate::section::{StringerSection, StringerSectionProperties};

/// Stringer cross-section shape.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "Blade", "web_height_mm": 20.0, "foot_width_mm": 20.0 }
/// { "kind": "JForm", "web_height_mm": 20.0, "flange_width_mm": 12.0, "foot_width_mm": 30.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StringerProfile {
    /// T-type stringer: web standing on a foot, no flange. Symmetric about the web.
    Blade {
        /// Web height above the foot (mm)
        web_height_mm: f64,
        /// Foot width, centred on the web (mm)
        foot_width_mm: f64,
    },
    /// J-form stringer: foot, web and a top flange to one side. Asymmetric.
    JForm {
        /// Web height above the foot (mm)
        web_height_mm: f64,
        /// Top flange width, measured from the web centreline (mm)
        flange_width_mm: f64,
        /// Foot width, centred on the web (mm)
        foot_width_mm: f64,
    },
}

impl StringerProfile {
    /// Web height (mm)
    pub fn web_height_mm(&self) -> f64 {
        match *self {
            StringerProfile::Blade { web_height_mm, .. } | StringerProfile::JForm { web_height_mm, .. } => web_height_mm,
        }
    }

    /// Top flange width (mm); zero for blade stringers
    pub fn flange_width_mm(&self) -> f64 {
        match *self {
            StringerProfile::Blade { .. } => 0.0,
            StringerProfile::JForm { flange_width_mm, .. } => flange_width_mm,
        }
    }

    /// Foot width (mm)
    pub fn foot_width_mm(&self) -> f64 {
        match *self {
            StringerProfile::Blade { foot_width_mm, .. } | StringerProfile::JForm { foot_width_mm, .. } => foot_width_mm,
        }
    }

    /// True when the section is mirror-symmetric about the web plane
    pub fn is_symmetric(&self) -> bool {
        matches!(self, StringerProfile::Blade { .. })
    }

    fn validate(&self) -> TewResult<()> {
        let mut dims = vec![
            ("web_height_mm", self.web_height_mm()),
            ("foot_width_mm", self.foot_width_mm()),
        ];
        if let StringerProfile::JForm { flange_width_mm, .. } = *self {
            dims.push(("flange_width_mm", flange_width_mm));
        }
        for (field, value) in dims {
            positive(field, value)?;
        }
        Ok(())
    }
}

/// Geometry of one curved stiffened panel.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_length_mm": 720.0,
///   "free_length_mm": 660.0,
///   "radius_mm": 938.0,
///   "arc_length_mm": 680.0,
///   "stringer_pitch_mm": 136.0,
///   "profile": { "kind": "Blade", "web_height_mm": 20.0, "foot_width_mm": 20.0 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    /// Overall panel length, including potted ends (mm)
    pub total_length_mm: f64,
    /// Unsupported length between the end fixtures (mm)
    pub free_length_mm: f64,
    /// Skin radius of curvature (mm)
    pub radius_mm: f64,
    /// Skin arc length across the panel (mm)
    pub arc_length_mm: f64,
    /// Distance between stringer centrelines (mm)
    pub stringer_pitch_mm: f64,
    /// Stringer cross-section
    pub profile: StringerProfile,
}

impl PanelGeometry {
    /// Validate panel dimensions.
    pub fn validate(&self) -> TewResult<()> {
        positive("radius_mm", self.radius_mm)?;
        positive("stringer_pitch_mm", self.stringer_pitch_mm)?;
        positive("total_length_mm", self.total_length_mm)?;
        positive("free_length_mm", self.free_length_mm)?;
        positive("arc_length_mm", self.arc_length_mm)?;

        if self.free_length_mm > self.total_length_mm {
            return Err(TewError::invalid_geometry(
                "free_length_mm",
                self.free_length_mm.to_string(),
                format!("Free length exceeds total length {} mm", self.total_length_mm),
            ));
        }
        if self.arc_length_mm > 2.0 * PI * self.radius_mm {
            return Err(TewError::invalid_geometry(
                "arc_length_mm",
                self.arc_length_mm.to_string(),
                format!("Arc length exceeds the circumference of radius {} mm", self.radius_mm),
            ));
        }
        self.profile.validate()
    }

    /// Subtended panel angle (radians)
    pub fn subtended_angle_rad(&self) -> f64 {
        self.arc_length_mm / self.radius_mm
    }

    /// Area, centroid and second moment of the bare stringer.
    pub fn section_properties(&self, stringer_laminate: &LaminateStack) -> TewResult<StringerSectionProperties> {
        self.validate()?;
        let stiffness = stringer_laminate.homogenize()?;
        Ok(StringerSection::new(&self.profile, &stiffness).properties())
    }
}

fn positive(field: &str, value: f64) -> TewResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TewError::invalid_geometry(
            field,
            value.to_string(),
            "Dimension must be positive and finite",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::OrthotropicMaterial;
    use approx::assert_relative_eq;

    fn case_one() -> PanelGeometry {
        PanelGeometry {
            total_length_mm: 720.0,
            free_length_mm: 660.0,
            radius_mm: 938.0,
            arc_length_mm: 680.0,
            stringer_pitch_mm: 136.0,
            profile: StringerProfile::Blade {
                web_height_mm: 20.0,
                foot_width_mm: 20.0,
            },
        }
    }

    fn stringer_laminate() -> LaminateStack {
        let half: Vec<f64> = [45.0, -45.0, 0.0].repeat(4);
        LaminateStack::symmetric(&half, 0.125, OrthotropicMaterial::carbon_epoxy()).unwrap()
    }

    #[test]
    fn test_valid_geometry() {
        let geom = case_one();
        assert!(geom.validate().is_ok());
        assert_relative_eq!(geom.subtended_angle_rad(), 680.0 / 938.0);
    }

    #[test]
    fn test_zero_pitch_rejected() {
        let mut geom = case_one();
        geom.stringer_pitch_mm = 0.0;
        let err = geom.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");

        geom.stringer_pitch_mm = -10.0;
        assert!(geom.validate().is_err());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut geom = case_one();
        geom.radius_mm = 0.0;
        assert!(geom.validate().is_err());
    }

    #[test]
    fn test_free_length_exceeding_total_rejected() {
        let mut geom = case_one();
        geom.free_length_mm = 800.0;
        match geom.validate().unwrap_err() {
            TewError::InvalidGeometry { field, .. } => assert_eq!(field, "free_length_mm"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_arc_longer_than_circumference_rejected() {
        let mut geom = case_one();
        geom.radius_mm = 100.0;
        assert!(geom.validate().is_err());
    }

    #[test]
    fn test_blade_has_no_flange() {
        let geom = case_one();
        assert_eq!(geom.profile.flange_width_mm(), 0.0);
        assert!(geom.profile.is_symmetric());
    }

    #[test]
    fn test_j_form_needs_flange() {
        let mut geom = case_one();
        geom.profile = StringerProfile::JForm {
            web_height_mm: 20.0,
            flange_width_mm: 0.0,
            foot_width_mm: 30.0,
        };
        assert!(geom.validate().is_err());
    }

    #[test]
    fn test_bare_stringer_properties() {
        let props = case_one().section_properties(&stringer_laminate()).unwrap();
        // Foot 20 x 3 plus web 20 x 3
        assert_relative_eq!(props.area_mm2, 120.0, max_relative = 1e-12);
        // Foot centroid at 1.5 mm, web centroid at 3 + 10 = 13 mm
        assert_relative_eq!(props.centroid_y_mm, (60.0 * 1.5 + 60.0 * 13.0) / 120.0, max_relative = 1e-12);
        assert_relative_eq!(props.centroid_x_mm, 0.0, epsilon = 1e-12);
        assert!(props.second_moment_mm4 > 3.0 * 20.0_f64.powi(3) / 12.0);
    }

    #[test]
    fn test_profile_serialization() {
        let geom = case_one();
        let json = serde_json::to_string(&geom).unwrap();
        assert!(json.contains("\"kind\":\"Blade\""));
        let roundtrip: PanelGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(geom, roundtrip);
    }
}
