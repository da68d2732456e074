//! Built-in reference study: the five curved panels tested at the Technion
//! (Pevzner, Abramovich and Weller, Composite Structures 83 (2008) 341-353).
//!
//! Geometry and laminates are inputs to the analysis. The measured, FE and
//! published TEW loads are attached as [`ReferenceData`] for comparison only.

use tew_core::geometry::{PanelGeometry, StringerProfile};
use tew_core::materials::{LaminateStack, OrthotropicMaterial};
use tew_core::{ReferenceData, StiffenedPanelConfig, Study, StudyCase, TewResult};

const PLY_THICKNESS_MM: f64 = 0.125;
const REFERENCE: &str = "Pevzner, Abramovich, Weller - Composite Structures 83 (2008) 341-353";

/// The five reference panels with their published values.
pub fn reference_study() -> TewResult<Study> {
    let mut study = Study::new("TEW reference", REFERENCE);
    for case in reference_cases()? {
        study.add_case(case);
    }
    Ok(study)
}

fn reference_cases() -> TewResult<Vec<StudyCase>> {
    let thick = [45.0, -45.0, 0.0].repeat(4);
    let thin = [45.0, -45.0, 0.0, 0.0].repeat(2);

    Ok(vec![
        StudyCase::with_reference(
            panel(
                "Case I",
                "Panel with 5 T-type stringers, 20 mm web height",
                &thick,
                5,
                136.0,
                StringerProfile::Blade {
                    web_height_mm: 20.0,
                    foot_width_mm: 20.0,
                },
            )?,
            reference(
                &[137.3, 147.2, 158.5],
                &[208.7, 222.7, 224.8],
                [122.0, 204.0],
                [123.5, 137.6, 240.5],
            ),
        ),
        StudyCase::with_reference(
            panel(
                "Case II",
                "Panel with 5 T-type stringers, 15 mm web height",
                &thick,
                5,
                136.0,
                StringerProfile::Blade {
                    web_height_mm: 15.0,
                    foot_width_mm: 20.0,
                },
            )?,
            reference(
                &[133.4, 110.9, 123.6],
                &[158.9, 153.3, 147.2],
                [115.0, 135.0],
                [114.4, 127.4, 127.4],
            ),
        ),
        StudyCase::with_reference(
            panel(
                "Case III",
                "Panel with 6 T-type stringers, 20 mm web height",
                &thick,
                6,
                113.0,
                StringerProfile::Blade {
                    web_height_mm: 20.0,
                    foot_width_mm: 20.0,
                },
            )?,
            reference(
                &[224.2, 237.3, 234.5],
                &[274.7, 264.9, 274.7],
                [180.0, 290.0],
                [171.7, 207.2, 281.7],
            ),
        ),
        StudyCase::with_reference(
            panel(
                "Case IV",
                "Panel with 5 J-form thin stringers",
                &thin,
                5,
                136.0,
                StringerProfile::JForm {
                    web_height_mm: 20.0,
                    flange_width_mm: 20.0,
                    foot_width_mm: 30.0,
                },
            )?,
            reference(&[83.4, 70.6], &[230.5, 226.1], [95.0, 215.0], [80.4, 100.8, 202.6]),
        ),
        StudyCase::with_reference(
            panel(
                "Case V",
                "Panel with 4 J-form thick stringers",
                &thick,
                4,
                170.0,
                StringerProfile::JForm {
                    web_height_mm: 25.0,
                    flange_width_mm: 20.0,
                    foot_width_mm: 30.0,
                },
            )?,
            reference(&[59.8, 90.8], &[289.8, 293.0], [75.0, 330.0], [111.2, 119.3, 354.9]),
        ),
    ])
}

/// Common test-panel dimensions: 720 mm long, potted to a 660 mm free length,
/// 938 mm radius, 680 mm arc, `[0/90/±45]s` skin.
fn panel(
    id: &str,
    description: &str,
    stringer_half_layup: &[f64],
    stringer_count: usize,
    stringer_pitch_mm: f64,
    profile: StringerProfile,
) -> TewResult<StiffenedPanelConfig> {
    let mat = OrthotropicMaterial::carbon_epoxy();
    Ok(StiffenedPanelConfig {
        id: id.to_string(),
        description: description.to_string(),
        skin: LaminateStack::symmetric(&[0.0, 90.0, 45.0, -45.0], PLY_THICKNESS_MM, mat)?,
        stringer: LaminateStack::symmetric(stringer_half_layup, PLY_THICKNESS_MM, mat)?,
        geometry: PanelGeometry {
            total_length_mm: 720.0,
            free_length_mm: 660.0,
            radius_mm: 938.0,
            arc_length_mm: 680.0,
            stringer_pitch_mm,
            profile,
        },
        stringer_count,
    })
}

/// `fe` = [buckling, collapse]; `published` = [semi-empirical buckling,
/// analytical buckling, TEW collapse]
fn reference(buckling: &[f64], collapse: &[f64], fe: [f64; 2], published: [f64; 3]) -> ReferenceData {
    ReferenceData {
        experimental_buckling_kn: buckling.to_vec(),
        experimental_collapse_kn: collapse.to_vec(),
        fe_buckling_kn: Some(fe[0]),
        fe_collapse_kn: Some(fe[1]),
        published_buckling_kn: Some(published[0]),
        published_buckling_analytical_kn: Some(published[1]),
        published_collapse_kn: Some(published[2]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tew_core::GoverningMode;

    #[test]
    fn test_reference_study_has_five_valid_cases() {
        let study = reference_study().unwrap();
        assert_eq!(study.case_count(), 5);
        for case in &study.cases {
            assert!(case.config.validate().is_ok(), "{} invalid", case.config.id);
            assert!(case.reference.is_some());
        }
    }

    #[test]
    fn test_case_one_matches_published_collapse() {
        let study = reference_study().unwrap();
        let case = study.case("Case I").unwrap();
        let result = tew_core::evaluate(&case.config).unwrap();
        let published = case.reference.as_ref().unwrap().published_collapse_kn.unwrap();
        assert!((result.collapse_load.value() - published).abs() / published < 0.05);
    }

    #[test]
    fn test_all_reference_cases_evaluate() {
        let study = reference_study().unwrap();
        for (id, outcome) in study.evaluate() {
            let result = outcome.unwrap_or_else(|e| panic!("{id} failed: {e}"));
            let is_j_form = !study.case(&id).unwrap().config.geometry.profile.is_symmetric();
            if is_j_form {
                assert_eq!(result.governing_mode, GoverningMode::FlexuralTorsional);
            }
        }
    }

    #[test]
    fn test_case_one_reference_values() {
        let study = reference_study().unwrap();
        let reference = study.case("Case I").unwrap().reference.clone().unwrap();
        assert_eq!(reference.published_collapse_kn, Some(240.5));
        assert_eq!(reference.experimental_collapse_kn, vec![208.7, 222.7, 224.8]);
    }
}
