//! Comparison of computed buckling and collapse loads against reference values.

use serde::{Deserialize, Serialize};
use tew_core::{CollapseResult, Study, TewError};

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Configuration id
    pub case_id: String,
    /// Mean measured collapse load (kN)
    pub experimental_average_kn: Option<f64>,
    /// Published TEW collapse load (kN)
    pub published_kn: Option<f64>,
    /// Full computed result
    pub result: CollapseResult,
    /// (computed - published) / published, in percent
    pub difference_pct: Option<f64>,
    /// Mean measured initial buckling load (kN)
    #[serde(default)]
    pub experimental_buckling_kn: Option<f64>,
    /// Published semi-empirical buckling load (kN)
    #[serde(default)]
    pub published_buckling_kn: Option<f64>,
    /// Computed P_b against the published buckling load, in percent
    #[serde(default)]
    pub buckling_difference_pct: Option<f64>,
}

/// A configuration that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub case_id: String,
    pub code: String,
    pub error: TewError,
}

/// Computed rows plus the skipped configurations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<Failure>,
}

impl Report {
    /// Evaluate every case of a study.
    pub fn build(study: &Study) -> Self {
        let mut report = Report::default();
        for (case_id, outcome) in study.evaluate() {
            match outcome {
                Ok(result) => {
                    let reference = study.case(&case_id).and_then(|c| c.reference.as_ref());
                    let published = reference.and_then(|r| r.published_collapse_kn);
                    let published_buckling = reference.and_then(|r| r.published_buckling_kn);
                    report.rows.push(ReportRow {
                        experimental_average_kn: reference.and_then(|r| r.experimental_collapse_mean_kn()),
                        published_kn: published,
                        difference_pct: percent_difference(result.collapse_load.value(), published),
                        experimental_buckling_kn: reference.and_then(|r| r.experimental_buckling_mean_kn()),
                        published_buckling_kn: published_buckling,
                        buckling_difference_pct: percent_difference(
                            result.initial_buckling_load.value(),
                            published_buckling,
                        ),
                        case_id,
                        result,
                    });
                }
                Err(error) => {
                    log::warn!("skipping {case_id}: {error}");
                    report.failures.push(Failure {
                        case_id,
                        code: error.error_code().to_string(),
                        error,
                    });
                }
            }
        }
        report
    }

    /// Fixed-width comparison tables: initial buckling, then collapse.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str("--- INITIAL BUCKLING LOADS: COMPUTED VS REPORTED ---\n");
        out.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>9}\n",
            "Case", "Exp avg kN", "Pub ref kN", "P_b kN", "Diff %"
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12.2} {:>9}\n",
                row.case_id,
                optional(row.experimental_buckling_kn, 2),
                optional(row.published_buckling_kn, 1),
                row.result.initial_buckling_load.value(),
                optional(row.buckling_difference_pct, 2),
            ));
        }

        out.push('\n');
        out.push_str("--- TEW COLLAPSE LOADS: COMPUTED VS REPORTED ---\n");
        out.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>9} {:>10}  {}\n",
            "Case", "Exp avg kN", "TEW ref kN", "Computed kN", "Diff %", "w_eff mm", "Mode"
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12.1} {:>9} {:>10.2}  {}\n",
                row.case_id,
                optional(row.experimental_average_kn, 2),
                optional(row.published_kn, 1),
                row.result.collapse_load.value(),
                optional(row.difference_pct, 2),
                row.result.effective_width_mm,
                row.result.governing_mode.display_name(),
            ));
        }
        out
    }
}

fn percent_difference(computed: f64, reference: Option<f64>) -> Option<f64> {
    reference.map(|r| (computed - r) / r * 100.0)
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::reference_study;
    use approx::assert_relative_eq;

    #[test]
    fn test_report_of_reference_study() {
        let report = Report::build(&reference_study().unwrap());
        assert_eq!(report.rows.len(), 5);
        assert!(report.failures.is_empty());

        let case_one = &report.rows[0];
        assert_eq!(case_one.case_id, "Case I");
        assert_eq!(case_one.published_kn, Some(240.5));
        assert!(case_one.difference_pct.unwrap().abs() < 5.0);
        assert_relative_eq!(case_one.experimental_average_kn.unwrap(), 656.2 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_buckling_compared_with_reference() {
        let report = Report::build(&reference_study().unwrap());
        let case_one = &report.rows[0];
        assert_eq!(case_one.published_buckling_kn, Some(123.5));
        assert_relative_eq!(case_one.experimental_buckling_kn.unwrap(), 443.0 / 3.0, max_relative = 1e-12);

        let p_b = case_one.result.initial_buckling_load.value();
        assert_relative_eq!(
            case_one.buckling_difference_pct.unwrap(),
            (p_b - 123.5) / 123.5 * 100.0,
            max_relative = 1e-12
        );
        // Skin buckling ignores the rotational restraint of the stringer feet
        for row in &report.rows {
            assert!(row.buckling_difference_pct.unwrap() < 0.0, "{}", row.case_id);
        }
    }

    #[test]
    fn test_failing_case_is_skipped() {
        let mut study = reference_study().unwrap();
        study.cases[1].config.geometry.stringer_pitch_mm = 0.0;

        let report = Report::build(&study);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].case_id, "Case II");
        assert_eq!(report.failures[0].code, "INVALID_GEOMETRY");
        assert!(report.rows.iter().all(|r| r.case_id != "Case II"));
    }

    #[test]
    fn test_table_layout() {
        let report = Report::build(&reference_study().unwrap());
        let table = report.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 * (2 + 5) + 1);

        assert!(lines[0].contains("BUCKLING"));
        assert!(lines[1].starts_with("Case"));
        assert!(lines[2].starts_with("Case I "));
        assert!(lines[2].contains("123.5"));

        assert!(lines[7].is_empty());
        assert!(lines[8].contains("COLLAPSE"));
        assert!(lines[10].starts_with("Case I "));
        assert!(lines[10].contains("240.5"));
    }

    #[test]
    fn test_missing_reference_shows_dash() {
        let mut study = reference_study().unwrap();
        study.cases.truncate(1);
        study.cases[0].reference = None;
        let report = Report::build(&study);
        assert_eq!(report.rows[0].difference_pct, None);
        assert_eq!(report.rows[0].buckling_difference_pct, None);
        let table = report.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].contains(" - "));
        assert!(lines[6].contains(" - "));
    }
}
