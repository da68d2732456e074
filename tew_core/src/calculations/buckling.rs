//! # Initial Skin Buckling
//!
//! Local buckling of the skin bays between stringers. A bay is treated as a
//! long orthotropic plate of width equal to the stringer pitch, raised by the
//! curvature of the panel through the Redshaw interaction with the
//! Kanemitsu–Nojima cylinder stress.
//!
//! Up to buckling the skin and stringers share a uniform strain, so the
//! panel load at first buckling is the critical strain times the total axial
//! rigidity of all stringers plus the whole skin.
//!
//! ## Example
//!
//! ```rust,ignore
//! let p_b = initial_buckling_load(&config)?;
//! println!("Skin buckles at {:.1} kN", p_b.value());
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::PanelModel;
use crate::equations::{cylinder_critical_stress, flat_orthotropic_critical_stress, redshaw_interaction};
use crate::errors::TewResult;
use crate::panel::StiffenedPanelConfig;
use crate::units::{Kilonewtons, Megapascals, Newtons};

/// Skin buckling stresses and the corresponding panel load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkinBuckling {
    /// Flat orthotropic plate stress of one bay (MPa)
    pub flat_stress_mpa: f64,
    /// Kanemitsu–Nojima cylinder stress (MPa)
    pub cylinder_stress_mpa: f64,
    /// Redshaw-combined critical stress σ_cr (MPa)
    pub critical_stress_mpa: f64,
    /// Panel load at first skin buckling (N)
    pub load_n: f64,
}

impl SkinBuckling {
    /// Buckling stresses and load of a prepared panel.
    pub fn of(model: &PanelModel) -> Self {
        let geom = &model.config.geometry;
        let skin = &model.skin;
        let d = &skin.d;
        let t = skin.thickness_mm;

        let flat = flat_orthotropic_critical_stress(
            d[(0, 0)],
            d[(1, 1)],
            d[(0, 1)],
            d[(2, 2)],
            geom.stringer_pitch_mm,
            t,
        );
        let cylinder = cylinder_critical_stress(skin.ex_bending_mpa, t, geom.radius_mm, geom.free_length_mm);
        let critical = redshaw_interaction(flat, cylinder);

        let total_rigidity = model.stringer_count() * model.stringer.axial_rigidity()
            + skin.ex_mpa * t * geom.arc_length_mm;
        let load_n = critical / skin.ex_mpa * total_rigidity;

        debug!(
            "{}: sigma_flat = {:.2} MPa, sigma_cyl = {:.2} MPa, sigma_cr = {:.2} MPa, P_b = {:.1} kN",
            model.config.id,
            flat,
            cylinder,
            critical,
            load_n / 1000.0
        );

        SkinBuckling {
            flat_stress_mpa: flat,
            cylinder_stress_mpa: cylinder,
            critical_stress_mpa: critical,
            load_n,
        }
    }

    /// Panel load at first skin buckling
    pub fn load(&self) -> Kilonewtons {
        Newtons(self.load_n).into()
    }
}

/// Skin critical stress σ_cr of a configuration.
pub fn critical_stress(config: &StiffenedPanelConfig) -> TewResult<Megapascals> {
    let model = PanelModel::new(config)?;
    Ok(Megapascals(SkinBuckling::of(&model).critical_stress_mpa))
}

/// Panel load at which the skin first buckles.
pub fn initial_buckling_load(config: &StiffenedPanelConfig) -> TewResult<Kilonewtons> {
    let model = PanelModel::new(config)?;
    Ok(SkinBuckling::of(&model).load())
}
