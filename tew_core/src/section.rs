//! # Section Properties
//!
//! Thin-walled model of the skin-stringer column.
//!
//! The stringer is idealised as straight walls along their centrelines, each
//! with the stringer laminate thickness. Coordinates have their origin on the
//! web centreline at the skin/stringer interface (point A, the enforced axis),
//! with y pointing away from the skin:
//!
//! ```text
//!            (0, t+h+t/2) ───────── (b_fl, t+h+t/2)   flange (J-form)
//!                 │
//!                 │ web, x = 0
//!                 │
//!  (-f/2, t/2) ───┼─── (f/2, t/2)                      foot
//!  ═══════════════A═══════════════  y = 0              skin interface
//!          skin strip at y = -t_s/2, width w
//! ```
//!
//! Rigidities are modulus weighted (E·A, E·I, ...) because skin and stringer
//! are different laminates. The skin strip translates with the column but does
//! not rotate: it contributes to the axial and flexural terms only.

use serde::{Deserialize, Serialize};

use crate::geometry::StringerProfile;
use crate::materials::LaminateStiffness;

/// One straight wall of the stringer.
///
/// Every wall starts on the web centreline, which passes through the pole A,
/// so the sectorial coordinate is zero at every wall start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    /// Centreline start point (x, y) in mm
    pub start: (f64, f64),
    /// Centreline end point (x, y) in mm
    pub end: (f64, f64),
    /// Wall thickness (mm)
    pub thickness_mm: f64,
}

impl Wall {
    fn new(start: (f64, f64), end: (f64, f64), thickness_mm: f64) -> Self {
        Wall {
            start,
            end,
            thickness_mm,
        }
    }

    /// Centreline length (mm)
    pub fn length_mm(&self) -> f64 {
        (self.end.0 - self.start.0).hypot(self.end.1 - self.start.1)
    }

    /// Wall area (mm²)
    pub fn area_mm2(&self) -> f64 {
        self.length_mm() * self.thickness_mm
    }

    /// Centroid (x, y) in mm
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }

    /// Direction cosines (cos, sin) of the centreline
    fn direction(&self) -> (f64, f64) {
        let len = self.length_mm();
        ((self.end.0 - self.start.0) / len, (self.end.1 - self.start.1) / len)
    }

    /// Second moment about the wall's own horizontal centroidal axis (mm⁴)
    fn own_ixx(&self) -> f64 {
        let (c, s) = self.direction();
        let (l, t) = (self.length_mm(), self.thickness_mm);
        l.powi(3) * t / 12.0 * s * s + l * t.powi(3) / 12.0 * c * c
    }

    /// Second moment about the wall's own vertical centroidal axis (mm⁴)
    fn own_iyy(&self) -> f64 {
        let (c, s) = self.direction();
        let (l, t) = (self.length_mm(), self.thickness_mm);
        l.powi(3) * t / 12.0 * c * c + l * t.powi(3) / 12.0 * s * s
    }

    /// Sectorial coordinate at (start, end) about the pole at the origin
    fn sectorial(&self) -> (f64, f64) {
        let (x1, y1) = self.start;
        let (dx, dy) = (self.end.0 - x1, self.end.1 - y1);
        (0.0, x1 * dy - y1 * dx)
    }

    /// St. Venant torsion constant of an open thin wall, L·t³/3 (mm⁴)
    fn torsion_constant(&self) -> f64 {
        self.length_mm() * self.thickness_mm.powi(3) / 3.0
    }
}

/// Integral over a wall of the product of two linearly varying quantities.
fn linear_product(area: f64, (f1, f2): (f64, f64), (g1, g2): (f64, f64)) -> f64 {
    area * ((f1 * g1 + f2 * g2) / 3.0 + (f1 * g2 + f2 * g1) / 6.0)
}

/// Geometric properties of the bare stringer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StringerSectionProperties {
    /// Cross-sectional area (mm²)
    pub area_mm2: f64,
    /// Centroid offset from the web centreline (mm)
    pub centroid_x_mm: f64,
    /// Centroid height above the skin interface (mm)
    pub centroid_y_mm: f64,
    /// Second moment about the horizontal centroidal axis (mm⁴)
    pub second_moment_mm4: f64,
}

/// Stringer walls with the stringer laminate's engineering moduli.
#[derive(Debug, Clone, PartialEq)]
pub struct StringerSection {
    /// Walls, each starting on the web centreline
    pub walls: Vec<Wall>,
    /// Axial modulus of the stringer laminate (MPa)
    pub e_mpa: f64,
    /// Shear modulus of the stringer laminate (MPa)
    pub g_mpa: f64,
}

impl StringerSection {
    /// Build the wall model of a profile.
    pub fn new(profile: &StringerProfile, laminate: &LaminateStiffness) -> Self {
        let t = laminate.thickness_mm;
        let h = profile.web_height_mm();
        let half_foot = profile.foot_width_mm() / 2.0;

        let mut walls = vec![
            Wall::new((0.0, t / 2.0), (-half_foot, t / 2.0), t),
            Wall::new((0.0, t / 2.0), (half_foot, t / 2.0), t),
            Wall::new((0.0, t), (0.0, t + h), t),
        ];
        if let StringerProfile::JForm { flange_width_mm, .. } = *profile {
            let y_flange = t + h + t / 2.0;
            walls.push(Wall::new((0.0, y_flange), (flange_width_mm, y_flange), t));
        }

        StringerSection {
            walls,
            e_mpa: laminate.ex_mpa,
            g_mpa: laminate.gxy_mpa,
        }
    }

    /// Area, centroid and second moment of the bare stringer.
    pub fn properties(&self) -> StringerSectionProperties {
        let area: f64 = self.walls.iter().map(Wall::area_mm2).sum();
        let (mut qx, mut qy) = (0.0, 0.0);
        for wall in &self.walls {
            let (xm, ym) = wall.centroid();
            qx += wall.area_mm2() * xm;
            qy += wall.area_mm2() * ym;
        }
        let (xc, yc) = (qx / area, qy / area);
        let second_moment = self
            .walls
            .iter()
            .map(|w| w.own_ixx() + w.area_mm2() * (w.centroid().1 - yc).powi(2))
            .sum();

        StringerSectionProperties {
            area_mm2: area,
            centroid_x_mm: xc,
            centroid_y_mm: yc,
            second_moment_mm4: second_moment,
        }
    }

    /// Axial rigidity of the stringer alone, E·A (N)
    pub fn axial_rigidity(&self) -> f64 {
        self.e_mpa * self.walls.iter().map(Wall::area_mm2).sum::<f64>()
    }

    /// Full set of column rigidities with an effective skin strip attached.
    pub fn rigidities(&self, skin: &SkinStrip) -> ColumnRigidities {
        let e = self.e_mpa;
        let section = EffectiveSection::new(self, skin);
        let yc = section.neutral_axis_mm;

        let mut warping_sum = 0.0;
        let mut warping_sq = 0.0;
        let mut warping_flexural = 0.0;
        let mut first_moment_x = 0.0;
        let mut polar = 0.0;
        let mut torsional = 0.0;

        for wall in &self.walls {
            let a = wall.area_mm2();
            let omega = wall.sectorial();
            let xs = (wall.start.0, wall.end.0);
            let ys = (wall.start.1, wall.end.1);
            let (xm, _) = wall.centroid();

            warping_sum += e * a * (omega.0 + omega.1) / 2.0;
            warping_sq += e * linear_product(a, omega, omega);
            warping_flexural += e * linear_product(a, omega, (ys.0 - yc, ys.1 - yc));
            first_moment_x += e * a * xm;
            polar += e * (linear_product(a, xs, xs) + linear_product(a, ys, ys));
            polar += e * (wall.own_ixx() + wall.own_iyy()
                - a * ((xs.1 - xs.0).powi(2) + (ys.1 - ys.0).powi(2)) / 12.0);
            torsional += self.g_mpa * wall.torsion_constant();
        }

        ColumnRigidities {
            axial: section.axial_rigidity,
            flexural: section.flexural_rigidity,
            torsional,
            warping: warping_sq - warping_sum * warping_sum / section.axial_rigidity,
            warping_flexural,
            first_moment_x,
            polar_about_axis: polar,
        }
    }
}

/// Effective strip of skin acting with one stringer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkinStrip {
    /// Effective width (mm)
    pub width_mm: f64,
    /// Skin thickness (mm)
    pub thickness_mm: f64,
    /// Skin membrane modulus (MPa)
    pub e_mpa: f64,
}

impl SkinStrip {
    /// Axial rigidity of the strip, E·w·t (N)
    pub fn axial_rigidity(&self) -> f64 {
        self.e_mpa * self.width_mm * self.thickness_mm
    }
}

/// Axial and flexural properties of the skin-stringer column at one
/// effective-width estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSection {
    /// Effective skin width (mm)
    pub effective_width_mm: f64,
    /// Combined E·A (N)
    pub axial_rigidity: f64,
    /// Height of the modulus-weighted neutral axis above the skin interface (mm)
    pub neutral_axis_mm: f64,
    /// Combined E·I about the neutral axis (N·mm²)
    pub flexural_rigidity: f64,
}

impl EffectiveSection {
    /// Combine a stringer with a skin strip.
    pub fn new(stringer: &StringerSection, skin: &SkinStrip) -> Self {
        let e = stringer.e_mpa;
        let skin_ea = skin.axial_rigidity();
        let skin_y = -skin.thickness_mm / 2.0;

        let mut ea = skin_ea;
        let mut eq = skin_ea * skin_y;
        for wall in &stringer.walls {
            ea += e * wall.area_mm2();
            eq += e * wall.area_mm2() * wall.centroid().1;
        }
        let yc = eq / ea;

        let mut ei = skin.e_mpa * skin.width_mm * skin.thickness_mm.powi(3) / 12.0 + skin_ea * (skin_y - yc).powi(2);
        for wall in &stringer.walls {
            ei += e * (wall.own_ixx() + wall.area_mm2() * (wall.centroid().1 - yc).powi(2));
        }

        EffectiveSection {
            effective_width_mm: skin.width_mm,
            axial_rigidity: ea,
            neutral_axis_mm: yc,
            flexural_rigidity: ei,
        }
    }
}

/// Rigidities entering the column stability problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnRigidities {
    /// E·A of skin strip plus stringer (N)
    pub axial: f64,
    /// E·I about the combined neutral axis (N·mm²)
    pub flexural: f64,
    /// G·J of the stringer walls (N·mm²)
    pub torsional: f64,
    /// Warping rigidity E·Γ about the enforced axis (N·mm⁴)
    pub warping: f64,
    /// Sectorial product E·∫ω(y - y_c)dA coupling bending and twist (N·mm³)
    pub warping_flexural: f64,
    /// First moment E·∫x dA of the stringer about the web plane (N·mm)
    pub first_moment_x: f64,
    /// Polar moment E·∫(x² + y²) dA of the stringer about the enforced axis (N·mm²)
    pub polar_about_axis: f64,
}
