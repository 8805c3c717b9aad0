//! Formation geometry.
//!
//! Offsets are closed-form functions of roster index, roster size, spacing
//! and the leader's basis vectors; they are relative to the leader position.

use glam::Vec3;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FormationType {
    /// Offensive movement.
    #[default]
    Wedge,
    /// Defensive line abreast.
    Line,
    /// Single file for narrow spaces.
    Column,
    /// All-around defense.
    Diamond,
    /// Flanking diagonal.
    Echelon,
}

/// Diamond slot directions as (right, forward) multipliers, repeated in rings.
const DIAMOND_SLOTS: [(f32, f32); 4] = [(1.0, 0.0), (-1.0, 0.0), (0.0, -1.0), (0.0, 1.0)];

impl FormationType {
    /// Offset of member `index` out of `count`.
    pub fn offset(self, index: usize, count: usize, spacing: f32, forward: Vec3, right: Vec3) -> Vec3 {
        let s = spacing;
        match self {
            FormationType::Wedge => match index {
                0 => forward * s + right * s,
                1 => forward * s - right * s,
                2 => forward * s * 2.0,
                3 => forward * s * 2.0 + right * s * 2.0,
                _ => {
                    let depth = (index / 2) as f32;
                    let side = if index % 2 == 0 { 1.0 } else { -1.0 };
                    forward * s * depth + right * s * side
                }
            },
            FormationType::Line => {
                let centered = index as f32 - (count.saturating_sub(1)) as f32 / 2.0;
                right * centered * s
            }
            FormationType::Column => -forward * s * (index + 1) as f32,
            FormationType::Diamond => {
                let (r, f) = DIAMOND_SLOTS[index % 4];
                let ring = (index / 4 + 1) as f32;
                (right * r + forward * f) * s * ring
            }
            FormationType::Echelon => (right * s - forward * s) * (index + 1) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: Vec3 = Vec3::Z;
    const R: Vec3 = Vec3::X;

    #[test]
    fn wedge_first_slots() {
        let w = FormationType::Wedge;
        assert_eq!(w.offset(0, 3, 3.0, F, R), Vec3::new(3.0, 0.0, 3.0));
        assert_eq!(w.offset(1, 3, 3.0, F, R), Vec3::new(-3.0, 0.0, 3.0));
        assert_eq!(w.offset(2, 3, 3.0, F, R), Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(w.offset(3, 5, 3.0, F, R), Vec3::new(6.0, 0.0, 6.0));
    }

    #[test]
    fn wedge_tail_uses_integer_depth() {
        let w = FormationType::Wedge;
        assert_eq!(w.offset(4, 6, 3.0, F, R), Vec3::new(3.0, 0.0, 6.0));
        assert_eq!(w.offset(5, 6, 3.0, F, R), Vec3::new(-3.0, 0.0, 6.0));
    }

    #[test]
    fn line_is_centered_on_leader() {
        let l = FormationType::Line;
        assert_eq!(l.offset(0, 3, 2.0, F, R), Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(l.offset(1, 3, 2.0, F, R), Vec3::ZERO);
        assert_eq!(l.offset(2, 3, 2.0, F, R), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(l.offset(0, 2, 2.0, F, R), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn column_trails_behind() {
        let c = FormationType::Column;
        assert_eq!(c.offset(0, 2, 3.0, F, R), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(c.offset(1, 2, 3.0, F, R), Vec3::new(0.0, 0.0, -6.0));
    }

    #[test]
    fn diamond_rings_expand() {
        let d = FormationType::Diamond;
        assert_eq!(d.offset(0, 5, 3.0, F, R), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(d.offset(2, 5, 3.0, F, R), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(d.offset(3, 5, 3.0, F, R), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(d.offset(4, 5, 3.0, F, R), Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn echelon_steps_back_and_right() {
        let e = FormationType::Echelon;
        assert_eq!(e.offset(1, 2, 1.0, F, R), Vec3::new(2.0, 0.0, -2.0));
    }
}
