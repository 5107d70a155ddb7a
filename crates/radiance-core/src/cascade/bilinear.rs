//! Bilinear lookup over a probe grid
//!
//! Taps that fall outside the grid get no weight and the remaining weights are
//! renormalized, so edge probes draw only from the neighbors that exist.

use glam::{UVec2, Vec2, Vec4};

const OFFSETS: [UVec2; 4] = [
    UVec2::new(0, 0),
    UVec2::new(1, 0),
    UVec2::new(0, 1),
    UVec2::new(1, 1),
];

/// Up to four in-bounds grid cells surrounding a continuous grid coordinate
#[derive(Debug, Clone, Copy)]
pub(crate) struct BilinearTaps {
    taps: [(UVec2, f32); 4],
    len: usize,
    total_weight: f32,
}

impl BilinearTaps {
    pub fn new(coord: Vec2, count: UVec2) -> Self {
        let base = coord.floor();
        let frac = coord - base;
        let weights = [
            (1.0 - frac.x) * (1.0 - frac.y),
            frac.x * (1.0 - frac.y),
            (1.0 - frac.x) * frac.y,
            frac.x * frac.y,
        ];

        let mut taps = [(UVec2::ZERO, 0.0); 4];
        let mut len = 0;
        let mut total_weight = 0.0;
        for (offset, weight) in OFFSETS.iter().zip(weights) {
            let cell = base + offset.as_vec2();
            if cell.x < 0.0 || cell.y < 0.0 {
                continue;
            }
            let cell = cell.as_uvec2();
            if cell.x >= count.x || cell.y >= count.y {
                continue;
            }
            taps[len] = (cell, weight);
            len += 1;
            total_weight += weight;
        }

        Self {
            taps,
            len,
            total_weight,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (UVec2, f32)> + '_ {
        self.taps[..self.len].iter().copied()
    }

    /// Weighted average of `fetch` over the taps, `None` when no tap has weight
    pub fn blend(&self, mut fetch: impl FnMut(UVec2) -> Vec4) -> Option<Vec4> {
        if self.total_weight <= 0.0 {
            return None;
        }
        let sum: Vec4 = self
            .iter()
            .filter(|&(_, w)| w > 0.0)
            .map(|(cell, w)| fetch(cell) * w)
            .sum();
        Some(sum / self.total_weight)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use approx::assert_relative_eq;

    fn cell_value(cell: UVec2) -> Vec4 {
        Vec4::new(cell.x as f32, cell.y as f32, 1.0, 0.0)
    }

    #[test]
    fn exact_cell_collapses_to_that_cell() {
        let taps = BilinearTaps::new(Vec2::new(2.0, 1.0), UVec2::new(4, 4));
        let v = taps.blend(cell_value).unwrap();
        assert_eq!(v, cell_value(UVec2::new(2, 1)));
    }

    #[test]
    fn interior_blend_is_bilinear() {
        let taps = BilinearTaps::new(Vec2::new(1.25, 2.5), UVec2::new(4, 4));
        assert_eq!(taps.iter().count(), 4);
        let v = taps.blend(cell_value).unwrap();
        assert_relative_eq!(v.x, 1.25, epsilon = 1e-6);
        assert_relative_eq!(v.y, 2.5, epsilon = 1e-6);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn edge_renormalizes_over_existing_neighbors() {
        // Half a cell before the first column: only column 0 exists
        let taps = BilinearTaps::new(Vec2::new(-0.5, 0.0), UVec2::new(4, 4));
        assert_eq!(taps.iter().count(), 2);
        let v = taps.blend(|_| Vec4::splat(3.0)).unwrap();
        assert_relative_eq!(v.x, 3.0, epsilon = 1e-6);

        let taps = BilinearTaps::new(Vec2::new(3.5, 3.5), UVec2::new(4, 4));
        assert_eq!(taps.iter().count(), 1);
        assert_eq!(taps.blend(cell_value).unwrap(), cell_value(UVec2::new(3, 3)));
    }

    #[test]
    fn far_outside_has_no_taps() {
        let taps = BilinearTaps::new(Vec2::new(-5.0, 10.0), UVec2::new(4, 4));
        assert!(taps.blend(cell_value).is_none());
    }
}
