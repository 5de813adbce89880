use serde::{Deserialize, Serialize};

use super::field::Surface;

/// Directional key light shading via finite-difference normals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub epsilon: f32,
    pub direction: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        // Upper-left, raised.
        Lighting {
            epsilon: 0.05,
            direction: [-0.5, -0.5, 1.0],
        }
    }
}

impl Lighting {
    /// Light intensity at `(x, y)` remapped into `[ambient, 1]`.
    ///
    /// The normal is `(-dh/dx, -dh/dy, 1)` from forward differences. Both the
    /// normal and the light direction are normalised before the cosine is
    /// taken; back-facing cosines clamp to zero, leaving the ambient floor.
    pub fn intensity(&self, surface: &Surface, x: f32, y: f32, ambient: f32) -> f32 {
        let eps = self.epsilon;
        let h0 = surface.height(x, y);
        let nx = -(surface.height(x + eps, y) - h0) / eps;
        let ny = -(surface.height(x, y + eps) - h0) / eps;
        let nz = 1.0;

        let [lx, ly, lz] = self.direction;
        let dot = nx * lx + ny * ly + nz * lz;
        let len_n = (nx * nx + ny * ny + nz * nz).sqrt();
        let len_l = (lx * lx + ly * ly + lz * lz).sqrt();

        let cosine = (dot / (len_n * len_l)).max(0.0);
        ambient + (1.0 - ambient) * cosine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ground_sees_the_light_at_its_elevation() {
        let lighting = Lighting::default();
        let surface = Surface::default();
        // Far from both bumps the normal is straight up.
        let expected = 0.2 + 0.8 * (1.0 / 1.5f32.sqrt());
        let got = lighting.intensity(&surface, -14.0, 14.0, 0.2);
        assert!((got - expected).abs() < 1e-5, "got {got}, expected {expected}");
    }

    #[test]
    fn slope_facing_the_light_is_brighter_than_slope_facing_away() {
        let lighting = Lighting::default();
        let surface = Surface::default();
        // Light comes from -x/-y, so the lower-left flank of the (4, 4) bump faces it.
        let lit = lighting.intensity(&surface, 1.5, 1.5, 0.2);
        let shaded = lighting.intensity(&surface, 6.5, 6.5, 0.2);
        assert!(lit > shaded, "lit {lit} <= shaded {shaded}");
    }

    #[test]
    fn stays_within_ambient_range() {
        let lighting = Lighting::default();
        let surface = Surface::default();
        for i in -20..20 {
            for j in -20..20 {
                let v = lighting.intensity(&surface, i as f32 * 0.7, j as f32 * 0.7, 0.3);
                assert!((0.3..=1.0 + 1e-6).contains(&v), "intensity {v} out of range");
            }
        }
    }
}
