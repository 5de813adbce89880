use serde::{Deserialize, Serialize};

use crate::engine::StepPolicy;
use crate::types::{Glyph, Rgb, SurfaceSample};

use super::{GlyphRamp, Shade};

/// Terrain coloring: a discrete palette keyed on height alone, glyphs keyed
/// on camera distance, and distance fog darkening far samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthKeyedPalette {
    /// Lowest to highest elevation.
    pub palette: Vec<Rgb>,
    /// Height mapped to the top palette entry.
    pub max_height: f32,
    /// Nearest to farthest.
    pub ramp: GlyphRamp,
    /// Camera distances spanned by the glyph ramp and the fog.
    pub near: f32,
    pub far: f32,
    /// Fraction of brightness lost at `far`.
    pub fog_strength: f32,
    pub ambient: f32,
    pub step: StepPolicy,
}

impl Default for DepthKeyedPalette {
    fn default() -> Self {
        DepthKeyedPalette {
            palette: vec![
                Rgb::new(20, 40, 90),
                Rgb::new(30, 70, 140),
                Rgb::new(40, 110, 170),
                Rgb::new(194, 178, 128),
                Rgb::new(120, 170, 80),
                Rgb::new(80, 145, 60),
                Rgb::new(50, 115, 45),
                Rgb::new(110, 100, 80),
                Rgb::new(140, 125, 105),
                Rgb::new(170, 160, 150),
                Rgb::new(215, 210, 205),
                Rgb::new(250, 250, 250),
            ],
            max_height: 1.1,
            ramp: GlyphRamp::new("@%#*+=-:."),
            near: 40.0,
            far: 80.0,
            fog_strength: 0.6,
            ambient: 0.25,
            step: StepPolicy {
                scale: 6.0,
                min: 0.06,
                max: 0.12,
            },
        }
    }
}

impl DepthKeyedPalette {
    fn base_color(&self, height: f32) -> Rgb {
        let Some(last) = self.palette.len().checked_sub(1) else {
            return Rgb::BLACK;
        };
        let idx = (height / self.max_height * self.palette.len() as f32) as isize;
        self.palette[idx.clamp(0, last as isize) as usize]
    }

    /// 0 at `near`, 1 at `far`.
    fn depth_t(&self, sample: &SurfaceSample) -> f32 {
        let span = self.far - self.near;
        if span <= 0.0 {
            return 0.0;
        }
        ((sample.distance() - self.near) / span).clamp(0.0, 1.0)
    }
}

impl Shade for DepthKeyedPalette {
    fn shade(&self, sample: &SurfaceSample) -> Glyph {
        let t = self.depth_t(sample);
        let fog = 1.0 - self.fog_strength * t;
        let [r, g, b] = self.base_color(sample.height).channels();
        Glyph {
            ch: self.ramp.pick(t),
            color: Rgb::from_channels([r * fog, g * fog, b * fog]),
        }
    }

    fn ambient(&self) -> f32 {
        self.ambient
    }

    fn step_policy(&self) -> StepPolicy {
        self.step
    }
}
