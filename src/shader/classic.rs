use serde::{Deserialize, Serialize};

use crate::engine::StepPolicy;
use crate::types::{Glyph, Rgb, SurfaceSample};

use super::{ColorBand, GlyphRamp, HeightRamp, Shade, shadow, specular};

/// Dark slate through cyan to pink, with a white specular sheen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassicGradient {
    pub bands: HeightRamp,
    pub ramp: GlyphRamp,
    pub ambient: f32,
    pub shadow_floor: f32,
    pub specular_threshold: f32,
    pub highlight: Rgb,
    pub step: StepPolicy,
}

impl Default for ClassicGradient {
    fn default() -> Self {
        let slate = Rgb::new(30, 30, 46);
        let cyan = Rgb::new(137, 220, 235);
        let pink = Rgb::new(245, 194, 231);
        let white = Rgb::new(255, 255, 255);
        ClassicGradient {
            bands: HeightRamp::new(vec![
                ColorBand::new(0.0, 0.4, slate, cyan),
                ColorBand::new(0.4, 0.8, cyan, pink),
                ColorBand::new(0.8, 1.2, pink, white),
            ]),
            ramp: GlyphRamp::new(".,-~:;=!*#$@"),
            ambient: 0.2,
            shadow_floor: 0.3,
            specular_threshold: 0.95,
            highlight: white,
            step: StepPolicy::default(),
        }
    }
}

impl Shade for ClassicGradient {
    fn shade(&self, sample: &SurfaceSample) -> Glyph {
        let base = self.bands.color_at(sample.height);
        let color = if sample.light > self.specular_threshold {
            specular(base, self.highlight, sample.light, self.specular_threshold)
        } else {
            shadow(base, sample.light, [self.shadow_floor; 3])
        };
        Glyph {
            ch: self.ramp.pick(sample.light),
            color: Rgb::from_channels(color),
        }
    }

    fn ambient(&self) -> f32 {
        self.ambient
    }

    fn step_policy(&self) -> StepPolicy {
        self.step
    }
}
