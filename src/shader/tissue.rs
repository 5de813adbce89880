use serde::{Deserialize, Serialize};

use crate::engine::StepPolicy;
use crate::types::{Glyph, Rgb, SurfaceSample};

use super::{ColorBand, GlyphRamp, HeightRamp, Shade, shadow, specular};

/// Skin tones from deep crease to pale crest.
///
/// Shadows keep more red than green or blue, so occluded flanks read as
/// warm flesh rather than grey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnatomicalTissue {
    pub bands: HeightRamp,
    pub ramp: GlyphRamp,
    pub ambient: f32,
    /// Per-channel shadow floors (r, g, b).
    pub shadow_floors: [f32; 3],
    pub specular_threshold: f32,
    pub highlight: Rgb,
    pub step: StepPolicy,
}

impl Default for AnatomicalTissue {
    fn default() -> Self {
        let crease = Rgb::new(92, 22, 30);
        let flesh = Rgb::new(190, 90, 80);
        let rose = Rgb::new(232, 158, 140);
        let pale = Rgb::new(255, 214, 200);
        AnatomicalTissue {
            bands: HeightRamp::new(vec![
                ColorBand::new(0.0, 0.35, crease, flesh),
                ColorBand::new(0.35, 0.7, flesh, rose),
                ColorBand::new(0.7, 1.1, rose, pale),
            ]),
            ramp: GlyphRamp::new(".:-=+*#%@"),
            ambient: 0.3,
            shadow_floors: [0.45, 0.25, 0.3],
            specular_threshold: 0.92,
            highlight: Rgb::new(255, 246, 240),
            step: StepPolicy {
                scale: 5.0,
                min: 0.04,
                max: 0.1,
            },
        }
    }
}

impl Shade for AnatomicalTissue {
    fn shade(&self, sample: &SurfaceSample) -> Glyph {
        let base = self.bands.color_at(sample.height);
        let color = if sample.light > self.specular_threshold {
            specular(base, self.highlight, sample.light, self.specular_threshold)
        } else {
            shadow(base, sample.light, self.shadow_floors)
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
