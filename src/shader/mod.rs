//! Shading policies and their glyph/color primitives.
//!
//! Each policy lives in its own module with its struct definition and
//! `Shade` implementation side by side. The policy is chosen once at
//! startup and stays immutable for the life of the render loop.

mod classic;
mod depth_keyed;
mod tissue;

pub use classic::ClassicGradient;
pub use depth_keyed::DepthKeyedPalette;
pub use tissue::AnatomicalTissue;

use serde::{Deserialize, Serialize};

use crate::engine::StepPolicy;
use crate::types::{Glyph, Rgb, SurfaceSample};

/// Map one surface sample to the glyph shown in its cell.
pub trait Shade {
    fn shade(&self, sample: &SurfaceSample) -> Glyph;

    /// Floor of the lighting range `[ambient, 1]` this policy expects.
    fn ambient(&self) -> f32;

    fn step_policy(&self) -> StepPolicy;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShadingPolicy {
    ClassicGradient(ClassicGradient),
    AnatomicalTissue(AnatomicalTissue),
    DepthKeyedPalette(DepthKeyedPalette),
}

impl Default for ShadingPolicy {
    fn default() -> Self {
        ShadingPolicy::ClassicGradient(ClassicGradient::default())
    }
}

impl ShadingPolicy {
    pub const NAMES: [&'static str; 3] = ["classic", "tissue", "depth"];

    /// Look up a policy with default tuning by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(ShadingPolicy::ClassicGradient(ClassicGradient::default())),
            "tissue" => Some(ShadingPolicy::AnatomicalTissue(AnatomicalTissue::default())),
            "depth" => Some(ShadingPolicy::DepthKeyedPalette(DepthKeyedPalette::default())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShadingPolicy::ClassicGradient(_) => "classic",
            ShadingPolicy::AnatomicalTissue(_) => "tissue",
            ShadingPolicy::DepthKeyedPalette(_) => "depth",
        }
    }
}

impl Shade for ShadingPolicy {
    fn shade(&self, sample: &SurfaceSample) -> Glyph {
        match self {
            ShadingPolicy::ClassicGradient(p) => p.shade(sample),
            ShadingPolicy::AnatomicalTissue(p) => p.shade(sample),
            ShadingPolicy::DepthKeyedPalette(p) => p.shade(sample),
        }
    }

    fn ambient(&self) -> f32 {
        match self {
            ShadingPolicy::ClassicGradient(p) => p.ambient(),
            ShadingPolicy::AnatomicalTissue(p) => p.ambient(),
            ShadingPolicy::DepthKeyedPalette(p) => p.ambient(),
        }
    }

    fn step_policy(&self) -> StepPolicy {
        match self {
            ShadingPolicy::ClassicGradient(p) => p.step_policy(),
            ShadingPolicy::AnatomicalTissue(p) => p.step_policy(),
            ShadingPolicy::DepthKeyedPalette(p) => p.step_policy(),
        }
    }
}

// ---------------------------------------------------------------------------
// Glyph ramp
// ---------------------------------------------------------------------------

/// Ordered characters encoding a scalar in `[0, 1]` as visual density.
///
/// Whitespace is stripped: a space is reserved for untouched cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GlyphRamp {
    chars: Vec<char>,
}

impl GlyphRamp {
    pub fn new(chars: &str) -> Self {
        let chars: Vec<char> = chars.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            return GlyphRamp { chars: vec!['#'] };
        }
        GlyphRamp { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Index `trunc(t * (len - 1))`, clamped to the ramp.
    pub fn pick(&self, t: f32) -> char {
        let last = self.chars.len() - 1;
        let idx = (t * last as f32) as isize;
        self.chars[idx.clamp(0, last as isize) as usize]
    }
}

impl From<String> for GlyphRamp {
    fn from(s: String) -> Self {
        GlyphRamp::new(&s)
    }
}

impl From<GlyphRamp> for String {
    fn from(ramp: GlyphRamp) -> Self {
        ramp.chars.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Color helpers
// ---------------------------------------------------------------------------

/// One band of a piecewise-linear height gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub start: f32,
    pub end: f32,
    pub from: Rgb,
    pub to: Rgb,
}

impl ColorBand {
    pub const fn new(start: f32, end: f32, from: Rgb, to: Rgb) -> Self {
        ColorBand {
            start,
            end,
            from,
            to,
        }
    }
}

/// Contiguous height bands, ascending by `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeightRamp {
    bands: Vec<ColorBand>,
}

impl HeightRamp {
    pub fn new(bands: Vec<ColorBand>) -> Self {
        HeightRamp { bands }
    }

    /// Interpolated color for `height`. Heights below the first band use
    /// its start color; heights past the last band hold its end color.
    pub fn color_at(&self, height: f32) -> [f32; 3] {
        let Some(first) = self.bands.first() else {
            return [0.0; 3];
        };
        let band = self
            .bands
            .iter()
            .rev()
            .find(|b| height >= b.start)
            .unwrap_or(first);
        let span = band.end - band.start;
        let t = if span > 0.0 {
            ((height - band.start) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        lerp(band.from.channels(), band.to.channels(), t)
    }
}

/// Weighted so that `t == 1` returns `b` exactly.
pub(crate) fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let s = 1.0 - t;
    [a[0] * s + b[0] * t, a[1] * s + b[1] * t, a[2] * s + b[2] * t]
}

/// Light above `threshold` blends toward `highlight`, reaching it at full light.
pub(crate) fn specular(base: [f32; 3], highlight: Rgb, light: f32, threshold: f32) -> [f32; 3] {
    let spec = ((light - threshold) / (1.0 - threshold)).clamp(0.0, 1.0);
    lerp(base, highlight.channels(), spec)
}

/// Darken each channel by `floor + (1 - floor) * light`; unequal floors tint
/// the shadows.
pub(crate) fn shadow(base: [f32; 3], light: f32, floors: [f32; 3]) -> [f32; 3] {
    let mut out = base;
    for (c, floor) in out.iter_mut().zip(floors) {
        *c *= floor + (1.0 - floor) * light;
    }
    out
}
