use serde::{Deserialize, Serialize};

/// Sampling step as a function of output height: taller terminals need a
/// finer step to avoid gaps, bounded to keep CPU cost in check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepPolicy {
    pub scale: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for StepPolicy {
    fn default() -> Self {
        StepPolicy {
            scale: 6.0,
            min: 0.05,
            max: 0.1,
        }
    }
}

impl StepPolicy {
    pub fn step_for_rows(&self, rows: u16) -> f32 {
        (self.scale / rows.max(1) as f32).clamp(self.min, self.max)
    }
}

/// The square sweep `[-half, half) x [-half, half)`.
///
/// Coordinates are derived from integer indices, so there is no drift
/// from repeatedly adding the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    half_extent: f32,
    step: f32,
    count: usize,
}

impl SampleGrid {
    pub fn new(half_extent: f32, step: f32) -> Self {
        let mut grid = SampleGrid {
            half_extent,
            step,
            count: 0,
        };
        if step > 0.0 && half_extent > 0.0 {
            grid.count = (2.0 * half_extent / step).ceil() as usize;
            // The division may round up past the open edge.
            while grid.count > 0 && grid.coordinate(grid.count - 1) >= half_extent {
                grid.count -= 1;
            }
        }
        grid
    }

    /// Samples per axis.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn coordinate(&self, index: usize) -> f32 {
        -self.half_extent + index as f32 * self.step
    }

    pub fn coordinates(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count).map(|i| self.coordinate(i))
    }

    /// Every `(x, y)` sample, row-major in `x`.
    pub fn samples(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.coordinates()
            .flat_map(move |x| self.coordinates().map(move |y| (x, y)))
    }
}
