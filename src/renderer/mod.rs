//! Renderer — the z-buffer rasterizer.
//!
//! Sweeps the sampling grid, runs each sample through the engine and the
//! shading policy, and keeps the nearest sample per cell. The renderer
//! knows nothing about time or terminals: it fills `FrameBuffers` for the
//! camera angles and size it is handed.

pub mod encoder;

use log::trace;

use crate::config::RenderConfig;
use crate::engine::SampleGrid;
use crate::shader::Shade;
use crate::types::{CameraState, Glyph, Rgb, SurfaceSample, TerminalSize};

/// Depth of a cell no sample has reached this frame.
pub const EMPTY_DEPTH: f32 = 0.0;

/// Parallel per-cell depth, glyph and color arrays for one frame.
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    size: TerminalSize,
    depth: Vec<f32>,
    glyphs: Vec<char>,
    colors: Vec<Rgb>,
}

impl FrameBuffers {
    pub fn new(size: TerminalSize) -> Self {
        let area = size.area();
        FrameBuffers {
            size,
            depth: vec![EMPTY_DEPTH; area],
            glyphs: vec![Glyph::BACKGROUND.ch; area],
            colors: vec![Glyph::BACKGROUND.color; area],
        }
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    /// Reallocate for `size` if it differs from the current size.
    /// Returns whether a reallocation happened.
    pub fn resize(&mut self, size: TerminalSize) -> bool {
        if size == self.size {
            return false;
        }
        *self = FrameBuffers::new(size);
        true
    }

    /// Reset every cell to the background.
    pub fn clear(&mut self) {
        self.depth.fill(EMPTY_DEPTH);
        self.glyphs.fill(Glyph::BACKGROUND.ch);
        self.colors.fill(Glyph::BACKGROUND.color);
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.size.cols && row < self.size.rows)
            .then(|| row as usize * self.size.cols as usize + col as usize)
    }

    /// Write `glyph` at `(col, row)` if `depth` is nearer than what the cell
    /// holds. Out-of-bounds writes are dropped. Returns whether the cell changed.
    pub fn plot(&mut self, col: u16, row: u16, depth: f32, glyph: Glyph) -> bool {
        let Some(idx) = self.index(col, row) else {
            return false;
        };
        if depth <= self.depth[idx] {
            return false;
        }
        self.depth[idx] = depth;
        self.glyphs[idx] = glyph.ch;
        self.colors[idx] = glyph.color;
        true
    }

    pub fn depth_at(&self, col: u16, row: u16) -> Option<f32> {
        self.index(col, row).map(|i| self.depth[i])
    }

    pub fn glyph_at(&self, col: u16, row: u16) -> Option<Glyph> {
        self.index(col, row).map(|i| Glyph {
            ch: self.glyphs[i],
            color: self.colors[i],
        })
    }

    /// Cells in row-major order.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Glyph> + '_> + '_ {
        let cols = self.size.cols.max(1) as usize;
        self.glyphs
            .chunks(cols)
            .zip(self.colors.chunks(cols))
            .map(|(glyphs, colors)| {
                glyphs
                    .iter()
                    .zip(colors)
                    .map(|(&ch, &color)| Glyph { ch, color })
            })
    }

    pub fn is_blank(&self) -> bool {
        self.depth.iter().all(|&d| d == EMPTY_DEPTH)
            && self.glyphs.iter().all(|&c| c == Glyph::BACKGROUND.ch)
    }
}

pub struct Renderer;

impl Renderer {
    /// Rasterize the surface for `camera` into `buffers`.
    ///
    /// `buffers` must already be cleared; nearer samples win against what
    /// is there. Returns the number of winning writes.
    pub fn rasterize(
        config: &RenderConfig,
        camera: &CameraState,
        buffers: &mut FrameBuffers,
    ) -> usize {
        let size = buffers.size();
        let policy = &config.policy;
        let ambient = policy.ambient();
        let step = policy.step_policy().step_for_rows(size.rows);
        let grid = SampleGrid::new(config.domain, step);
        let frame = config.projector.frame(camera, size);

        let mut written = 0;
        for (x, y) in grid.samples() {
            let height = config.surface.height(x, y);
            let Some(p) = frame.project(x, y, height * config.height_scale) else {
                continue;
            };
            if p.depth <= buffers.depth_at(p.col, p.row).unwrap_or(f32::INFINITY) {
                continue;
            }
            let sample = SurfaceSample {
                height,
                light: config.lighting.intensity(&config.surface, x, y, ambient),
                depth: p.depth,
            };
            if buffers.plot(p.col, p.row, p.depth, policy.shade(&sample)) {
                written += 1;
            }
        }

        trace!(
            "rasterized {}x{} samples at step {step}: {written} writes",
            grid.count(),
            grid.count()
        );
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShadingPolicy;

    fn glyph(ch: char) -> Glyph {
        Glyph {
            ch,
            color: Rgb::new(1, 2, 3),
        }
    }

    #[test]
    fn nearest_sample_wins_regardless_of_order() {
        let mut a = FrameBuffers::new(TerminalSize::new(4, 4));
        assert!(a.plot(1, 1, 0.2, glyph('a')));
        assert!(a.plot(1, 1, 0.5, glyph('b')));
        assert!(!a.plot(1, 1, 0.3, glyph('c')));

        let mut b = FrameBuffers::new(TerminalSize::new(4, 4));
        b.plot(1, 1, 0.3, glyph('c'));
        b.plot(1, 1, 0.5, glyph('b'));
        b.plot(1, 1, 0.2, glyph('a'));

        assert_eq!(a.depth_at(1, 1), Some(0.5));
        assert_eq!(a.glyph_at(1, 1), b.glyph_at(1, 1));
        assert_eq!(a.glyph_at(1, 1).unwrap().ch, 'b');
    }

    #[test]
    fn out_of_bounds_plot_is_dropped() {
        let mut buffers = FrameBuffers::new(TerminalSize::new(3, 2));
        assert!(!buffers.plot(3, 0, 1.0, glyph('x')));
        assert!(!buffers.plot(0, 2, 1.0, glyph('x')));
        assert!(buffers.is_blank());
    }

    #[test]
    fn resize_only_reallocates_on_change() {
        let mut buffers = FrameBuffers::new(TerminalSize::new(3, 2));
        assert!(!buffers.resize(TerminalSize::new(3, 2)));
        buffers.plot(0, 0, 1.0, glyph('x'));
        assert!(buffers.resize(TerminalSize::new(5, 4)));
        assert_eq!(buffers.rows().count(), 4);
        assert!(buffers.is_blank());
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut buffers = FrameBuffers::new(TerminalSize::new(3, 2));
        buffers.plot(2, 1, 0.7, glyph('x'));
        buffers.clear();
        assert!(buffers.is_blank());
        assert_eq!(buffers.glyph_at(2, 1), Some(Glyph::BACKGROUND));
    }

    #[test]
    fn rasterize_draws_the_surface_around_the_center() {
        for name in ShadingPolicy::NAMES {
            let config = RenderConfig {
                policy: ShadingPolicy::from_name(name).unwrap(),
                ..RenderConfig::default()
            };
            let mut buffers = FrameBuffers::new(TerminalSize::new(40, 20));
            let written = Renderer::rasterize(&config, &CameraState::default(), &mut buffers);
            assert!(written > 0, "{name} wrote nothing");

            let center = buffers.glyph_at(20, 10).unwrap();
            assert!(!center.is_background(), "{name} left the center blank");
            assert!(buffers.depth_at(20, 10).unwrap() > EMPTY_DEPTH);
        }
    }
}
