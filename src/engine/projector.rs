use serde::{Deserialize, Serialize};

use crate::types::{CameraState, Projection, TerminalSize};

/// Camera model: two-axis rotation followed by a perspective divide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projector {
    pub camera_distance: f32,
    /// Zoom `K1` per terminal row, so the surface scales with the window.
    pub zoom_per_row: f32,
    /// Horizontal stretch compensating for cells being about twice as tall as wide.
    pub aspect: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Projector {
            camera_distance: 60.0,
            zoom_per_row: 2.0,
            aspect: 2.0,
        }
    }
}

impl Projector {
    /// Fix angles and screen size for one frame.
    pub fn frame(&self, camera: &CameraState, size: TerminalSize) -> FrameProjector {
        let (sin_a, cos_a) = camera.a.sin_cos();
        let (sin_b, cos_b) = camera.b.sin_cos();
        FrameProjector {
            sin_a,
            cos_a,
            sin_b,
            cos_b,
            k1: size.rows as f32 * self.zoom_per_row,
            center_x: (size.cols / 2) as f32,
            center_y: (size.rows / 2) as f32,
            camera_distance: self.camera_distance,
            aspect: self.aspect,
            size,
        }
    }
}

/// A projector with the trigonometry for the current angles already done.
#[derive(Debug, Clone, Copy)]
pub struct FrameProjector {
    sin_a: f32,
    cos_a: f32,
    sin_b: f32,
    cos_b: f32,
    k1: f32,
    center_x: f32,
    center_y: f32,
    camera_distance: f32,
    aspect: f32,
    size: TerminalSize,
}

impl FrameProjector {
    /// Rotate `(y, z)` by A, then `(x, y')` by B, and divide by depth.
    ///
    /// Returns `None` for points behind the camera or outside the screen.
    pub fn project(&self, x: f32, y: f32, z: f32) -> Option<Projection> {
        let y1 = y * self.cos_a - z * self.sin_a;
        let z1 = y * self.sin_a + z * self.cos_a;
        let x2 = x * self.cos_b - y1 * self.sin_b;
        let y2 = x * self.sin_b + y1 * self.cos_b;
        let z2 = z1;

        let distance = z2 + self.camera_distance;
        if distance <= 0.0 {
            return None;
        }
        let ooz = distance.recip();

        let sx = (self.center_x + self.k1 * ooz * x2 * self.aspect).floor();
        let sy = (self.center_y - self.k1 * ooz * y2).floor();

        if sx < 0.0 || sy < 0.0 || sx >= self.size.cols as f32 || sy >= self.size.rows as f32 {
            return None;
        }

        Some(Projection {
            col: sx as u16,
            row: sy as u16,
            depth: ooz,
        })
    }
}
