use serde::{Deserialize, Serialize};

/// Exponent magnitude past which `exp(-x)` is 0 in f32 (the smallest
/// subnormal is about `exp(-103.3)`), with headroom for rounding.
const UNDERFLOW_EXPONENT: f32 = 110.0;

/// Two broad bumps centred on `(focus, focus)` and `(-focus, -focus)`, each
/// topped by a narrow secondary peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Surface {
    pub focus: f32,
    pub broad_divisor: f32,
    pub narrow_weight: f32,
    /// Return 0 without evaluating exponentials once every term has
    /// underflowed. The threshold follows `broad_divisor`, so the shortcut
    /// never changes the result.
    pub early_exit: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Surface {
            focus: 4.0,
            broad_divisor: 1000.0,
            narrow_weight: 0.1,
            early_exit: true,
        }
    }
}

impl Surface {
    pub fn height(&self, x: f32, y: f32) -> f32 {
        let c = self.focus;
        let r1_sq = (x - c) * (x - c) + (y - c) * (y - c);
        let r2_sq = (x + c) * (x + c) + (y + c) * (y + c);
        let r1_quad = r1_sq * r1_sq;
        let r2_quad = r2_sq * r2_sq;

        if let Some(limit) = self.underflow_quad() {
            if r1_quad > limit && r2_quad > limit {
                return 0.0;
            }
        }

        // Pairwise sums keep the result bit-identical under (x, y) -> (-x, -y).
        let broad = (-r1_quad / self.broad_divisor).exp() + (-r2_quad / self.broad_divisor).exp();
        let narrow = (-r1_quad).exp() + (-r2_quad).exp();
        broad + self.narrow_weight * narrow
    }

    /// Fourth power of the radius past which both the broad term
    /// (`r^4 / broad_divisor`) and the narrow term (`r^4`) underflow.
    fn underflow_quad(&self) -> Option<f32> {
        (self.early_exit && self.broad_divisor > 0.0)
            .then(|| UNDERFLOW_EXPONENT * self.broad_divisor.max(1.0))
    }
}
