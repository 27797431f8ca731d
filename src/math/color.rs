//! sRGB and CIE L*a*b* conversions (D65 white point)
//!
//! Palette interpolation happens in L*a*b* so equal steps in position give
//! roughly equal steps in perceived color.

use crate::math::interpolation::{lerp, to_channel};

const WHITE_X: f64 = 0.950_47;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.088_83;

// 6/29, the knee of the L*a*b* transfer function
const DELTA: f64 = 6.0 / 29.0;

/// A color in CIE L*a*b* space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0 to 100
    pub l: f64,
    /// Green–red axis
    pub a: f64,
    /// Blue–yellow axis
    pub b: f64,
}

impl Lab {
    /// Convert an 8-bit sRGB color
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let [r8, g8, b8] = rgb;
        let r = srgb_to_linear(f64::from(r8) / 255.0);
        let g = srgb_to_linear(f64::from(g8) / 255.0);
        let b = srgb_to_linear(f64::from(b8) / 255.0);

        let x = 0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g));
        let y = 0.072_175_0f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g));
        let z = 0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192_0 * g));

        let fx = lab_forward(x / WHITE_X);
        let fy = lab_forward(y / WHITE_Y);
        let fz = lab_forward(z / WHITE_Z);

        Self {
            l: 116.0f64.mul_add(fy, -16.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Convert back to 8-bit sRGB, clamping out-of-gamut channels
    pub fn to_rgb(self) -> [u8; 3] {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let x = WHITE_X * lab_inverse(fx);
        let y = WHITE_Y * lab_inverse(fy);
        let z = WHITE_Z * lab_inverse(fz);

        let r = (-0.498_531_4f64).mul_add(z, 3.240_454_2f64.mul_add(x, -1.537_138_5 * y));
        let g = 0.041_556_0f64.mul_add(z, (-0.969_266_0f64).mul_add(x, 1.876_010_8 * y));
        let b = 1.057_225_2f64.mul_add(z, 0.055_643_4f64.mul_add(x, -0.204_025_9 * y));

        [
            to_channel(linear_to_srgb(r) * 255.0),
            to_channel(linear_to_srgb(g) * 255.0),
            to_channel(linear_to_srgb(b) * 255.0),
        ]
    }

    /// Interpolate component-wise towards `other`
    pub fn mix(self, other: Self, t: f64) -> Self {
        Self {
            l: lerp(self.l, other.l, t),
            a: lerp(self.a, other.a, t),
            b: lerp(self.b, other.b, t),
        }
    }
}

/// Decode a normalized sRGB channel to linear light
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode linear light as a normalized sRGB channel
pub fn linear_to_srgb(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

fn lab_forward(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_inverse(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}
