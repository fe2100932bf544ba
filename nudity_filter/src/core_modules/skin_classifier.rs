// THEORY:
// The skin classifier answers one question per pixel: "could this be skin?"
// It is deliberately permissive. Five independent rules, each drawn from a
// different color space, are OR-ed together; any one of them is enough.
//
// 1.  RGB, uniform daylight: a warm, red-dominant pixel with enough spread.
// 2.  RGB, flash or lateral light: a very bright, low-contrast warm pixel.
// 3.  Normalized RGB: red/green share ratio plus two cross-product bounds.
// 4.  HSV: hue in the warm band (0°, 35°) at moderate saturation.
// 5.  YCbCr: the classic cb/cr skin box.
//
// Being generous at the pixel level is fine: isolated false positives are
// discarded later as noise regions, and the decision tree only looks at the
// shape statistics of large connected areas.

use crate::core_modules::color_space::color_space::{normalized_rgb, to_hsv, to_ycbcr};
use crate::core_modules::pixel::pixel::Pixel;

/// Which of the five rules matched a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinRules {
    pub uniform_daylight: bool,
    pub flash_lighting: bool,
    pub normalized_rgb: bool,
    pub hsv: bool,
    pub ycbcr: bool,
}

impl SkinRules {
    pub fn any(&self) -> bool {
        self.uniform_daylight || self.flash_lighting || self.normalized_rgb || self.hsv || self.ycbcr
    }

    /// The flags in rule order: daylight, flash, normalized RGB, HSV, YCbCr.
    pub fn as_array(&self) -> [bool; 5] {
        [
            self.uniform_daylight,
            self.flash_lighting,
            self.normalized_rgb,
            self.hsv,
            self.ycbcr,
        ]
    }
}

#[inline]
fn red_green_gap(pixel: &Pixel) -> i16 {
    (pixel.red as i16 - pixel.green as i16).abs()
}

/// RGB rule for skin under uniform daylight.
pub fn uniform_daylight_rule(pixel: &Pixel) -> bool {
    let Pixel { red, green, blue } = *pixel;
    red > 95
        && green > 40
        && blue > 20
        && pixel.max_channel() - pixel.min_channel() > 15
        && red_green_gap(pixel) > 15
        && red > green
        && red > blue
}

/// RGB rule for skin under flash or lateral daylight illumination.
pub fn flash_lighting_rule(pixel: &Pixel) -> bool {
    let Pixel { red, green, blue } = *pixel;
    red > 220
        && green > 210
        && blue > 170
        && red_green_gap(pixel) <= 15
        && red > blue
        && green > blue
}

pub fn normalized_rgb_rule(pixel: &Pixel) -> bool {
    let normalized = normalized_rgb(pixel);
    let red = pixel.red as f64;
    let green = pixel.green as f64;
    let blue = pixel.blue as f64;
    let sum_squared = (pixel.sum() as f64).powi(2);

    // A black pixel makes both products 0/0 = NaN, which fails the comparisons.
    normalized.red / normalized.green > 1.185
        && (red * blue) / sum_squared > 0.107
        && (red * green) / sum_squared > 0.112
}

pub fn hsv_rule(pixel: &Pixel) -> bool {
    let hsv = to_hsv(pixel);
    hsv.hue > 0.0 && hsv.hue < 35.0 && hsv.saturation > 0.23 && hsv.saturation < 0.68
}

pub fn ycbcr_rule(pixel: &Pixel) -> bool {
    let ycbcr = to_ycbcr(pixel);
    (97.5..=142.5).contains(&ycbcr.cb) && (134.0..=176.0).contains(&ycbcr.cr)
}

/// Evaluates all five rules without short-circuiting.
pub fn matched_rules(pixel: &Pixel) -> SkinRules {
    SkinRules {
        uniform_daylight: uniform_daylight_rule(pixel),
        flash_lighting: flash_lighting_rule(pixel),
        normalized_rgb: normalized_rgb_rule(pixel),
        hsv: hsv_rule(pixel),
        ycbcr: ycbcr_rule(pixel),
    }
}

/// True when any skin rule matches. Cheap rules are tried first.
pub fn is_skin(pixel: &Pixel) -> bool {
    uniform_daylight_rule(pixel)
        || flash_lighting_rule(pixel)
        || normalized_rgb_rule(pixel)
        || hsv_rule(pixel)
        || ycbcr_rule(pixel)
}
