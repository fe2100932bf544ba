// THEORY:
// The `color_space` module holds the single-pixel color transforms the skin
// classifier reasons in. Each transform is a pure function of one `Pixel`.
// Nothing here reads neighbors, and nothing here keeps state.
//
// Three "lenses" are provided, because skin tones separate best in different
// spaces under different lighting:
// - normalized RGB: channel shares of the total, independent of brightness.
// - HSV: hue angle and a sum-based saturation, good for the warm-hue band.
// - YCbCr (BT.601): chroma offsets, the most lighting-robust of the three.
//
// Divisions are guarded with a tiny epsilon rather than rejected: a black pixel
// is a perfectly valid input and must simply fail every skin test.

pub mod color_space {
    use crate::core_modules::pixel::pixel::Pixel;

    /// Substituted for any zero channel or channel sum before dividing.
    pub const EPSILON: f64 = 0.0001;

    /// Per-channel share of the channel sum.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct NormalizedRgb {
        pub red: f64,
        pub green: f64,
        pub blue: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Hsv {
        /// Hue angle in degrees [0, 360). 0.0 for achromatic pixels.
        pub hue: f64,
        /// 1 - 3 * min / sum.
        pub saturation: f64,
        /// max / 3. Not used by the classifier.
        pub value: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct YCbCr {
        pub y: f64,
        pub cb: f64,
        pub cr: f64,
    }

    #[inline]
    fn guarded(value: f64) -> f64 {
        if value == 0.0 { EPSILON } else { value }
    }

    /// Normalized RGB. Zero channels are replaced by `EPSILON` before summing.
    pub fn normalized_rgb(pixel: &Pixel) -> NormalizedRgb {
        let red = guarded(pixel.red as f64);
        let green = guarded(pixel.green as f64);
        let blue = guarded(pixel.blue as f64);
        let sum = red + green + blue;

        NormalizedRgb {
            red: red / sum,
            green: green / sum,
            blue: blue / sum,
        }
    }

    /// HSV with the hue taken from the max channel's sector and a sum-based saturation.
    pub fn to_hsv(pixel: &Pixel) -> Hsv {
        let red = pixel.red as f64;
        let green = pixel.green as f64;
        let blue = pixel.blue as f64;

        let maximum_channel = red.max(green).max(blue);
        let minimum_channel = red.min(green).min(blue);
        let chroma = maximum_channel - minimum_channel;

        let hue = if chroma == 0.0 {
            0.0
        } else {
            let sector = if maximum_channel == red {
                (green - blue) / chroma
            } else if maximum_channel == green {
                2.0 + (blue - red) / chroma
            } else {
                4.0 + (red - green) / chroma
            };

            let hue_degrees = sector * 60.0;
            if hue_degrees < 0.0 {
                hue_degrees + 360.0
            } else {
                hue_degrees
            }
        };

        let sum = guarded(pixel.sum() as f64);

        Hsv {
            hue,
            saturation: 1.0 - 3.0 * (minimum_channel / sum),
            value: maximum_channel / 3.0,
        }
    }

    /// ITU-R BT.601 full-range luma and chroma offsets.
    pub fn to_ycbcr(pixel: &Pixel) -> YCbCr {
        let red = pixel.red as f64;
        let green = pixel.green as f64;
        let blue = pixel.blue as f64;

        YCbCr {
            y: 0.299 * red + 0.587 * green + 0.114 * blue,
            cb: 128.0 - 0.168736 * red - 0.331364 * green + 0.5 * blue,
            cr: 128.0 + 0.5 * red - 0.418688 * green - 0.081312 * blue,
        }
    }
}
