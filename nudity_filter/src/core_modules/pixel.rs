// THEORY:
// The `Pixel` module is the most fundamental unit of the filter. It holds a
// "dumb" data container for a single RGB pixel plus the input contract
// (`PixelGrid`) through which every image reaches the analysis.
//
// Key architectural principles:
// 1.  **One Scale**: Every threshold in the skin classifier is calibrated for
//     8-bit channels in [0, 255]. A `Pixel` therefore always stores `u8`
//     channels. Sources with a wider native range declare their `BitDepth`,
//     and `Pixel::from_raw` rescales them before any heuristic sees them.
// 2.  **Declared Depth**: A `PixelGrid` does not hand out `Pixel`s directly. It
//     reports its dimensions, its bit depth, and raw channel values. The
//     conversion to the classifier's scale happens in exactly one place.
// 3.  **Many Sources**: `image` buffers (8- and 16-bit, RGB and RGBA) and raw
//     byte frames (`RawFrame`) all implement the same trait. The analysis is
//     written once against `PixelGrid`.
//
// Alpha is ignored everywhere: the heuristic only looks at color.

pub mod pixel {
    use crate::error::{FilterError, Result};
    use image::{ImageBuffer, Rgb, Rgba};
    use std::ops::Deref;

    pub type Channel = u8;
    pub type RawChannel = u16;

    /// The native channel depth of a pixel source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BitDepth {
        Eight,
        Sixteen,
    }

    impl BitDepth {
        /// Maps a raw channel value of this depth onto the 8-bit scale.
        ///
        /// 16-bit values are rounded to the nearest 8-bit step, so 0 maps to 0
        /// and 65535 maps to 255.
        pub fn rescale(self, value: RawChannel) -> Channel {
            match self {
                BitDepth::Eight => value.min(Channel::MAX as RawChannel) as Channel,
                BitDepth::Sixteen => ((value as u32 + 128) / 257) as Channel,
            }
        }
    }

    /// A "dumb" data container representing a single RGB pixel on the 8-bit scale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }

        /// Builds a pixel from raw channels of a declared depth, rescaling into [0, 255].
        pub fn from_raw(channels: [RawChannel; 3], depth: BitDepth) -> Self {
            Self {
                red: depth.rescale(channels[0]),
                green: depth.rescale(channels[1]),
                blue: depth.rescale(channels[2]),
            }
        }

        pub fn max_channel(&self) -> Channel {
            self.red.max(self.green).max(self.blue)
        }

        pub fn min_channel(&self) -> Channel {
            self.red.min(self.green).min(self.blue)
        }

        /// Raw RGB channel sum (0..=765).
        pub fn sum(&self) -> u16 {
            self.red as u16 + self.green as u16 + self.blue as u16
        }
    }

    impl From<[Channel; 3]> for Pixel {
        fn from(channels: [Channel; 3]) -> Self {
            Pixel::new(channels[0], channels[1], channels[2])
        }
    }

    impl From<Rgb<u8>> for Pixel {
        fn from(rgb: Rgb<u8>) -> Self {
            Pixel::from(rgb.0)
        }
    }

    /// The input contract of the analysis: a decoded 2-D grid of pixels.
    pub trait PixelGrid {
        /// Width and height of the grid in pixels.
        fn dimensions(&self) -> (u32, u32);

        /// The native depth of the values returned by `raw_channels`.
        fn bit_depth(&self) -> BitDepth;

        /// The (r, g, b) channels at `(x, y)`, in the grid's native depth.
        fn raw_channels(&self, x: u32, y: u32) -> [RawChannel; 3];

        /// The pixel at `(x, y)`, rescaled onto the classifier's 8-bit scale.
        fn pixel(&self, x: u32, y: u32) -> Pixel {
            Pixel::from_raw(self.raw_channels(x, y), self.bit_depth())
        }
    }

    macro_rules! impl_pixel_grid_for_buffer {
        ($pixel:ty, $subpixel:ty, $depth:expr) => {
            impl<C> PixelGrid for ImageBuffer<$pixel, C>
            where
                C: Deref<Target = [$subpixel]>,
            {
                fn dimensions(&self) -> (u32, u32) {
                    (self.width(), self.height())
                }

                fn bit_depth(&self) -> BitDepth {
                    $depth
                }

                fn raw_channels(&self, x: u32, y: u32) -> [RawChannel; 3] {
                    let channels = self.get_pixel(x, y).0;
                    [channels[0].into(), channels[1].into(), channels[2].into()]
                }
            }
        };
    }

    impl_pixel_grid_for_buffer!(Rgb<u8>, u8, BitDepth::Eight);
    impl_pixel_grid_for_buffer!(Rgba<u8>, u8, BitDepth::Eight);
    impl_pixel_grid_for_buffer!(Rgb<u16>, u16, BitDepth::Sixteen);
    impl_pixel_grid_for_buffer!(Rgba<u16>, u16, BitDepth::Sixteen);

    /// Byte order of a raw frame buffer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ChannelLayout {
        Rgb,
        Rgba,
    }

    impl ChannelLayout {
        pub fn channels(self) -> usize {
            match self {
                ChannelLayout::Rgb => 3,
                ChannelLayout::Rgba => 4,
            }
        }
    }

    /// A borrowed, tightly packed 8-bit frame buffer (e.g. straight from a camera or decoder).
    #[derive(Debug, Clone, Copy)]
    pub struct RawFrame<'a> {
        width: u32,
        height: u32,
        layout: ChannelLayout,
        bytes: &'a [u8],
    }

    impl<'a> RawFrame<'a> {
        /// Wraps `bytes`, checking that its length matches `width * height * channels`.
        pub fn new(width: u32, height: u32, layout: ChannelLayout, bytes: &'a [u8]) -> Result<Self> {
            let expected = width as usize * height as usize * layout.channels();
            if bytes.len() != expected {
                return Err(FilterError::FrameSize {
                    expected,
                    actual: bytes.len(),
                    width,
                    height,
                });
            }
            Ok(Self {
                width,
                height,
                layout,
                bytes,
            })
        }
    }

    impl PixelGrid for RawFrame<'_> {
        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn bit_depth(&self) -> BitDepth {
            BitDepth::Eight
        }

        fn raw_channels(&self, x: u32, y: u32) -> [RawChannel; 3] {
            let offset = (y as usize * self.width as usize + x as usize) * self.layout.channels();
            [
                self.bytes[offset] as RawChannel,
                self.bytes[offset + 1] as RawChannel,
                self.bytes[offset + 2] as RawChannel,
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;
    use crate::error::FilterError;
    use image::{ImageBuffer, Rgb, RgbImage, Rgba};

    #[test]
    fn sixteen_bit_channels_rescale_to_eight_bit() {
        assert_eq!(BitDepth::Sixteen.rescale(0), 0);
        assert_eq!(BitDepth::Sixteen.rescale(u16::MAX), 255);
        assert_eq!(BitDepth::Sixteen.rescale(200 * 257), 200);
        assert_eq!(BitDepth::Sixteen.rescale(32768), 128);
    }

    #[test]
    fn eight_bit_channels_pass_through() {
        let pixel = Pixel::from_raw([100, 50, 30], BitDepth::Eight);
        assert_eq!(pixel, Pixel::new(100, 50, 30));
    }

    #[test]
    fn sixteen_bit_buffer_yields_rescaled_pixels() {
        let buffer: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgb([100 * 257, 50 * 257, 30 * 257]));
        assert_eq!(buffer.bit_depth(), BitDepth::Sixteen);
        assert_eq!(buffer.pixel(1, 1), Pixel::new(100, 50, 30));
    }

    #[test]
    fn rgba_buffer_ignores_alpha() {
        let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(3, 1, Rgba([10, 20, 30, 0]));
        assert_eq!(buffer.pixel(2, 0), Pixel::new(10, 20, 30));
    }

    #[test]
    fn rgb_buffer_reports_its_dimensions() {
        let buffer = RgbImage::new(7, 3);
        assert_eq!(PixelGrid::dimensions(&buffer), (7, 3));
    }

    #[test]
    fn raw_frame_reads_rgba_bytes() {
        let bytes = [1, 2, 3, 255, 4, 5, 6, 255];
        let frame = RawFrame::new(2, 1, ChannelLayout::Rgba, &bytes).expect("valid frame");
        assert_eq!(frame.pixel(0, 0), Pixel::new(1, 2, 3));
        assert_eq!(frame.pixel(1, 0), Pixel::new(4, 5, 6));
    }

    #[test]
    fn raw_frame_rejects_short_buffers() {
        let bytes = [0u8; 15];
        let error = RawFrame::new(2, 2, ChannelLayout::Rgba, &bytes).unwrap_err();
        assert!(matches!(
            error,
            FilterError::FrameSize {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn channel_extremes() {
        let pixel = Pixel::new(100, 50, 30);
        assert_eq!(pixel.max_channel(), 100);
        assert_eq!(pixel.min_channel(), 30);
        assert_eq!(pixel.sum(), 180);
    }
}
