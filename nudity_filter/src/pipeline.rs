// THEORY:
// The `pipeline` module is the top-level API for the whole filter. It
// encapsulates the full analysis stack behind one small interface:
//
//   decoded image -> downsample -> skin mask -> region labeling -> decision tree
//
// It is also the only place that logs. The analysis stages are pure and return
// structured data; the detector reports that data through the `log` facade and
// leaves it to the application to decide whether anyone is listening.

use crate::core_modules::downsampler::{downsample, DEFAULT_MAX_DIMENSION};
use crate::core_modules::pixel::pixel::PixelGrid;
use crate::core_modules::region_analyzer::analyze_regions;
use crate::core_modules::region_labeler::label_regions;
use crate::core_modules::skin_classifier::matched_rules;
use crate::error::Result;
use image::DynamicImage;
use log::{debug, log_enabled, trace, Level};
use std::num::NonZeroU32;
use std::path::Path;

// Re-export key data structures for the public API.
pub use crate::core_modules::pixel::pixel::{BitDepth, ChannelLayout, Pixel, RawFrame};
pub use crate::core_modules::region::Region;
pub use crate::core_modules::region_analyzer::{Analysis, Decision};
pub use crate::core_modules::region_labeler::MergeStrategy;
pub use crate::core_modules::skin_mask::SkinMask;

/// Configuration for the NudityDetector.
///
/// Detection thresholds are fixed; only the surrounding behavior is tunable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Images are downsampled so that neither side exceeds this many pixels.
    pub max_dimension: NonZeroU32,
    /// How touching provisional labels are merged during region labeling.
    pub merge_strategy: MergeStrategy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            merge_strategy: MergeStrategy::default(),
        }
    }
}

/// The main, top-level struct for the filter. Holds no per-image state.
#[derive(Debug, Clone, Default)]
pub struct NudityDetector {
    config: DetectorConfig,
}

impl NudityDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Analyzes a grid as-is. The caller is responsible for bounding its size.
    pub fn analyze_grid<G: PixelGrid + ?Sized>(&self, grid: &G) -> Analysis {
        self.analyze_mask(&classify(grid))
    }

    /// Labels and judges an already classified mask.
    pub fn analyze_mask(&self, mask: &SkinMask) -> Analysis {
        let labeling = label_regions(mask, self.config.merge_strategy);
        trace!(
            "{} raw skin regions from {} skin pixels",
            labeling.regions.len(),
            mask.skin_pixels()
        );

        let analysis = analyze_regions(labeling.regions, mask.dimensions());
        log_analysis(&analysis);
        analysis
    }

    /// Downsamples a decoded image and classifies every pixel.
    ///
    /// 16-bit images keep their depth until the classifier rescales each pixel;
    /// everything else is converted to 8-bit RGB first.
    pub fn skin_mask(&self, image: &DynamicImage) -> SkinMask {
        let max_dimension = self.config.max_dimension;
        match image {
            DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_) => {
                classify(&downsample(&image.to_rgb16(), max_dimension))
            }
            _ => classify(&downsample(&image.to_rgb8(), max_dimension)),
        }
    }

    /// Full analysis of a decoded image.
    pub fn analyze_image(&self, image: &DynamicImage) -> Analysis {
        debug!(
            "analyzing {}x{} image ({:?})",
            image.width(),
            image.height(),
            image.color()
        );
        self.analyze_mask(&self.skin_mask(image))
    }

    /// The bare verdict for a decoded image.
    pub fn is_nude(&self, image: &DynamicImage) -> bool {
        self.analyze_image(image).is_nude()
    }

    /// Opens, decodes, and analyzes the image file at `path`.
    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let path = path.as_ref();
        debug!("scanning {}", path.display());
        let image = image::open(path)?;
        Ok(self.analyze_image(&image))
    }
}

/// Verdict for a decoded image using the default configuration.
pub fn is_nude(image: &DynamicImage) -> bool {
    NudityDetector::default().is_nude(image)
}

fn classify<G: PixelGrid + ?Sized>(grid: &G) -> SkinMask {
    if log_enabled!(Level::Trace) {
        let (skin_pixels, [daylight, flash, normalized, hsv, ycbcr]) = rule_hits(grid);
        trace!(
            "{skin_pixels} skin pixels; rule hits: daylight {daylight}, flash {flash}, \
             normalized rgb {normalized}, hsv {hsv}, ycbcr {ycbcr}"
        );
    }
    SkinMask::from_grid(grid)
}

/// Number of skin pixels in `grid` and how often each rule matched, in rule order.
fn rule_hits<G: PixelGrid + ?Sized>(grid: &G) -> (usize, [usize; 5]) {
    let (width, height) = grid.dimensions();
    let mut skin_pixels = 0;
    let mut hits = [0usize; 5];
    for y in 0..height {
        for x in 0..width {
            let rules = matched_rules(&grid.pixel(x, y));
            if rules.any() {
                skin_pixels += 1;
            }
            for (hit, matched) in hits.iter_mut().zip(rules.as_array()) {
                *hit += usize::from(matched);
            }
        }
    }
    (skin_pixels, hits)
}

fn log_analysis(analysis: &Analysis) {
    debug!(
        "{} surviving regions, {} of {} pixels are skin ({:.2}%)",
        analysis.regions.len(),
        analysis.total_skin,
        analysis.total_pixels,
        analysis.skin_ratio
    );
    if let Some([first, second, third]) = analysis.largest_ratios {
        debug!("largest regions: {first:.2}%, {second:.2}%, {third:.2}% of skin");
    }
    for region in &analysis.regions {
        trace!("region {} has {} pixels", region.id, region.count);
    }
    debug!(
        "verdict: {} ({})",
        if analysis.is_nude() { "nude" } else { "not nude" },
        analysis.decision
    );
}
