// THEORY:
// The `RegionAnalyzer` is the final decision layer. It receives the raw list of
// labeled regions for one image and reduces it to a verdict with a fixed,
// ordered decision tree over region-size ratios.
//
// Key architectural principles:
// 1.  **Noise Floor First**: Regions of 9 pixels or fewer (smaller than a 3x3
//     block) are dropped before anything else and never count again, not even
//     toward the total skin area.
// 2.  **Ordered Branches**: The checks run in a fixed order and the first one
//     that fires decides. Only an image that survives every check is "nude".
// 3.  **Pure Output**: The analyzer does not log. It returns an `Analysis` that
//     carries the verdict plus the statistics that produced it, so callers can
//     report or ignore them as they see fit.
//
// All thresholds are empirical constants. Comparisons are strict, so a ratio
// sitting exactly on a threshold passes that check.

use crate::core_modules::region::Region;
use std::fmt;

/// A region must have more than this many pixels to survive noise filtering.
pub const NOISE_REGION_MAX_PIXELS: usize = 9;
/// Fewer surviving regions than this is never nude.
pub const MIN_REGION_COUNT: usize = 3;
/// Minimum percentage of the image covered by surviving skin.
pub const MIN_SKIN_RATIO: f64 = 15.0;
/// Scattered-skin bounds for the three largest regions, as percentages of total skin.
pub const SCATTERED_LARGEST_RATIO: f64 = 35.0;
pub const SCATTERED_SECOND_RATIO: f64 = 30.0;
pub const SCATTERED_THIRD_RATIO: f64 = 30.0;
/// Minimum share of total skin held by the largest region.
pub const MIN_DOMINANT_RATIO: f64 = 45.0;
/// More surviving regions than this is never nude.
pub const MAX_REGION_COUNT: usize = 60;

/// The branch of the decision tree that produced the verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The analyzed image had no pixels at all.
    EmptyImage,
    /// Fewer than three regions survived noise filtering.
    TooFewRegions { regions: usize },
    /// Surviving skin covers less than 15% of the image.
    LowSkinRatio { skin_ratio: f64 },
    /// The three largest regions are all small shares of the skin.
    ScatteredSkin { largest: [f64; 3] },
    /// The largest region holds less than 45% of the skin.
    SmallDominantRegion { largest: f64 },
    /// More than sixty regions survived.
    TooManyRegions { regions: usize },
    /// Every check passed.
    Nude,
}

impl Decision {
    pub fn is_nude(&self) -> bool {
        matches!(self, Decision::Nude)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::EmptyImage => write!(f, "empty image"),
            Decision::TooFewRegions { regions } => {
                write!(f, "only {regions} skin regions, need at least {MIN_REGION_COUNT}")
            }
            Decision::LowSkinRatio { skin_ratio } => {
                write!(f, "skin covers {skin_ratio:.1}% of the image, below {MIN_SKIN_RATIO}%")
            }
            Decision::ScatteredSkin { largest } => write!(
                f,
                "largest regions hold {:.1}%, {:.1}%, {:.1}% of the skin",
                largest[0], largest[1], largest[2]
            ),
            Decision::SmallDominantRegion { largest } => write!(
                f,
                "largest region holds {largest:.1}% of the skin, below {MIN_DOMINANT_RATIO}%"
            ),
            Decision::TooManyRegions { regions } => {
                write!(f, "{regions} skin regions, more than {MAX_REGION_COUNT}")
            }
            Decision::Nude => write!(f, "dominant skin region"),
        }
    }
}

/// The verdict for one image together with the statistics that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// The deciding branch; `decision.is_nude()` is the verdict.
    pub decision: Decision,
    /// Surviving regions, sorted by descending pixel count.
    pub regions: Vec<Region>,
    /// Sum of the surviving regions' pixel counts.
    pub total_skin: usize,
    /// Width x height of the analyzed image.
    pub total_pixels: usize,
    /// Width and height of the analyzed image.
    pub analyzed_dimensions: (u32, u32),
    /// Percentage of the image covered by surviving skin.
    pub skin_ratio: f64,
    /// Shares of total skin held by the three largest regions, when there are three.
    pub largest_ratios: Option<[f64; 3]>,
}

impl Analysis {
    pub fn is_nude(&self) -> bool {
        self.decision.is_nude()
    }
}

/// Filters noise, sorts, and runs the decision tree.
pub fn analyze_regions(regions: Vec<Region>, analyzed_dimensions: (u32, u32)) -> Analysis {
    let (width, height) = analyzed_dimensions;
    let total_pixels = width as usize * height as usize;

    let mut survivors: Vec<Region> = regions
        .into_iter()
        .filter(|region| region.count > NOISE_REGION_MAX_PIXELS)
        .collect();
    survivors.sort_by(|a, b| b.count.cmp(&a.count));

    let total_skin: usize = survivors.iter().map(|region| region.count).sum();
    let skin_ratio = if total_pixels == 0 {
        0.0
    } else {
        100.0 * total_skin as f64 / total_pixels as f64
    };
    let largest_ratios = match survivors.as_slice() {
        [first, second, third, ..] => Some([
            first.percent_of(total_skin),
            second.percent_of(total_skin),
            third.percent_of(total_skin),
        ]),
        _ => None,
    };

    let decision = decide(total_pixels, survivors.len(), skin_ratio, largest_ratios);

    Analysis {
        decision,
        regions: survivors,
        total_skin,
        total_pixels,
        analyzed_dimensions,
        skin_ratio,
        largest_ratios,
    }
}

fn decide(
    total_pixels: usize,
    region_count: usize,
    skin_ratio: f64,
    largest_ratios: Option<[f64; 3]>,
) -> Decision {
    if total_pixels == 0 {
        return Decision::EmptyImage;
    }

    let largest = match largest_ratios {
        Some(largest) if region_count >= MIN_REGION_COUNT => largest,
        _ => {
            return Decision::TooFewRegions {
                regions: region_count,
            };
        }
    };

    if skin_ratio < MIN_SKIN_RATIO {
        return Decision::LowSkinRatio { skin_ratio };
    }

    if largest[0] < SCATTERED_LARGEST_RATIO
        && largest[1] < SCATTERED_SECOND_RATIO
        && largest[2] < SCATTERED_THIRD_RATIO
    {
        return Decision::ScatteredSkin { largest };
    }

    if largest[0] < MIN_DOMINANT_RATIO {
        return Decision::SmallDominantRegion {
            largest: largest[0],
        };
    }

    if region_count > MAX_REGION_COUNT {
        return Decision::TooManyRegions {
            regions: region_count,
        };
    }

    Decision::Nude
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(counts: &[usize]) -> Vec<Region> {
        counts
            .iter()
            .enumerate()
            .map(|(index, &count)| Region::new(index as u32 + 1, count))
            .collect()
    }

    #[test]
    fn zero_pixel_image_is_not_nude() {
        let analysis = analyze_regions(Vec::new(), (0, 10));
        assert_eq!(analysis.decision, Decision::EmptyImage);
        assert_eq!(analysis.skin_ratio, 0.0);
        assert!(!analysis.is_nude());
    }

    #[test]
    fn fewer_than_three_survivors_is_not_nude_regardless_of_size() {
        for counts in [vec![], vec![5000], vec![5000, 4000]] {
            let analysis = analyze_regions(regions(&counts), (100, 100));
            assert_eq!(
                analysis.decision,
                Decision::TooFewRegions {
                    regions: counts.len()
                }
            );
        }
    }

    #[test]
    fn noise_regions_are_dropped_everywhere() {
        // Two 9-pixel blobs would otherwise make up the three-region minimum.
        let analysis = analyze_regions(regions(&[9, 3000, 9, 1]), (100, 100));
        assert_eq!(analysis.regions, vec![Region::new(2, 3000)]);
        assert_eq!(analysis.total_skin, 3000);
        assert_eq!(analysis.skin_ratio, 30.0);
        assert_eq!(analysis.decision, Decision::TooFewRegions { regions: 1 });
    }

    #[test]
    fn survivors_are_sorted_descending() {
        let analysis = analyze_regions(regions(&[10, 400, 55, 1000, 10, 250]), (100, 100));
        let counts: Vec<usize> = analysis.regions.iter().map(|r| r.count).collect();
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(counts, vec![1000, 400, 250, 55, 10, 10]);
    }

    #[test]
    fn low_skin_ratio_is_not_nude() {
        // 1490 of 10000 pixels = 14.9%.
        let analysis = analyze_regions(regions(&[1000, 290, 200]), (100, 100));
        assert!(matches!(analysis.decision, Decision::LowSkinRatio { .. }));
    }

    #[test]
    fn skin_ratio_of_exactly_fifteen_passes() {
        // 1500 of 10000 pixels, largest region 60%.
        let analysis = analyze_regions(regions(&[900, 300, 300]), (100, 100));
        assert_eq!(analysis.skin_ratio, 15.0);
        assert_eq!(analysis.decision, Decision::Nude);
    }

    #[test]
    fn scattered_skin_is_not_nude() {
        let analysis = analyze_regions(regions(&[600, 500, 500, 400]), (50, 50));
        assert_eq!(analysis.largest_ratios, Some([30.0, 25.0, 25.0]));
        assert_eq!(
            analysis.decision,
            Decision::ScatteredSkin {
                largest: [30.0, 25.0, 25.0]
            }
        );
    }

    #[test]
    fn largest_ratio_of_exactly_thirty_five_is_not_scattered() {
        // 35%, 29%, 29%, 7% of 2000 skin pixels.
        let analysis = analyze_regions(regions(&[700, 580, 580, 140]), (100, 100));
        assert_eq!(analysis.largest_ratios, Some([35.0, 29.0, 29.0]));
        assert_eq!(
            analysis.decision,
            Decision::SmallDominantRegion { largest: 35.0 }
        );
    }

    #[test]
    fn second_ratio_of_exactly_thirty_is_not_scattered() {
        // 30%, 30%, 25%, 15% of 2000 skin pixels.
        let analysis = analyze_regions(regions(&[600, 600, 500, 300]), (100, 100));
        assert_eq!(analysis.largest_ratios, Some([30.0, 30.0, 25.0]));
        assert_eq!(
            analysis.decision,
            Decision::SmallDominantRegion { largest: 30.0 }
        );
    }

    #[test]
    fn small_dominant_region_is_not_nude() {
        // 40%, 25%, 20%, 15% of 2000 skin pixels.
        let analysis = analyze_regions(regions(&[800, 500, 400, 300]), (100, 100));
        assert_eq!(
            analysis.decision,
            Decision::SmallDominantRegion { largest: 40.0 }
        );
    }

    #[test]
    fn dominant_ratio_of_exactly_forty_five_passes() {
        let analysis = analyze_regions(regions(&[900, 600, 500]), (100, 100));
        assert_eq!(analysis.largest_ratios, Some([45.0, 30.0, 25.0]));
        assert_eq!(analysis.decision, Decision::Nude);
    }

    #[test]
    fn too_many_regions_is_not_nude() {
        let mut counts = vec![5000];
        counts.extend(std::iter::repeat_n(20, 60));
        let analysis = analyze_regions(regions(&counts), (100, 100));
        assert_eq!(analysis.decision, Decision::TooManyRegions { regions: 61 });

        counts.pop();
        let analysis = analyze_regions(regions(&counts), (100, 100));
        assert_eq!(analysis.decision, Decision::Nude);
    }

    #[test]
    fn dominant_blob_with_enough_skin_is_nude() {
        // 50%, 25%, 20%, 5% of 2000 skin pixels; 20% of the image.
        let analysis = analyze_regions(regions(&[1000, 500, 400, 100]), (100, 100));
        assert_eq!(analysis.skin_ratio, 20.0);
        assert_eq!(analysis.largest_ratios, Some([50.0, 25.0, 20.0]));
        assert!(analysis.is_nude());
    }

    #[test]
    fn decisions_render_a_summary() {
        assert_eq!(
            Decision::TooFewRegions { regions: 2 }.to_string(),
            "only 2 skin regions, need at least 3"
        );
        assert_eq!(Decision::Nude.to_string(), "dominant skin region");
    }
}
