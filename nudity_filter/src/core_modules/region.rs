// THEORY:
// A `Region` is one connected blob of skin pixels in a single image, reduced to
// the only two facts the decision tree needs: which canonical label it carries
// and how many pixels belong to it. Like `Pixel`, it is a "dumb" data container
// with no memory beyond the analysis call that produced it.

/// A canonical region label. 0 is reserved for "not skin".
pub type RegionId = u32;

/// A connected component of the skin mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// The canonical label shared by every pixel of this region.
    pub id: RegionId,
    /// The number of pixels in the region, representing its area.
    pub count: usize,
}

impl Region {
    pub fn new(id: RegionId, count: usize) -> Self {
        Self { id, count }
    }

    /// This region's size as a percentage of `total` pixels.
    pub fn percent_of(&self, total: usize) -> f64 {
        100.0 * self.count as f64 / total as f64
    }
}
