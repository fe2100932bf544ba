// THEORY:
// The `RegionLabeler` is the engine of the spatial grouping stage. It turns the
// flat `SkinMask` into a list of connected regions and their pixel counts using
// classic single-pass connected-component labeling.
//
// Algorithm steps:
// 1.  **Forward Scan**: Pixels are visited in raster order (top to bottom, left
//     to right). Each skin pixel looks only at the four neighbors that were
//     already visited: upper-left, up, upper-right, and left. It never looks
//     ahead, so one pass is enough to assign provisional labels.
// 2.  **Labeling**: A skin pixel with no labeled neighbor starts a new region
//     with a fresh label. Otherwise it takes the smallest neighbor label.
// 3.  **Equivalence Recording**: When a pixel touches several labels, those
//     labels describe the same physical blob. The `EquivalenceTable` records
//     that fact so the second pass can fold them together.
// 4.  **Resolution Pass**: Every provisional label is resolved to its canonical
//     id and the per-region pixel counts are accumulated in a direct
//     label-indexed table.
//
// Two merge strategies are offered:
// - `Direct` remaps each touching label to the smallest label's *current*
//   canonical id, one level deep. Long equivalence chains (e.g. a "U" whose arms
//   were linked to different labels before the base row joined them) can stay
//   split. This is the historical behavior of the heuristic and the default,
//   because the decision thresholds were tuned against it.
// - `UnionFind` keeps a proper disjoint-set forest with path compression, so
//   every connected blob resolves to exactly one region. It is more correct,
//   but can change verdicts on unusual shapes.
//
// The labeler is stateless: the label grid and the equivalence table are
// allocated per call and dropped with it.

use crate::core_modules::region::{Region, RegionId};
use crate::core_modules::skin_mask::SkinMask;

/// How provisional labels that touch are folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// One-level remap of touching labels (historical behavior).
    #[default]
    Direct,
    /// Full union-find with path compression.
    UnionFind,
}

/// Maps every provisional label to its canonical label.
///
/// Index 0 is reserved for "not skin" and never handed out.
#[derive(Debug, Clone)]
pub struct EquivalenceTable {
    canonical: Vec<RegionId>,
}

impl EquivalenceTable {
    pub fn new() -> Self {
        Self { canonical: vec![0] }
    }

    /// Hands out the next label and registers it as its own canonical id.
    pub fn fresh_label(&mut self) -> RegionId {
        let label = self.canonical.len() as RegionId;
        self.canonical.push(label);
        label
    }

    /// Number of labels handed out so far.
    pub fn label_count(&self) -> usize {
        self.canonical.len() - 1
    }

    /// The entry currently stored for `label`, without following chains.
    pub fn entry(&self, label: RegionId) -> RegionId {
        self.canonical[label as usize]
    }

    /// One-level merge: every touching label takes the minimum label's current entry.
    pub fn remap(&mut self, minimum: RegionId, touching: &[RegionId]) {
        let target = self.entry(minimum);
        for &label in touching {
            self.canonical[label as usize] = target;
        }
    }

    /// Root of `label`'s set, halving the path on the way up.
    pub fn find(&mut self, mut label: RegionId) -> RegionId {
        while self.canonical[label as usize] != label {
            let parent = self.canonical[label as usize];
            let grandparent = self.canonical[parent as usize];
            self.canonical[label as usize] = grandparent;
            label = grandparent;
        }
        label
    }

    /// Joins the sets of `minimum` and every touching label. The smaller root wins.
    pub fn union(&mut self, minimum: RegionId, touching: &[RegionId]) {
        for &label in touching {
            let left = self.find(minimum);
            let right = self.find(label);
            if left != right {
                let (root, child) = if left < right { (left, right) } else { (right, left) };
                self.canonical[child as usize] = root;
            }
        }
    }
}

impl Default for EquivalenceTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of a labeling run.
#[derive(Debug, Clone)]
pub struct Labeling {
    /// Row-major canonical label per pixel; 0 for non-skin pixels.
    pub labels: Vec<RegionId>,
    /// One entry per distinct canonical label, in order of first appearance.
    pub regions: Vec<Region>,
}

/// Already-visited neighbors, as (dx, dy): upper-left, up, upper-right, left.
const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(-1, -1), (0, -1), (1, -1), (-1, 0)];

/// Labels every connected skin region in `mask` and counts its pixels.
pub fn label_regions(mask: &SkinMask, strategy: MergeStrategy) -> Labeling {
    let width = mask.width() as usize;
    let height = mask.height() as usize;
    let cells = mask.cells();

    let mut labels: Vec<RegionId> = vec![0; width * height];
    let mut equivalences = EquivalenceTable::new();

    // --- 1. Forward Scan ---
    for y in 0..height {
        for x in 0..width {
            let index = y * width + x;
            if !cells[index] {
                continue;
            }

            let mut touching: [RegionId; 4] = [0; 4];
            let mut touching_count = 0;
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 {
                    continue;
                }

                let neighbor_label = labels[ny as usize * width + nx as usize];
                if neighbor_label != 0 && !touching[..touching_count].contains(&neighbor_label) {
                    touching[touching_count] = neighbor_label;
                    touching_count += 1;
                }
            }
            let touching = &touching[..touching_count];

            labels[index] = match touching.iter().min() {
                None => equivalences.fresh_label(),
                Some(&minimum) => {
                    match strategy {
                        MergeStrategy::Direct => equivalences.remap(minimum, touching),
                        MergeStrategy::UnionFind => equivalences.union(minimum, touching),
                    }
                    minimum
                }
            };
        }
    }

    // --- 2. Resolution Pass ---
    let mut counts = vec![0usize; equivalences.label_count() + 1];
    let mut first_seen: Vec<RegionId> = Vec::new();

    for label in labels.iter_mut().filter(|label| **label != 0) {
        let canonical = match strategy {
            MergeStrategy::Direct => equivalences.entry(*label),
            MergeStrategy::UnionFind => equivalences.find(*label),
        };
        *label = canonical;

        if counts[canonical as usize] == 0 {
            first_seen.push(canonical);
        }
        counts[canonical as usize] += 1;
    }

    let regions = first_seen
        .into_iter()
        .map(|id| Region::new(id, counts[id as usize]))
        .collect();

    Labeling { labels, regions }
}
