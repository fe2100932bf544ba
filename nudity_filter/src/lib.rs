// THEORY:
// This file is the main entry point for the `nudity_filter` library crate.
// It defines the public API exposed to external consumers (like the
// `nudity_check` command-line tool).
//
// The primary export is the `NudityDetector` and its associated data structures
// (`DetectorConfig`, `Analysis`, `Decision`). They form the high-level interface
// to the whole heuristic. The analysis stages live in `core_modules`:
// color-space conversion, skin classification, region labeling, and the final
// region-ratio decision tree. Callers that only want a yes/no answer never need
// to touch them.

pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use error::{FilterError, Result};
pub use pipeline::{is_nude, DetectorConfig, NudityDetector};
