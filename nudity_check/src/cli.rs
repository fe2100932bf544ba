// nudity_check/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgAction, Parser, ValueEnum};
use nudity_filter::pipeline::{DetectorConfig, MergeStrategy};
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Heuristic nudity check for still images",
    long_about = "Classifies skin pixels, groups them into connected regions, and \
                  judges each image from the relative sizes of those regions."
)]
pub struct Cli {
    /// Image files to analyze (any format the image crate can decode)
    #[arg(required = true, value_name = "IMAGE")]
    pub images: Vec<PathBuf>,

    /// Longest side, in pixels, that an image is downsampled to before analysis.
    /// Can also be set via the NUDITY_MAX_DIMENSION environment variable.
    #[arg(
        long,
        value_name = "PIXELS",
        env = "NUDITY_MAX_DIMENSION",
        default_value_t = nudity_filter::core_modules::downsampler::DEFAULT_MAX_DIMENSION
    )]
    pub max_dimension: NonZeroU32,

    /// How touching skin labels are merged into regions
    #[arg(long, value_enum, value_name = "STRATEGY", default_value_t = MergeArg::Direct)]
    pub merge: MergeArg,

    /// Optional: write a black/white skin mask per image into this directory
    #[arg(long, value_name = "DIR")]
    pub mask_dir: Option<PathBuf>,

    /// Print only the verdict for each image
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeArg {
    /// One-level label remap (historical behavior)
    Direct,
    /// Full union-find; every connected blob becomes one region
    UnionFind,
}

impl From<MergeArg> for MergeStrategy {
    fn from(arg: MergeArg) -> Self {
        match arg {
            MergeArg::Direct => MergeStrategy::Direct,
            MergeArg::UnionFind => MergeStrategy::UnionFind,
        }
    }
}

impl Cli {
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            max_dimension: self.max_dimension,
            merge_strategy: self.merge.into(),
        }
    }

    /// Log filter used when RUST_LOG is unset.
    pub fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
