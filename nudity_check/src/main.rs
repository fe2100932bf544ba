// nudity_check/src/main.rs
//
// Command-line front end for the `nudity_filter` library.
//
// Responsibilities include:
// - Parsing arguments (`cli.rs`) and installing `env_logger`.
// - Building a `NudityDetector` from the parsed options.
// - Decoding each input, optionally saving its skin mask, and printing a verdict.
// - Mapping failures to the process exit code. A file that fails to load is
//   reported on stderr and the remaining files are still processed.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::{debug, info};
use nudity_filter::pipeline::{Analysis, NudityDetector};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_level()),
    )
    .init();

    let detector = NudityDetector::new(cli.detector_config());
    debug!("detector configuration: {:?}", detector.config());

    let mut failures = 0usize;
    for path in &cli.images {
        match check_image(&detector, path, cli.mask_dir.as_deref()) {
            Ok(analysis) => println!("{}", verdict_line(path, &analysis, cli.quiet)),
            Err(err) => {
                failures += 1;
                eprintln!("Error: {err:#}");
            }
        }
    }

    if failures > 0 {
        info!("{failures} of {} images could not be analyzed", cli.images.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Decodes one image, writes its mask when asked to, and returns the analysis.
fn check_image(detector: &NudityDetector, path: &Path, mask_dir: Option<&Path>) -> Result<Analysis> {
    let image = image::open(path)
        .with_context(|| format!("failed to open image '{}'", path.display()))?;
    debug!(
        "{}: decoded {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    let mask = detector.skin_mask(&image);

    if let Some(dir) = mask_dir {
        let mask_path = mask_path_for(dir, path);
        mask.save_png(&mask_path)
            .with_context(|| format!("failed to save skin mask for '{}'", path.display()))?;
        info!("{}: skin mask written to {}", path.display(), mask_path.display());
    }

    Ok(detector.analyze_mask(&mask))
}

/// `<dir>/<stem>_mask.png` for the input at `path`.
fn mask_path_for(dir: &Path, path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    dir.join(format!("{stem}_mask.png"))
}

fn verdict_line(path: &Path, analysis: &Analysis, quiet: bool) -> String {
    let verdict = if analysis.is_nude() { "nude" } else { "not nude" };
    if quiet {
        verdict.to_string()
    } else {
        format!("{}: {verdict} ({})", path.display(), analysis.decision)
    }
}
