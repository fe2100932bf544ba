use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const SKIN: Rgb<u8> = Rgb([200, 120, 90]);

fn nudity_check_cmd() -> Command {
    Command::cargo_bin("nudity_check").expect("Failed to find nudity_check binary")
}

/// Four skin blobs of 1000, 500, 400 and 100 pixels on a black 100x100 canvas.
fn write_dominant_fixture(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let mut image = RgbImage::new(100, 100);
    for (left, top, width, height) in [(0, 0, 40, 25), (50, 0, 20, 25), (0, 40, 20, 20), (50, 40, 10, 10)] {
        for y in top..top + height {
            for x in left..left + width {
                image.put_pixel(x, y, SKIN);
            }
        }
    }
    let path = dir.join("dominant.png");
    image.save(&path)?;
    Ok(path)
}

fn write_blue_fixture(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("sky.png");
    RgbImage::from_pixel(64, 48, Rgb([0, 0, 255])).save(&path)?;
    Ok(path)
}

#[test]
fn test_dominant_blobs_are_reported_nude() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let fixture = write_dominant_fixture(dir.path())?;

    nudity_check_cmd()
        .arg(&fixture)
        .assert()
        .success()
        .stdout(contains("dominant.png: nude (dominant skin region)"));

    Ok(())
}

#[test]
fn test_skinless_image_is_reported_not_nude() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let fixture = write_blue_fixture(dir.path())?;

    nudity_check_cmd()
        .arg(&fixture)
        .assert()
        .success()
        .stdout(contains("sky.png: not nude"));

    Ok(())
}

#[test]
fn test_quiet_prints_only_verdicts() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let nude = write_dominant_fixture(dir.path())?;
    let sky = write_blue_fixture(dir.path())?;

    nudity_check_cmd()
        .arg("--quiet")
        .arg(&nude)
        .arg(&sky)
        .assert()
        .success()
        .stdout(predicate::eq("nude\nnot nude\n"));

    Ok(())
}

#[test]
fn test_missing_file_fails_but_others_are_processed() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let fixture = write_dominant_fixture(dir.path())?;
    let missing = dir.path().join("does_not_exist.png");

    nudity_check_cmd()
        .arg(&missing)
        .arg(&fixture)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to open image"))
        .stdout(contains("dominant.png: nude"));

    Ok(())
}

#[test]
fn test_undecodable_file_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, "not an image")?;

    nudity_check_cmd()
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(contains("bogus.png"));

    Ok(())
}

#[test]
fn test_mask_dir_receives_skin_mask() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let masks = tempdir()?;
    let fixture = write_dominant_fixture(dir.path())?;

    nudity_check_cmd()
        .arg("--mask-dir")
        .arg(masks.path())
        .arg(&fixture)
        .assert()
        .success();

    let mask = image::open(masks.path().join("dominant_mask.png"))?.to_luma8();
    assert_eq!(mask.dimensions(), (100, 100));
    assert_eq!(mask.get_pixel(0, 0).0, [255]);
    assert_eq!(mask.get_pixel(99, 99).0, [0]);
    assert_eq!(mask.pixels().filter(|pixel| pixel.0[0] == 255).count(), 2000);

    Ok(())
}

#[test]
fn test_union_find_merge_is_accepted() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let fixture = write_dominant_fixture(dir.path())?;

    nudity_check_cmd()
        .arg("--merge")
        .arg("union-find")
        .arg(&fixture)
        .assert()
        .success()
        .stdout(contains(": nude"));

    Ok(())
}

#[test]
fn test_max_dimension_from_environment() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let masks = tempdir()?;
    let fixture = write_dominant_fixture(dir.path())?;

    nudity_check_cmd()
        .env("NUDITY_MAX_DIMENSION", "50")
        .arg("--mask-dir")
        .arg(masks.path())
        .arg(&fixture)
        .assert()
        .success();

    let mask = image::open(masks.path().join("dominant_mask.png"))?;
    assert_eq!((mask.width(), mask.height()), (50, 50));

    Ok(())
}

#[test]
fn test_zero_max_dimension_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let fixture = write_dominant_fixture(dir.path())?;

    nudity_check_cmd()
        .arg("--max-dimension")
        .arg("0")
        .arg(&fixture)
        .assert()
        .failure();

    Ok(())
}
