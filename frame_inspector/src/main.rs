use anyhow::{Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};
use lumberjack_player::PlayerConfig;
use lumberjack_player::core_modules::action_planner::plan_for;
use lumberjack_player::core_modules::frame::Frame;
use lumberjack_player::core_modules::geometry::Point;
use lumberjack_player::core_modules::obstacle_detector::ObstacleDetector;
use lumberjack_player::core_modules::scan_region::{ScanRegion, Side};
use lumberjack_player::core_modules::utils::image_helper;
use std::fs;
use std::path::PathBuf;

const SAMPLE_MARK: Rgb<u8> = Rgb([0, 0, 255]);
const MATCH_MARK: Rgb<u8> = Rgb([255, 0, 0]);
const DIM_FACTOR: f32 = 0.4;

#[derive(Parser, Debug)]
#[command(name = "frame_inspector")]
#[command(about = "Runs saved play-area frames through the obstacle detector")]
struct Cli {
    /// PNG frames, typically from the player's trace directory
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Write an annotated copy of every frame into this directory
    #[arg(long)]
    annotate_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();
    let config = PlayerConfig::default();
    let detector = ObstacleDetector::new(config.left_region, config.right_region, config.target_color);

    if let Some(dir) = &cli.annotate_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    // --- 2. Main Processing Loop ---
    for input in &cli.inputs {
        let image = image::open(input)
            .with_context(|| format!("reading {}", input.display()))?
            .to_rgb8();
        if (image.width(), image.height()) != (config.capture_area.width, config.capture_area.height) {
            eprintln!(
                "warning: {} is {}x{}, expected a {}x{} play area",
                input.display(),
                image.width(),
                image.height(),
                config.capture_area.width,
                config.capture_area.height
            );
        }
        let frame = Frame::new(image);

        // --- 3. Detection & Planning ---
        let detection = detector.detect(&frame);
        let action = plan_for(&detection);
        println!(
            "{}: left={} right={} -> {}",
            input.display(),
            describe(detection.left),
            describe(detection.right),
            action
        );

        // --- 4. Visualization ---
        if let Some(dir) = &cli.annotate_dir {
            let mut overlay = frame.image().clone();
            let bands = [*detector.region(Side::Left), *detector.region(Side::Right)];
            apply_dimming(&mut overlay, &bands);
            for region in &bands {
                mark_samples(&mut overlay, region, detection.on(region.side));
            }

            let file_name = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "frame.png".to_string());
            let output = dir.join(format!("annotated_{file_name}"));
            image_helper::save(&output, &overlay)
                .with_context(|| format!("writing {}", output.display()))?;
        }
    }

    Ok(())
}

fn describe(point: Option<Point>) -> String {
    match point {
        Some(point) => format!("({}, {})", point.x, point.y),
        None => "-".to_string(),
    }
}

/// Darkens every pixel outside the scan bands.
fn apply_dimming(image: &mut RgbImage, bands: &[ScanRegion]) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let inside = bands.iter().any(|band| {
            x >= band.x && x < band.right_edge() && y >= band.y && y < band.bottom_edge()
        });
        if !inside {
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f32 * DIM_FACTOR) as u8;
            }
        }
    }
}

/// Marks every sample point of a band, and the first match with a 3x3 block.
fn mark_samples(image: &mut RgbImage, region: &ScanRegion, hit: Option<Point>) {
    for point in region.sample_points() {
        if let Some(pixel) = image.get_pixel_mut_checked(point.x, point.y) {
            *pixel = SAMPLE_MARK;
        }
    }
    if let Some(hit) = hit {
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                let (x, y) = (hit.x as i64 + dx, hit.y as i64 + dy);
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(pixel) = image.get_pixel_mut_checked(x as u32, y as u32) {
                    *pixel = MATCH_MARK;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_only_outside_the_bands() {
        let mut image = RgbImage::from_pixel(145, 120, Rgb([100, 100, 100]));
        apply_dimming(&mut image, &[ScanRegion::LEFT, ScanRegion::RIGHT]);
        assert_eq!(*image.get_pixel(0, 0), Rgb([100, 100, 100]));
        assert_eq!(*image.get_pixel(124, 119), Rgb([100, 100, 100]));
        assert_eq!(*image.get_pixel(60, 60), Rgb([40, 40, 40]));
        assert_eq!(*image.get_pixel(130, 10), Rgb([40, 40, 40]));
    }

    #[test]
    fn marks_samples_and_match() {
        let mut image = RgbImage::new(145, 120);
        mark_samples(&mut image, &ScanRegion::LEFT, Some(Point::new(0, 0)));
        assert_eq!(*image.get_pixel(0, 0), MATCH_MARK);
        assert_eq!(*image.get_pixel(1, 1), MATCH_MARK);
        assert_eq!(*image.get_pixel(5, 60), SAMPLE_MARK);
        assert_eq!(*image.get_pixel(6, 60), Rgb([0, 0, 0]));
    }
}
