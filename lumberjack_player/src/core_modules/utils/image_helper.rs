use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes an RGB buffer to `path` as a PNG.
pub fn save(path: &Path, image: &RgbImage) -> Result<(), image::ImageError> {
    let output = BufWriter::new(File::create(path)?);
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn save_gradient_file() {
        let dir = tempfile::tempdir().expect("Error creating temp dir.");
        let path = dir.path().join("gradient_file.png");
        let mut buffer = RgbImage::new(64, 32);
        for (x, _, pixel) in buffer.enumerate_pixels_mut() {
            let intensity = (x * 4) as u8;
            *pixel = Rgb([intensity, intensity, intensity]);
        }

        save(&path, &buffer).expect("Error Saving File.");

        let reloaded = image::open(&path).expect("Error Loading File.").to_rgb8();
        assert_eq!(reloaded, buffer);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("Error creating temp dir.");
        let path = dir.path().join("missing").join("white_file.png");
        let buffer = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        assert!(save(&path, &buffer).is_err());
    }
}
