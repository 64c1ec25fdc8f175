//! Image decoding, orientation and landscape splitting
//!
//! Everything stays in memory; split halves are cropped from the decoded
//! image when they are drawn.

use crate::types::*;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use log::warn;
use std::path::{Path, PathBuf};

/// Which part of a source image a logical image uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePart {
    Whole,
    LeftHalf,
    RightHalf,
}

/// One logical image: a file, or one half of a split landscape file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUnit {
    pub path: PathBuf,
    pub part: ImagePart,
}

impl ImageUnit {
    pub fn whole(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            part: ImagePart::Whole,
        }
    }

    /// Short label for logs and placeholders
    pub fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        match self.part {
            ImagePart::Whole => name,
            ImagePart::LeftHalf => format!("{} (left)", name),
            ImagePart::RightHalf => format!("{} (right)", name),
        }
    }

    /// Decode this unit with orientation applied
    pub fn load(&self) -> Result<DynamicImage> {
        let image = load_oriented(&self.path)?;
        Ok(match self.part {
            ImagePart::Whole => image,
            ImagePart::LeftHalf => split_halves(&image).0,
            ImagePart::RightHalf => split_halves(&image).1,
        })
    }
}

/// Pixel size after the EXIF orientation is applied, without decoding pixels
pub fn oriented_dimensions(path: &Path) -> Result<(u32, u32)> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let (w, h) = decoder.dimensions();
    let orientation = decoder.orientation()?;
    Ok(if swaps_axes(orientation) { (h, w) } else { (w, h) })
}

/// Decode an image and apply its EXIF orientation
pub fn load_oriented(path: &Path) -> Result<DynamicImage> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Split at the horizontal midpoint; the left half keeps the odd pixel
pub fn split_halves(image: &DynamicImage) -> (DynamicImage, DynamicImage) {
    let (w, h) = (image.width(), image.height());
    let left_width = w.div_ceil(2);
    (
        image.crop_imm(0, 0, left_width, h),
        image.crop_imm(left_width, 0, w - left_width, h),
    )
}

/// Turn files into logical images, splitting landscape ones when asked.
///
/// Files whose size cannot be read are kept whole; they become placeholders
/// when drawn.
pub fn expand_units(paths: &[PathBuf], split_landscape: bool) -> Vec<ImageUnit> {
    let mut units = Vec::with_capacity(paths.len());
    for path in paths {
        if split_landscape {
            match oriented_dimensions(path) {
                Ok((w, h)) if w > h => {
                    units.push(ImageUnit {
                        path: path.clone(),
                        part: ImagePart::LeftHalf,
                    });
                    units.push(ImageUnit {
                        path: path.clone(),
                        part: ImagePart::RightHalf,
                    });
                    continue;
                }
                Ok(_) => {}
                Err(e) => warn!("Cannot read {}: {}", path.display(), e),
            }
        }
        units.push(ImageUnit::whole(path.clone()));
    }
    units
}

fn swaps_axes(orientation: Orientation) -> bool {
    matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_split_halves_left_keeps_odd_column() {
        let mut img = RgbImage::new(5, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(4, 0, Rgb([0, 0, 255]));
        let (left, right) = split_halves(&DynamicImage::ImageRgb8(img));
        assert_eq!((left.width(), left.height()), (3, 2));
        assert_eq!((right.width(), right.height()), (2, 2));
        assert_eq!(left.to_rgb8().get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(right.to_rgb8().get_pixel(1, 0), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_unit_labels() {
        let unit = ImageUnit {
            path: PathBuf::from("/tmp/page01.png"),
            part: ImagePart::RightHalf,
        };
        assert_eq!(unit.label(), "page01.png (right)");
        assert_eq!(ImageUnit::whole("x/a.jpg").label(), "a.jpg");
    }

    #[test]
    fn test_unreadable_file_kept_whole() {
        let units = expand_units(&[PathBuf::from("/missing/file.png")], true);
        assert_eq!(units, vec![ImageUnit::whole("/missing/file.png")]);
    }
}
