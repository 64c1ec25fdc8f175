//! In-memory compositing of four images into one 2x2 picture

use crate::layout::fit_pixels;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Compose up to four images into a 2x2 grid, row-major from the top-left.
///
/// A cell is as wide as the widest present image and as tall as the tallest,
/// scaled down uniformly to fit `max_cell`. The canvas is `(2w + d) x (2h + d)`
/// with `d`-pixel black dividers between cells. Each image is fitted and
/// centred in its cell. Returns `None` when no image is present.
pub fn compose_grid(
    cells: &[Option<DynamicImage>],
    divider_px: u32,
    max_cell: (u32, u32),
) -> Option<DynamicImage> {
    let (cell_w, cell_h) = cell_size(cells, max_cell)?;

    let canvas_w = cell_w * 2 + divider_px;
    let canvas_h = cell_h * 2 + divider_px;
    let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, WHITE);

    if divider_px > 0 {
        for y in 0..canvas_h {
            for x in cell_w..cell_w + divider_px {
                canvas.put_pixel(x, y, BLACK);
            }
        }
        for y in cell_h..cell_h + divider_px {
            for x in 0..canvas_w {
                canvas.put_pixel(x, y, BLACK);
            }
        }
    }

    for (index, cell) in cells.iter().take(4).enumerate() {
        let Some(img) = cell else { continue };
        let origin_x = (index as u32 % 2) * (cell_w + divider_px);
        let origin_y = (index as u32 / 2) * (cell_h + divider_px);

        let ((w, h), (dx, dy)) = fit_pixels((img.width(), img.height()), (cell_w, cell_h));
        if w == 0 || h == 0 {
            continue;
        }
        let resized = if (w, h) == (img.width(), img.height()) {
            img.to_rgb8()
        } else {
            img.resize_exact(w, h, FilterType::Lanczos3).to_rgb8()
        };
        imageops::replace(
            &mut canvas,
            &resized,
            i64::from(origin_x + dx),
            i64::from(origin_y + dy),
        );
    }

    Some(DynamicImage::ImageRgb8(canvas))
}

fn cell_size(cells: &[Option<DynamicImage>], max_cell: (u32, u32)) -> Option<(u32, u32)> {
    let (w, h) = cells
        .iter()
        .take(4)
        .flatten()
        .map(|img| (img.width(), img.height()))
        .reduce(|(aw, ah), (bw, bh)| (aw.max(bw), ah.max(bh)))?;
    if w == 0 || h == 0 {
        return None;
    }

    let limit = (max_cell.0.max(1), max_cell.1.max(1));
    if w <= limit.0 && h <= limit.1 {
        Some((w, h))
    } else {
        Some(fit_pixels((w, h), limit).0)
    }
}
