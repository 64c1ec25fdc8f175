//! Region and cell geometry
//!
//! A sheet side is split into regions (one per logical page): two side by
//! side, or a 2x2 grid. A region can be split further into cells when it
//! carries several images.

use crate::constants::mm_to_pt;
use crate::types::{Density, ImposeError, Result, SheetMargins};

use super::Rect;

// =============================================================================
// Regions
// =============================================================================

/// Region rects of one sheet side, in quadrant order.
///
/// Horizontally, each half of the sheet loses the outer margin on its own
/// edge and the gutter on the fold side. Rows split the height evenly.
pub fn region_rects(
    sheet_width_pt: f32,
    sheet_height_pt: f32,
    regions_per_side: usize,
    margins: &SheetMargins,
) -> Result<Vec<Rect>> {
    let rows = match regions_per_side {
        2 => 1,
        4 => 2,
        n => {
            return Err(ImposeError::Layout(format!(
                "A sheet side holds 2 or 4 regions, got {}",
                n
            )));
        }
    };

    let half = sheet_width_pt / 2.0;
    let gutter = mm_to_pt(margins.gutter_mm);
    let left = mm_to_pt(margins.left_mm);
    let right = mm_to_pt(margins.right_mm);

    let left_width = half - gutter - left;
    let right_width = half - gutter - right;
    if left_width <= 0.0 || right_width <= 0.0 {
        return Err(ImposeError::Layout(format!(
            "Margins leave no room on a {:.0}pt wide sheet",
            sheet_width_pt
        )));
    }

    let row_height = sheet_height_pt / rows as f32;
    let mut rects = Vec::with_capacity(regions_per_side);
    for row in 0..rows {
        // Row 0 is the top of the sheet
        let y = sheet_height_pt - (row + 1) as f32 * row_height;
        rects.push(Rect::new(left, y, left_width, row_height));
        rects.push(Rect::new(half + gutter, y, right_width, row_height));
    }
    Ok(rects)
}

// =============================================================================
// Cells
// =============================================================================

/// Cells of a region for the given density.
///
/// One image uses the whole region, two stack top then bottom, four fill a
/// 2x2 grid row-major from the top-left.
pub fn cell_rects(region: &Rect, density: Density) -> Vec<Rect> {
    match density {
        Density::One => vec![*region],
        Density::Two => {
            let h = region.height / 2.0;
            vec![
                Rect::new(region.x, region.y + h, region.width, h),
                Rect::new(region.x, region.y, region.width, h),
            ]
        }
        Density::Four => {
            let w = region.width / 2.0;
            let h = region.height / 2.0;
            vec![
                Rect::new(region.x, region.y + h, w, h),
                Rect::new(region.x + w, region.y + h, w, h),
                Rect::new(region.x, region.y, w, h),
                Rect::new(region.x + w, region.y, w, h),
            ]
        }
    }
}
