//! Guide marks drawn on imposed sheets
//!
//! These functions generate PDF content stream operations; the page builder
//! appends them after the page content.

use crate::constants::{FOLD_GUIDE_DASH, FOLD_GUIDE_WIDTH};
use crate::layout::Rect;

/// Dashed vertical line at the horizontal centre of the sheet
pub fn fold_guide_ops(sheet_width: f32, sheet_height: f32) -> String {
    dashed_verticals(&[sheet_width / 2.0], 0.0, sheet_height)
}

/// Dashed fold lines on both edges of a cover spine; one line when the
/// spine has no width
pub fn spine_guide_ops(spine: &Rect) -> String {
    if spine.width > 0.0 {
        dashed_verticals(&[spine.x, spine.right()], spine.y, spine.top())
    } else {
        dashed_verticals(&[spine.x], spine.y, spine.top())
    }
}

fn dashed_verticals(xs: &[f32], bottom: f32, top: f32) -> String {
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", FOLD_GUIDE_WIDTH));
    ops.push_str(&format!(
        "[{} {}] 0 d\n",
        FOLD_GUIDE_DASH.0, FOLD_GUIDE_DASH.1
    ));

    for x in xs {
        ops.push_str(&format!("{} {} m {} {} l S\n", x, bottom, x, top));
    }

    ops.push_str("Q\n");
    ops
}

/// Solid outline around each region
pub fn region_border_ops(regions: &[Rect], line_width: f32) -> String {
    if regions.is_empty() || line_width <= 0.0 {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", line_width));
    for rect in regions {
        ops.push_str(&format!(
            "{} {} {} {} re S\n",
            rect.x, rect.y, rect.width, rect.height
        ));
    }
    ops.push_str("Q\n");
    ops
}
