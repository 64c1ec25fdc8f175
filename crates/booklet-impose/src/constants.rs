//! Shared constants for booklet imposition
//!
//! This module centralizes magic numbers and constants used throughout
//! planning, text flow and rendering.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Resolution ceiling for composited four-up pictures
pub const COMPOSITE_DPI: f32 = 300.0;

/// Pixels covering `pt` points at `dpi`
#[inline]
pub fn pt_to_px(pt: f32, dpi: f32) -> u32 {
    (pt / 72.0 * dpi).round().max(1.0) as u32
}

// =============================================================================
// Imposition
// =============================================================================

/// Logical pages carried by one folded sheet (two per side)
pub const PAGES_PER_SHEET: usize = 4;

/// Default number of sheets nested into one signature
pub const DEFAULT_SHEETS_PER_SIGNATURE: usize = 5;

// =============================================================================
// Marks
// =============================================================================

/// Dash pattern for the centre fold guide (on, off)
pub const FOLD_GUIDE_DASH: (f32, f32) = (5.0, 3.0);

/// Line width of the centre fold guide (points)
pub const FOLD_GUIDE_WIDTH: f32 = 1.0;

/// Default border / divider line width (points)
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Default divider thickness between the cells of a four-up composite (pixels)
pub const DEFAULT_CELL_DIVIDER_PX: u32 = 2;

// =============================================================================
// Page Numbers
// =============================================================================

/// Font size for page numbers (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 9.0;

/// Distance between the page number and the right edge of its region (points)
pub const PAGE_NUMBER_RIGHT_OFFSET: f32 = 10.0;

/// Distance between the page number baseline and the bottom of its region (points)
pub const PAGE_NUMBER_BOTTOM_OFFSET: f32 = 4.0;

/// Approximate width ratio of a Latin glyph, for font-independent estimates
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate width ratio of a full-width (CJK) glyph
pub const WIDE_CHAR_WIDTH_RATIO: f32 = 1.0;

// =============================================================================
// Text Flow
// =============================================================================

/// Default body font size (points)
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Default extra space between lines (points)
pub const DEFAULT_LINE_SPACING: f32 = 3.0;

/// Default inner margin of a text region (points)
pub const DEFAULT_TEXT_MARGIN: f32 = 10.0;

/// Default paragraph indent, in spaces
pub const DEFAULT_INDENT_SPACES: usize = 4;

/// Default heading size relative to the body font
pub const DEFAULT_HEADING_SCALE: f32 = 1.5;

/// Marker separating two paragraphs
pub const PARAGRAPH_BREAK: &str = "\n\n";

// =============================================================================
// Cover
// =============================================================================

/// Default width of the spine strip on a cover sheet (millimetres)
pub const DEFAULT_SPINE_MM: f32 = 5.0;

/// Spine text size relative to the spine width
pub const SPINE_TEXT_SIZE_RATIO: f32 = 0.4;

/// Gap between stacked spine characters relative to the text size
pub const SPINE_TEXT_GAP_RATIO: f32 = 0.2;

// =============================================================================
// Placeholders
// =============================================================================

/// Font size of the text drawn in place of an image that failed to load
pub const PLACEHOLDER_FONT_SIZE: f32 = 8.0;
