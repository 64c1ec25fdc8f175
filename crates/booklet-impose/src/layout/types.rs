//! Layout data types for imposition
//!
//! These types sit between the signature planner and PDF rendering.

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Outer face of the folded sheet (printed first in duplex)
    Front,
    /// Inner face of the folded sheet (printed second in duplex)
    Back,
}

/// The four logical pages carried by one folded sheet, 1-based and local
/// to their signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetPageSet {
    pub back_outside: usize,
    pub front_outside: usize,
    pub front_inside: usize,
    pub back_inside: usize,
}

impl SheetPageSet {
    /// Pages as `(backOutside, frontOutside, frontInside, backInside)`
    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (
            self.back_outside,
            self.front_outside,
            self.front_inside,
            self.back_inside,
        )
    }

    pub fn pages(&self) -> [usize; 4] {
        [
            self.back_outside,
            self.front_outside,
            self.front_inside,
            self.back_inside,
        ]
    }

    /// Shift local numbering by a signature offset
    pub fn offset(&self, by: usize) -> Self {
        Self {
            back_outside: self.back_outside + by,
            front_outside: self.front_outside + by,
            front_inside: self.front_inside + by,
            back_inside: self.back_inside + by,
        }
    }
}

/// One `(sheet, side, quadrant)` position and the logical page it carries.
///
/// Quadrants are numbered left to right, then top to bottom: with two
/// regions per side `0` is left and `1` right; with four, `0..4` are
/// top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSlot {
    pub sheet_index: usize,
    pub side: SheetSide,
    pub quadrant: usize,
    /// 1-based logical page, `None` for padding
    pub page: Option<usize>,
}

/// The complete placement plan of a document.
///
/// Slots are stored in print order: sheet 0 front, sheet 0 back, sheet 1
/// front and so on, quadrants ascending within a side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlacementPlan {
    pub regions_per_side: usize,
    pub sheet_count: usize,
    /// Logical pages that carry content or requested blanks
    pub total_pages: usize,
    /// Logical pages after padding
    pub padded_pages: usize,
    /// Number of signatures, when the plan folds sheets into signatures
    pub signatures: Option<usize>,
    pub slots: Vec<PlacementSlot>,
}

impl PlacementPlan {
    /// Pages of one side in quadrant order
    pub fn side_pages(&self, sheet_index: usize, side: SheetSide) -> Vec<Option<usize>> {
        self.slots
            .iter()
            .filter(|s| s.sheet_index == sheet_index && s.side == side)
            .map(|s| s.page)
            .collect()
    }

    /// Every printed side in print order
    pub fn sides(&self) -> impl Iterator<Item = (usize, SheetSide)> + '_ {
        (0..self.sheet_count)
            .flat_map(|sheet| [(sheet, SheetSide::Front), (sheet, SheetSide::Back)])
    }

    /// Number of PDF pages the plan renders to
    pub fn output_pages(&self) -> usize {
        self.sheet_count * 2
    }

    /// Find the slot carrying a logical page
    pub fn slot_for_page(&self, page: usize) -> Option<&PlacementSlot> {
        self.slots.iter().find(|s| s.page == Some(page))
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// True when `other` lies entirely inside this rect (with a small tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

/// Final placement of scaled content inside a target rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform scale applied to the source size
    pub scale: f32,
    /// Where the scaled content lands
    pub rect: Rect,
}
