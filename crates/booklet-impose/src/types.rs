use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("EPUB error: {0}")]
    Epub(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("No pages to impose")]
    NoPages,
}

impl From<zip::result::ZipError> for ImposeError {
    fn from(err: zip::result::ZipError) -> Self {
        ImposeError::Epub(err.to_string())
    }
}

impl From<quick_xml::Error> for ImposeError {
    fn from(err: quick_xml::Error) -> Self {
        ImposeError::Epub(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Physical sheet sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    A6,
}

impl PaperSize {
    /// Get base dimensions (always portrait)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::A6 => (105.0, 148.0),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Which way the finished booklet opens.
///
/// Only the presentation order of the four slots on a sheet changes; page
/// numbering is the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldDirection {
    /// Pages turn right to left, spine on the left (`[4, 1, 2, 3]`)
    #[default]
    LeftStart,
    /// Pages turn left to right, spine on the right (`[1, 4, 3, 2]`)
    RightStart,
}

/// Number of images drawn inside one region (half sheet side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Density {
    #[default]
    One,
    Two,
    Four,
}

impl Density {
    pub fn images_per_region(self) -> usize {
        match self {
            Density::One => 1,
            Density::Two => 2,
            Density::Four => 4,
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Density::One),
            2 => Some(Density::Two),
            4 => Some(Density::Four),
            _ => None,
        }
    }
}

/// How logical pages are assigned to sheet sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrder {
    /// Folded signatures (grayscale booklet printing)
    #[default]
    Booklet,
    /// Consecutive reading spreads, one per side, no folding (colour printing)
    Spread,
}

/// Margins of a sheet side, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetMargins {
    /// Outer left edge
    pub left_mm: f32,
    /// Outer right edge
    pub right_mm: f32,
    /// Space left on each side of the centre fold
    pub gutter_mm: f32,
}

impl Default for SheetMargins {
    fn default() -> Self {
        Self {
            left_mm: 0.0,
            right_mm: 0.0,
            // 18pt
            gutter_mm: 6.35,
        }
    }
}

impl SheetMargins {
    /// Same margin on the outer edges and at the fold
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            left_mm: margin_mm,
            right_mm: margin_mm,
            gutter_mm: margin_mm,
        }
    }
}

/// Page number printing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageNumbering {
    pub enabled: bool,
    /// Number printed on the first content page
    pub start: i64,
}

impl Default for PageNumbering {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 1,
        }
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Content units (images after splitting, or text regions)
    pub source_units: usize,
    /// Logical pages handed to the planner, including leading blanks
    pub logical_pages: usize,
    /// Blank logical pages requested before the content
    pub leading_blanks: usize,
    /// Blank logical pages appended to fill the last signature
    pub blank_pages_added: usize,
    /// Number of signatures (booklet order only)
    pub signatures: Option<usize>,
    /// Physical sheets to print
    pub output_sheets: usize,
    /// PDF pages (sheet sides)
    pub output_pages: usize,
}
