use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete booklet configuration.
///
/// One immutable value is built up front (from CLI flags or a JSON file)
/// and passed by reference through planning and rendering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Output sheet
    pub paper_size: PaperSize,

    // Arrangement
    pub density: Density,
    pub sheets_per_signature: usize,
    pub fold_direction: FoldDirection,
    pub page_order: PageOrder,

    // Geometry
    pub margins: SheetMargins,
    pub line_width_pt: f32,
    pub cell_divider_px: u32,

    // Page numbering
    pub page_numbers: PageNumbering,

    // Content adjustments
    pub leading_blanks: usize,
    pub split_landscape: bool,

    // Marks
    pub fold_guide: bool,

    // Text / EPUB flow
    pub text: TextOptions,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            density: Density::One,
            sheets_per_signature: DEFAULT_SHEETS_PER_SIGNATURE,
            fold_direction: FoldDirection::LeftStart,
            page_order: PageOrder::Booklet,
            margins: SheetMargins::default(),
            line_width_pt: DEFAULT_LINE_WIDTH,
            cell_divider_px: DEFAULT_CELL_DIVIDER_PX,
            page_numbers: PageNumbering::default(),
            leading_blanks: 0,
            split_landscape: false,
            fold_guide: true,
            text: TextOptions::default(),
        }
    }
}

/// Options for flowing text into regions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextOptions {
    pub font_size: f32,
    pub line_spacing: f32,
    /// Inner margin of every region (points)
    pub margin_pt: f32,
    pub indent_spaces: usize,
    pub heading_scale: f32,
    /// 2 (landscape sheet, left/right) or 4 (portrait sheet, 2x2)
    pub regions_per_side: usize,
    /// TrueType font to embed; Helvetica is used when absent
    pub font_path: Option<PathBuf>,
    pub draw_borders: bool,
    pub sheet_margins: SheetMargins,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            margin_pt: DEFAULT_TEXT_MARGIN,
            indent_spaces: DEFAULT_INDENT_SPACES,
            heading_scale: DEFAULT_HEADING_SCALE,
            regions_per_side: 4,
            font_path: None,
            draw_borders: true,
            sheet_margins: SheetMargins::uniform(0.0),
        }
    }
}

impl TextOptions {
    /// Orientation of the sheet carrying `regions_per_side` text regions
    pub fn sheet_orientation(&self) -> Orientation {
        if self.regions_per_side == 2 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.font_size <= 0.0 {
            return Err(ImposeError::Config(
                "Font size must be greater than zero".to_string(),
            ));
        }
        if self.line_spacing < 0.0 || self.margin_pt < 0.0 {
            return Err(ImposeError::Config(
                "Line spacing and text margin cannot be negative".to_string(),
            ));
        }
        if self.heading_scale < 1.0 {
            return Err(ImposeError::Config(
                "Heading scale must be at least 1.0".to_string(),
            ));
        }
        if self.regions_per_side != 2 && self.regions_per_side != 4 {
            return Err(ImposeError::Config(format!(
                "Text regions per side must be 2 or 4, got {}",
                self.regions_per_side
            )));
        }
        validate_margins(&self.sheet_margins)
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.sheets_per_signature == 0 {
            return Err(ImposeError::Config(
                "Sheets per signature must be at least 1".to_string(),
            ));
        }

        if self.line_width_pt < 0.0 {
            return Err(ImposeError::Config(
                "Line width cannot be negative".to_string(),
            ));
        }

        validate_margins(&self.margins)?;
        self.text.validate()
    }

    /// Output sheet size in points for image booklets (always landscape,
    /// two regions side by side)
    pub fn image_sheet_size_pt(&self) -> (f32, f32) {
        let (w, h) = self
            .paper_size
            .dimensions_with_orientation(Orientation::Landscape);
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Output sheet size in points for text booklets
    pub fn text_sheet_size_pt(&self) -> (f32, f32) {
        let (w, h) = self
            .paper_size
            .dimensions_with_orientation(self.text.sheet_orientation());
        (mm_to_pt(w), mm_to_pt(h))
    }
}

/// Options for a cover sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoverOptions {
    pub paper_size: PaperSize,
    /// Left-start books carry the front cover on the right half
    pub fold_direction: FoldDirection,
    /// Width of the spine strip between back and front (millimetres)
    pub spine_mm: f32,
    /// Printed down the spine, one character per row
    pub spine_text: String,
    /// TrueType font for the spine text; Helvetica is used when absent
    pub font_path: Option<PathBuf>,
    /// Dashed lines on the spine edges
    pub fold_guide: bool,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            fold_direction: FoldDirection::LeftStart,
            spine_mm: DEFAULT_SPINE_MM,
            spine_text: String::new(),
            font_path: None,
            fold_guide: true,
        }
    }
}

impl CoverOptions {
    /// Cover sheets are always landscape
    pub fn sheet_size_pt(&self) -> (f32, f32) {
        let (w, h) = self
            .paper_size
            .dimensions_with_orientation(Orientation::Landscape);
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn validate(&self) -> Result<()> {
        let (sheet_width_mm, _) = self
            .paper_size
            .dimensions_with_orientation(Orientation::Landscape);
        if self.spine_mm < 0.0 || self.spine_mm >= sheet_width_mm {
            return Err(ImposeError::Config(format!(
                "Spine width must be between 0 and {}mm, got {}mm",
                sheet_width_mm, self.spine_mm
            )));
        }
        Ok(())
    }
}

fn validate_margins(margins: &SheetMargins) -> Result<()> {
    if margins.left_mm < 0.0 || margins.right_mm < 0.0 || margins.gutter_mm < 0.0 {
        return Err(ImposeError::Config(
            "Margins cannot be negative".to_string(),
        ));
    }
    Ok(())
}
