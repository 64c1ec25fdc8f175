//! How the images of one region are drawn, per density

use crate::constants::{COMPOSITE_DPI, PLACEHOLDER_FONT_SIZE, pt_to_px};
use crate::flow::TextMeasure;
use crate::layout::{Rect, cell_rects, fit_rect};
use crate::options::BookletOptions;
use crate::render::{PageBuilder, PdfFont, create_image_xobject};
use crate::source::{ImageUnit, compose_grid};
use crate::types::*;
use image::DynamicImage;
use lopdf::Document;
use log::warn;

/// Shared state while drawing one region
pub struct RegionContext<'a> {
    pub output: &'a mut Document,
    pub font: &'a mut PdfFont,
    pub options: &'a BookletOptions,
    /// Index of the region's first image in the whole book
    pub first_image: usize,
}

impl RegionContext<'_> {
    fn page_number(&self, offset: usize) -> Option<i64> {
        let numbering = &self.options.page_numbers;
        numbering
            .enabled
            .then(|| numbering.start + (self.first_image + offset) as i64)
    }

    fn load(&self, unit: &ImageUnit) -> Option<DynamicImage> {
        match unit.load() {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Cannot load {}: {}", unit.label(), e);
                None
            }
        }
    }
}

/// Draws a region that carries `density` images
pub trait RegionStrategy {
    fn density(&self) -> Density;

    /// Draw `images` (at most `density` of them) into `region`
    fn render(
        &self,
        ctx: &mut RegionContext<'_>,
        page: &mut PageBuilder,
        region: &Rect,
        images: &[ImageUnit],
    ) -> Result<()>;
}

/// Strategy for a density setting
pub fn strategy_for(density: Density) -> Box<dyn RegionStrategy> {
    match density {
        Density::One => Box::new(SingleUp),
        Density::Two => Box::new(TwoUp),
        Density::Four => Box::new(FourUp),
    }
}

// =============================================================================
// One and Two Images
// =============================================================================

/// One image fitted to the whole region
pub struct SingleUp;

/// Two images stacked, top then bottom
pub struct TwoUp;

impl RegionStrategy for SingleUp {
    fn density(&self) -> Density {
        Density::One
    }

    fn render(
        &self,
        ctx: &mut RegionContext<'_>,
        page: &mut PageBuilder,
        region: &Rect,
        images: &[ImageUnit],
    ) -> Result<()> {
        render_cells(ctx, page, &cell_rects(region, Density::One), images)
    }
}

impl RegionStrategy for TwoUp {
    fn density(&self) -> Density {
        Density::Two
    }

    fn render(
        &self,
        ctx: &mut RegionContext<'_>,
        page: &mut PageBuilder,
        region: &Rect,
        images: &[ImageUnit],
    ) -> Result<()> {
        render_cells(ctx, page, &cell_rects(region, Density::Two), images)
    }
}

fn render_cells(
    ctx: &mut RegionContext<'_>,
    page: &mut PageBuilder,
    cells: &[Rect],
    images: &[ImageUnit],
) -> Result<()> {
    for (offset, (cell, unit)) in cells.iter().zip(images).enumerate() {
        match ctx.load(unit) {
            Some(image) => {
                let placement = fit_rect(image.width() as f32, image.height() as f32, cell);
                let xobject_id = create_image_xobject(ctx.output, &image)?;
                page.draw_image(xobject_id, &placement.rect);
            }
            None => draw_placeholder(ctx.font, page, cell, &unit.label()),
        }
        if let Some(number) = ctx.page_number(offset) {
            page.draw_page_number(ctx.font, cell, number);
        }
    }
    Ok(())
}

// =============================================================================
// Four Images
// =============================================================================

/// Four images composited into one 2x2 picture, fitted to the region
pub struct FourUp;

impl RegionStrategy for FourUp {
    fn density(&self) -> Density {
        Density::Four
    }

    fn render(
        &self,
        ctx: &mut RegionContext<'_>,
        page: &mut PageBuilder,
        region: &Rect,
        images: &[ImageUnit],
    ) -> Result<()> {
        let loaded: Vec<Option<DynamicImage>> =
            images.iter().take(4).map(|unit| ctx.load(unit)).collect();

        // One grid cell of the region at the composite resolution
        let max_cell = (
            pt_to_px(region.width / 2.0, COMPOSITE_DPI),
            pt_to_px(region.height / 2.0, COMPOSITE_DPI),
        );
        let cells = match compose_grid(&loaded, ctx.options.cell_divider_px, max_cell) {
            Some(grid) => {
                let placement = fit_rect(grid.width() as f32, grid.height() as f32, region);
                let xobject_id = create_image_xobject(ctx.output, &grid)?;
                page.draw_image(xobject_id, &placement.rect);
                cell_rects(&placement.rect, Density::Four)
            }
            None => cell_rects(region, Density::Four),
        };

        for (offset, (cell, unit)) in cells.iter().zip(images).enumerate() {
            if loaded[offset].is_none() {
                draw_placeholder(ctx.font, page, cell, &unit.label());
            }
            if let Some(number) = ctx.page_number(offset) {
                page.draw_page_number(ctx.font, cell, number);
            }
        }
        Ok(())
    }
}

/// Centred note standing in for an image that could not be decoded
fn draw_placeholder(font: &mut PdfFont, page: &mut PageBuilder, cell: &Rect, label: &str) {
    let text = format!("[missing: {}]", label);
    let width = font.text_width(&text, PLACEHOLDER_FONT_SIZE);
    let x = (cell.center_x() - width / 2.0).max(cell.x);
    let y = cell.center_y() - PLACEHOLDER_FONT_SIZE / 2.0;
    page.draw_text(font, PLACEHOLDER_FONT_SIZE, x, y, &text);
}
