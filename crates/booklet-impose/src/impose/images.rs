//! Image booklets: landscape sheets with two regions per side

use super::strategy::{RegionContext, strategy_for};
use super::{finalize_document, plan_pages};
use crate::layout::region_rects;
use crate::marks::fold_guide_ops;
use crate::options::BookletOptions;
use crate::render::{PageBuilder, PdfFont};
use crate::source::ImageUnit;
use crate::types::*;
use lopdf::{Document, Object};
use log::{debug, info};

/// Regions per side of an image sheet (the two halves of the landscape sheet)
pub const IMAGE_REGIONS_PER_SIDE: usize = 2;

/// Logical pages needed for `units` images, leading blanks included
pub fn image_page_count(units: usize, options: &BookletOptions) -> usize {
    options.leading_blanks + units.div_ceil(options.density.images_per_region())
}

/// Impose logical images onto booklet sheets
pub fn impose_images(units: &[ImageUnit], options: &BookletOptions) -> Result<Document> {
    options.validate()?;
    if units.is_empty() {
        return Err(ImposeError::NoPages);
    }

    let strategy = strategy_for(options.density);
    let per_region = strategy.density().images_per_region();
    let total_pages = image_page_count(units.len(), options);
    let plan = plan_pages(total_pages, options, IMAGE_REGIONS_PER_SIDE)?;
    debug!(
        "{} images on {} logical pages, {} sheets",
        units.len(),
        total_pages,
        plan.sheet_count
    );

    let (sheet_width, sheet_height) = options.image_sheet_size_pt();
    let regions = region_rects(
        sheet_width,
        sheet_height,
        IMAGE_REGIONS_PER_SIDE,
        &options.margins,
    )?;

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut font = PdfFont::helvetica(&mut output);
    let mut page_refs = Vec::new();

    for (sheet_index, side) in plan.sides() {
        let mut page = PageBuilder::new(sheet_width, sheet_height);

        for (quadrant, logical) in plan.side_pages(sheet_index, side).into_iter().enumerate() {
            let Some(content) = logical.and_then(|p| p.checked_sub(options.leading_blanks + 1))
            else {
                continue;
            };
            let first = content * per_region;
            let last = (first + per_region).min(units.len());

            let mut ctx = RegionContext {
                output: &mut output,
                font: &mut font,
                options,
                first_image: first,
            };
            strategy.render(&mut ctx, &mut page, &regions[quadrant], &units[first..last])?;
        }

        if options.fold_guide {
            page.push_ops(fold_guide_ops(sheet_width, sheet_height));
        }

        let page_id = page.finish(&mut output, pages_tree_id);
        page_refs.push(Object::Reference(page_id));
        info!(
            "Rendered sheet {} {:?} ({}/{})",
            sheet_index + 1,
            side,
            page_refs.len(),
            plan.output_pages()
        );
    }

    font.finish(&mut output)?;
    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}
