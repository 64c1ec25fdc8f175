//! Text booklets: the paginator's regions placed like logical pages

use super::{finalize_document, plan_pages};
use crate::flow::{RegionGeometry, RegionLayout, TextMeasure, paginate, paginate_with};
use crate::layout::{Rect, region_rects, spread_position};
use crate::marks::{fold_guide_ops, region_border_ops};
use crate::options::BookletOptions;
use crate::render::{PageBuilder, PdfFont};
use crate::types::*;
use lopdf::{Document, Object};
use log::{debug, info};

/// Region rects of a text sheet side
pub fn text_regions(options: &BookletOptions) -> Result<Vec<Rect>> {
    let (sheet_width, sheet_height) = options.text_sheet_size_pt();
    region_rects(
        sheet_width,
        sheet_height,
        options.text.regions_per_side,
        &options.text.sheet_margins,
    )
}

/// Split text into regions.
///
/// Spread order knows where every region lands, so each one gets its own
/// geometry. Booklet order only learns positions once the region count is
/// known, so every region uses the smallest one.
pub fn paginate_text<M: TextMeasure + ?Sized>(
    text: &str,
    options: &BookletOptions,
    measure: &M,
) -> Result<Vec<RegionLayout>> {
    let regions = text_regions(options)?;
    let geometry_of = |rect: &Rect| RegionGeometry::new(rect.width, rect.height, &options.text);

    match options.page_order {
        PageOrder::Booklet => {
            let width = regions.iter().map(|r| r.width).fold(f32::INFINITY, f32::min);
            let height = regions.iter().map(|r| r.height).fold(f32::INFINITY, f32::min);
            paginate(text, &geometry_of(&Rect::new(0.0, 0.0, width, height)), measure)
        }
        PageOrder::Spread => paginate_with(
            text,
            |index| {
                let page = options.leading_blanks + index + 1;
                let (_, _, quadrant) = spread_position(
                    page,
                    options.fold_direction,
                    options.text.regions_per_side,
                );
                geometry_of(&regions[quadrant])
            },
            measure,
        ),
    }
}

/// Impose text onto booklet sheets
pub fn impose_text(text: &str, options: &BookletOptions) -> Result<Document> {
    options.validate()?;
    if text.trim().is_empty() {
        return Err(ImposeError::Input("No text to lay out".to_string()));
    }

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut font = PdfFont::load(&mut output, options.text.font_path.as_deref())?;

    let layouts = paginate_text(text, options, &font)?;
    let regions_per_side = options.text.regions_per_side;
    let total_pages = options.leading_blanks + layouts.len();
    let plan = plan_pages(total_pages, options, regions_per_side)?;
    debug!(
        "{} text regions on {} logical pages, {} sheets",
        layouts.len(),
        total_pages,
        plan.sheet_count
    );

    let (sheet_width, sheet_height) = options.text_sheet_size_pt();
    let regions = text_regions(options)?;
    let mut page_refs = Vec::new();

    for (sheet_index, side) in plan.sides() {
        let mut page = PageBuilder::new(sheet_width, sheet_height);

        for (quadrant, logical) in plan.side_pages(sheet_index, side).into_iter().enumerate() {
            let Some(content) = logical.and_then(|p| p.checked_sub(options.leading_blanks + 1))
            else {
                continue;
            };
            let rect = &regions[quadrant];
            draw_region(&mut page, &mut font, text, &layouts[content], rect, options);

            if options.page_numbers.enabled {
                let number = options.page_numbers.start + content as i64;
                page.draw_page_number(&mut font, rect, number);
            }
        }

        if options.text.draw_borders {
            page.push_ops(region_border_ops(&regions, options.line_width_pt));
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

/// Draw the lines of one region; baselines are measured from its top edge
fn draw_region(
    page: &mut PageBuilder,
    font: &mut PdfFont,
    text: &str,
    layout: &RegionLayout,
    rect: &Rect,
    options: &BookletOptions,
) {
    let margin = options.text.margin_pt;
    for line in &layout.lines {
        let content = line.text(text);
        if content.trim().is_empty() {
            continue;
        }
        let x = rect.x + margin + line.x_offset;
        let y = rect.top() - line.baseline;
        page.draw_text(font, line.font_size, x, y, content);
    }
}
