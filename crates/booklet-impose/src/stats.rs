use crate::impose::{IMAGE_REGIONS_PER_SIDE, image_page_count, paginate_text, plan_pages};
use crate::options::BookletOptions;
use crate::render::PdfFont;
use crate::types::*;
use lopdf::Document;

/// Statistics for an image booklet of `source_units` logical images
pub fn calculate_statistics(
    source_units: usize,
    options: &BookletOptions,
) -> Result<ImpositionStatistics> {
    if source_units == 0 {
        return Err(ImposeError::NoPages);
    }
    let logical_pages = image_page_count(source_units, options);
    plan_statistics(source_units, logical_pages, IMAGE_REGIONS_PER_SIDE, options)
}

/// Statistics for a text booklet; paginates the text to count regions
pub fn text_statistics(text: &str, options: &BookletOptions) -> Result<ImpositionStatistics> {
    options.validate()?;
    let mut scratch = Document::with_version("1.7");
    let font = PdfFont::load(&mut scratch, options.text.font_path.as_deref())?;
    let regions = paginate_text(text, options, &font)?.len();
    if regions == 0 {
        return Err(ImposeError::NoPages);
    }
    plan_statistics(
        regions,
        options.leading_blanks + regions,
        options.text.regions_per_side,
        options,
    )
}

fn plan_statistics(
    source_units: usize,
    logical_pages: usize,
    regions_per_side: usize,
    options: &BookletOptions,
) -> Result<ImpositionStatistics> {
    let plan = plan_pages(logical_pages, options, regions_per_side)?;

    Ok(ImpositionStatistics {
        source_units,
        logical_pages,
        leading_blanks: options.leading_blanks,
        blank_pages_added: plan.padded_pages - logical_pages,
        signatures: plan.signatures,
        output_sheets: plan.sheet_count,
        output_pages: plan.output_pages(),
    })
}
