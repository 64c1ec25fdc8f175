//! Booklet imposition - placing content on printable sheets
//!
//! This module orchestrates the imposition process:
//! 1. Read the input into logical units (images or text regions)
//! 2. Plan where every logical page lands
//! 3. Draw each sheet side with its regions and guide marks
//! 4. Assemble the output PDF

mod cover;
mod images;
mod io;
mod strategy;
mod text;

pub use cover::{CoverLayout, SpineGlyph, cover_layout, impose_cover, spine_glyphs};
pub use images::{IMAGE_REGIONS_PER_SIDE, image_page_count, impose_images};
pub use io::save_pdf;
pub use strategy::{FourUp, RegionContext, RegionStrategy, SingleUp, TwoUp, strategy_for};
pub use text::{impose_text, paginate_text, text_regions};

use crate::layout::{PlacementPlan, plan_booklet, plan_spreads};
use crate::options::BookletOptions;
use crate::source::{collect_images, expand_units, read_epub, read_text, require_file};
use crate::types::*;
use log::info;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Impose an image directory or a single image file
pub fn impose_image_input(input: &Path, options: &BookletOptions) -> Result<Document> {
    options.validate()?;
    let paths = collect_images(input)?;
    let units = expand_units(&paths, options.split_landscape);
    info!(
        "Found {} images ({} logical images)",
        paths.len(),
        units.len()
    );
    impose_images(&units, options)
}

/// Impose a `.txt` or `.epub` file
pub fn impose_text_input(input: &Path, options: &BookletOptions) -> Result<Document> {
    options.validate()?;
    let text = read_text_input(input)?;
    info!("Read {} characters of text", text.chars().count());
    impose_text(&text, options)
}

/// Read a `.txt` or `.epub` file into one string
pub fn read_text_input(input: &Path) -> Result<String> {
    require_file(input, &["txt", "epub"])?;
    let is_epub = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"));
    if is_epub {
        read_epub(input)
    } else {
        read_text(input)
    }
}

/// Placement plan for the configured page order
pub fn plan_pages(
    total_pages: usize,
    options: &BookletOptions,
    regions_per_side: usize,
) -> Result<PlacementPlan> {
    match options.page_order {
        PageOrder::Booklet => plan_booklet(
            total_pages,
            options.sheets_per_signature,
            options.fold_direction,
            regions_per_side,
        ),
        PageOrder::Spread => plan_spreads(total_pages, options.fold_direction, regions_per_side),
    }
}

/// Create pages tree and catalog, finalize document structure
pub(crate) fn finalize_document(
    output: &mut Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
