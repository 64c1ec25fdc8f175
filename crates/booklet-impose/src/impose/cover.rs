//! Cover sheets: a front image, an optional back image and the spine between
//!
//! The cover is one landscape page. The spine strip sits at the sheet centre
//! and every image is pressed against it, so the fold lines up with the inner
//! edge of each cover. Front and back share one height.

use super::finalize_document;
use crate::constants::{SPINE_TEXT_GAP_RATIO, SPINE_TEXT_SIZE_RATIO, mm_to_pt};
use crate::flow::TextMeasure;
use crate::layout::Rect;
use crate::marks::spine_guide_ops;
use crate::options::CoverOptions;
use crate::render::{PageBuilder, PdfFont, create_image_xobject};
use crate::source::{IMAGE_EXTENSIONS, load_oriented, require_file};
use crate::types::*;
use lopdf::{Document, Object};
use log::{debug, info, warn};
use std::path::Path;

/// Where the parts of a cover land on the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverLayout {
    pub spine: Rect,
    pub front: Rect,
    pub back: Option<Rect>,
}

/// Lay out images of the given pixel sizes around a centred spine.
///
/// The shared height is the tallest at which every image fits its half of
/// the sheet.
pub fn cover_layout(
    sheet_width: f32,
    sheet_height: f32,
    spine_width: f32,
    fold_direction: FoldDirection,
    front: (u32, u32),
    back: Option<(u32, u32)>,
) -> CoverLayout {
    let spine = Rect::new(
        (sheet_width - spine_width) / 2.0,
        0.0,
        spine_width,
        sheet_height,
    );
    let half = spine.x;

    let aspect = |(w, h): (u32, u32)| if h == 0 { 0.0 } else { w as f32 / h as f32 };
    let height = std::iter::once(front)
        .chain(back)
        .map(aspect)
        .filter(|&a| a > 0.0)
        .fold(sheet_height, |height, a| height.min(half / a));
    let y = (sheet_height - height) / 2.0;

    let beside_spine = |size: (u32, u32), on_right: bool| {
        let width = (aspect(size) * height).min(half);
        let x = if on_right { spine.right() } else { spine.x - width };
        Rect::new(x, y, width, height)
    };

    let front_on_right = matches!(fold_direction, FoldDirection::LeftStart);
    CoverLayout {
        spine,
        front: beside_spine(front, front_on_right),
        back: back.map(|size| beside_spine(size, !front_on_right)),
    }
}

/// One character of spine text and its baseline origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpineGlyph {
    pub ch: char,
    pub x: f32,
    pub y: f32,
}

/// Stack `text` down the spine, one character per row, centred both ways.
///
/// Returns the font size and the glyph origins.
pub fn spine_glyphs<M: TextMeasure + ?Sized>(
    spine: &Rect,
    text: &str,
    measure: &M,
) -> (f32, Vec<SpineGlyph>) {
    let size = spine.width * SPINE_TEXT_SIZE_RATIO;
    let gap = size * SPINE_TEXT_GAP_RATIO;
    let rows = text.chars().count();
    let total = rows as f32 * size + rows.saturating_sub(1) as f32 * gap;
    if total > spine.height {
        warn!(
            "Spine text is {:.1}pt tall but the spine is {:.1}pt; it will be clipped",
            total, spine.height
        );
    }

    let mut top = spine.center_y() + total / 2.0;
    let glyphs = text
        .chars()
        .map(|ch| {
            let x = spine.center_x() - measure.char_width(ch, size) / 2.0;
            let glyph = SpineGlyph { ch, x, y: top - size };
            top -= size + gap;
            glyph
        })
        .collect();
    (size, glyphs)
}

/// Build a one-page cover PDF
pub fn impose_cover(
    front: &Path,
    back: Option<&Path>,
    options: &CoverOptions,
) -> Result<Document> {
    options.validate()?;
    require_file(front, IMAGE_EXTENSIONS)?;
    if let Some(back) = back {
        require_file(back, IMAGE_EXTENSIONS)?;
    }

    let front_image = load_oriented(front)?;
    let back_image = back.map(load_oriented).transpose()?;

    let (sheet_width, sheet_height) = options.sheet_size_pt();
    let layout = cover_layout(
        sheet_width,
        sheet_height,
        mm_to_pt(options.spine_mm),
        options.fold_direction,
        (front_image.width(), front_image.height()),
        back_image.as_ref().map(|image| (image.width(), image.height())),
    );
    debug!("Cover layout: {:?}", layout);

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut font = PdfFont::load(&mut output, options.font_path.as_deref())?;
    let mut page = PageBuilder::new(sheet_width, sheet_height);

    let front_id = create_image_xobject(&mut output, &front_image)?;
    page.draw_image(front_id, &layout.front);
    if let (Some(image), Some(rect)) = (&back_image, &layout.back) {
        let back_id = create_image_xobject(&mut output, image)?;
        page.draw_image(back_id, rect);
    }

    let text = options.spine_text.trim();
    if !text.is_empty() {
        if layout.spine.width > 0.0 {
            let (size, glyphs) = spine_glyphs(&layout.spine, text, &font);
            for glyph in glyphs {
                let mut buf = [0u8; 4];
                let ch = glyph.ch.encode_utf8(&mut buf);
                page.draw_text(&mut font, size, glyph.x, glyph.y, ch);
            }
        } else {
            warn!("Spine text \"{}\" skipped: the spine has no width", text);
        }
    }

    if options.fold_guide {
        page.push_ops(spine_guide_ops(&layout.spine));
    }

    let page_id = page.finish(&mut output, pages_tree_id);
    font.finish(&mut output)?;
    finalize_document(&mut output, pages_tree_id, vec![Object::Reference(page_id)]);
    info!(
        "Rendered cover with {} image(s), spine {}mm",
        if back_image.is_some() { 2 } else { 1 },
        options.spine_mm
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ApproxMetrics;

    fn assert_near(actual: &Rect, expected: &Rect) {
        let close = |a: f32, b: f32| (a - b).abs() < 0.01;
        assert!(
            close(actual.x, expected.x)
                && close(actual.y, expected.y)
                && close(actual.width, expected.width)
                && close(actual.height, expected.height),
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_front_right_of_spine_for_left_start() {
        let layout = cover_layout(
            420.0,
            300.0,
            20.0,
            FoldDirection::LeftStart,
            (200, 300),
            Some((200, 300)),
        );
        assert_near(&layout.spine, &Rect::new(200.0, 0.0, 20.0, 300.0));
        // 200pt halves hold 2:3 images at full sheet height
        assert_near(&layout.front, &Rect::new(220.0, 0.0, 200.0, 300.0));
        assert_near(&layout.back.unwrap(), &Rect::new(0.0, 0.0, 200.0, 300.0));
    }

    #[test]
    fn test_right_start_swaps_sides() {
        let layout = cover_layout(420.0, 300.0, 20.0, FoldDirection::RightStart, (100, 300), None);
        assert!((layout.front.right() - 200.0).abs() < 0.01);
        assert!(layout.back.is_none());
    }

    #[test]
    fn test_wide_image_sets_shared_height() {
        // 400x200 must shrink to 200x100; the portrait back follows that height
        let layout = cover_layout(
            420.0,
            300.0,
            20.0,
            FoldDirection::LeftStart,
            (400, 200),
            Some((100, 200)),
        );
        assert_near(&layout.front, &Rect::new(220.0, 100.0, 200.0, 100.0));
        assert_near(&layout.back.unwrap(), &Rect::new(150.0, 100.0, 50.0, 100.0));
    }

    #[test]
    fn test_spine_glyphs_centred() {
        let spine = Rect::new(200.0, 0.0, 25.0, 300.0);
        let (size, glyphs) = spine_glyphs(&spine, "书名", &ApproxMetrics);
        assert!((size - 10.0).abs() < 0.001);
        assert_eq!(glyphs.len(), 2);
        // Two 10pt rows and a 2pt gap, centred on y = 150
        assert!((glyphs[0].y - 151.0).abs() < 0.001);
        assert!((glyphs[1].y - 139.0).abs() < 0.001);
        assert!(glyphs.iter().all(|g| (g.x - 207.5).abs() < 0.001));
    }
}
