use booklet_impose::flow::*;
use booklet_impose::impose::{paginate_text, text_regions};
use booklet_impose::*;

fn sample_text() -> String {
    let mut text = String::from("第一章 开始\n\n");
    for i in 0..40 {
        text.push_str(&format!(
            "Paragraph {} has a few words that wrap across lines in a narrow region.",
            i
        ));
        text.push_str("\n\n");
    }
    text.push_str("第二回\n");
    text.push_str(&"中文内容测试。".repeat(60));
    text
}

fn geometry(width: f32, height: f32) -> RegionGeometry {
    RegionGeometry::new(width, height, &TextOptions::default())
}

#[test]
fn test_regions_partition_the_text() {
    let text = sample_text();
    let regions = paginate(&text, &geometry(150.0, 200.0), &ApproxMetrics).unwrap();

    let mut cursor = 0;
    for region in &regions {
        assert_eq!(region.start, cursor);
        assert!(region.end > region.start);
        cursor = region.end;
    }
    assert_eq!(cursor, text.len());
    assert!(regions[..regions.len() - 1].iter().all(|r| r.has_more));
    assert!(!regions.last().unwrap().has_more);
}

#[test]
fn test_lines_fit_inside_region() {
    let text = sample_text();
    let g = geometry(150.0, 200.0);
    let regions = paginate(&text, &g, &ApproxMetrics).unwrap();

    for region in &regions {
        for line in &region.lines {
            let width = ApproxMetrics.text_width(line.text(&text), line.font_size);
            assert!(line.x_offset + width <= g.inner_width() + 0.001);
            assert!(line.baseline <= g.height - g.margin);
        }
    }
}

#[test]
fn test_wide_latin_glyphs_stay_inside_region() {
    let text = "W".repeat(64);
    let g = RegionGeometry {
        indent_spaces: 0,
        ..geometry(100.0, 400.0)
    };
    let regions = paginate(&text, &g, &HelveticaMetrics).unwrap();

    let lines: Vec<_> = regions.iter().flat_map(|r| r.lines.iter()).collect();
    for line in &lines {
        let width = HelveticaMetrics.text_width(line.text(&text), line.font_size);
        assert!(width <= g.inner_width() + 0.001, "{} > {}", width, g.inner_width());
    }
    // 80pt inner width takes eight 9.44pt glyphs
    assert_eq!(lines[1].text(&text), "WWWWWWWW");
}

#[test]
fn test_resume_from_cursor_matches_single_pass() {
    let text = sample_text();
    let g = geometry(150.0, 200.0);
    let first = layout_region(&text, 0, &g, &ApproxMetrics);
    let second = layout_region(&text, first.end, &g, &ApproxMetrics);

    let regions = paginate(&text, &g, &ApproxMetrics).unwrap();
    assert_eq!(regions[0], first);
    assert_eq!(regions[1], second);
}

#[test]
fn test_chapter_markers_become_headings() {
    let text = sample_text();
    let regions = paginate(&text, &geometry(150.0, 200.0), &ApproxMetrics).unwrap();
    let headings: Vec<&str> = regions
        .iter()
        .flat_map(|r| &r.lines)
        .filter(|l| l.kind == LineKind::Heading)
        .map(|l| l.text(&text))
        .collect();
    assert_eq!(headings, vec!["第一章 开始", "第二回"]);
}

#[test]
fn test_heading_detection() {
    assert!(is_chapter_heading("第十二章 风起"));
    assert!(is_chapter_heading("３回"));
    assert!(!is_chapter_heading("第一个人"));
    assert!(!is_chapter_heading("Chapter 1"));
}

#[test]
fn test_booklet_text_uses_smallest_region() {
    let text = sample_text();
    let mut options = BookletOptions::default();
    options.text.sheet_margins = SheetMargins {
        left_mm: 20.0,
        right_mm: 0.0,
        gutter_mm: 0.0,
    };

    let regions = text_regions(&options).unwrap();
    let narrowest = regions.iter().map(|r| r.width).fold(f32::INFINITY, f32::min);
    let layouts = paginate_text(&text, &options, &ApproxMetrics).unwrap();

    let expected = paginate(
        &text,
        &RegionGeometry::new(narrowest, regions[0].height, &options.text),
        &ApproxMetrics,
    )
    .unwrap();
    assert_eq!(layouts, expected);
}

#[test]
fn test_spread_text_follows_region_width() {
    let text = sample_text();
    let mut options = BookletOptions {
        page_order: PageOrder::Spread,
        ..Default::default()
    };
    options.text.sheet_margins = SheetMargins {
        left_mm: 30.0,
        right_mm: 0.0,
        gutter_mm: 0.0,
    };

    let regions = text_regions(&options).unwrap();
    assert!(regions[0].width < regions[1].width);

    let layouts = paginate_text(&text, &options, &ApproxMetrics).unwrap();
    // The first region is the narrow top-left one, the second the wide
    // top-right one
    let first = layout_region(
        &text,
        0,
        &RegionGeometry::new(regions[0].width, regions[0].height, &options.text),
        &ApproxMetrics,
    );
    let second = layout_region(
        &text,
        first.end,
        &RegionGeometry::new(regions[1].width, regions[1].height, &options.text),
        &ApproxMetrics,
    );
    assert_eq!(layouts[0], first);
    assert_eq!(layouts[1], second);
}
