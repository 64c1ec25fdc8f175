//! Region-by-region text flow
//!
//! [`layout_region`] fills one fixed-size region with as many whole lines as
//! fit and returns the byte offset where the next region continues. Calling
//! it again from that offset until `has_more` is false consumes the text
//! exactly once.
//!
//! Not every consumed byte is drawn: line-ending newlines, a space that
//! overflows the line it would close, and the whitespace around a heading
//! line are skipped between one line's `end` and the next line's `start`.

use crate::constants::PARAGRAPH_BREAK;
use crate::options::TextOptions;
use crate::types::{ImposeError, Result};
use log::debug;

use super::TextMeasure;
use super::heading::is_chapter_heading;

// =============================================================================
// Types
// =============================================================================

/// Size and typography of one text region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGeometry {
    /// Region width in points
    pub width: f32,
    /// Region height in points
    pub height: f32,
    /// Inner margin on all four edges
    pub margin: f32,
    /// Body font size
    pub font_size: f32,
    /// Extra space below every line
    pub line_spacing: f32,
    /// Paragraph indent, in spaces
    pub indent_spaces: usize,
    /// Heading size relative to the body font
    pub heading_scale: f32,
}

impl RegionGeometry {
    pub fn new(width: f32, height: f32, text: &TextOptions) -> Self {
        Self {
            width,
            height,
            margin: text.margin_pt,
            font_size: text.font_size,
            line_spacing: text.line_spacing,
            indent_spaces: text.indent_spaces,
            heading_scale: text.heading_scale,
        }
    }

    pub fn inner_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn inner_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    pub fn line_height(&self) -> f32 {
        self.font_size + self.line_spacing
    }

    pub fn heading_size(&self) -> f32 {
        self.font_size * self.heading_scale
    }

    pub fn heading_line_height(&self) -> f32 {
        self.heading_size() + self.line_spacing
    }

    /// A region must hold at least one body line
    pub fn validate(&self) -> Result<()> {
        if self.font_size <= 0.0 {
            return Err(ImposeError::Config(
                "Font size must be greater than zero".to_string(),
            ));
        }
        if self.inner_width() <= 0.0 {
            return Err(ImposeError::Config(format!(
                "Region {:.1}pt wide leaves no room inside a {:.1}pt margin",
                self.width, self.margin
            )));
        }
        if self.inner_height() < self.line_height() {
            return Err(ImposeError::Config(format!(
                "Region {:.1}pt high cannot hold a {:.1}pt line",
                self.height,
                self.line_height()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Body,
    Heading,
}

/// One line placed inside a region
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLine {
    /// Byte range of the drawn text (newlines excluded)
    pub start: usize,
    pub end: usize,
    pub kind: LineKind,
    /// Horizontal offset from the inner left edge
    pub x_offset: f32,
    /// Distance from the region top to the baseline
    pub baseline: f32,
    pub font_size: f32,
}

impl LaidOutLine {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Result of filling one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLayout {
    /// Cursor the region started from
    pub start: usize,
    /// Cursor to continue from
    pub end: usize,
    pub has_more: bool,
    pub lines: Vec<LaidOutLine>,
}

// =============================================================================
// Layout
// =============================================================================

/// Fill one region starting at byte offset `start`.
///
/// A line is emitted only if it fits entirely above the bottom margin. An
/// empty text, or a `start` at or past the end, yields no lines with
/// `end == start` and `has_more == false`.
pub fn layout_region<M: TextMeasure + ?Sized>(
    text: &str,
    start: usize,
    geometry: &RegionGeometry,
    measure: &M,
) -> RegionLayout {
    let len = text.len();
    if start >= len {
        return RegionLayout {
            start,
            end: start,
            has_more: false,
            lines: Vec::new(),
        };
    }

    let mut pos = start;
    while !text.is_char_boundary(pos) {
        pos += 1;
    }

    let bottom = geometry.height - geometry.margin;
    let mut used = geometry.margin;
    let mut lines = Vec::new();

    while pos < len {
        let at_line_start = pos == 0 || text[..pos].ends_with('\n');

        let heading = if at_line_start {
            heading_line(text, pos, geometry, measure)
        } else {
            None
        };
        if let Some(heading) = heading {
            if used + geometry.heading_line_height() <= bottom {
                lines.push(LaidOutLine {
                    start: heading.start,
                    end: heading.end,
                    kind: LineKind::Heading,
                    x_offset: (geometry.inner_width() - heading.width) / 2.0,
                    baseline: used + geometry.heading_size(),
                    font_size: geometry.heading_size(),
                });
                used += geometry.heading_line_height();
                pos = heading.next;
                continue;
            }
            // An empty region that cannot take the heading sets it as body text
            if !lines.is_empty() {
                break;
            }
        }

        if used + geometry.line_height() > bottom {
            break;
        }

        let paragraph_start = pos == 0 || text[..pos].ends_with(PARAGRAPH_BREAK);
        let indent = if paragraph_start {
            measure.text_width(&" ".repeat(geometry.indent_spaces), geometry.font_size)
        } else {
            0.0
        };

        let (content_end, next) = break_line(
            text,
            pos,
            geometry.inner_width() - indent,
            geometry.font_size,
            measure,
        );
        lines.push(LaidOutLine {
            start: pos,
            end: content_end,
            kind: LineKind::Body,
            x_offset: indent,
            baseline: used + geometry.font_size,
            font_size: geometry.font_size,
        });
        used += geometry.line_height();
        pos = next;
    }

    RegionLayout {
        start,
        end: pos,
        has_more: pos < len,
        lines,
    }
}

/// Lay out the whole text, one region after another, with the same geometry
pub fn paginate<M: TextMeasure + ?Sized>(
    text: &str,
    geometry: &RegionGeometry,
    measure: &M,
) -> Result<Vec<RegionLayout>> {
    paginate_with(text, |_| *geometry, measure)
}

/// Lay out the whole text; `geometry_for(i)` supplies the geometry of the
/// `i`-th region.
///
/// Fails instead of looping when a region cannot take a single line.
pub fn paginate_with<M, G>(text: &str, mut geometry_for: G, measure: &M) -> Result<Vec<RegionLayout>>
where
    M: TextMeasure + ?Sized,
    G: FnMut(usize) -> RegionGeometry,
{
    let mut regions = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let geometry = geometry_for(regions.len());
        geometry.validate()?;

        let region = layout_region(text, cursor, &geometry, measure);
        if region.end <= cursor {
            return Err(ImposeError::Layout(format!(
                "Region {} made no progress at byte {}",
                regions.len() + 1,
                cursor
            )));
        }
        debug!(
            "Region {}: bytes {}..{} in {} lines",
            regions.len() + 1,
            region.start,
            region.end,
            region.lines.len()
        );
        cursor = region.end;
        regions.push(region);
    }

    Ok(regions)
}

// =============================================================================
// Line Breaking
// =============================================================================

/// Find where the line starting at `pos` ends.
///
/// Returns `(content_end, next)`: the drawn text is `pos..content_end` and the
/// following line starts at `next`. A newline ends the line (`"\n\n"` is
/// consumed whole). A space that overflows ends the line and is dropped. On
/// any other overflow the line breaks after the last space that is not its
/// first character, otherwise before the overflowing character. A first
/// character that alone overflows still makes a one-character line.
fn break_line<M: TextMeasure + ?Sized>(
    text: &str,
    pos: usize,
    available: f32,
    size: f32,
    measure: &M,
) -> (usize, usize) {
    let mut width = 0.0;
    let mut after_space: Option<usize> = None;

    for (offset, ch) in text[pos..].char_indices() {
        let idx = pos + offset;

        if ch == '\n' {
            let next = if text[idx..].starts_with(PARAGRAPH_BREAK) {
                idx + PARAGRAPH_BREAK.len()
            } else {
                idx + 1
            };
            return (idx, next);
        }

        let w = measure.char_width(ch, size);
        if width + w > available {
            if idx == pos {
                let next = idx + ch.len_utf8();
                return (next, next);
            }
            if ch == ' ' {
                return (idx, idx + 1);
            }
            if let Some(brk) = after_space {
                return (brk, brk);
            }
            return (idx, idx);
        }

        width += w;
        if ch == ' ' && idx > pos {
            after_space = Some(idx + 1);
        }
    }

    (text.len(), text.len())
}

struct HeadingLine {
    start: usize,
    end: usize,
    next: usize,
    width: f32,
}

/// A chapter marker line starting at `pos`, if it fits on one line at the
/// heading size
fn heading_line<M: TextMeasure + ?Sized>(
    text: &str,
    pos: usize,
    geometry: &RegionGeometry,
    measure: &M,
) -> Option<HeadingLine> {
    let rest = &text[pos..];
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let line = &rest[..line_len];
    if !is_chapter_heading(line) {
        return None;
    }

    let trimmed = line.trim();
    let width = measure.text_width(trimmed, geometry.heading_size());
    if width > geometry.inner_width() {
        return None;
    }

    let start = pos + (line.len() - line.trim_start().len());
    let line_end = pos + line_len;
    let next = if text[line_end..].starts_with(PARAGRAPH_BREAK) {
        line_end + PARAGRAPH_BREAK.len()
    } else if text[line_end..].starts_with('\n') {
        line_end + 1
    } else {
        line_end
    };

    Some(HeadingLine {
        start,
        end: start + trimmed.len(),
        next,
        width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ApproxMetrics;

    fn geometry(width: f32, height: f32) -> RegionGeometry {
        RegionGeometry {
            width,
            height,
            margin: 10.0,
            font_size: 10.0,
            line_spacing: 3.0,
            indent_spaces: 4,
            heading_scale: 1.5,
        }
    }

    #[test]
    fn test_empty_text() {
        let layout = layout_region("", 0, &geometry(100.0, 100.0), &ApproxMetrics);
        assert_eq!(layout.end, 0);
        assert!(!layout.has_more);
        assert!(layout.lines.is_empty());
    }

    #[test]
    fn test_start_past_end() {
        let layout = layout_region("abc", 7, &geometry(100.0, 100.0), &ApproxMetrics);
        assert_eq!(layout.end, 7);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_breaks_after_last_space() {
        // Inner width 80pt = 16 chars; indent takes 4 on the first line
        let text = "aaaa bbbb cccc dddd";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        assert_eq!(layout.lines[0].text(text), "aaaa bbbb ");
        assert_eq!(layout.lines[0].x_offset, 20.0);
        assert_eq!(layout.lines[1].text(text), "cccc dddd");
        assert_eq!(layout.lines[1].x_offset, 0.0);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_overflowing_space_ends_line() {
        // Inner width 40pt = 8 chars; "aaa bbbb" fills it exactly
        let g = RegionGeometry {
            indent_spaces: 0,
            ..geometry(60.0, 200.0)
        };
        let text = "aaa bbbb cc";
        let layout = layout_region(text, 0, &g, &ApproxMetrics);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[0].text(text), "aaa bbbb");
        assert_eq!(layout.lines[1].start, 9);
        assert_eq!(layout.lines[1].text(text), "cc");
    }

    #[test]
    fn test_heading_whitespace_skipped() {
        let text = "  第一章  \n\n正文";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        assert_eq!(layout.lines[0].kind, LineKind::Heading);
        assert_eq!(layout.lines[0].text(text), "第一章");
        assert_eq!(layout.lines[1].start, text.find("正文").unwrap());
    }

    #[test]
    fn test_breaks_before_overflow_without_space() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        // 12 chars after the indent, then 16
        assert_eq!(layout.lines[0].text(text), "abcdefghijkl");
        assert_eq!(layout.lines[1].text(text), "mnopqrstuvwxyz");
    }

    #[test]
    fn test_leading_space_not_a_break() {
        // The space opening the line is not a break point
        let text = " abcdefghijklmnopqrst";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        assert_eq!(layout.lines[0].text(text), " abcdefghijk");
    }

    #[test]
    fn test_paragraph_break_consumed() {
        let text = "one\n\ntwo";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[0].text(text), "one");
        assert_eq!(layout.lines[1].start, 5);
        // Second paragraph is indented
        assert_eq!(layout.lines[1].x_offset, 20.0);
    }

    #[test]
    fn test_single_newline_no_indent() {
        let text = "one\ntwo";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        assert_eq!(layout.lines[1].text(text), "two");
        assert_eq!(layout.lines[1].x_offset, 0.0);
    }

    #[test]
    fn test_no_clipped_lines() {
        // Inner height 40pt holds three 13pt lines
        let text = "a\nb\nc\nd\ne";
        let layout = layout_region(text, 0, &geometry(100.0, 60.0), &ApproxMetrics);
        assert_eq!(layout.lines.len(), 3);
        assert!(layout.has_more);
        assert_eq!(layout.end, 6);
        let last = layout.lines.last().unwrap();
        assert!(last.baseline + 3.0 <= 50.0);
    }

    #[test]
    fn test_narrow_region_forces_progress() {
        let g = geometry(22.0, 200.0);
        let text = "中文";
        let layout = layout_region(text, 0, &g, &ApproxMetrics);
        assert_eq!(layout.lines[0].text(text), "中");
        assert_eq!(layout.lines[1].text(text), "文");
        assert!(!layout.has_more);
    }

    #[test]
    fn test_heading_centred() {
        let text = "第一章\n\n正文";
        let layout = layout_region(text, 0, &geometry(100.0, 200.0), &ApproxMetrics);
        let heading = &layout.lines[0];
        assert_eq!(heading.kind, LineKind::Heading);
        assert_eq!(heading.text(text), "第一章");
        assert_eq!(heading.font_size, 15.0);
        assert!((heading.x_offset - (80.0 - 45.0) / 2.0).abs() < 0.001);
        assert_eq!(layout.lines[1].kind, LineKind::Body);
        assert_eq!(layout.lines[1].text(text), "正文");
    }

    #[test]
    fn test_paginate_covers_text() {
        let text = "The quick brown fox jumps over the lazy dog.\n\nSecond paragraph here.";
        let regions = paginate(text, &geometry(60.0, 50.0), &ApproxMetrics).unwrap();
        assert!(regions.len() > 1);
        assert_eq!(regions[0].start, 0);
        for pair in regions.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(regions.last().unwrap().end, text.len());
        assert!(!regions.last().unwrap().has_more);
    }

    #[test]
    fn test_paginate_rejects_tiny_region() {
        let result = paginate("text", &geometry(100.0, 25.0), &ApproxMetrics);
        assert!(matches!(result, Err(ImposeError::Config(_))));
    }
}
