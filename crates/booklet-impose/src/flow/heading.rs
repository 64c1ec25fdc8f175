//! Chapter heading detection

use regex::Regex;
use std::sync::LazyLock;

/// `第` + numerals + unit, or a bare number + unit, at the start of a line
static CHAPTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t\u{3000}]*(?:第[0-9０-９零〇一二三四五六七八九十百千万两]+|[0-9０-９]+)[章回节卷部篇集]",
    )
    .expect("chapter marker pattern is valid")
});

/// True when `line` opens with a chapter marker such as `第十二章` or `3回`
pub fn is_chapter_heading(line: &str) -> bool {
    CHAPTER_MARKER.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_numerals() {
        assert!(is_chapter_heading("第一章 开端"));
        assert!(is_chapter_heading("第二十三回"));
        assert!(is_chapter_heading("　第三卷"));
    }

    #[test]
    fn test_digits() {
        assert!(is_chapter_heading("第12章"));
        assert!(is_chapter_heading("12章 归来"));
    }

    #[test]
    fn test_not_headings() {
        assert!(!is_chapter_heading("他说第一章很好"));
        assert!(!is_chapter_heading("第一"));
        assert!(!is_chapter_heading("Chapter 1"));
        assert!(!is_chapter_heading(""));
    }
}
