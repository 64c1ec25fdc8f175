//! Plain text input

use crate::types::*;
use std::path::Path;

/// Read a UTF-8 text file, dropping a byte-order mark and normalizing line
/// endings to `\n`
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        ImposeError::Input(format!("{} is not valid UTF-8: {}", path.display(), e))
    })?;
    let text = normalize_text(&text);

    if text.trim().is_empty() {
        return Err(ImposeError::Input(format!(
            "{} contains no text",
            path.display()
        )));
    }
    Ok(text)
}

/// Strip a BOM and turn `\r\n` / `\r` into `\n`
pub fn normalize_text(text: &str) -> String {
    text.trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_text("\u{feff}a\r\nb\rc"), "a\nb\nc");
    }
}
