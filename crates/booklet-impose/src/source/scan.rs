//! Input discovery

use crate::types::*;
use std::path::{Path, PathBuf};

/// Recognized image file extensions (matched case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp", "webp"];

/// Check a path's extension against [`IMAGE_EXTENSIONS`]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Collect the images of a book.
///
/// A directory yields its image files sorted by file name (subdirectories
/// are not searched); a single image file yields itself.
pub fn collect_images(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(ImposeError::Input(format!(
            "{} does not exist",
            input.display()
        )));
    }

    if input.is_file() {
        if is_image_file(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        return Err(ImposeError::Input(format!(
            "{} is not a supported image ({})",
            input.display(),
            IMAGE_EXTENSIONS.join(", ")
        )));
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            images.push(path);
        }
    }

    if images.is_empty() {
        return Err(ImposeError::Input(format!(
            "No images found in {}",
            input.display()
        )));
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Make sure `input` is an existing file with one of `extensions`
pub fn require_file(input: &Path, extensions: &[&str]) -> Result<()> {
    if !input.is_file() {
        return Err(ImposeError::Input(format!(
            "{} is not a file",
            input.display()
        )));
    }

    let matches = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false);
    if !matches {
        return Err(ImposeError::Input(format!(
            "{} must have extension {}",
            input.display(),
            extensions.join(" or ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_case_insensitive() {
        assert!(is_image_file(Path::new("a/B.JPG")));
        assert!(is_image_file(Path::new("scan.TiFf")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_missing_input() {
        let result = collect_images(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(ImposeError::Input(_))));
    }
}
