//! Document output

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Save the imposed document, creating missing parent directories
pub fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    std::fs::write(path, writer)?;
    Ok(())
}
