//! Content sources: image files, plain text and EPUB books

mod compose;
mod epub;
mod raster;
mod scan;
mod text;

pub use compose::compose_grid;
pub use epub::{html_blocks, read_epub};
pub use raster::*;
pub use scan::*;
pub use text::{normalize_text, read_text};
