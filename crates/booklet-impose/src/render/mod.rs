//! PDF rendering for imposed sheets
//!
//! This module handles the PDF-specific side of imposition:
//! - Image XObjects from decoded pictures
//! - Fonts (built-in Helvetica or an embedded TrueType file)
//! - Building output pages from drawing operations

mod font;
mod page;
mod xobject;

pub use font::{PdfFont, encode_win_ansi};
pub use page::PageBuilder;
pub use xobject::create_image_xobject;
