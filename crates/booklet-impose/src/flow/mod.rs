//! Text flow into fixed-size regions
//!
//! - Width measurement behind [`TextMeasure`]
//! - Chapter heading detection
//! - The region paginator with its resumable byte cursor

mod heading;
mod measure;
mod paginator;

pub use heading::is_chapter_heading;
pub use measure::*;
pub use paginator::*;
