pub mod constants;
pub mod flow;
pub mod impose;
pub mod layout;
pub mod marks;
mod options;
pub mod render;
pub mod source;
mod stats;
mod types;

pub use impose::{
    impose_cover, impose_image_input, impose_images, impose_text, impose_text_input,
    read_text_input, save_pdf,
};
pub use options::*;
pub use stats::{calculate_statistics, text_statistics};
pub use types::*;
