//! Output page construction
//!
//! A [`PageBuilder`] collects content stream operations and the resources
//! they name, then writes one page dictionary under the shared page tree.

use crate::constants::{PAGE_NUMBER_BOTTOM_OFFSET, PAGE_NUMBER_FONT_SIZE, PAGE_NUMBER_RIGHT_OFFSET};
use crate::flow::TextMeasure;
use crate::layout::Rect;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::PdfFont;

/// One output page under construction
pub struct PageBuilder {
    width: f32,
    height: f32,
    content_ops: Vec<String>,
    xobjects: Dictionary,
    fonts: Dictionary,
    image_count: usize,
}

impl PageBuilder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
            fonts: Dictionary::new(),
            image_count: 0,
        }
    }

    /// Paint an image XObject into `rect`
    pub fn draw_image(&mut self, xobject_id: ObjectId, rect: &Rect) {
        let name = format!("Im{}", self.image_count);
        self.image_count += 1;
        self.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        self.content_ops.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            rect.width, rect.height, rect.x, rect.y, name
        ));
    }

    /// Show `text` with its baseline starting at `(x, y)`
    pub fn draw_text(&mut self, font: &mut PdfFont, size: f32, x: f32, y: f32, text: &str) {
        let name = self.use_font(font);
        let operand = font.encode(text);
        self.content_ops.push(format!(
            "BT /{} {} Tf {} {} Td {} Tj ET\n",
            name, size, x, y, operand
        ));
    }

    /// Page number at the bottom-right corner of `rect`
    pub fn draw_page_number(&mut self, font: &mut PdfFont, rect: &Rect, number: i64) {
        let label = number.to_string();
        let text_width = font.text_width(&label, PAGE_NUMBER_FONT_SIZE);
        let x = rect.right() - text_width - PAGE_NUMBER_RIGHT_OFFSET;
        let y = rect.y + PAGE_NUMBER_BOTTOM_OFFSET;
        self.draw_text(font, PAGE_NUMBER_FONT_SIZE, x, y, &label);
    }

    /// Append raw content stream operations
    pub fn push_ops(&mut self, ops: String) {
        if !ops.is_empty() {
            self.content_ops.push(ops);
        }
    }

    fn use_font(&mut self, font: &PdfFont) -> String {
        let name = format!("F{}", font.id().0);
        self.fonts
            .set(name.as_bytes(), Object::Reference(font.id()));
        name
    }

    /// Write the content stream and page dictionary
    pub fn finish(self, output: &mut Document, parent_pages_id: ObjectId) -> ObjectId {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(parent_pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width),
                Object::Real(self.height),
            ]),
        );

        let mut resources = Dictionary::new();
        if !self.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(self.xobjects));
        }
        if !self.fonts.is_empty() {
            resources.set("Font", Object::Dictionary(self.fonts));
        }

        let content = self.content_ops.join("");
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        output.add_object(page_dict)
    }
}
