//! Fonts for text pages and labels
//!
//! The built-in Helvetica covers Latin text through WinAnsi. A TrueType file
//! is embedded as a Type0 font with Identity-H encoding so CJK text renders:
//! every BMP code unit is its own CID, a CIDToGIDMap maps CIDs to glyphs and
//! an identity ToUnicode CMap keeps the text extractable.

use crate::flow::{HelveticaMetrics, TextMeasure};
use crate::source::require_file;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeSet;
use std::path::Path;
use ttf_parser::{Face, FaceParsingError, GlyphId};

use super::xobject::deflate;

const IDENTITY_TO_UNICODE: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS)
/Supplement 0
>> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0000> <FFFF> <0000>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

/// A font registered in the output document
pub struct PdfFont {
    id: ObjectId,
    kind: FontKind,
}

enum FontKind {
    Helvetica,
    TrueType(Box<EmbeddedFont>),
}

struct EmbeddedFont {
    data: Vec<u8>,
    base_name: String,
    /// Glyph index for every BMP code unit
    glyphs: Vec<u16>,
    /// Advance per glyph in thousandths of an em
    advances: Vec<u16>,
    ascent: i64,
    descent: i64,
    used: BTreeSet<u16>,
}

impl EmbeddedFont {
    fn parse(data: Vec<u8>, base_name: String) -> std::result::Result<Self, FaceParsingError> {
        let face = Face::parse(&data, 0)?;
        let scale = 1000.0 / f32::from(face.units_per_em().max(1));

        let advances = (0..face.number_of_glyphs())
            .map(|gid| {
                let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0);
                (f32::from(advance) * scale).round() as u16
            })
            .collect();

        let glyphs = (0u32..=0xFFFF)
            .map(|cid| {
                char::from_u32(cid)
                    .and_then(|ch| face.glyph_index(ch))
                    .map_or(0, |gid| gid.0)
            })
            .collect();

        let ascent = (f32::from(face.ascender()) * scale).round() as i64;
        let descent = (f32::from(face.descender()) * scale).round() as i64;

        Ok(Self {
            data,
            base_name,
            glyphs,
            advances,
            ascent,
            descent,
            used: BTreeSet::new(),
        })
    }

    fn width(&self, cid: u16) -> u16 {
        let gid = self.glyphs[usize::from(cid)];
        self.advances.get(usize::from(gid)).copied().unwrap_or(0)
    }

    /// Two bytes per BMP code unit: the glyph index for that character
    fn cid_to_gid_map(&self) -> Vec<u8> {
        self.glyphs.iter().flat_map(|gid| gid.to_be_bytes()).collect()
    }

    /// `W` array entries `cid [width]`
    fn glyph_widths(&self) -> Vec<Object> {
        let mut widths = Vec::with_capacity(self.used.len() * 2);
        for &cid in &self.used {
            widths.push(Object::Integer(i64::from(cid)));
            widths.push(Object::Array(vec![Object::Integer(i64::from(self.width(cid)))]));
        }
        widths
    }
}

impl PdfFont {
    /// Built-in Helvetica, written to the document immediately
    pub fn helvetica(output: &mut Document) -> Self {
        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        Self {
            id: output.add_object(font_dict),
            kind: FontKind::Helvetica,
        }
    }

    /// Load a `.ttf` file for embedding.
    ///
    /// The font objects are written by [`PdfFont::finish`] once every string
    /// has been encoded, so glyph widths cover exactly the characters used.
    pub fn truetype(output: &mut Document, path: &Path) -> Result<Self> {
        require_file(path, &["ttf"])?;
        let data = std::fs::read(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let embedded = EmbeddedFont::parse(data, pdf_font_name(&stem)).map_err(|e| {
            ImposeError::Config(format!("Cannot load font {}: {}", path.display(), e))
        })?;

        Ok(Self {
            id: output.new_object_id(),
            kind: FontKind::TrueType(Box::new(embedded)),
        })
    }

    /// Helvetica, or the TrueType file when one is given
    pub fn load(output: &mut Document, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::truetype(output, path),
            None => Ok(Self::helvetica(output)),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Encode text as a PDF string operand for this font
    pub fn encode(&mut self, text: &str) -> String {
        match &mut self.kind {
            FontKind::Helvetica => encode_win_ansi(text),
            FontKind::TrueType(embedded) => {
                let mut hex = String::with_capacity(text.len() * 4 + 2);
                hex.push('<');
                for ch in text.chars() {
                    let cid = bmp_cid(ch);
                    embedded.used.insert(cid);
                    hex.push_str(&format!("{:04X}", cid));
                }
                hex.push('>');
                hex
            }
        }
    }

    /// Write the embedded font objects; nothing to do for Helvetica
    pub fn finish(self, output: &mut Document) -> Result<()> {
        let FontKind::TrueType(embedded) = self.kind else {
            return Ok(());
        };
        let embedded = *embedded;
        let name = embedded.base_name.clone().into_bytes();

        let mut file_dict = Dictionary::new();
        file_dict.set("Length1", Object::Integer(embedded.data.len() as i64));
        file_dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        let file_id = output.add_object(Stream::new(file_dict, deflate(&embedded.data)?));

        let mut descriptor = Dictionary::new();
        descriptor.set("Type", Object::Name(b"FontDescriptor".to_vec()));
        descriptor.set("FontName", Object::Name(name.clone()));
        descriptor.set("Flags", Object::Integer(4));
        descriptor.set(
            "FontBBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(-300),
                Object::Integer(1000),
                Object::Integer(1000),
            ]),
        );
        descriptor.set("ItalicAngle", Object::Integer(0));
        descriptor.set("Ascent", Object::Integer(embedded.ascent));
        descriptor.set("Descent", Object::Integer(embedded.descent));
        descriptor.set("CapHeight", Object::Integer(700));
        descriptor.set("StemV", Object::Integer(80));
        descriptor.set("FontFile2", Object::Reference(file_id));
        let descriptor_id = output.add_object(descriptor);

        let mut map_dict = Dictionary::new();
        map_dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        let map_data = deflate(&embedded.cid_to_gid_map())?;
        let map_id = output.add_object(Stream::new(map_dict, map_data));

        let mut system_info = Dictionary::new();
        system_info.set("Registry", Object::string_literal("Adobe"));
        system_info.set("Ordering", Object::string_literal("Identity"));
        system_info.set("Supplement", Object::Integer(0));

        let mut cid_font = Dictionary::new();
        cid_font.set("Type", Object::Name(b"Font".to_vec()));
        cid_font.set("Subtype", Object::Name(b"CIDFontType2".to_vec()));
        cid_font.set("BaseFont", Object::Name(name.clone()));
        cid_font.set("CIDSystemInfo", Object::Dictionary(system_info));
        cid_font.set("FontDescriptor", Object::Reference(descriptor_id));
        cid_font.set("DW", Object::Integer(1000));
        cid_font.set("W", Object::Array(embedded.glyph_widths()));
        cid_font.set("CIDToGIDMap", Object::Reference(map_id));
        let cid_font_id = output.add_object(cid_font);

        let to_unicode_id =
            output.add_object(Stream::new(Dictionary::new(), IDENTITY_TO_UNICODE.to_vec()));

        let mut type0 = Dictionary::new();
        type0.set("Type", Object::Name(b"Font".to_vec()));
        type0.set("Subtype", Object::Name(b"Type0".to_vec()));
        type0.set("BaseFont", Object::Name(name));
        type0.set("Encoding", Object::Name(b"Identity-H".to_vec()));
        type0.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );
        type0.set("ToUnicode", Object::Reference(to_unicode_id));
        output.objects.insert(self.id, Object::Dictionary(type0));
        Ok(())
    }
}

impl TextMeasure for PdfFont {
    fn char_width(&self, ch: char, size: f32) -> f32 {
        match &self.kind {
            FontKind::Helvetica => HelveticaMetrics.char_width(ch, size),
            FontKind::TrueType(_) if ch == '\n' => 0.0,
            FontKind::TrueType(embedded) => {
                f32::from(embedded.width(bmp_cid(ch))) * size / 1000.0
            }
        }
    }
}

// =============================================================================
// Encoding Helpers
// =============================================================================

/// Literal string in WinAnsi; characters outside Latin-1 become `?`
pub fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

/// Characters outside the BMP are drawn as `?`
fn bmp_cid(ch: char) -> u16 {
    u16::try_from(ch as u32).unwrap_or(u16::from(b'?'))
}

fn pdf_font_name(raw: &str) -> String {
    let name: String = raw
        .chars()
        .filter_map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                Some(ch)
            } else if ch.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect();
    if name.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        name
    }
}
