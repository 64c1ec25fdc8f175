//! Image XObjects
//!
//! Decoded images are written as 8-bit DeviceRGB samples, zlib-compressed
//! and tagged `FlateDecode`.

use crate::types::Result;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::DynamicImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

/// Add an image to the document as an XObject
pub fn create_image_xobject(output: &mut Document, image: &DynamicImage) -> Result<ObjectId> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let data = deflate(rgb.as_raw())?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));

    Ok(output.add_object(Stream::new(dict, data)))
}

/// zlib-compress a stream body
pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
